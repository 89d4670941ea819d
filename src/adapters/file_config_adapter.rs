//! INI file configuration adapter.
//!
//! Typed lookups degrade gracefully: a missing or unparsable value yields the
//! caller's default, and only a file that cannot be read or parsed at all is
//! an error.

use crate::domain::error::QuantsimError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QuantsimError> {
        let mut config = Ini::new();
        config
            .load(path.as_ref())
            .map_err(|reason| QuantsimError::ConfigParse {
                file: path.as_ref().display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, QuantsimError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| QuantsimError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parsed<T: std::str::FromStr>(&self, section: &str, key: &str) -> Option<T> {
        self.config
            .get(section, key)
            .and_then(|v| v.trim().parse().ok())
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.parsed(section, key).unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.parsed(section, key).unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.config.get(section, key).as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => true,
            Some("1") => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("no") => false,
            Some("0") => false,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_sections() {
        let content = r#"
[backtest]
symbols = AAPL
initial_capital = 100000.0
strategy_name = Oversold Rebound

[params]
fast_period = 5
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("backtest", "strategy_name"),
            Some("Oversold Rebound".to_string())
        );
        assert_eq!(adapter.get_int("params", "fast_period", 0), 5);
        assert_eq!(
            adapter.get_double("backtest", "initial_capital", 0.0),
            100000.0
        );
    }

    #[test]
    fn missing_key_returns_none_or_default() {
        let adapter = FileConfigAdapter::from_string("[backtest]\nsymbols = AAPL\n").unwrap();
        assert_eq!(adapter.get_string("backtest", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
        assert_eq!(adapter.get_int("backtest", "missing", 42), 42);
        assert_eq!(adapter.get_double("backtest", "missing", 9.5), 9.5);
    }

    #[test]
    fn non_numeric_value_falls_back_to_default() {
        let adapter = FileConfigAdapter::from_string("[params]\nfast_period = abc\n").unwrap();
        assert_eq!(adapter.get_int("params", "fast_period", 7), 7);
        assert_eq!(adapter.get_double("params", "fast_period", 7.5), 7.5);
    }

    #[test]
    fn bool_parsing() {
        let adapter =
            FileConfigAdapter::from_string("[x]\na = true\nb = no\nc = 1\nd = junk\n").unwrap();
        assert!(adapter.get_bool("x", "a", false));
        assert!(!adapter.get_bool("x", "b", true));
        assert!(adapter.get_bool("x", "c", false));
        assert!(adapter.get_bool("x", "d", true));
        assert!(!adapter.get_bool("x", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[backtest]\nsymbols = MSFT\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("backtest", "symbols"),
            Some("MSFT".to_string())
        );
    }

    #[test]
    fn from_file_error_carries_the_path() {
        let err = FileConfigAdapter::from_file("/nonexistent/config.ini").unwrap_err();
        assert!(matches!(err, QuantsimError::ConfigParse { .. }));
        assert!(err.to_string().contains("/nonexistent/config.ini"));
    }
}
