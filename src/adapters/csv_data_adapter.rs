//! CSV daily-bar adapter.
//!
//! Reads `{SYMBOL}_daily.csv` files with a `date,open,high,low,close,volume`
//! header, oldest rows in any order; output is sorted by date.

use crate::domain::bar::Bar;
use crate::domain::error::QuantsimError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}_daily.csv", symbol))
    }

    fn parse_field(
        record: &csv::StringRecord,
        index: usize,
        name: &str,
        symbol: &str,
    ) -> Result<f64, QuantsimError> {
        record
            .get(index)
            .ok_or_else(|| QuantsimError::Data {
                symbol: symbol.to_string(),
                reason: format!("missing {} column", name),
            })?
            .parse()
            .map_err(|e| QuantsimError::Data {
                symbol: symbol.to_string(),
                reason: format!("invalid {} value: {}", name, e),
            })
    }
}

impl DataPort for CsvDataAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, QuantsimError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(QuantsimError::NoData {
                symbol: symbol.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|e| QuantsimError::Data {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| QuantsimError::Data {
                symbol: symbol.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| QuantsimError::Data {
                symbol: symbol.to_string(),
                reason: "missing date column".into(),
            })?;
            let date =
                NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| QuantsimError::Data {
                    symbol: symbol.to_string(),
                    reason: format!("invalid date format: {}", e),
                })?;

            if start_date.is_some_and(|s| date < s) || end_date.is_some_and(|e| date > e) {
                continue;
            }

            bars.push(Bar {
                date,
                open: Self::parse_field(&record, 1, "open", symbol)?,
                high: Self::parse_field(&record, 2, "high", symbol)?,
                low: Self::parse_field(&record, 3, "low", symbol)?,
                close: Self::parse_field(&record, 4, "close", symbol)?,
                volume: Self::parse_field(&record, 5, "volume", symbol)?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, QuantsimError> {
        let entries = fs::read_dir(&self.base_path)?;

        const SUFFIX: &str = "_daily.csv";
        let mut symbols = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(SUFFIX) {
                symbols.push(symbol.to_string());
            }
        }
        symbols.sort();
        Ok(symbols)
    }
}
