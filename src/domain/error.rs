//! Domain error types.

/// Top-level error type for quantsim.
#[derive(Debug, thiserror::Error)]
pub enum QuantsimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy name: {name}")]
    UnknownStrategy { name: String },

    #[error("at least one buy strategy is required")]
    NoBuyStrategies,

    #[error("at least one sell strategy is required")]
    NoSellStrategies,

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("data error for {symbol}: {reason}")]
    Data { symbol: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&QuantsimError> for std::process::ExitCode {
    fn from(err: &QuantsimError) -> Self {
        let code: u8 = match err {
            QuantsimError::Io(_) => 1,
            QuantsimError::ConfigParse { .. }
            | QuantsimError::ConfigMissing { .. }
            | QuantsimError::ConfigInvalid { .. } => 2,
            QuantsimError::UnknownStrategy { .. }
            | QuantsimError::NoBuyStrategies
            | QuantsimError::NoSellStrategies => 3,
            QuantsimError::NoData { .. } | QuantsimError::Data { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = QuantsimError::ConfigMissing {
            section: "backtest".into(),
            key: "initial_capital".into(),
        };
        assert_eq!(err.to_string(), "missing config key [backtest] initial_capital");

        let err = QuantsimError::UnknownStrategy {
            name: "bogus_buy".into(),
        };
        assert_eq!(err.to_string(), "unknown strategy name: bogus_buy");

        assert_eq!(
            QuantsimError::NoBuyStrategies.to_string(),
            "at least one buy strategy is required"
        );
    }
}
