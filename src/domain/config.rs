//! Backtest settings read through the [`ConfigPort`] seam.
//!
//! Validates all fields before any run starts so a bad config fails fast with
//! a section/key diagnostic instead of surfacing mid-simulation.

use crate::domain::error::QuantsimError;
use crate::domain::strategy::factory::StrategyParams;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct BacktestSettings {
    /// Symbols to run; empty means every symbol the data source offers.
    pub symbols: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub initial_capital: f64,
    pub slippage_pct: f64,
    pub commission_per_share: f64,
    pub strategy_name: String,
    pub buy_strategies: Vec<String>,
    pub sell_strategies: Vec<String>,
    pub params: StrategyParams,
    pub data_dir: String,
    pub results_dir: String,
}

impl BacktestSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, QuantsimError> {
        let settings = BacktestSettings {
            symbols: parse_list(config.get_string("backtest", "symbols")),
            start_date: parse_date(config, "start_date")?,
            end_date: parse_date(config, "end_date")?,
            initial_capital: config.get_double("backtest", "initial_capital", 100_000.0),
            slippage_pct: config.get_double("backtest", "slippage_pct", 0.001),
            commission_per_share: config.get_double("backtest", "commission_per_share", 0.005),
            strategy_name: config
                .get_string("backtest", "strategy_name")
                .unwrap_or_else(|| "unnamed".to_string()),
            buy_strategies: parse_list(config.get_string("backtest", "buy")),
            sell_strategies: parse_list(config.get_string("backtest", "sell")),
            params: read_params(config),
            data_dir: config
                .get_string("params", "data_dir")
                .unwrap_or_else(|| "data".to_string()),
            results_dir: config
                .get_string("params", "results_dir")
                .unwrap_or_else(|| "results".to_string()),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), QuantsimError> {
        if self.initial_capital <= 0.0 {
            return Err(invalid("initial_capital", "must be positive"));
        }
        if self.slippage_pct < 0.0 {
            return Err(invalid("slippage_pct", "must be non-negative"));
        }
        if self.commission_per_share < 0.0 {
            return Err(invalid("commission_per_share", "must be non-negative"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start >= end {
                return Err(invalid("start_date", "start_date must be before end_date"));
            }
        }
        if self.buy_strategies.is_empty() {
            return Err(QuantsimError::NoBuyStrategies);
        }
        if self.sell_strategies.is_empty() {
            return Err(QuantsimError::NoSellStrategies);
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> QuantsimError {
    QuantsimError::ConfigInvalid {
        section: "backtest".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_list(value: Option<String>) -> Vec<String> {
    value
        .map(|s| {
            s.split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<Option<NaiveDate>, QuantsimError> {
    match config.get_string("backtest", key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| QuantsimError::ConfigInvalid {
                section: "backtest".to_string(),
                key: key.to_string(),
                reason: "invalid date format (expected YYYY-MM-DD)".to_string(),
            }),
    }
}

fn read_params(config: &dyn ConfigPort) -> StrategyParams {
    let defaults = StrategyParams::default();
    StrategyParams {
        fast_period: config.get_int("params", "fast_period", defaults.fast_period as i64) as usize,
        slow_period: config.get_int("params", "slow_period", defaults.slow_period as i64) as usize,
        rsi_period: config.get_int("params", "rsi_period", defaults.rsi_period as i64) as usize,
        oversold_threshold: config.get_double(
            "params",
            "oversold_threshold",
            defaults.oversold_threshold,
        ),
        stop_loss_pct: config.get_double("params", "stop_loss_pct", defaults.stop_loss_pct),
        trailing_pullback_pct: config.get_double(
            "params",
            "trailing_pullback_pct",
            defaults.trailing_pullback_pct,
        ),
        min_hold_days: config.get_int("params", "min_hold_days", defaults.min_hold_days as i64)
            as usize,
    }
}
