//! Result persistence port trait.

use crate::domain::engine::BacktestResult;
use crate::domain::error::QuantsimError;

pub trait LedgerPort {
    /// Persists the trades and equity curve of a finished run. Returns a
    /// human-readable location (a file path for file-backed adapters).
    fn write_result(&self, result: &BacktestResult) -> Result<String, QuantsimError>;
}
