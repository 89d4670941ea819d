//! Technical indicators.
//!
//! Pure functions over an ordered price series (oldest first). Each output
//! vector has the same length as its input; positions before the lookback
//! window fills are `f64::NAN`. Callers test validity with `is_nan()`.

pub mod sma;
pub mod ema;
pub mod rsi;
pub mod macd;
pub mod bollinger;
pub mod adx;

pub use adx::{adx, AdxSeries};
pub use bollinger::{bollinger, BollingerSeries};
pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use rsi::{rsi, rsi_wilder};
pub use sma::sma;
