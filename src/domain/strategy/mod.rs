//! Strategy evaluators.
//!
//! Evaluators are split into two capability sets: [`BuyStrategy`] (Buy/Hold)
//! and [`SellStrategy`] (Sell/Hold). Each receives the bar history up to and
//! including the current bar — never future bars — plus the engine's position
//! context, and returns a fresh signal.

pub mod buy;
pub mod sell;
pub mod factory;

use crate::domain::bar::Bar;
use crate::domain::signal::{BuySignal, SellSignal};

/// Position context passed to every evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyContext {
    /// Current share count; 0 when flat.
    pub position: i64,
    /// Average cost basis; meaningful only while `position > 0`.
    pub avg_cost: f64,
    /// The current bar's close.
    pub current_price: f64,
    /// Highest bar-high observed since the last buy fill, through the
    /// previous bar and excluding the fill day itself. 0 until a later bar
    /// has closed.
    pub high_since_entry: f64,
    /// Bars held since entry; 0 on the entry day.
    pub holding_days: usize,
    /// Index of the entry bar within the history, while long.
    pub entry_index: Option<usize>,
}

impl StrategyContext {
    /// A flat (no position) context at the given price.
    pub fn flat(current_price: f64) -> Self {
        StrategyContext {
            position: 0,
            avg_cost: 0.0,
            current_price,
            high_since_entry: 0.0,
            holding_days: 0,
            entry_index: None,
        }
    }
}

/// Buy-side evaluator: can only recommend Buy or Hold.
pub trait BuyStrategy: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// `history` is oldest-first and includes the current bar as its last
    /// element. Insufficient history yields a Hold with a diagnostic reason.
    fn evaluate(&self, history: &[Bar], ctx: &StrategyContext) -> BuySignal;
}

/// Sell-side evaluator: can only recommend Sell or Hold.
pub trait SellStrategy: std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn evaluate(&self, history: &[Bar], ctx: &StrategyContext) -> SellSignal;
}

#[cfg(test)]
pub(crate) mod test_bars {
    use super::Bar;
    use chrono::NaiveDate;

    /// Flat bars (high = low = close) from a close series, one per day.
    pub fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    /// Bars with explicit (high, low, close) per day.
    pub fn bars_from_hlc(hlc: &[(f64, f64, f64)]) -> Vec<Bar> {
        hlc.iter()
            .enumerate()
            .map(|(i, &(high, low, close))| Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high,
                low,
                close,
                volume: 1000.0,
            })
            .collect()
    }
}
