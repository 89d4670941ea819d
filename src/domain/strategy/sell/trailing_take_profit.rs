//! Trailing take profit from the post-entry high-water mark.
//!
//! The exit level is `high_since_entry * (1 - pullback_pct / 100)`. The
//! high-water mark excludes the entry day, so the stop cannot trigger off the
//! entry bar's own range. When the bar's low reaches the level, the signal
//! carries that level as the proposed fill price.

use crate::domain::bar::Bar;
use crate::domain::signal::SellSignal;
use crate::domain::strategy::{SellStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct TrailingTakeProfitSell {
    /// Pullback from the high-water mark that triggers the exit, in percent.
    pub pullback_pct: f64,
}

impl TrailingTakeProfitSell {
    pub fn new(pullback_pct: f64) -> Self {
        TrailingTakeProfitSell { pullback_pct }
    }
}

impl SellStrategy for TrailingTakeProfitSell {
    fn name(&self) -> &'static str {
        "trailing_take_profit_sell"
    }

    fn evaluate(&self, history: &[Bar], ctx: &StrategyContext) -> SellSignal {
        if ctx.position <= 0 {
            return SellSignal::hold("no position");
        }
        // High-water mark is only established from the day after entry.
        if ctx.high_since_entry <= 0.0 {
            return SellSignal::hold("high-water mark not established");
        }
        let Some(bar) = history.last() else {
            return SellSignal::hold("no bars");
        };

        let exit_price = ctx.high_since_entry * (1.0 - self.pullback_pct / 100.0);
        if bar.low <= exit_price {
            return SellSignal::sell_at(
                exit_price,
                1.0,
                format!(
                    "trailing stop: pullback {:.1}% from high {:.2}",
                    self.pullback_pct, ctx.high_since_entry
                ),
            );
        }
        SellSignal::hold("above trailing stop")
    }
}
