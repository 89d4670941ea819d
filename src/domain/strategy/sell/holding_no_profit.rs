//! Time stop: exit a stale position that never went profitable.

use crate::domain::bar::Bar;
use crate::domain::signal::SellSignal;
use crate::domain::strategy::{SellStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct HoldingNoProfitSell {
    /// Minimum bars held before the time stop is considered.
    pub min_hold_days: usize,
}

impl HoldingNoProfitSell {
    pub fn new(min_hold_days: usize) -> Self {
        HoldingNoProfitSell { min_hold_days }
    }
}

impl SellStrategy for HoldingNoProfitSell {
    fn name(&self) -> &'static str {
        "holding_no_profit_sell"
    }

    fn evaluate(&self, history: &[Bar], ctx: &StrategyContext) -> SellSignal {
        if ctx.position <= 0 || ctx.avg_cost <= 0.0 {
            return SellSignal::hold("no position");
        }
        if ctx.holding_days < self.min_hold_days {
            return SellSignal::hold("within minimum hold");
        }
        let Some(bar) = history.last() else {
            return SellSignal::hold("no bars");
        };

        if bar.close <= ctx.avg_cost {
            return SellSignal::sell_at(
                bar.close,
                1.0,
                format!(
                    "held {} days without profit (close {:.2} <= cost {:.2})",
                    ctx.holding_days, bar.close, ctx.avg_cost
                ),
            );
        }
        SellSignal::hold("position profitable")
    }
}
