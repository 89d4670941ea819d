//! Fixed-percentage stop loss against the average cost.

use crate::domain::bar::Bar;
use crate::domain::signal::SellSignal;
use crate::domain::strategy::{SellStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct StopLossPctSell {
    /// Loss percentage that triggers the exit, e.g. 8.0 for -8%.
    pub stop_loss_pct: f64,
}

impl StopLossPctSell {
    pub fn new(stop_loss_pct: f64) -> Self {
        StopLossPctSell { stop_loss_pct }
    }
}

impl SellStrategy for StopLossPctSell {
    fn name(&self) -> &'static str {
        "stop_loss_pct_sell"
    }

    fn evaluate(&self, _history: &[Bar], ctx: &StrategyContext) -> SellSignal {
        if ctx.position <= 0 || ctx.avg_cost <= 0.0 {
            return SellSignal::hold("no position");
        }

        let pnl_pct = (ctx.current_price - ctx.avg_cost) / ctx.avg_cost * 100.0;
        if pnl_pct <= -self.stop_loss_pct {
            return SellSignal::sell(
                1.0,
                format!("stop loss hit: {:.2}% <= -{:.2}%", pnl_pct, self.stop_loss_pct),
            );
        }
        SellSignal::hold(format!("pnl {:.2}% above stop", pnl_pct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(avg_cost: f64, price: f64) -> StrategyContext {
        StrategyContext {
            position: 100,
            avg_cost,
            current_price: price,
            high_since_entry: avg_cost,
            holding_days: 3,
            entry_index: Some(0),
        }
    }

    #[test]
    fn loss_beyond_stop_sells() {
        let strat = StopLossPctSell::new(8.0);
        let sig = strat.evaluate(&[], &ctx(100.0, 91.0));
        assert!(sig.is_sell());
        assert!(sig.price.is_none());
    }

    #[test]
    fn loss_exactly_at_stop_sells() {
        let strat = StopLossPctSell::new(8.0);
        assert!(strat.evaluate(&[], &ctx(100.0, 92.0)).is_sell());
    }

    #[test]
    fn small_loss_holds() {
        let strat = StopLossPctSell::new(8.0);
        assert!(!strat.evaluate(&[], &ctx(100.0, 95.0)).is_sell());
    }

    #[test]
    fn profit_holds() {
        let strat = StopLossPctSell::new(8.0);
        assert!(!strat.evaluate(&[], &ctx(100.0, 120.0)).is_sell());
    }

    #[test]
    fn flat_position_holds() {
        let strat = StopLossPctSell::new(8.0);
        assert!(!strat.evaluate(&[], &StrategyContext::flat(50.0)).is_sell());
    }
}
