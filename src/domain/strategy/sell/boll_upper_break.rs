//! Upper Bollinger band touch sell.

use crate::domain::bar::{closes, Bar};
use crate::domain::indicator::bollinger;
use crate::domain::signal::SellSignal;
use crate::domain::strategy::{SellStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct BollUpperBreakSell {
    pub boll_period: usize,
    pub num_std: f64,
}

impl Default for BollUpperBreakSell {
    fn default() -> Self {
        BollUpperBreakSell {
            boll_period: 20,
            num_std: 2.0,
        }
    }
}

impl SellStrategy for BollUpperBreakSell {
    fn name(&self) -> &'static str {
        "boll_upper_break_sell"
    }

    fn evaluate(&self, history: &[Bar], ctx: &StrategyContext) -> SellSignal {
        if ctx.position <= 0 {
            return SellSignal::hold("no position");
        }
        if history.len() < self.boll_period {
            return SellSignal::hold("insufficient history");
        }

        let close = closes(history);
        let bands = bollinger(&close, self.boll_period, self.num_std);
        let i = close.len() - 1;
        let upper = bands.upper[i];
        if upper.is_nan() {
            return SellSignal::hold("bands not ready");
        }

        if close[i] >= upper {
            return SellSignal::sell(
                1.0,
                format!("close {:.2} at/above upper band {:.2}", close[i], upper),
            );
        }
        SellSignal::hold("under the upper band")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::test_bars::bars_from_closes;

    fn long_ctx() -> StrategyContext {
        StrategyContext {
            position: 100,
            avg_cost: 100.0,
            current_price: 130.0,
            high_since_entry: 130.0,
            holding_days: 10,
            entry_index: Some(0),
        }
    }

    #[test]
    fn spike_through_upper_band_sells() {
        // Quiet range then a vertical spike well outside two deviations.
        let mut closes = vec![100.0; 25];
        for (i, c) in closes.iter_mut().enumerate() {
            *c += (i % 3) as f64;
        }
        closes.push(115.0);
        let bars = bars_from_closes(&closes);
        let strat = BollUpperBreakSell::default();
        assert!(strat.evaluate(&bars, &long_ctx()).is_sell());
    }

    #[test]
    fn inside_band_holds() {
        let mut closes = vec![100.0; 25];
        for (i, c) in closes.iter_mut().enumerate() {
            *c += (i % 3) as f64;
        }
        let bars = bars_from_closes(&closes);
        let strat = BollUpperBreakSell::default();
        assert!(!strat.evaluate(&bars, &long_ctx()).is_sell());
    }
}
