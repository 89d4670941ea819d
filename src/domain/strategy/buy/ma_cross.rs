//! Moving-average golden-cross buy.

use crate::domain::bar::{closes, Bar};
use crate::domain::indicator::sma;
use crate::domain::signal::BuySignal;
use crate::domain::strategy::{BuyStrategy, StrategyContext};

/// Buys when the fast MA crosses above the slow MA.
#[derive(Debug, Clone)]
pub struct MaCrossBuy {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl MaCrossBuy {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        MaCrossBuy {
            fast_period,
            slow_period,
        }
    }
}

impl BuyStrategy for MaCrossBuy {
    fn name(&self) -> &'static str {
        "ma_cross_buy"
    }

    fn evaluate(&self, history: &[Bar], _ctx: &StrategyContext) -> BuySignal {
        // The slow MA's previous value first exists at slow_period + 1 bars.
        if history.len() < self.slow_period + 1 {
            return BuySignal::hold("insufficient history");
        }

        let close = closes(history);
        let ma_fast = sma(&close, self.fast_period);
        let ma_slow = sma(&close, self.slow_period);
        let i = close.len() - 1;
        let (prev_fast, curr_fast) = (ma_fast[i - 1], ma_fast[i]);
        let (prev_slow, curr_slow) = (ma_slow[i - 1], ma_slow[i]);
        if prev_slow.is_nan() || curr_slow.is_nan() {
            return BuySignal::hold("moving averages not ready");
        }

        if prev_fast <= prev_slow && curr_fast > curr_slow {
            let strength = ((curr_fast - curr_slow) / (curr_slow + 1e-8) * 10.0).min(1.0);
            return BuySignal::buy(
                strength,
                format!(
                    "MA{} crossed above MA{}",
                    self.fast_period, self.slow_period
                ),
            );
        }
        BuySignal::hold("no golden cross")
    }
}
