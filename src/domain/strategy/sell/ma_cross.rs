//! Moving-average death-cross sell.

use crate::domain::bar::{closes, Bar};
use crate::domain::indicator::sma;
use crate::domain::signal::SellSignal;
use crate::domain::strategy::{SellStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct MaCrossSell {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl MaCrossSell {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        MaCrossSell {
            fast_period,
            slow_period,
        }
    }
}

impl SellStrategy for MaCrossSell {
    fn name(&self) -> &'static str {
        "ma_cross_sell"
    }

    fn evaluate(&self, history: &[Bar], ctx: &StrategyContext) -> SellSignal {
        if ctx.position <= 0 {
            return SellSignal::hold("no position");
        }
        if history.len() < self.slow_period + 1 {
            return SellSignal::hold("insufficient history");
        }

        let close = closes(history);
        let fast = sma(&close, self.fast_period);
        let slow = sma(&close, self.slow_period);
        let i = close.len() - 1;
        if fast[i - 1].is_nan() || slow[i - 1].is_nan() {
            return SellSignal::hold("averages not ready");
        }

        let crossed = fast[i - 1] >= slow[i - 1] && fast[i] < slow[i];
        if !crossed {
            return SellSignal::hold("no death cross");
        }

        SellSignal::sell(
            1.0,
            format!(
                "death cross MA{} under MA{}",
                self.fast_period, self.slow_period
            ),
        )
    }
}
