//! Oversold rebound buy: Wilder-RSI hook plus MACD momentum turn.
//!
//! Three conditions must hold on the same bar:
//! 1. RSI(14) oversold and turning up: RSI < threshold and RSI > previous RSI.
//! 2. MACD green histogram shrinking: hist < 0 and hist > previous hist.
//! 3. DIF hooking upward: DIF > previous DIF and previous DIF <= the one before.

use crate::domain::bar::{closes, Bar};
use crate::domain::indicator::{macd, rsi_wilder};
use crate::domain::signal::BuySignal;
use crate::domain::strategy::{BuyStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct OversoldReboundBuy {
    pub rsi_period: usize,
    pub rsi_oversold_threshold: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for OversoldReboundBuy {
    fn default() -> Self {
        OversoldReboundBuy {
            rsi_period: 14,
            rsi_oversold_threshold: 30.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl OversoldReboundBuy {
    fn min_bars(&self) -> usize {
        (self.rsi_period + 2).max(self.macd_slow + self.macd_signal + 5)
    }
}

impl BuyStrategy for OversoldReboundBuy {
    fn name(&self) -> &'static str {
        "oversold_rebound_buy"
    }

    fn evaluate(&self, history: &[Bar], _ctx: &StrategyContext) -> BuySignal {
        if history.len() < self.min_bars() {
            return BuySignal::hold("insufficient history");
        }

        let close = closes(history);
        let i = close.len() - 1;

        let rsi_series = rsi_wilder(&close, self.rsi_period);
        let (rsi_t, rsi_prev) = (rsi_series[i], rsi_series[i - 1]);
        if rsi_t.is_nan() || rsi_prev.is_nan() {
            return BuySignal::hold("RSI not ready");
        }
        if !(rsi_t < self.rsi_oversold_threshold && rsi_t > rsi_prev) {
            return BuySignal::hold("no oversold RSI hook");
        }

        let m = macd(&close, self.macd_fast, self.macd_slow, self.macd_signal);
        let (hist_t, hist_prev) = (m.hist[i], m.hist[i - 1]);
        if !(hist_t < 0.0 && hist_t > hist_prev) {
            return BuySignal::hold("green histogram not shrinking");
        }

        let (dif_t, dif_prev, dif_prev2) = (m.dif[i], m.dif[i - 1], m.dif[i - 2]);
        if !(dif_t > dif_prev && dif_prev <= dif_prev2) {
            return BuySignal::hold("no upward DIF hook");
        }

        BuySignal::buy(
            1.0,
            "oversold rebound (RSI hook + shrinking green hist + DIF turn)",
        )
    }
}
