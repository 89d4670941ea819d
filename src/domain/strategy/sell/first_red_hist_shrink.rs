//! First shrink of the red MACD histogram since entry.
//!
//! While the histogram is positive, the first bar where it contracts versus
//! the previous bar marks fading momentum; the position exits at the close.
//! Later shrinks are ignored so the evaluator fires at most once per trade.

use crate::domain::bar::{closes, Bar};
use crate::domain::indicator::macd;
use crate::domain::signal::SellSignal;
use crate::domain::strategy::{SellStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct FirstRedHistShrinkSell {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for FirstRedHistShrinkSell {
    fn default() -> Self {
        FirstRedHistShrinkSell {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl FirstRedHistShrinkSell {
    fn shrinks(hist: &[f64], i: usize) -> bool {
        i >= 1 && hist[i] > 0.0 && hist[i - 1] > 0.0 && hist[i] < hist[i - 1]
    }
}

impl SellStrategy for FirstRedHistShrinkSell {
    fn name(&self) -> &'static str {
        "first_red_hist_shrink_sell"
    }

    fn evaluate(&self, history: &[Bar], ctx: &StrategyContext) -> SellSignal {
        if ctx.position <= 0 {
            return SellSignal::hold("no position");
        }
        let Some(entry) = ctx.entry_index else {
            return SellSignal::hold("no entry bar");
        };
        let i = history.len() - 1;
        if i <= entry {
            return SellSignal::hold("entry day");
        }

        let close = closes(history);
        let m = macd(&close, self.macd_fast, self.macd_slow, self.macd_signal);
        if !Self::shrinks(&m.hist, i) {
            return SellSignal::hold("red histogram not shrinking");
        }
        // Only the first shrink since entry counts.
        if (entry + 1..i).any(|j| Self::shrinks(&m.hist, j)) {
            return SellSignal::hold("shrink already seen this trade");
        }

        SellSignal::sell_at(
            close[i],
            1.0,
            format!("first red histogram shrink since entry ({:.4} < {:.4})", m.hist[i], m.hist[i - 1]),
        )
    }
}
