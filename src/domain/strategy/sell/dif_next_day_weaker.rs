//! Day-after-entry momentum check.
//!
//! Looks only at the bar immediately following the entry bar. If the MACD DIF
//! has weakened versus the entry day, the setup has failed and the position
//! exits at the close.

use crate::domain::bar::{closes, Bar};
use crate::domain::indicator::macd;
use crate::domain::signal::SellSignal;
use crate::domain::strategy::{SellStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct DifNextDayWeakerSell {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for DifNextDayWeakerSell {
    fn default() -> Self {
        DifNextDayWeakerSell {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl SellStrategy for DifNextDayWeakerSell {
    fn name(&self) -> &'static str {
        "dif_next_day_weaker_sell"
    }

    fn evaluate(&self, history: &[Bar], ctx: &StrategyContext) -> SellSignal {
        if ctx.position <= 0 {
            return SellSignal::hold("no position");
        }
        let Some(entry) = ctx.entry_index else {
            return SellSignal::hold("no entry bar");
        };
        let i = history.len() - 1;
        if i != entry + 1 {
            return SellSignal::hold("only checked the day after entry");
        }

        let close = closes(history);
        let m = macd(&close, self.macd_fast, self.macd_slow, self.macd_signal);
        if m.dif[i] < m.dif[entry] {
            return SellSignal::sell_at(
                close[i],
                1.0,
                format!("DIF weaker day after entry ({:.4} < {:.4})", m.dif[i], m.dif[entry]),
            );
        }
        SellSignal::hold("DIF held up after entry")
    }
}
