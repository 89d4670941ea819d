//! Composite oversold-score buy.
//!
//! Four factors, weighted: moving-average suppression 30%, short-period RSI
//! extreme 30%, Bollinger-band position 20%, MACD momentum exhaustion 20%.
//! Buys when the blended score reaches the configured threshold.

use crate::domain::bar::{closes, Bar};
use crate::domain::indicator::{bollinger, macd, rsi, sma};
use crate::domain::signal::BuySignal;
use crate::domain::strategy::{BuyStrategy, StrategyContext};

const W_MA: f64 = 0.30;
const W_RSI: f64 = 0.30;
const W_BB: f64 = 0.20;
const W_MACD: f64 = 0.20;

// MACD(12,26,9) wants ~35 bars; Bollinger 20; RSI 6.
const MIN_BARS: usize = 36;

#[derive(Debug, Clone)]
pub struct OversoldFactorsBuy {
    pub buy_threshold: f64,
    pub bb_period: usize,
    pub rsi_period: usize,
}

impl OversoldFactorsBuy {
    pub fn new(buy_threshold: f64, rsi_period: usize) -> Self {
        OversoldFactorsBuy {
            buy_threshold,
            bb_period: 20,
            rsi_period,
        }
    }

    fn score_ma_suppression(price: f64, ma5: f64, ma10: f64, ma20: f64) -> f64 {
        if ma5.is_nan() || ma10.is_nan() || ma20.is_nan() {
            return 0.0;
        }
        let below5 = price < ma5;
        let below10 = price < ma10;
        let below20 = price < ma20;
        if below5 && below10 && below20 {
            100.0
        } else if below5 && below10 {
            60.0
        } else if below5 {
            30.0
        } else {
            0.0
        }
    }

    fn score_rsi(rsi_val: f64) -> f64 {
        if rsi_val < 20.0 {
            100.0
        } else if rsi_val < 30.0 {
            70.0
        } else if rsi_val < 40.0 {
            30.0
        } else if rsi_val < 50.0 {
            20.0
        } else {
            0.0
        }
    }

    fn score_bollinger(price: f64, middle: f64, upper: f64, lower: f64) -> f64 {
        if lower <= 0.0 {
            return 0.0;
        }
        if price <= lower {
            return 100.0;
        }
        if price <= lower * 1.01 {
            return 70.0;
        }
        // Squeeze below the middle band: narrow width and price under the mean.
        let width = (upper - lower) / (middle + 1e-10);
        if width < 0.05 && price < middle {
            return 50.0;
        }
        0.0
    }

    /// Shrinking green histogram scores full; growing red scores half.
    fn score_macd(dif: f64, hist: f64, hist_prev: f64) -> f64 {
        if dif < 0.0 && hist > hist_prev {
            100.0
        } else if dif > 0.0 && hist > hist_prev {
            50.0
        } else {
            0.0
        }
    }
}

impl BuyStrategy for OversoldFactorsBuy {
    fn name(&self) -> &'static str {
        "oversold_score_buy"
    }

    fn evaluate(&self, history: &[Bar], _ctx: &StrategyContext) -> BuySignal {
        if history.len() < MIN_BARS {
            return BuySignal::hold("insufficient history");
        }

        let close = closes(history);
        let i = close.len() - 1;
        let price = close[i];

        let ma5 = sma(&close, 5);
        let ma10 = sma(&close, 10);
        let ma20 = sma(&close, 20);
        let ma_score = Self::score_ma_suppression(price, ma5[i], ma10[i], ma20[i]);

        let rsi_series = rsi(&close, self.rsi_period);
        let rsi_score = if rsi_series[i].is_nan() {
            0.0
        } else {
            Self::score_rsi(rsi_series[i])
        };

        let bands = bollinger(&close, self.bb_period, 2.0);
        let bb_score = if bands.middle[i].is_nan() || bands.lower[i].is_nan() {
            0.0
        } else {
            Self::score_bollinger(price, bands.middle[i], bands.upper[i], bands.lower[i])
        };

        let m = macd(&close, 12, 26, 9);
        let macd_score = Self::score_macd(m.dif[i], m.hist[i], m.hist[i - 1]);

        let total = W_MA * ma_score + W_RSI * rsi_score + W_BB * bb_score + W_MACD * macd_score;
        if total < self.buy_threshold {
            return BuySignal::hold(format!(
                "oversold score {:.0} below threshold {:.0}",
                total, self.buy_threshold
            ));
        }

        let strength = ((total - self.buy_threshold) / 30.0).min(1.0);
        BuySignal::buy(
            strength,
            format!(
                "oversold score {:.0} (ma {:.0} rsi {:.0} boll {:.0} macd {:.0})",
                total, ma_score, rsi_score, bb_score, macd_score
            ),
        )
    }
}
