//! Lower Bollinger band rebound buy.
//!
//! After a stretch of riding the lower band, buys when the close has pulled
//! away from the band for several consecutive days and the final day's
//! separation is a meaningful fraction of the band width.

use crate::domain::bar::{closes, Bar};
use crate::domain::indicator::bollinger;
use crate::domain::signal::BuySignal;
use crate::domain::strategy::{BuyStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct BollReboundBuy {
    pub boll_period: usize,
    pub num_std: f64,
    /// Days before the rebound within which the close had to hug the band.
    pub along_lower_days: usize,
    /// Consecutive days (including today) of strictly increasing separation.
    pub rebound_days: usize,
    /// Tolerance for "close to the lower band" (fraction of the band value).
    pub lower_touch_tol: f64,
    /// Today's (close - lower) / (upper - lower) must reach this fraction.
    pub min_spread_pct_band: f64,
}

impl Default for BollReboundBuy {
    fn default() -> Self {
        BollReboundBuy {
            boll_period: 20,
            num_std: 2.0,
            along_lower_days: 5,
            rebound_days: 3,
            lower_touch_tol: 0.02,
            min_spread_pct_band: 0.40,
        }
    }
}

impl BuyStrategy for BollReboundBuy {
    fn name(&self) -> &'static str {
        "boll_rebound_buy"
    }

    fn evaluate(&self, history: &[Bar], _ctx: &StrategyContext) -> BuySignal {
        let min_bars = self.boll_period + self.along_lower_days + self.rebound_days;
        if history.len() < min_bars {
            return BuySignal::hold("insufficient history");
        }

        let close = closes(history);
        let bands = bollinger(&close, self.boll_period, self.num_std);
        let n = close.len();
        let spread: Vec<f64> = close
            .iter()
            .zip(&bands.lower)
            .map(|(c, l)| c - l)
            .collect();

        // Strictly increasing separation over the rebound window.
        let r = self.rebound_days;
        if spread[n - r..].iter().any(|s| s.is_nan()) {
            return BuySignal::hold("bands not ready");
        }
        for w in spread[n - r..].windows(2) {
            if w[0] >= w[1] {
                return BuySignal::hold("separation not strictly increasing");
            }
        }
        if spread[n - 1] <= 0.0 {
            return BuySignal::hold("still under the lower band");
        }

        let band_width = bands.upper[n - 1] - bands.lower[n - 1];
        if band_width <= 0.0 {
            return BuySignal::hold("degenerate band width");
        }
        if spread[n - 1] / band_width < self.min_spread_pct_band {
            return BuySignal::hold("separation not significant");
        }

        // The run-up must follow a stretch along the lower band.
        let start = n - r - self.along_lower_days;
        let along_count = (start..n - r)
            .filter(|&i| {
                !bands.lower[i].is_nan() && close[i] <= bands.lower[i] * (1.0 + self.lower_touch_tol)
            })
            .count();
        if along_count < 2 {
            return BuySignal::hold("no prior stretch along the lower band");
        }

        BuySignal::buy(
            1.0,
            format!("lower-band rebound ({} days of rising separation)", r),
        )
    }
}
