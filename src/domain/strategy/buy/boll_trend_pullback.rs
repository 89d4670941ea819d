//! Bollinger trend-following buy: squeeze breakout and trend pullback.
//!
//! Two entry points:
//! 1. Breakout: a recent band squeeze, the close standing on the upper band,
//!    bands opening (upper turning up, lower turning down), the middle band
//!    rising, band width not at a historical extreme, and ADX confirming a
//!    strengthening trend.
//! 2. Pullback: an established trend where the close dips to the 5-day MA or
//!    the upper-band/middle-band midpoint without breaking the 10-day MA.

use crate::domain::bar::{closes, Bar};
use crate::domain::indicator::{adx, bollinger, sma};
use crate::domain::signal::BuySignal;
use crate::domain::strategy::{BuyStrategy, StrategyContext};

#[derive(Debug, Clone)]
pub struct BollTrendPullbackBuy {
    pub boll_period: usize,
    pub num_std: f64,
    pub adx_period: usize,
    pub adx_min: f64,
    pub squeeze_lookback: usize,
    pub squeeze_quantile: f64,
    pub breakout_squeeze_days: usize,
    pub band_extreme_quantile: f64,
    pub band_extreme_lookback: usize,
    pub trend_days: usize,
    pub trend_above_ma10_min_days: usize,
    pub pullback_near_ma5_tol: f64,
    pub pullback_near_midpoint_tol: f64,
    pub slope_lookback: usize,
}

impl Default for BollTrendPullbackBuy {
    fn default() -> Self {
        BollTrendPullbackBuy {
            boll_period: 20,
            num_std: 2.0,
            adx_period: 14,
            adx_min: 25.0,
            squeeze_lookback: 20,
            squeeze_quantile: 0.25,
            breakout_squeeze_days: 10,
            band_extreme_quantile: 0.95,
            band_extreme_lookback: 60,
            trend_days: 5,
            trend_above_ma10_min_days: 3,
            pullback_near_ma5_tol: 0.015,
            pullback_near_midpoint_tol: 0.02,
            slope_lookback: 3,
        }
    }
}

/// Linear-interpolation quantile over the non-NaN values of a window.
fn quantile(window: &[f64], q: f64) -> Option<f64> {
    let mut vals: Vec<f64> = window.iter().copied().filter(|v| !v.is_nan()).collect();
    if vals.is_empty() {
        return None;
    }
    vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let pos = q * (vals.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(vals[lo]);
    }
    let frac = pos - lo as f64;
    Some(vals[lo] + (vals[hi] - vals[lo]) * frac)
}

impl BollTrendPullbackBuy {
    fn min_bars(&self) -> usize {
        (self.boll_period + self.slope_lookback)
            .max(self.band_extreme_lookback)
            .max(self.adx_period + 5)
            + 5
    }
}

impl BuyStrategy for BollTrendPullbackBuy {
    fn name(&self) -> &'static str {
        "boll_trend_pullback_buy"
    }

    fn evaluate(&self, history: &[Bar], _ctx: &StrategyContext) -> BuySignal {
        if history.len() < self.min_bars() {
            return BuySignal::hold("insufficient history");
        }

        let close_series = closes(history);
        let n = close_series.len();
        let i = n - 1;
        let bands = bollinger(&close_series, self.boll_period, self.num_std);
        let ma5 = sma(&close_series, 5);
        let ma10 = sma(&close_series, 10);
        let bandwidth: Vec<f64> = bands
            .upper
            .iter()
            .zip(&bands.lower)
            .map(|(u, l)| u - l)
            .collect();
        let adx_series = adx(history, self.adx_period);

        let close = close_series[i];
        let current_low = history[i].low;
        let up = bands.upper[i];
        let mid = bands.middle[i];
        if up.is_nan() || mid.is_nan() {
            return BuySignal::hold("bands not ready");
        }

        let sl = self.slope_lookback;
        let bw_now = bandwidth[i];
        let up_old = bands.upper[i - sl];
        let low_now = bands.lower[i];
        let low_old = bands.lower[i - sl];
        let mid_old = bands.middle[i - 5];
        let adx_now = if adx_series.adx[i].is_nan() {
            0.0
        } else {
            adx_series.adx[i]
        };
        let adx_old = if adx_series.adx[i - sl].is_nan() {
            0.0
        } else {
            adx_series.adx[i - sl]
        };

        // Entry 1: breakout after a squeeze.
        let squeeze_occurred = match quantile(
            &bandwidth[n - self.squeeze_lookback..],
            self.squeeze_quantile,
        ) {
            Some(p_low) => bandwidth[n - self.breakout_squeeze_days..]
                .iter()
                .filter(|v| !v.is_nan())
                .fold(f64::INFINITY, |acc, &v| acc.min(v))
                <= p_low,
            None => false,
        };
        let band_not_extreme = match quantile(
            &bandwidth[n - self.band_extreme_lookback..],
            self.band_extreme_quantile,
        ) {
            Some(p_high) => bw_now <= p_high,
            None => true,
        };

        if squeeze_occurred
            && close >= up * 0.998
            && bands.upper[i] > up_old
            && low_now < low_old
            && mid > mid_old
            && band_not_extreme
            && adx_now >= self.adx_min
            && adx_now > adx_old
        {
            return BuySignal::buy(1.0, "band breakout after squeeze with ADX confirmation");
        }

        // Entry 2: pullback within an established trend.
        let ma5_val = ma5[i];
        let ma10_val = ma10[i];
        if ma5_val.is_nan() || ma10_val.is_nan() || mid <= 0.0 {
            return BuySignal::hold("moving averages not ready");
        }

        let t = self.trend_days;
        let above_ma10_count = (n - t..n)
            .filter(|&j| !ma10[j].is_nan() && close_series[j] > ma10[j])
            .count();
        let ever_above_upper = (n - t..n)
            .any(|j| !bands.upper[j].is_nan() && close_series[j] >= bands.upper[j]);
        if above_ma10_count < self.trend_above_ma10_min_days && !ever_above_upper {
            return BuySignal::hold("no established trend");
        }

        // Must stay above MA10 (close and intraday low) and the middle band.
        if close < ma10_val || current_low < ma10_val * 0.995 || close <= mid {
            return BuySignal::hold("broke MA10 or under middle band");
        }

        let midpoint_upper_mid = (up + mid) / 2.0;
        let near_ma5 = ma5_val > 0.0
            && close >= (1.0 - self.pullback_near_ma5_tol) * ma5_val
            && close <= (1.0 + self.pullback_near_ma5_tol) * ma5_val;
        let near_midpoint = close >= (1.0 - self.pullback_near_midpoint_tol) * midpoint_upper_mid
            && close <= (1.0 + self.pullback_near_midpoint_tol) * midpoint_upper_mid;

        if near_ma5 || near_midpoint {
            return BuySignal::buy(1.0, "trend pullback to MA5/upper-mid midpoint above MA10");
        }

        BuySignal::hold("no entry point")
    }
}
