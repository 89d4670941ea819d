//! Relative Strength Index, simple and Wilder-smoothed variants.

/// Simple RSI: trailing mean of gains and losses over `period` price changes.
/// NaN until `period` changes are available (index `period` onward is valid).
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if period == 0 || n < period + 1 {
        return out;
    }

    for i in period..n {
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;
        for j in (i - period + 1)..=i {
            let delta = values[j] - values[j - 1];
            if delta > 0.0 {
                gain_sum += delta;
            } else {
                loss_sum -= delta;
            }
        }
        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;
        let rs = avg_gain / (avg_loss + 1e-10);
        out[i] = 100.0 - 100.0 / (1.0 + rs);
    }
    out
}

/// Wilder-smoothed RSI: a one-time simple average over the first `period`
/// changes seeds the averages, then each step smooths with weight
/// `(period-1)/period`.
pub fn rsi_wilder(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if period == 0 || n < period + 1 {
        return out;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for j in 1..=period {
        let delta = values[j] - values[j - 1];
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss -= delta;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    out[period] = rsi_from_averages(avg_gain, avg_loss);

    for i in (period + 1)..n {
        let delta = values[i] - values[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
        out[i] = rsi_from_averages(avg_gain, avg_loss);
    }
    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = if avg_loss < 1e-10 {
        100.0
    } else {
        avg_gain / avg_loss
    };
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_warmup_is_nan() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&values, 6);
        for v in &out[..6] {
            assert!(v.is_nan());
        }
        assert!(!out[6].is_nan());
    }

    #[test]
    fn rsi_all_gains_near_100() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&values, 6);
        assert!(out[9] > 99.9);
    }

    #[test]
    fn rsi_all_losses_near_zero() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 - i as f64).collect();
        let out = rsi(&values, 6);
        assert!(out[9] < 0.1);
    }

    #[test]
    fn rsi_wilder_warmup_is_nan() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + (i % 4) as f64).collect();
        let out = rsi_wilder(&values, 14);
        for v in &out[..14] {
            assert!(v.is_nan());
        }
        assert!(!out[14].is_nan());
    }

    #[test]
    fn rsi_wilder_all_gains_is_100() {
        let values: Vec<f64> = (0..16).map(|i| 100.0 + i as f64).collect();
        let out = rsi_wilder(&values, 14);
        assert!((out[15] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rsi_wilder_in_range() {
        let values: Vec<f64> = (0..40)
            .map(|i| 100.0 + ((i as f64 % 7.0) - 3.0) * 2.0)
            .collect();
        for v in rsi_wilder(&values, 14) {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v), "RSI {} out of range", v);
            }
        }
    }

    #[test]
    fn rsi_short_input_all_nan() {
        let out = rsi(&[100.0, 101.0], 14);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
