//! Simple moving average.

/// Trailing mean over `period` values. NaN until the window fills.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut sum: f64 = values[..period].iter().sum();
    out[period - 1] = sum / period as f64;
    for i in period..values.len() {
        sum += values[i] - values[i - period];
        out[i] = sum / period as f64;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_warmup_is_nan() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_relative_eq!(out[2], 2.0);
        assert_relative_eq!(out[3], 3.0);
    }

    #[test]
    fn sma_period_one_echoes_input() {
        let out = sma(&[5.0, 7.0], 1);
        assert_relative_eq!(out[0], 5.0);
        assert_relative_eq!(out[1], 7.0);
    }

    #[test]
    fn sma_short_input_all_nan() {
        let out = sma(&[1.0, 2.0], 5);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn sma_zero_period_all_nan() {
        let out = sma(&[1.0, 2.0], 0);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
