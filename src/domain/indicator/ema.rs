//! Exponential moving average.

/// Recursive EMA with weight k = 2/(span+1), seeded from the first value and
/// with no bias adjustment. Every output position is defined; early values
/// carry the seed's influence, so strategies enforce their own minimum
/// history before trusting them.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() || span == 0 {
        return vec![f64::NAN; values.len()];
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    out.push(prev);
    for &v in &values[1..] {
        prev = v * k + prev * (1.0 - k);
        out.push(prev);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ema_seeds_from_first_value() {
        let out = ema(&[10.0, 10.0, 10.0], 3);
        for v in out {
            assert_relative_eq!(v, 10.0);
        }
    }

    #[test]
    fn ema_recursion() {
        // k = 2/(3+1) = 0.5
        let out = ema(&[10.0, 20.0, 30.0], 3);
        assert_relative_eq!(out[0], 10.0);
        assert_relative_eq!(out[1], 15.0);
        assert_relative_eq!(out[2], 22.5);
    }

    #[test]
    fn ema_empty_input() {
        assert!(ema(&[], 5).is_empty());
    }

    #[test]
    fn ema_zero_span_all_nan() {
        assert!(ema(&[1.0, 2.0], 0).iter().all(|v| v.is_nan()));
    }
}
