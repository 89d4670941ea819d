//! Bollinger Bands.

use super::sma;

#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Rolling mean ± `num_std` sample standard deviations over `period`.
/// NaN until the window fills. Sample stddev (n-1 divisor) matches the
/// rolling-std convention the strategy parameters were tuned against.
pub fn bollinger(values: &[f64], period: usize, num_std: f64) -> BollingerSeries {
    let n = values.len();
    let middle = sma(values, period);
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];
    if period < 2 || n < period {
        return BollingerSeries {
            middle,
            upper,
            lower,
        };
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        let mean = middle[i];
        let var = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (period as f64 - 1.0);
        let std = var.sqrt();
        upper[i] = mean + num_std * std;
        lower[i] = mean - num_std * std;
    }

    BollingerSeries {
        middle,
        upper,
        lower,
    }
}
