//! MACD: DIF, DEA (signal line) and histogram.

use super::ema;

#[derive(Debug, Clone)]
pub struct MacdSeries {
    /// EMA(fast) - EMA(slow).
    pub dif: Vec<f64>,
    /// EMA of DIF over the signal period.
    pub dea: Vec<f64>,
    /// DIF - DEA.
    pub hist: Vec<f64>,
}

/// Standard MACD(fast, slow, signal). Defined from the first bar because the
/// underlying EMAs are seeded from the first value; early bars carry seed
/// influence and strategies enforce their own minimum history.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let ema_fast = ema(values, fast);
    let ema_slow = ema(values, slow);
    let dif: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let dea = ema(&dif, signal);
    let hist: Vec<f64> = dif.iter().zip(&dea).map(|(d, e)| d - e).collect();
    MacdSeries { dif, dea, hist }
}
