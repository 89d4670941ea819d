//! Average Directional Index (Wilder).

use crate::domain::bar::Bar;

#[derive(Debug, Clone)]
pub struct AdxSeries {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

/// Wilder's ADX over OHLC bars.
///
/// True range and directional movement are Wilder-smoothed over `period`;
/// DX = 100·|+DI − −DI|/(+DI + −DI); ADX is a further Wilder smoothing of DX.
/// +DI/−DI are valid from index `period`, ADX from index `2·period − 1`.
pub fn adx(bars: &[Bar], period: usize) -> AdxSeries {
    let n = bars.len();
    let mut out = AdxSeries {
        adx: vec![f64::NAN; n],
        plus_di: vec![f64::NAN; n],
        minus_di: vec![f64::NAN; n],
    };
    if period == 0 || n < 2 * period {
        return out;
    }

    // Per-bar true range and directional movement, defined from index 1.
    let mut tr = vec![0.0; n];
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];
    for i in 1..n {
        tr[i] = bars[i].true_range(bars[i - 1].close);
        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;
        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
    }

    let p = period as f64;
    let mut sm_tr = tr[1..=period].iter().sum::<f64>() / p;
    let mut sm_plus = plus_dm[1..=period].iter().sum::<f64>() / p;
    let mut sm_minus = minus_dm[1..=period].iter().sum::<f64>() / p;

    let mut dx = vec![f64::NAN; n];
    for i in period..n {
        if i > period {
            sm_tr = (sm_tr * (p - 1.0) + tr[i]) / p;
            sm_plus = (sm_plus * (p - 1.0) + plus_dm[i]) / p;
            sm_minus = (sm_minus * (p - 1.0) + minus_dm[i]) / p;
        }
        let (pdi, mdi) = if sm_tr > 0.0 {
            (100.0 * sm_plus / sm_tr, 100.0 * sm_minus / sm_tr)
        } else {
            (0.0, 0.0)
        };
        out.plus_di[i] = pdi;
        out.minus_di[i] = mdi;
        let denom = pdi + mdi;
        dx[i] = if denom > 0.0 {
            100.0 * (pdi - mdi).abs() / denom
        } else {
            0.0
        };
    }

    let first_adx = 2 * period - 1;
    let mut adx_val = dx[period..=first_adx].iter().sum::<f64>() / p;
    out.adx[first_adx] = adx_val;
    for i in (first_adx + 1)..n {
        adx_val = (adx_val * (p - 1.0) + dx[i]) / p;
        out.adx[i] = adx_val;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(highs_lows_closes: &[(f64, f64, f64)]) -> Vec<Bar> {
        highs_lows_closes
            .iter()
            .enumerate()
            .map(|(i, &(high, low, close))| Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high,
                low,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    fn trending_up(n: usize) -> Vec<Bar> {
        make_bars(
            &(0..n)
                .map(|i| {
                    let base = 100.0 + i as f64 * 2.0;
                    (base + 1.0, base - 1.0, base)
                })
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn adx_warmup_is_nan() {
        let bars = trending_up(40);
        let series = adx(&bars, 14);
        for i in 0..14 {
            assert!(series.plus_di[i].is_nan());
        }
        for i in 0..27 {
            assert!(series.adx[i].is_nan(), "ADX at {} should be NaN", i);
        }
        assert!(!series.adx[27].is_nan());
    }

    #[test]
    fn adx_strong_uptrend_has_high_adx() {
        let bars = trending_up(60);
        let series = adx(&bars, 14);
        let last = series.adx[59];
        assert!(last > 25.0, "expected trending ADX > 25, got {}", last);
        assert!(series.plus_di[59] > series.minus_di[59]);
    }

    #[test]
    fn adx_values_in_range() {
        let bars = make_bars(
            &(0..50)
                .map(|i| {
                    let base = 100.0 + ((i as f64) * 0.9).sin() * 4.0;
                    (base + 1.5, base - 1.5, base)
                })
                .collect::<Vec<_>>(),
        );
        let series = adx(&bars, 14);
        for v in series.adx.iter().chain(&series.plus_di).chain(&series.minus_di) {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(v));
            }
        }
    }

    #[test]
    fn adx_short_input_all_nan() {
        let bars = trending_up(10);
        let series = adx(&bars, 14);
        assert!(series.adx.iter().all(|v| v.is_nan()));
        assert!(series.plus_di.iter().all(|v| v.is_nan()));
    }
}
