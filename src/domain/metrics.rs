//! Performance summary over a completed run.
//!
//! Risk metrics are computed over the in-position equity subsequence only:
//! days spent flat contribute neither drawdown nor volatility, so a strategy
//! is judged on the days it actually held the instrument.

use crate::domain::trade::{EquityPoint, TradeRecord, TradeSide};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_return_pct: f64,
    /// Total return annualized over the days actually in position. `None`
    /// when the strategy never held a position.
    pub annualized_return_pct: Option<f64>,
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: f64,
    /// Number of equity-curve days with an open position.
    pub holding_days: usize,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub win_rate_pct: f64,
}

pub fn summarize(
    initial_capital: f64,
    final_capital: f64,
    equity_curve: &[EquityPoint],
    trades: &[TradeRecord],
) -> Summary {
    let total_return = if initial_capital > 0.0 {
        (final_capital - initial_capital) / initial_capital
    } else {
        0.0
    };

    let held: Vec<f64> = equity_curve
        .iter()
        .filter(|p| p.in_position)
        .map(|p| p.equity)
        .collect();
    let holding_days = held.len();

    let annualized = if holding_days > 0 {
        Some(
            ((1.0 + total_return).powf(TRADING_DAYS_PER_YEAR / holding_days as f64) - 1.0) * 100.0,
        )
    } else {
        None
    };

    let sells: Vec<&TradeRecord> = trades
        .iter()
        .filter(|t| t.side == TradeSide::Sell)
        .collect();
    let winning = sells.iter().filter(|t| t.pnl > 0.0).count();
    let win_rate = if sells.is_empty() {
        0.0
    } else {
        winning as f64 / sells.len() as f64 * 100.0
    };

    Summary {
        total_return_pct: total_return * 100.0,
        annualized_return_pct: annualized,
        max_drawdown_pct: max_drawdown_pct(&held),
        sharpe_ratio: sharpe_ratio(&held),
        holding_days,
        total_trades: sells.len(),
        winning_trades: winning,
        win_rate_pct: win_rate,
    }
}

/// Largest peak-to-trough decline, in percent of the peak.
fn max_drawdown_pct(equity: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0f64;
    for &e in equity {
        peak = peak.max(e);
        if peak > 0.0 {
            worst = worst.max((peak - e) / peak);
        }
    }
    worst * 100.0
}

/// Annualized mean/stddev of daily returns. Population stddev; 0 when fewer
/// than two equity rows or when returns never vary.
fn sharpe_ratio(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = equity
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect();
    if returns.is_empty() {
        return 0.0;
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let var = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    let std = var.sqrt();
    if std == 0.0 {
        return 0.0;
    }
    mean / std * TRADING_DAYS_PER_YEAR.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn curve(points: &[(f64, bool)]) -> Vec<EquityPoint> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(equity, in_position))| EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                equity,
                in_position,
            })
            .collect()
    }

    #[test]
    fn drawdown_over_held_days() {
        // Peak 110, trough 105: 5/110 = 4.545...%.
        let eq = curve(&[(100.0, true), (110.0, true), (105.0, true), (120.0, true)]);
        let s = summarize(100.0, 120.0, &eq, &[]);
        assert_relative_eq!(s.max_drawdown_pct, 100.0 * 5.0 / 110.0, epsilon = 1e-9);
        assert_relative_eq!(s.total_return_pct, 20.0);
        assert_eq!(s.holding_days, 4);
    }

    #[test]
    fn flat_days_are_excluded_from_risk() {
        // The dip happens while flat, so it contributes no drawdown.
        let eq = curve(&[(100.0, true), (100.0, false), (80.0, false), (100.0, true)]);
        let s = summarize(100.0, 100.0, &eq, &[]);
        assert_relative_eq!(s.max_drawdown_pct, 0.0);
        assert_eq!(s.holding_days, 2);
    }

    #[test]
    fn never_in_position_has_no_annualized_return() {
        let eq = curve(&[(100.0, false), (100.0, false)]);
        let s = summarize(100.0, 100.0, &eq, &[]);
        assert!(s.annualized_return_pct.is_none());
        assert_relative_eq!(s.sharpe_ratio, 0.0);
    }

    #[test]
    fn annualized_return_uses_holding_days() {
        let eq = curve(&[(100.0, true), (105.0, true), (110.0, true)]);
        let s = summarize(100.0, 110.0, &eq, &[]);
        let expected = (1.10f64.powf(252.0 / 3.0) - 1.0) * 100.0;
        assert_relative_eq!(s.annualized_return_pct.unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn constant_equity_has_zero_sharpe() {
        let eq = curve(&[(100.0, true), (100.0, true), (100.0, true)]);
        let s = summarize(100.0, 100.0, &eq, &[]);
        assert_relative_eq!(s.sharpe_ratio, 0.0);
    }

    #[test]
    fn win_rate_counts_sell_legs_only() {
        let mk = |side: TradeSide, pnl: f64| TradeRecord {
            trade_id: "T-1".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            symbol: "TEST".to_string(),
            side,
            price: 100.0,
            quantity: 10,
            commission: 0.05,
            strategy_name: "s".to_string(),
            entry_reason: String::new(),
            exit_reason: String::new(),
            pnl,
            roi: 0.0,
            holdings_after: 0,
        };
        let trades = vec![
            mk(TradeSide::Buy, 0.0),
            mk(TradeSide::Sell, 50.0),
            mk(TradeSide::Buy, 0.0),
            mk(TradeSide::Sell, -20.0),
        ];
        let s = summarize(100.0, 100.0, &[], &trades);
        assert_eq!(s.total_trades, 2);
        assert_eq!(s.winning_trades, 1);
        assert_relative_eq!(s.win_rate_pct, 50.0);
    }
}
