//! Trade ledger and equity curve records.

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// One executed fill. Append-only and immutable once recorded.
///
/// `trade_id` is deterministic (`{symbol}-{seq}`) so two runs over the same
/// inputs produce identical ledgers.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub trade_id: String,
    pub timestamp: NaiveDate,
    pub symbol: String,
    pub side: TradeSide,
    pub price: f64,
    pub quantity: i64,
    pub commission: f64,
    pub strategy_name: String,
    pub entry_reason: String,
    pub exit_reason: String,
    /// Net realized P&L; 0 for buys.
    pub pnl: f64,
    /// Net return on cost basis in percent; 0 for buys.
    pub roi: f64,
    pub holdings_after: i64,
}

impl TradeRecord {
    /// Signed cash-flow of this fill: negative for buys, positive for sells.
    pub fn cash_delta(&self) -> f64 {
        let gross = self.quantity as f64 * self.price;
        match self.side {
            TradeSide::Buy => -(gross + self.commission),
            TradeSide::Sell => gross - self.commission,
        }
    }
}

/// One equity-curve row, produced for every bar whether or not a trade occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
    pub in_position: bool,
}
