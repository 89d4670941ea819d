//! Backtest engine.
//!
//! Single instrument, long only, daily bars. Each bar the buy evaluators are
//! consulted first; a unanimous buy sweeps all available cash into the
//! position, topping up at the weighted-average cost if one is already open,
//! and takes the bar even when a sell evaluator also fired. Otherwise, while
//! long, the sell evaluators may liquidate the whole position. At most one
//! trade per bar.

use crate::domain::aggregate::{combine_buys, combine_sells};
use crate::domain::bar::Bar;
use crate::domain::error::QuantsimError;
use crate::domain::metrics::{summarize, Summary};
use crate::domain::signal::{BuySignal, SellSignal};
use crate::domain::strategy::{BuyStrategy, SellStrategy, StrategyContext};
use crate::domain::trade::{EquityPoint, TradeRecord, TradeSide};

/// Bars below this count yield an empty result rather than a misleading one.
pub const DEFAULT_MIN_BARS: usize = 30;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub symbol: String,
    pub initial_capital: f64,
    /// Fraction added to the close on buy fills, e.g. 0.001 for 10 bps.
    pub slippage_pct: f64,
    pub commission_per_share: f64,
    pub strategy_name: String,
    pub min_bars: usize,
}

impl EngineConfig {
    pub fn new(symbol: impl Into<String>, strategy_name: impl Into<String>) -> Self {
        EngineConfig {
            symbol: symbol.into(),
            initial_capital: 100_000.0,
            slippage_pct: 0.001,
            commission_per_share: 0.005,
            strategy_name: strategy_name.into(),
            min_bars: DEFAULT_MIN_BARS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub symbol: String,
    pub strategy_name: String,
    pub trades: Vec<TradeRecord>,
    pub equity_curve: Vec<EquityPoint>,
    pub summary: Summary,
    pub initial_capital: f64,
    pub final_capital: f64,
}

/// Open-position bookkeeping while LONG.
struct OpenPosition {
    quantity: i64,
    /// Per-share fill cost, weighted across top-ups. Commissions settle in
    /// cash, not in the basis.
    avg_cost: f64,
    entry_reason: String,
    /// Bar index of the opening fill. Top-ups do not move it.
    entry_index: usize,
    /// Bar index of the most recent buy fill. The high-water mark excludes
    /// this bar so a fill-day spike cannot trigger a same-day trailing exit.
    last_buy_index: usize,
    /// Highest high since the last buy fill, excluding the fill bar. 0 until
    /// the first bar after it has closed.
    high_since_entry: f64,
}

#[derive(Debug)]
pub struct BacktestEngine {
    config: EngineConfig,
    buy_strategies: Vec<Box<dyn BuyStrategy>>,
    sell_strategies: Vec<Box<dyn SellStrategy>>,
}

impl BacktestEngine {
    pub fn new(
        config: EngineConfig,
        buy_strategies: Vec<Box<dyn BuyStrategy>>,
        sell_strategies: Vec<Box<dyn SellStrategy>>,
    ) -> Result<Self, QuantsimError> {
        if buy_strategies.is_empty() {
            return Err(QuantsimError::NoBuyStrategies);
        }
        if sell_strategies.is_empty() {
            return Err(QuantsimError::NoSellStrategies);
        }
        Ok(BacktestEngine {
            config,
            buy_strategies,
            sell_strategies,
        })
    }

    /// Runs the simulation over `bars`, oldest first. Deterministic: the same
    /// bars and configuration always produce the same result.
    pub fn run(&self, bars: &[Bar]) -> BacktestResult {
        let cfg = &self.config;
        if bars.len() < cfg.min_bars {
            return BacktestResult {
                symbol: cfg.symbol.clone(),
                strategy_name: cfg.strategy_name.clone(),
                trades: Vec::new(),
                equity_curve: Vec::new(),
                summary: summarize(cfg.initial_capital, cfg.initial_capital, &[], &[]),
                initial_capital: cfg.initial_capital,
                final_capital: cfg.initial_capital,
            };
        }

        let mut cash = cfg.initial_capital;
        let mut position: Option<OpenPosition> = None;
        let mut trades: Vec<TradeRecord> = Vec::new();
        let mut equity_curve: Vec<EquityPoint> = Vec::with_capacity(bars.len());
        let mut next_trade_seq: u64 = 1;

        for (i, bar) in bars.iter().enumerate() {
            let history = &bars[..=i];
            let ctx = match &position {
                Some(p) => StrategyContext {
                    position: p.quantity,
                    avg_cost: p.avg_cost,
                    current_price: bar.close,
                    high_since_entry: p.high_since_entry,
                    holding_days: i - p.entry_index,
                    entry_index: Some(p.entry_index),
                },
                None => StrategyContext::flat(bar.close),
            };

            let buy_signals: Vec<BuySignal> = self
                .buy_strategies
                .iter()
                .map(|s| s.evaluate(history, &ctx))
                .collect();

            if let Some(verdict) = combine_buys(&buy_signals) {
                // A unanimous buy owns the bar, even when it cannot be
                // afforded: no sell is considered on the same day.
                let fill = bar.close * (1.0 + cfg.slippage_pct);
                if let Some((quantity, commission)) =
                    sweep_quantity(cash, fill, cfg.commission_per_share)
                {
                    let open = match position.take() {
                        Some(open) => {
                            let total = open.quantity + quantity;
                            OpenPosition {
                                quantity: total,
                                avg_cost: (open.avg_cost * open.quantity as f64
                                    + fill * quantity as f64)
                                    / total as f64,
                                entry_reason: open.entry_reason,
                                entry_index: open.entry_index,
                                last_buy_index: i,
                                high_since_entry: 0.0,
                            }
                        }
                        None => OpenPosition {
                            quantity,
                            avg_cost: fill,
                            entry_reason: verdict.reason.clone(),
                            entry_index: i,
                            last_buy_index: i,
                            high_since_entry: 0.0,
                        },
                    };
                    let record = TradeRecord {
                        trade_id: format!("{}-{}", cfg.symbol, next_trade_seq),
                        timestamp: bar.date,
                        symbol: cfg.symbol.clone(),
                        side: TradeSide::Buy,
                        price: fill,
                        quantity,
                        commission,
                        strategy_name: cfg.strategy_name.clone(),
                        entry_reason: verdict.reason,
                        exit_reason: String::new(),
                        pnl: 0.0,
                        roi: 0.0,
                        holdings_after: open.quantity,
                    };
                    next_trade_seq += 1;
                    cash += record.cash_delta();
                    debug_assert!(cash >= 0.0);
                    position = Some(open);
                    trades.push(record);
                }
            } else if let Some(open) = position.take() {
                let signals: Vec<SellSignal> = self
                    .sell_strategies
                    .iter()
                    .map(|s| s.evaluate(history, &ctx))
                    .collect();
                match combine_sells(&signals, bar.close) {
                    Some(verdict) => {
                        // Intrabar levels can only fill inside the bar range.
                        let fill = verdict.price.max(bar.low).min(bar.high);
                        let record = sell_record(
                            cfg,
                            &open,
                            bar,
                            fill,
                            verdict.reason,
                            next_trade_seq,
                        );
                        next_trade_seq += 1;
                        cash += record.cash_delta();
                        trades.push(record);
                    }
                    None => position = Some(open),
                }
            }

            if let Some(p) = position.as_mut() {
                if i > p.last_buy_index {
                    p.high_since_entry = p.high_since_entry.max(bar.high);
                }
            }

            let holdings = position.as_ref().map_or(0, |p| p.quantity);
            equity_curve.push(EquityPoint {
                date: bar.date,
                equity: cash + holdings as f64 * bar.close,
                in_position: holdings > 0,
            });
        }

        let final_capital = equity_curve.last().map_or(cash, |p| p.equity);
        let summary = summarize(cfg.initial_capital, final_capital, &equity_curve, &trades);
        BacktestResult {
            symbol: cfg.symbol.clone(),
            strategy_name: cfg.strategy_name.clone(),
            trades,
            equity_curve,
            summary,
            initial_capital: cfg.initial_capital,
            final_capital,
        }
    }
}

/// Largest share count whose cost plus commission fits in `cash`.
fn sweep_quantity(cash: f64, fill: f64, commission_per_share: f64) -> Option<(i64, f64)> {
    if fill <= 0.0 {
        return None;
    }
    let mut quantity = (cash / fill).floor() as i64;
    while quantity > 0 && quantity as f64 * (fill + commission_per_share) > cash {
        quantity -= 1;
    }
    if quantity <= 0 {
        return None;
    }
    Some((quantity, quantity as f64 * commission_per_share))
}

fn sell_record(
    cfg: &EngineConfig,
    open: &OpenPosition,
    bar: &Bar,
    fill: f64,
    reason: String,
    seq: u64,
) -> TradeRecord {
    let quantity = open.quantity;
    let commission = quantity as f64 * cfg.commission_per_share;
    let cost_basis = quantity as f64 * open.avg_cost;
    let pnl = quantity as f64 * fill - commission - cost_basis;
    let roi = if cost_basis > 0.0 {
        pnl / cost_basis * 100.0
    } else {
        0.0
    };
    TradeRecord {
        trade_id: format!("{}-{}", cfg.symbol, seq),
        timestamp: bar.date,
        symbol: cfg.symbol.clone(),
        side: TradeSide::Sell,
        price: fill,
        quantity,
        commission,
        strategy_name: cfg.strategy_name.clone(),
        entry_reason: open.entry_reason.clone(),
        exit_reason: reason,
        pnl,
        roi,
        holdings_after: 0,
    }
}
