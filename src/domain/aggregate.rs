//! Signal aggregation.
//!
//! Buy evaluators combine with AND: every configured evaluator must fire on
//! the same bar. Sell evaluators combine with OR: any firing evaluator exits
//! the position, and when several fire at once the one proposing the highest
//! exit price wins.

use crate::domain::signal::{BuySignal, SellSignal};

/// The unanimous buy verdict for one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedBuy {
    /// Mean strength across the evaluators.
    pub strength: f64,
    /// Individual reasons joined with " | ".
    pub reason: String,
}

/// The winning sell verdict for one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedSell {
    /// Chosen exit price; falls back to the bar close when no firing
    /// evaluator proposed a usable level.
    pub price: f64,
    pub reason: String,
}

/// AND-combines buy signals. `None` unless every evaluator said Buy.
pub fn combine_buys(signals: &[BuySignal]) -> Option<CombinedBuy> {
    if signals.is_empty() || !signals.iter().all(BuySignal::is_buy) {
        return None;
    }
    let strength = signals.iter().map(|s| s.strength).sum::<f64>() / signals.len() as f64;
    let reason = signals
        .iter()
        .map(|s| s.reason.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    Some(CombinedBuy { strength, reason })
}

/// OR-combines sell signals, resolving price conflicts in the holder's favor.
///
/// Firing evaluators without a proposed price rank at 0 so any evaluator with
/// a positive level beats them. If no firing evaluator carries a positive
/// price, the first one's reason wins and the exit prices at `close`.
pub fn combine_sells(signals: &[SellSignal], close: f64) -> Option<CombinedSell> {
    let firing: Vec<&SellSignal> = signals.iter().filter(|s| s.is_sell()).collect();
    let first = *firing.first()?;

    let best = firing
        .iter()
        .max_by(|a, b| {
            let pa = a.price.filter(|p| *p > 0.0).unwrap_or(0.0);
            let pb = b.price.filter(|p| *p > 0.0).unwrap_or(0.0);
            pa.partial_cmp(&pb).unwrap()
        })
        .copied()?;

    match best.price.filter(|p| *p > 0.0) {
        Some(price) => Some(CombinedSell {
            price,
            reason: best.reason.clone(),
        }),
        None => Some(CombinedSell {
            price: close,
            reason: first.reason.clone(),
        }),
    }
}
