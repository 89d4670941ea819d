//! Strategy signal types.
//!
//! Buy and sell evaluators have disjoint output types: a buy evaluator can
//! only express Buy or Hold, a sell evaluator only Sell or Hold. The split is
//! enforced by the type system rather than by convention.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyDecision {
    Buy,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellDecision {
    Sell,
    Hold,
}

/// Output of a buy evaluator for one bar. Ephemeral, produced fresh each bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BuySignal {
    pub decision: BuyDecision,
    /// Signal strength in [0, 1].
    pub strength: f64,
    pub reason: String,
}

impl BuySignal {
    pub fn buy(strength: f64, reason: impl Into<String>) -> Self {
        BuySignal {
            decision: BuyDecision::Buy,
            strength: strength.clamp(0.0, 1.0),
            reason: reason.into(),
        }
    }

    pub fn hold(reason: impl Into<String>) -> Self {
        BuySignal {
            decision: BuyDecision::Hold,
            strength: 0.0,
            reason: reason.into(),
        }
    }

    pub fn is_buy(&self) -> bool {
        self.decision == BuyDecision::Buy
    }
}

/// Output of a sell evaluator for one bar.
///
/// `price` is an evaluator-suggested fill price, populated only by evaluators
/// that compute an intrabar trigger level (e.g. a trailing stop). Evaluators
/// without a trigger level leave it `None` and the aggregator falls back to
/// the bar close.
#[derive(Debug, Clone, PartialEq)]
pub struct SellSignal {
    pub decision: SellDecision,
    pub strength: f64,
    pub reason: String,
    pub price: Option<f64>,
}

impl SellSignal {
    pub fn sell(strength: f64, reason: impl Into<String>) -> Self {
        SellSignal {
            decision: SellDecision::Sell,
            strength: strength.clamp(0.0, 1.0),
            reason: reason.into(),
            price: None,
        }
    }

    pub fn sell_at(price: f64, strength: f64, reason: impl Into<String>) -> Self {
        SellSignal {
            price: Some(price),
            ..SellSignal::sell(strength, reason)
        }
    }

    pub fn hold(reason: impl Into<String>) -> Self {
        SellSignal {
            decision: SellDecision::Hold,
            strength: 0.0,
            reason: reason.into(),
            price: None,
        }
    }

    pub fn is_sell(&self) -> bool {
        self.decision == SellDecision::Sell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_signal_constructors() {
        let s = BuySignal::buy(0.8, "golden cross");
        assert!(s.is_buy());
        assert!((s.strength - 0.8).abs() < f64::EPSILON);

        let h = BuySignal::hold("insufficient history");
        assert!(!h.is_buy());
        assert_eq!(h.reason, "insufficient history");
    }

    #[test]
    fn strength_is_clamped() {
        assert!((BuySignal::buy(1.7, "x").strength - 1.0).abs() < f64::EPSILON);
        assert!((SellSignal::sell(-0.5, "x").strength - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sell_signal_with_trigger_price() {
        let s = SellSignal::sell_at(95.5, 1.0, "trailing stop");
        assert!(s.is_sell());
        assert_eq!(s.price, Some(95.5));

        let plain = SellSignal::sell(1.0, "death cross");
        assert_eq!(plain.price, None);
    }
}
