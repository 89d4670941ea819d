#![allow(dead_code)]

use chrono::NaiveDate;
use quantsim::domain::bar::Bar;
use quantsim::domain::error::QuantsimError;
use quantsim::domain::signal::{BuySignal, SellSignal};
use quantsim::domain::strategy::{BuyStrategy, SellStrategy, StrategyContext};
use quantsim::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, QuantsimError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(QuantsimError::Data {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        let bars = self.data.get(symbol).cloned().unwrap_or_default();
        Ok(bars
            .into_iter()
            .filter(|b| {
                start_date.is_none_or(|s| b.date >= s) && end_date.is_none_or(|e| b.date <= e)
            })
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, QuantsimError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Flat bars (high = low = close), one per day from 2024-01-01.
pub fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: date(2024, 1, 1) + chrono::Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Bars with explicit (high, low, close) per day.
pub fn bars_from_hlc(hlc: &[(f64, f64, f64)]) -> Vec<Bar> {
    hlc.iter()
        .enumerate()
        .map(|(i, &(high, low, close))| Bar {
            date: date(2024, 1, 1) + chrono::Duration::days(i as i64),
            open: close,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Scripted buy evaluator: fires on the given bar indices.
#[derive(Debug)]
pub struct BuyOnIndices(pub Vec<usize>);

impl BuyStrategy for BuyOnIndices {
    fn name(&self) -> &'static str {
        "buy_on_indices"
    }

    fn evaluate(&self, history: &[Bar], _ctx: &StrategyContext) -> BuySignal {
        if self.0.contains(&(history.len() - 1)) {
            BuySignal::buy(1.0, "scheduled entry")
        } else {
            BuySignal::hold("waiting")
        }
    }
}

/// Scripted sell evaluator: fires on the given bar indices, with an optional
/// trigger price.
#[derive(Debug)]
pub struct SellOnIndices {
    pub indices: Vec<usize>,
    pub price: Option<f64>,
    pub reason: &'static str,
}

impl SellStrategy for SellOnIndices {
    fn name(&self) -> &'static str {
        "sell_on_indices"
    }

    fn evaluate(&self, history: &[Bar], ctx: &StrategyContext) -> SellSignal {
        if ctx.position > 0 && self.indices.contains(&(history.len() - 1)) {
            match self.price {
                Some(p) => SellSignal::sell_at(p, 1.0, self.reason),
                None => SellSignal::sell(1.0, self.reason),
            }
        } else {
            SellSignal::hold("waiting")
        }
    }
}

#[derive(Debug)]
pub struct NeverSell;

impl SellStrategy for NeverSell {
    fn name(&self) -> &'static str {
        "never_sell"
    }

    fn evaluate(&self, _history: &[Bar], _ctx: &StrategyContext) -> SellSignal {
        SellSignal::hold("never")
    }
}
