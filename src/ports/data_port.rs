//! Daily-bar retrieval port trait.

use crate::domain::bar::Bar;
use crate::domain::error::QuantsimError;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `symbol`, oldest first, restricted to the inclusive date
    /// range when bounds are given.
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, QuantsimError>;

    fn list_symbols(&self) -> Result<Vec<String>, QuantsimError>;
}
