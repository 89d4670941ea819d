//! Sell-side evaluators.
//!
//! Each evaluator inspects the bar history and the open position context and
//! may propose an exit price. Evaluators that exit on an intraday level (a
//! trailing stop, for instance) attach the level to the signal; evaluators
//! that exit on the close leave pricing to the execution layer.

pub mod ma_cross;
pub mod stop_loss_pct;
pub mod trailing_take_profit;
pub mod boll_upper_break;
pub mod holding_no_profit;
pub mod dif_next_day_weaker;
pub mod first_red_hist_shrink;

pub use boll_upper_break::BollUpperBreakSell;
pub use dif_next_day_weaker::DifNextDayWeakerSell;
pub use first_red_hist_shrink::FirstRedHistShrinkSell;
pub use holding_no_profit::HoldingNoProfitSell;
pub use ma_cross::MaCrossSell;
pub use stop_loss_pct::StopLossPctSell;
pub use trailing_take_profit::TrailingTakeProfitSell;
