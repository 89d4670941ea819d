//! Buy-side evaluators.

pub mod ma_cross;
pub mod oversold_factors;
pub mod oversold_rebound;
pub mod boll_rebound;
pub mod boll_trend_pullback;

pub use boll_rebound::BollReboundBuy;
pub use boll_trend_pullback::BollTrendPullbackBuy;
pub use ma_cross::MaCrossBuy;
pub use oversold_factors::OversoldFactorsBuy;
pub use oversold_rebound::OversoldReboundBuy;
