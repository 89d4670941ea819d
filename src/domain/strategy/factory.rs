//! Builds evaluators from their configured names.

use crate::domain::error::QuantsimError;
use crate::domain::strategy::buy::{
    BollReboundBuy, BollTrendPullbackBuy, MaCrossBuy, OversoldFactorsBuy, OversoldReboundBuy,
};
use crate::domain::strategy::sell::{
    BollUpperBreakSell, DifNextDayWeakerSell, FirstRedHistShrinkSell, HoldingNoProfitSell,
    MaCrossSell, StopLossPctSell, TrailingTakeProfitSell,
};
use crate::domain::strategy::{BuyStrategy, SellStrategy};

/// Tunables shared by the evaluators, read from the `[params]` section.
#[derive(Debug, Clone)]
pub struct StrategyParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub rsi_period: usize,
    pub oversold_threshold: f64,
    pub stop_loss_pct: f64,
    pub trailing_pullback_pct: f64,
    pub min_hold_days: usize,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            fast_period: 5,
            slow_period: 20,
            rsi_period: 6,
            oversold_threshold: 55.0,
            stop_loss_pct: 8.0,
            trailing_pullback_pct: 5.0,
            min_hold_days: 2,
        }
    }
}

pub fn make_buy_strategy(
    name: &str,
    params: &StrategyParams,
) -> Result<Box<dyn BuyStrategy>, QuantsimError> {
    match name {
        "ma_cross_buy" => Ok(Box::new(MaCrossBuy {
            fast_period: params.fast_period,
            slow_period: params.slow_period,
        })),
        "oversold_score_buy" => Ok(Box::new(OversoldFactorsBuy::new(
            params.oversold_threshold,
            params.rsi_period,
        ))),
        "oversold_rebound_buy" => Ok(Box::new(OversoldReboundBuy::default())),
        "boll_rebound_buy" => Ok(Box::new(BollReboundBuy::default())),
        "boll_trend_pullback_buy" => Ok(Box::new(BollTrendPullbackBuy::default())),
        _ => Err(QuantsimError::UnknownStrategy {
            name: name.to_string(),
        }),
    }
}

pub fn make_sell_strategy(
    name: &str,
    params: &StrategyParams,
) -> Result<Box<dyn SellStrategy>, QuantsimError> {
    match name {
        "ma_cross_sell" => Ok(Box::new(MaCrossSell::new(
            params.fast_period,
            params.slow_period,
        ))),
        "stop_loss_pct_sell" => Ok(Box::new(StopLossPctSell::new(params.stop_loss_pct))),
        "trailing_take_profit_sell" => Ok(Box::new(TrailingTakeProfitSell::new(
            params.trailing_pullback_pct,
        ))),
        "boll_upper_break_sell" => Ok(Box::new(BollUpperBreakSell::default())),
        "holding_no_profit_sell" => Ok(Box::new(HoldingNoProfitSell::new(params.min_hold_days))),
        "dif_next_day_weaker_sell" => Ok(Box::new(DifNextDayWeakerSell::default())),
        "first_red_hist_shrink_sell" => Ok(Box::new(FirstRedHistShrinkSell::default())),
        _ => Err(QuantsimError::UnknownStrategy {
            name: name.to_string(),
        }),
    }
}

/// All evaluator names the factory recognizes, for diagnostics.
pub fn known_strategies() -> (Vec<&'static str>, Vec<&'static str>) {
    (
        vec![
            "ma_cross_buy",
            "oversold_score_buy",
            "oversold_rebound_buy",
            "boll_rebound_buy",
            "boll_trend_pullback_buy",
        ],
        vec![
            "ma_cross_sell",
            "stop_loss_pct_sell",
            "trailing_take_profit_sell",
            "boll_upper_break_sell",
            "holding_no_profit_sell",
            "dif_next_day_weaker_sell",
            "first_red_hist_shrink_sell",
        ],
    )
}
