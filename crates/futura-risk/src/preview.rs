//! Pre-trade preview.
//!
//! Combines the execution pricer with margin arithmetic so a front end can
//! show cost, payoff bounds and required collateral before committing.

use futura_amm::{average_price_with, quote_within, AmmState, CurveConfig, PriceQuote};
use futura_core::{CoreError, Price, Side};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::RiskConfig;
use crate::error::RiskResult;
use crate::margin::margin_with;

#[derive(Debug, Clone, Serialize)]
pub struct TradePreview {
    pub side: Side,
    /// Unsigned contract count.
    pub contracts: Decimal,
    /// Size-weighted average fill along the curve.
    pub average_price: Price,
    /// Post-trade mark, slippage and impact.
    pub quote: PriceQuote,
    /// `contracts × average_price`.
    pub estimated_cost: Decimal,
    /// Payoff if the outcome settles in the trader's favour.
    pub max_profit: Decimal,
    /// Loss if it settles against.
    pub max_loss: Decimal,
    /// Initial margin at the average fill price.
    pub required_margin: Decimal,
    pub fee: Decimal,
}

/// Preview a `side` trade of `contracts` against `state` without mutating it.
///
/// # Errors
/// `InvalidArgument` when `contracts` is not strictly positive, does not
/// fit the curve's `f64` domain, or its margin overflows `Decimal`.
pub fn preview_trade(
    state: &AmmState,
    side: Side,
    contracts: Decimal,
    curve: &CurveConfig,
    risk: &RiskConfig,
) -> RiskResult<TradePreview> {
    if contracts <= Decimal::ZERO {
        return Err(CoreError::InvalidArgument(format!(
            "contracts must be positive, got {contracts}"
        ))
        .into());
    }
    let magnitude = contracts
        .to_f64()
        .ok_or_else(|| CoreError::InvalidArgument(format!("contracts out of range: {contracts}")))?;
    let trade_size = match side {
        Side::Buy => magnitude,
        Side::Sell => -magnitude,
    };

    let avg = average_price_with(state, trade_size, curve)?;
    let average_price = Price::from_f64(avg)?;
    let quote = quote_within(state, trade_size, &curve.bounds());

    let estimated_cost = contracts * average_price.inner();
    let complement_value = contracts * average_price.complement().inner();
    let (max_profit, max_loss) = match side {
        Side::Buy => (complement_value, estimated_cost),
        Side::Sell => (estimated_cost, complement_value),
    };
    let required_margin = margin_with(side.signed(contracts), average_price, risk)?.initial_margin;

    debug!(
        side = %side,
        contracts = %contracts,
        average_price = %average_price,
        post_price = quote.price,
        "Trade previewed"
    );

    Ok(TradePreview {
        side,
        contracts,
        average_price,
        quote,
        estimated_cost,
        max_profit,
        max_loss,
        required_margin,
        fee: risk.flat_fee,
    })
}
