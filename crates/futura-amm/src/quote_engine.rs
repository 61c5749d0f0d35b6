//! Trade quoting.
//!
//! Computes the post-trade mark price, slippage and percentage impact of a
//! hypothetical trade without mutating the market state.

use serde::{Deserialize, Serialize};

use crate::curve::{mark_price_within, PriceBounds};
use crate::state::AmmState;

/// Quote for a hypothetical trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Mark price after the trade.
    pub price: f64,
    /// `|post - pre|`.
    pub slippage: f64,
    /// Slippage as a percentage of the pre-trade price.
    pub impact: f64,
}

/// Quote a signed trade against the default price bounds.
///
/// Positive `trade_size` buys (adds inventory), negative sells.
pub fn quote(state: &AmmState, trade_size: f64) -> PriceQuote {
    quote_within(state, trade_size, &PriceBounds::DEFAULT)
}

/// Quote a signed trade against explicit price bounds.
///
/// Never fails: sizes large enough to saturate the curve simply quote the
/// bound. The pre-trade price is clamped away from zero, so impact is finite.
pub fn quote_within(state: &AmmState, trade_size: f64, bounds: &PriceBounds) -> PriceQuote {
    let pre = mark_price_within(state, bounds);
    let post = mark_price_within(&state.shifted(trade_size), bounds);

    let slippage = (post - pre).abs();
    let impact = slippage / pre * 100.0;

    PriceQuote {
        price: post,
        slippage,
        impact,
    }
}
