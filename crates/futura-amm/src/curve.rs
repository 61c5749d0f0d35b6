//! Sigmoid bonding curve.
//!
//! Maps AMM inventory to a mark price:
//!
//! ```text
//! p(Q) = clamp(1 / (1 + exp(-k * (Q - Q0))), floor, ceiling)
//! ```
//!
//! The logistic is strictly increasing in `Q`, bounded, and symmetric around
//! `Q0`, so the market maker never quotes outside valid probability bounds
//! however large its inventory grows.

use futura_core::{CoreError, Result};
use serde::{Deserialize, Serialize};

use crate::state::AmmState;

/// Clamp range for the mark price.
///
/// Keeps every reported price strictly inside (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub floor: f64,
    pub ceiling: f64,
}

impl PriceBounds {
    /// Default bounds `[0.01, 0.99]`.
    pub const DEFAULT: Self = Self {
        floor: 0.01,
        ceiling: 0.99,
    };

    /// Create bounds with `0 < floor < ceiling < 1`.
    pub fn new(floor: f64, ceiling: f64) -> Result<Self> {
        if !(floor > 0.0 && floor < ceiling && ceiling < 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "price bounds must satisfy 0 < floor < ceiling < 1, got [{floor}, {ceiling}]"
            )));
        }
        Ok(Self { floor, ceiling })
    }

    #[inline]
    pub fn clamp(&self, p: f64) -> f64 {
        p.max(self.floor).min(self.ceiling)
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Mark price of `state` with the default `[0.01, 0.99]` bounds.
pub fn mark_price(state: &AmmState) -> f64 {
    mark_price_within(state, &PriceBounds::DEFAULT)
}

/// Mark price of `state` clamped to `bounds`.
pub fn mark_price_within(state: &AmmState, bounds: &PriceBounds) -> f64 {
    price_at(state, state.net_position(), bounds)
}

/// Curve value at an arbitrary inventory level, keeping the state's
/// base position and depth.
pub(crate) fn price_at(state: &AmmState, net_position: f64, bounds: &PriceBounds) -> f64 {
    let exponent = -state.liquidity_depth() * (net_position - state.base_position());
    bounds.clamp(logistic(exponent))
}

/// `1 / (1 + exp(x))`, saturating instead of producing NaN.
///
/// `exp` overflows to +inf for large `x`, which already yields 0; the only
/// non-finite escape is a NaN exponent (e.g. `0 * inf`), mapped to the midpoint.
#[inline]
fn logistic(exponent: f64) -> f64 {
    if exponent.is_nan() {
        return 0.5;
    }
    1.0 / (1.0 + exponent.exp())
}

/// Inverse of the logistic: `ln(p / (1 - p))`.
#[inline]
pub(crate) fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}
