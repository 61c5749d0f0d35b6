//! AMM state and market initialization.

use futura_core::{CoreError, Result};
use serde::{Deserialize, Serialize};

use crate::curve::logit;

/// Inventory state of one market's AMM.
///
/// A plain `Copy` value: pricing functions read snapshots, and only the
/// market's [`MarketBook`](crate::MarketBook) replaces its authoritative copy.
/// `net_position` is the only field that changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmmState {
    /// Net inventory (Q).
    net_position: f64,
    /// Curve centre (Q0); fixed so the opening mark equals the requested probability.
    base_position: f64,
    /// Steepness (k); higher means less price movement per contract.
    liquidity_depth: f64,
    /// Nominal collateral backing the market.
    total_liquidity: f64,
}

impl AmmState {
    /// Build a state whose mark price equals `initial_probability`.
    ///
    /// Solves the inverse sigmoid for the curve centre with the market opening
    /// on zero net inventory: `Q0 = ln(1/p - 1) / k`, so `k * (0 - Q0) = logit(p)`.
    ///
    /// # Errors
    /// `InvalidArgument` when `initial_probability` is not strictly inside (0, 1)
    /// (the inverse sigmoid is undefined there), or when `depth` or
    /// `total_liquidity` is not a positive finite number.
    pub fn initialize(total_liquidity: f64, initial_probability: f64, depth: f64) -> Result<Self> {
        if !(initial_probability > 0.0 && initial_probability < 1.0) {
            return Err(CoreError::InvalidArgument(format!(
                "initial probability must be strictly between 0 and 1, got {initial_probability}"
            )));
        }
        let base_position = -logit(initial_probability) / depth;
        Self::from_parts(0.0, base_position, depth, total_liquidity)
    }

    /// Build a state from raw fields, validating depth and liquidity.
    pub fn from_parts(
        net_position: f64,
        base_position: f64,
        liquidity_depth: f64,
        total_liquidity: f64,
    ) -> Result<Self> {
        if !(liquidity_depth.is_finite() && liquidity_depth > 0.0) {
            return Err(CoreError::InvalidArgument(format!(
                "liquidity depth must be positive and finite, got {liquidity_depth}"
            )));
        }
        if !(total_liquidity.is_finite() && total_liquidity > 0.0) {
            return Err(CoreError::InvalidArgument(format!(
                "total liquidity must be positive and finite, got {total_liquidity}"
            )));
        }
        if !net_position.is_finite() || !base_position.is_finite() {
            return Err(CoreError::InvalidArgument(format!(
                "positions must be finite, got net={net_position} base={base_position}"
            )));
        }
        Ok(Self {
            net_position,
            base_position,
            liquidity_depth,
            total_liquidity,
        })
    }

    #[inline]
    pub fn net_position(&self) -> f64 {
        self.net_position
    }

    #[inline]
    pub fn base_position(&self) -> f64 {
        self.base_position
    }

    #[inline]
    pub fn liquidity_depth(&self) -> f64 {
        self.liquidity_depth
    }

    #[inline]
    pub fn total_liquidity(&self) -> f64 {
        self.total_liquidity
    }

    /// Inventory offset from the curve centre (`Q - Q0`).
    #[inline]
    pub fn skew(&self) -> f64 {
        self.net_position - self.base_position
    }

    /// Shadow copy with `trade_size` applied to the inventory.
    ///
    /// Does not touch `self`; the caller decides whether to commit.
    #[inline]
    #[must_use]
    pub fn shifted(&self, trade_size: f64) -> Self {
        Self {
            net_position: self.net_position + trade_size,
            ..*self
        }
    }
}
