//! Precision-safe decimal types for margin and PnL.
//!
//! Uses `rust_decimal` for exact decimal arithmetic on money values.
//! Curve evaluation runs in `f64`; prices cross into `Decimal` once,
//! through [`Price::from_f64`].

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// Contract price, interpreted as an implied probability.
///
/// Wraps `Decimal` to provide type safety and prevent mixing
/// prices with contract counts in calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    /// Convert a curve output into a decimal price.
    ///
    /// Rejects NaN and infinities rather than silently mapping them to zero.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(CoreError::InvalidArgument(format!(
                "price must be finite, got {value}"
            )));
        }
        Decimal::from_f64(value)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidArgument(format!("price out of range: {value}")))
    }

    /// Lossy conversion back into curve space.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Price of the opposite outcome: `1 - p`.
    #[inline]
    pub fn complement(&self) -> Self {
        Self(Decimal::ONE - self.0)
    }

    /// True when the price lies in the settlement range `[0, 1]`.
    #[inline]
    pub fn is_probability(&self) -> bool {
        self.0 >= Decimal::ZERO && self.0 <= Decimal::ONE
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed contract count: positive = long, negative = short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contracts(pub Decimal);

impl Contracts {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_long(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Unsigned contract count (each contract pays 1 at settlement).
    #[inline]
    pub fn notional(&self) -> Decimal {
        self.0.abs()
    }

    /// Lossy conversion into curve space (trade size for the AMM).
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_from_f64() {
        let price = Price::from_f64(0.42).unwrap();
        assert_eq!(price.inner().round_dp(6), dec!(0.42));
    }

    #[test]
    fn test_price_from_non_finite_rejected() {
        assert!(matches!(
            Price::from_f64(f64::NAN),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(Price::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_price_complement() {
        let price = Price::new(dec!(0.68));
        assert_eq!(price.complement().inner(), dec!(0.32));
        assert!(price.is_probability());
        assert!(!Price::new(dec!(1.01)).is_probability());
    }

    #[test]
    fn test_contracts_direction() {
        let long = Contracts::new(dec!(1000));
        let short = Contracts::new(dec!(-500));

        assert!(long.is_long());
        assert!(!short.is_long());
        assert_eq!(short.notional(), dec!(500));
        assert!(!Contracts::ZERO.is_long() && Contracts::ZERO.is_zero());
    }

    #[test]
    fn test_contracts_to_f64() {
        assert_eq!(Contracts::new(dec!(-2.5)).to_f64(), -2.5);
    }

    #[test]
    fn test_serde_transparent() {
        let price: Price = serde_json::from_str("\"0.55\"").unwrap();
        assert_eq!(price.inner(), dec!(0.55));
    }
}
