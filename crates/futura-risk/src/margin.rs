//! Margin requirements for binary contracts.
//!
//! A contract settles at 0 or 1, so a position's worst case is bounded:
//! a long loses its entry price per contract, a short loses the
//! complement. Both requirements scale that bound.

use futura_core::{Contracts, CoreError, Price, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;

pub const DEFAULT_MAINTENANCE_RATE: Decimal = dec!(0.10);
pub const DEFAULT_INITIAL_MARGIN_BUFFER: Decimal = dec!(1.20);

/// Collateral requirements for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarginResult {
    /// Collateral required to open the position.
    pub initial_margin: Decimal,
    /// Collateral below which the position is liquidated.
    pub maintenance_margin: Decimal,
    /// Worst-case loss at settlement.
    pub max_loss: Decimal,
}

impl MarginResult {
    pub const ZERO: Self = Self {
        initial_margin: Decimal::ZERO,
        maintenance_margin: Decimal::ZERO,
        max_loss: Decimal::ZERO,
    };
}

/// Worst-case settlement loss.
///
/// # Errors
/// `InvalidArgument` when the product does not fit a `Decimal`.
pub fn max_loss(contracts: Contracts, entry_price: Price) -> Result<Decimal> {
    let per_contract = if contracts.is_long() {
        entry_price.inner()
    } else {
        entry_price.complement().inner()
    };
    checked_mul(per_contract, contracts.notional(), "max loss")
}

/// Margin with the default initial buffer (1.20).
///
/// # Errors
/// `InvalidArgument` when a requirement overflows `Decimal`.
pub fn margin(
    contracts: Contracts,
    entry_price: Price,
    maintenance_rate: Decimal,
) -> Result<MarginResult> {
    margin_inner(
        contracts,
        entry_price,
        maintenance_rate,
        DEFAULT_INITIAL_MARGIN_BUFFER,
    )
}

/// Margin with rates taken from `config`.
pub fn margin_with(
    contracts: Contracts,
    entry_price: Price,
    config: &RiskConfig,
) -> Result<MarginResult> {
    margin_inner(
        contracts,
        entry_price,
        config.maintenance_margin_rate,
        config.initial_margin_buffer,
    )
}

fn margin_inner(
    contracts: Contracts,
    entry_price: Price,
    maintenance_rate: Decimal,
    initial_buffer: Decimal,
) -> Result<MarginResult> {
    if contracts.is_zero() {
        return Ok(MarginResult::ZERO);
    }
    let max_loss = max_loss(contracts, entry_price)?;
    let maintenance_factor = Decimal::ONE
        .checked_add(maintenance_rate)
        .ok_or_else(|| overflow("maintenance rate"))?;
    Ok(MarginResult {
        initial_margin: checked_mul(max_loss, initial_buffer, "initial margin")?,
        maintenance_margin: checked_mul(max_loss, maintenance_factor, "maintenance margin")?,
        max_loss,
    })
}

fn checked_mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> CoreError {
    CoreError::InvalidArgument(format!("{what} overflows decimal range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contracts(v: Decimal) -> Contracts {
        Contracts::new(v)
    }

    fn price(v: Decimal) -> Price {
        Price::new(v)
    }

    #[test]
    fn test_long_margin() {
        let m = margin(contracts(dec!(1000)), price(dec!(0.4)), DEFAULT_MAINTENANCE_RATE).unwrap();
        assert_eq!(m.max_loss, dec!(400));
        assert_eq!(m.initial_margin, dec!(480));
        assert_eq!(m.maintenance_margin, dec!(440));
    }

    #[test]
    fn test_short_margin() {
        let m = margin(contracts(dec!(-500)), price(dec!(0.68)), DEFAULT_MAINTENANCE_RATE).unwrap();
        assert_eq!(m.max_loss, dec!(160));
        assert_eq!(m.initial_margin, dec!(192));
        assert_eq!(m.maintenance_margin, dec!(176));
    }

    #[test]
    fn test_zero_contracts() {
        let m = margin(Contracts::ZERO, price(dec!(0.5)), DEFAULT_MAINTENANCE_RATE).unwrap();
        assert_eq!(m, MarginResult::ZERO);
    }

    #[test]
    fn test_maintenance_rate_is_applied() {
        let m = margin(contracts(dec!(100)), price(dec!(0.5)), dec!(0.25)).unwrap();
        assert_eq!(m.maintenance_margin, dec!(62.5));
        assert_eq!(m.initial_margin, dec!(60));
    }

    #[test]
    fn test_margin_with_config() {
        let config = RiskConfig {
            initial_margin_buffer: dec!(1.5),
            maintenance_margin_rate: dec!(0),
            ..Default::default()
        };
        let m = margin_with(contracts(dec!(10)), price(dec!(0.2)), &config).unwrap();
        assert_eq!(m.max_loss, dec!(2));
        assert_eq!(m.initial_margin, dec!(3));
        assert_eq!(m.maintenance_margin, dec!(2));
    }

    #[test]
    fn test_max_loss_bounded_by_notional() {
        for p in [dec!(0.01), dec!(0.5), dec!(0.99)] {
            let long = max_loss(contracts(dec!(50)), price(p)).unwrap();
            let short = max_loss(contracts(dec!(-50)), price(p)).unwrap();
            assert_eq!(long + short, dec!(50));
        }
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = contracts(dec!(70000000000000000000000000000));
        let err = margin(huge, price(dec!(0.99)), DEFAULT_MAINTENANCE_RATE).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));

        let err = max_loss(contracts(Decimal::MAX), price(dec!(2))).unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
    }
}
