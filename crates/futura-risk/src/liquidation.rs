//! Positions and their liquidation price.

use futura_core::{Contracts, Price, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;
use crate::margin::{margin_with, MarginResult};
use crate::pnl::pnl;

/// An open position as the risk layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Signed contract count (positive = long).
    pub contracts: Contracts,
    /// Average entry price.
    pub entry_price: Price,
    /// Collateral posted against the position.
    pub margin: Decimal,
}

impl Position {
    pub fn new(contracts: Contracts, entry_price: Price, margin: Decimal) -> Self {
        Self {
            contracts,
            entry_price,
            margin,
        }
    }

    pub fn unrealized_pnl(&self, current_price: Price) -> Decimal {
        pnl(self.contracts, self.entry_price, current_price)
    }

    /// Posted margin plus unrealized PnL, saturating at the `Decimal` range.
    pub fn equity(&self, current_price: Price) -> Decimal {
        self.margin.saturating_add(self.unrealized_pnl(current_price))
    }

    pub fn requirements(&self, config: &RiskConfig) -> Result<MarginResult> {
        margin_with(self.contracts, self.entry_price, config)
    }

    pub fn liquidation_price(&self) -> Option<Price> {
        liquidation_price(self)
    }
}

/// Price at which posted margin is exhausted: `entry − margin / contracts`.
///
/// `None` for a flat position, or when the price lies outside `[0, 1]`
/// (a fully collateralized position can never be liquidated).
pub fn liquidation_price(position: &Position) -> Option<Price> {
    if position.contracts.is_zero() {
        return None;
    }
    let offset = position.margin.checked_div(position.contracts.inner())?;
    let price = Price::new(position.entry_price.inner() - offset);
    price.is_probability().then_some(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn position(contracts: Decimal, entry: Decimal, margin: Decimal) -> Position {
        Position::new(Contracts::new(contracts), Price::new(entry), margin)
    }

    #[test]
    fn test_long_liquidation() {
        let pos = position(dec!(1000), dec!(0.4), dec!(100));
        assert_eq!(liquidation_price(&pos), Some(Price::new(dec!(0.3))));
    }

    #[test]
    fn test_short_liquidation() {
        let pos = position(dec!(-500), dec!(0.68), dec!(100));
        assert_eq!(liquidation_price(&pos), Some(Price::new(dec!(0.88))));
    }

    #[test]
    fn test_fully_collateralized_long_is_none() {
        // initial margin (480) exceeds the 400 max loss
        let pos = position(dec!(1000), dec!(0.4), dec!(480));
        assert_eq!(liquidation_price(&pos), None);
    }

    #[test]
    fn test_fully_collateralized_short_is_none() {
        let pos = position(dec!(-500), dec!(0.68), dec!(192));
        assert_eq!(pos.liquidation_price(), None);
    }

    #[test]
    fn test_flat_position_is_none() {
        let pos = position(Decimal::ZERO, dec!(0.5), dec!(10));
        assert_eq!(liquidation_price(&pos), None);
    }

    #[test]
    fn test_equity_zero_at_liquidation_price() {
        let pos = position(dec!(250), dec!(0.6), dec!(50));
        let liq = liquidation_price(&pos).unwrap();
        assert!(pos.equity(liq).is_zero());
    }

    #[test]
    fn test_requirements_use_config() {
        let pos = position(dec!(1000), dec!(0.4), dec!(480));
        let req = pos.requirements(&RiskConfig::default()).unwrap();
        assert_eq!(req.initial_margin, dec!(480));
    }

    #[test]
    fn test_requirements_overflow_is_an_error() {
        let pos = position(Decimal::MAX, dec!(0.9), dec!(1));
        assert!(pos.requirements(&RiskConfig::default()).is_err());
    }
}
