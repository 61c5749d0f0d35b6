//! Margin health of open positions.
//!
//! Health is posted margin as a percentage of the initial requirement.
//! A freshly opened position sits at 100% or above; it is flagged at risk
//! once health falls below `RiskConfig::at_risk_health_pct`.

use futura_core::{Price, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::RiskConfig;
use crate::liquidation::Position;
use crate::pnl::pnl_pct_of_margin;

/// `margin / initial_margin × 100`. `None` when nothing is required.
pub fn margin_health(margin: Decimal, initial_margin: Decimal) -> Option<Decimal> {
    if initial_margin.is_zero() {
        return None;
    }
    margin
        .checked_div(initial_margin)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}

pub fn is_at_risk(health_pct: Decimal, config: &RiskConfig) -> bool {
    health_pct < config.at_risk_health_pct
}

/// Risk view of one position at a given mark.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub position: Position,
    pub mark_price: Price,
    pub unrealized_pnl: Decimal,
    pub pnl_pct_of_margin: Option<Decimal>,
    pub initial_margin: Decimal,
    pub maintenance_margin: Decimal,
    pub health_pct: Option<Decimal>,
    pub at_risk: bool,
    pub liquidation_price: Option<Price>,
}

/// # Errors
/// `InvalidArgument` when the position's requirements overflow `Decimal`.
pub fn assess(
    position: &Position,
    mark_price: Price,
    config: &RiskConfig,
) -> Result<HealthReport> {
    let requirements = position.requirements(config)?;
    let unrealized_pnl = position.unrealized_pnl(mark_price);
    let health_pct = margin_health(position.margin, requirements.initial_margin);

    Ok(HealthReport {
        position: *position,
        mark_price,
        unrealized_pnl,
        pnl_pct_of_margin: pnl_pct_of_margin(unrealized_pnl, position.margin),
        initial_margin: requirements.initial_margin,
        maintenance_margin: requirements.maintenance_margin,
        health_pct,
        at_risk: health_pct.is_some_and(|h| is_at_risk(h, config)),
        liquidation_price: position.liquidation_price(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futura_core::Contracts;
    use rust_decimal_macros::dec;

    #[test]
    fn test_health_percentage() {
        assert_eq!(margin_health(dec!(600), dec!(480)), Some(dec!(125)));
        assert_eq!(margin_health(dec!(480), dec!(480)), Some(dec!(100)));
        assert_eq!(margin_health(dec!(10), Decimal::ZERO), None);
    }

    #[test]
    fn test_at_risk_threshold() {
        let config = RiskConfig::default();
        assert!(is_at_risk(dec!(100), &config));
        assert!(is_at_risk(dec!(119.99), &config));
        assert!(!is_at_risk(dec!(120), &config));
    }

    #[test]
    fn test_assess_long() {
        let pos = Position::new(Contracts::new(dec!(1000)), Price::new(dec!(0.4)), dec!(480));
        let report = assess(&pos, Price::new(dec!(0.5)), &RiskConfig::default()).unwrap();

        assert_eq!(report.unrealized_pnl, dec!(100));
        assert_eq!(report.initial_margin, dec!(480));
        assert_eq!(report.maintenance_margin, dec!(440));
        assert_eq!(report.health_pct, Some(dec!(100)));
        assert!(report.at_risk);
        assert_eq!(report.liquidation_price, None);
    }

    #[test]
    fn test_assess_well_margined_short() {
        let pos = Position::new(Contracts::new(dec!(-500)), Price::new(dec!(0.68)), dec!(240));
        let report = assess(&pos, Price::new(dec!(0.60)), &RiskConfig::default()).unwrap();

        assert_eq!(report.unrealized_pnl, dec!(40));
        assert_eq!(report.health_pct, Some(dec!(125)));
        assert!(!report.at_risk);
    }

    #[test]
    fn test_assess_flat_position() {
        let pos = Position::new(Contracts::ZERO, Price::new(dec!(0.5)), Decimal::ZERO);
        let report = assess(&pos, Price::new(dec!(0.5)), &RiskConfig::default()).unwrap();
        assert_eq!(report.health_pct, None);
        assert!(!report.at_risk);
        assert_eq!(report.pnl_pct_of_margin, None);
    }

    #[test]
    fn test_assess_overflow_is_an_error() {
        let pos = Position::new(Contracts::new(Decimal::MAX), Price::new(dec!(0.99)), dec!(1));
        assert!(assess(&pos, Price::new(dec!(0.5)), &RiskConfig::default()).is_err());
        assert_eq!(margin_health(Decimal::MAX, dec!(0.5)), None);
    }
}
