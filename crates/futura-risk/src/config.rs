//! Risk configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// Margin and display parameters applied to every position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskConfig {
    /// Extra fraction of max loss required as maintenance margin (0.10 = 10%).
    #[serde(default = "default_maintenance_margin_rate")]
    pub maintenance_margin_rate: Decimal,

    /// Multiplier on max loss for the initial margin requirement.
    #[serde(default = "default_initial_margin_buffer")]
    pub initial_margin_buffer: Decimal,

    /// Margin health (percent of initial margin) below which a position is at risk.
    #[serde(default = "default_at_risk_health_pct")]
    pub at_risk_health_pct: Decimal,

    /// Flat fee shown on trade previews.
    #[serde(default)]
    pub flat_fee: Decimal,
}

fn default_maintenance_margin_rate() -> Decimal {
    Decimal::new(10, 2) // 0.10
}
fn default_initial_margin_buffer() -> Decimal {
    Decimal::new(120, 2) // 1.20
}
fn default_at_risk_health_pct() -> Decimal {
    Decimal::new(120, 0)
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            maintenance_margin_rate: default_maintenance_margin_rate(),
            initial_margin_buffer: default_initial_margin_buffer(),
            at_risk_health_pct: default_at_risk_health_pct(),
            flat_fee: Decimal::ZERO,
        }
    }
}

impl RiskConfig {
    pub fn validate(&self) -> RiskResult<()> {
        if self.maintenance_margin_rate.is_sign_negative() {
            return Err(RiskError::ConfigError(format!(
                "maintenance_margin_rate must be non-negative, got {}",
                self.maintenance_margin_rate
            )));
        }
        if self.initial_margin_buffer < Decimal::ONE {
            return Err(RiskError::ConfigError(format!(
                "initial_margin_buffer must be at least 1, got {}",
                self.initial_margin_buffer
            )));
        }
        if self.at_risk_health_pct <= Decimal::ZERO {
            return Err(RiskError::ConfigError(format!(
                "at_risk_health_pct must be positive, got {}",
                self.at_risk_health_pct
            )));
        }
        if self.flat_fee.is_sign_negative() {
            return Err(RiskError::ConfigError(format!(
                "flat_fee must be non-negative, got {}",
                self.flat_fee
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = RiskConfig::default();
        assert_eq!(config.maintenance_margin_rate, dec!(0.10));
        assert_eq!(config.initial_margin_buffer, dec!(1.20));
        assert_eq!(config.at_risk_health_pct, dec!(120));
        assert_eq!(config.flat_fee, Decimal::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RiskConfig = toml::from_str("flat_fee = \"0.25\"").unwrap();
        assert_eq!(config.flat_fee, dec!(0.25));
        assert_eq!(config.initial_margin_buffer, dec!(1.20));
    }

    #[test]
    fn test_validate_rejects_small_buffer() {
        let config = RiskConfig {
            initial_margin_buffer: dec!(0.9),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RiskError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let config = RiskConfig {
            maintenance_margin_rate: dec!(-0.01),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
