//! Bonding curve configuration.

use futura_core::{CoreError, Result};
use serde::{Deserialize, Serialize};

use crate::curve::PriceBounds;

/// How the execution pricer integrates the curve over a trade.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMethod {
    /// Left Riemann sum over `integration_steps` equal slices.
    #[default]
    Discrete,
    /// Exact integral of the clamped logistic curve.
    ClosedForm,
}

/// Curve configuration, shared by all markets unless overridden per market.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveConfig {
    /// Lowest mark price the curve will report.
    #[serde(default = "default_price_floor")]
    pub price_floor: f64,

    /// Highest mark price the curve will report.
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,

    /// Number of slices used by the discrete execution pricer.
    /// More slices converge on the exact integral at proportional cost.
    #[serde(default = "default_integration_steps")]
    pub integration_steps: u32,

    #[serde(default)]
    pub execution_method: ExecutionMethod,

    /// Curve steepness used when a market does not set its own.
    #[serde(default = "default_depth")]
    pub default_depth: f64,

    /// Opening probability used when a market does not set its own.
    #[serde(default = "default_initial_probability")]
    pub default_initial_probability: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            price_floor: default_price_floor(),
            price_ceiling: default_price_ceiling(),
            integration_steps: default_integration_steps(),
            execution_method: ExecutionMethod::default(),
            default_depth: default_depth(),
            default_initial_probability: default_initial_probability(),
        }
    }
}

impl CurveConfig {
    /// Clamp bounds for the mark price.
    pub fn bounds(&self) -> PriceBounds {
        PriceBounds {
            floor: self.price_floor,
            ceiling: self.price_ceiling,
        }
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        PriceBounds::new(self.price_floor, self.price_ceiling)?;
        if self.integration_steps == 0 {
            return Err(CoreError::InvalidConfig(
                "integration_steps must be at least 1".to_string(),
            ));
        }
        if !(self.default_depth.is_finite() && self.default_depth > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "default_depth must be positive, got {}",
                self.default_depth
            )));
        }
        let p = self.default_initial_probability;
        if !(p > 0.0 && p < 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "default_initial_probability must be in (0, 1), got {p}"
            )));
        }
        Ok(())
    }
}

fn default_price_floor() -> f64 {
    0.01
}
fn default_price_ceiling() -> f64 {
    0.99
}
fn default_integration_steps() -> u32 {
    100
}
fn default_depth() -> f64 {
    5.0
}
fn default_initial_probability() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CurveConfig::default();
        assert!((config.price_floor - 0.01).abs() < f64::EPSILON);
        assert!((config.price_ceiling - 0.99).abs() < f64::EPSILON);
        assert_eq!(config.integration_steps, 100);
        assert_eq!(config.execution_method, ExecutionMethod::Discrete);
        assert!((config.default_depth - 5.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_defaults() {
        let toml_str = r#"
execution_method = "closed_form"
price_floor = 0.05
"#;
        let config: CurveConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.execution_method, ExecutionMethod::ClosedForm);
        assert!((config.price_floor - 0.05).abs() < f64::EPSILON);
        assert!((config.price_ceiling - 0.99).abs() < f64::EPSILON);
        assert_eq!(config.integration_steps, 100);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let inverted = CurveConfig {
            price_floor: 0.9,
            price_ceiling: 0.1,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let no_steps = CurveConfig {
            integration_steps: 0,
            ..Default::default()
        };
        assert!(no_steps.validate().is_err());

        let flat = CurveConfig {
            default_depth: 0.0,
            ..Default::default()
        };
        assert!(flat.validate().is_err());
    }
}
