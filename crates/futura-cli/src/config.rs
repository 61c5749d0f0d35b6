//! Application configuration.

use crate::error::{AppError, AppResult};
use futura_amm::{CurveConfig, MarketParams};
use futura_risk::RiskConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable overriding the configuration path.
pub const CONFIG_ENV_VAR: &str = "FUTURA_CONFIG";

/// A market to create at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketConfig {
    /// Contract identifier (e.g., "btc-100k-30d").
    pub contract_id: String,
    /// Collateral backing the market.
    pub total_liquidity: f64,
    /// Opening probability. If None, uses `curve.default_initial_probability`.
    #[serde(default)]
    pub initial_probability: Option<f64>,
    /// Curve steepness. If None, uses `curve.default_depth`.
    #[serde(default)]
    pub depth: Option<f64>,
    /// Per-market curve override (e.g. tighter price bounds).
    #[serde(default)]
    pub curve: Option<CurveConfig>,
}

impl MarketConfig {
    pub fn params(&self) -> MarketParams {
        MarketParams {
            total_liquidity: self.total_liquidity,
            initial_probability: self.initial_probability,
            depth: self.depth,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info,futura=debug".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Where a configuration was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    /// The default file was missing; built-in defaults apply.
    Defaults(String),
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Curve configuration shared by all markets.
    #[serde(default)]
    pub curve: CurveConfig,
    /// Margin configuration.
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Markets created at startup.
    #[serde(default)]
    pub markets: Vec<MarketConfig>,
}

impl AppConfig {
    /// Load configuration: CLI arg > `FUTURA_CONFIG` > `config/default.toml`.
    ///
    /// An explicitly named file must exist; a missing default file falls
    /// back to built-in defaults.
    pub fn load(cli_path: Option<String>) -> AppResult<(Self, ConfigSource)> {
        if let Some(path) = cli_path.or_else(|| std::env::var(CONFIG_ENV_VAR).ok()) {
            let config = Self::from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            let config = Self::from_file(DEFAULT_CONFIG_PATH)?;
            Ok((config, ConfigSource::File(DEFAULT_CONFIG_PATH.to_string())))
        } else {
            Ok((
                Self::default(),
                ConfigSource::Defaults(DEFAULT_CONFIG_PATH.to_string()),
            ))
        }
    }

    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check curve and risk settings and reject duplicate contract ids.
    pub fn validate(&self) -> AppResult<()> {
        self.curve.validate()?;
        self.risk.validate()?;

        let mut seen = std::collections::HashSet::new();
        for market in &self.markets {
            if let Some(curve) = &market.curve {
                curve.validate()?;
            }
            if !seen.insert(market.contract_id.as_str()) {
                return Err(AppError::Config(format!(
                    "duplicate market: {}",
                    market.contract_id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futura_amm::ExecutionMethod;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.markets.is_empty());
        assert_eq!(config.curve.integration_steps, 100);
        assert_eq!(config.telemetry.log_level, "info,futura=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_markets() {
        let config = AppConfig::from_toml(
            r#"
            [curve]
            execution_method = "closed_form"

            [risk]
            flat_fee = "0.1"

            [[markets]]
            contract_id = "btc-100k-7d"
            total_liquidity = 100000.0
            initial_probability = 0.42
            depth = 5.0

            [[markets]]
            contract_id = "eth-5k-60d"
            total_liquidity = 50000.0

            [markets.curve]
            price_floor = 0.05
            price_ceiling = 0.95
            "#,
        )
        .unwrap();

        assert_eq!(config.curve.execution_method, ExecutionMethod::ClosedForm);
        assert_eq!(config.risk.flat_fee, dec!(0.1));
        assert_eq!(config.markets.len(), 2);

        let btc = &config.markets[0];
        assert_eq!(btc.params().initial_probability, Some(0.42));
        assert!(btc.curve.is_none());

        let eth = &config.markets[1];
        assert_eq!(eth.params().depth, None);
        assert_eq!(eth.curve.as_ref().map(|c| c.price_floor), Some(0.05));
    }

    #[test]
    fn test_duplicate_market_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [[markets]]
            contract_id = "dup"
            total_liquidity = 1.0

            [[markets]]
            contract_id = "dup"
            total_liquidity = 2.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [curve]
            price_floor = 0.9
            price_ceiling = 0.1
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Core(_)));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(AppConfig::from_file("does/not/exist.toml").is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("integration_steps"));
        assert!(toml_str.contains("maintenance_margin_rate"));
    }
}
