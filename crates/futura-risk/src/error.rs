//! Risk error types.

use futura_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl RiskError {
    /// Short label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "invalid_config",
            Self::Core(e) => e.kind(),
        }
    }
}

pub type RiskResult<T> = Result<T, RiskError>;
