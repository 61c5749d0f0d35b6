//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] futura_core::CoreError),

    #[error("AMM error: {0}")]
    Amm(#[from] futura_amm::AmmError),

    #[error("Risk error: {0}")]
    Risk(#[from] futura_risk::RiskError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] futura_telemetry::TelemetryError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
