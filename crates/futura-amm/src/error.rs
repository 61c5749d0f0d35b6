//! AMM error types.

use futura_core::{CoreError, MarketKey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmmError {
    #[error("Market not found: {0}")]
    MarketNotFound(MarketKey),

    #[error("Market already exists: {0}")]
    MarketExists(MarketKey),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AmmError {
    /// Short machine-readable label, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MarketNotFound(_) => "market_not_found",
            Self::MarketExists(_) => "market_exists",
            Self::Core(e) => e.kind(),
        }
    }
}

pub type AmmResult<T> = Result<T, AmmError>;
