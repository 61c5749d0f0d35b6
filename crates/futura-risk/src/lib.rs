//! Margin, PnL and liquidation arithmetic for Futura positions.
//!
//! All money values are `Decimal`. Prices enter from the curve once, via
//! `Price::from_f64`, and every calculation after that is exact.
//!
//! - [`margin`]: initial and maintenance requirements from max loss
//! - [`pnl`]: mark-to-market PnL
//! - [`liquidation`]: positions and the price that exhausts their margin
//! - [`health`]: margin health and at-risk flag
//! - [`preview`]: cost, payoff bounds and margin before a trade

pub mod config;
pub mod error;
pub mod health;
pub mod liquidation;
pub mod margin;
pub mod pnl;
pub mod preview;

pub use config::RiskConfig;
pub use error::{RiskError, RiskResult};
pub use health::{assess, is_at_risk, margin_health, HealthReport};
pub use liquidation::{liquidation_price, Position};
pub use margin::{
    margin, margin_with, max_loss, MarginResult, DEFAULT_INITIAL_MARGIN_BUFFER,
    DEFAULT_MAINTENANCE_RATE,
};
pub use pnl::{pnl, pnl_pct_of_margin};
pub use preview::{preview_trade, TradePreview};
