//! Sigmoid bonding-curve AMM for probability futures.
//!
//! Provides the pricing core:
//! - Bonding curve mapping inventory to a bounded mark price
//! - Trade quoting (post-trade price, slippage, impact)
//! - Execution pricing (size-weighted average fill along the curve)
//! - Market initialization from a target probability
//! - Per-market books with single-writer trade commits
//!
//! # Architecture
//!
//! ```text
//! AmmState::initialize → MarketRegistry.create_market()
//!                          ├─ quote():        snapshot → quote_within()
//!                          ├─ average_price(): snapshot → average_price_with()
//!                          └─ commit_trade(): write lock → MarketBook::commit()
//!                               ↓
//!                          futura-risk (margin / PnL on the resulting prices)
//! ```

pub mod book;
pub mod config;
pub mod curve;
pub mod error;
pub mod execution;
pub mod quote_engine;
pub mod state;

pub use book::{BookSummary, Fill, MarketBook, MarketParams, MarketRegistry};
pub use config::{CurveConfig, ExecutionMethod};
pub use curve::{mark_price, mark_price_within, PriceBounds};
pub use error::{AmmError, AmmResult};
pub use execution::{
    average_price, average_price_with, closed_form_average, discrete_average,
    DEFAULT_INTEGRATION_STEPS,
};
pub use quote_engine::{quote, quote_within, PriceQuote};
pub use state::AmmState;
