//! Core domain types for the Futura probability futures engine.
//!
//! This crate provides fundamental types shared by the pricing and risk crates:
//! - `MarketKey`: Opaque identifier of a probability futures contract
//! - `Price`, `Contracts`: Precision-safe numeric types
//! - `Side`: Trade direction

pub mod decimal;
pub mod error;
pub mod market;
pub mod side;

pub use decimal::{Contracts, Price};
pub use error::{CoreError, Result};
pub use market::MarketKey;
pub use side::Side;
