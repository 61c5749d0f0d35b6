//! Command-line front end for the Futura pricing engine.
//!
//! Loads markets from configuration into an in-memory registry and runs a
//! single command against them:
//! - Market listing
//! - Trade preview (quote) and commit (trade)
//! - Margin, health and PnL for a position

pub mod app;
pub mod cli;
pub mod config;
pub mod error;

pub use app::Application;
pub use cli::{Args, Command};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
