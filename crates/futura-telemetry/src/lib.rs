//! Prometheus metrics and structured logging for Futura.
//!
//! - Prometheus metrics for quotes, commits, price impact and rejected inputs
//! - Structured logging with tracing (JSON in production, pretty otherwise)

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
