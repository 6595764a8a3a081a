//! Structured logging and metrics for the UGPS position logger.
//!
//! Provides:
//! - tracing initialization (JSON in production, pretty in development)
//! - Prometheus counters behind the `Metrics` facade
//! - a periodic console status summary built from those counters

pub mod error;
pub mod logging;
pub mod metrics;
pub mod status;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
pub use status::{KindStats, StatusReporter};
