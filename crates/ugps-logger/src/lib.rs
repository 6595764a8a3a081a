//! Underwater GPS position logger.
//!
//! Main application that orchestrates all components:
//! - one poller per position kind against the device REST API
//! - the collector channel feeding the session writer
//! - live console status and graceful ctrl-c shutdown

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
