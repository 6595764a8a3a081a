//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Startup failed: {0}")]
    Startup(String),

    #[error("Client error: {0}")]
    Client(#[from] ugps_client::ClientError),

    #[error("Feed error: {0}")]
    Feed(#[from] ugps_feed::FeedError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] ugps_persistence::PersistenceError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] ugps_telemetry::TelemetryError),

    #[error("Task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
