//! Client error taxonomy.
//!
//! Mirrors the three failure classes of a fetch: transport-level failures,
//! non-2xx responses, and undecodable bodies.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, timeout, DNS failure and friends.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response; the body is captured for diagnosis.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// 2xx response whose body is not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// HTTP client construction failed.
    #[error("Client build error: {0}")]
    Build(String),
}

impl ClientError {
    /// Stable label for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::Decode(_) => "decode",
            Self::Build(_) => "build",
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
