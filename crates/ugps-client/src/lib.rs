//! HTTP client for the Underwater GPS REST API.
//!
//! Wraps a single `reqwest::Client` with the device's endpoint set and a
//! uniform error taxonomy. No retries live at this layer; every failure is
//! reported upward immediately.

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use error::{ClientError, ClientResult};
