//! HTTP client for fetching device state.
//!
//! One `ApiClient` serves every endpoint of the Underwater GPS REST API:
//! the recurring position endpoints, the one-shot antenna configuration,
//! and the diagnostic IMU/orientation readouts.

use crate::error::{ClientError, ClientResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use ugps_core::{AcousticFix, GeoFix, PositionFix, PositionKind};

/// Default timeout for API requests.
///
/// Bounds the worst-case staleness of a single kind's data stream; a hung
/// endpoint fails the current poll instead of stalling its poller forever.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Antenna configuration endpoint, fetched once at startup.
const ANTENNA_CONFIG_PATH: &str = "/api/v1/config/antenna";

/// IMU calibration state endpoint (diagnostic).
const IMU_CALIBRATE_PATH: &str = "/api/v1/imu/calibrate";

/// Externally supplied IMU readout endpoint (diagnostic).
const EXTERNAL_IMU_PATH: &str = "/api/v1/external/imu";

/// Externally supplied orientation readout endpoint (diagnostic).
const EXTERNAL_ORIENTATION_PATH: &str = "/api/v1/external/orientation";

/// Client for the device REST API.
pub struct ApiClient {
    /// HTTP client.
    client: Client,
    /// Base URL without trailing slash (e.g. "https://demo.waterlinked.com").
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the device (e.g. "https://demo.waterlinked.com")
    /// * `timeout` - Per-request timeout applied to every fetch
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Build(format!("Failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Create a client with the default request timeout.
    pub fn with_default_timeout(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the antenna configuration.
    ///
    /// One-shot at session start; the raw object is dumped verbatim to the
    /// session directory.
    pub async fn fetch_antenna_config(&self) -> ClientResult<Value> {
        self.get_json(ANTENNA_CONFIG_PATH).await
    }

    /// Fetch the current position of the given kind.
    pub async fn fetch_position(&self, kind: PositionKind) -> ClientResult<PositionFix> {
        match kind {
            PositionKind::Acoustic => self.fetch_acoustic().await.map(PositionFix::from),
            PositionKind::Global => self.fetch_global().await.map(PositionFix::from),
            PositionKind::Master => self.fetch_master().await.map(PositionFix::from),
        }
    }

    /// Fetch the filtered acoustic position (x/y/z relative to the array).
    pub async fn fetch_acoustic(&self) -> ClientResult<AcousticFix> {
        self.get_json(PositionKind::Acoustic.api_path()).await
    }

    /// Fetch the global GNSS-referenced position.
    pub async fn fetch_global(&self) -> ClientResult<GeoFix> {
        self.get_json(PositionKind::Global.api_path()).await
    }

    /// Fetch the master electronics GNSS position.
    pub async fn fetch_master(&self) -> ClientResult<GeoFix> {
        self.get_json(PositionKind::Master.api_path()).await
    }

    /// Fetch the IMU calibration state (diagnostic readout).
    pub async fn fetch_imu_calibration(&self) -> ClientResult<Value> {
        self.get_json(IMU_CALIBRATE_PATH).await
    }

    /// Fetch the externally supplied IMU readout (diagnostic).
    pub async fn fetch_external_imu(&self) -> ClientResult<Value> {
        self.get_json(EXTERNAL_IMU_PATH).await
    }

    /// Fetch the externally supplied orientation readout (diagnostic).
    pub async fn fetch_external_orientation(&self) -> ClientResult<Value> {
        self.get_json(EXTERNAL_ORIENTATION_PATH).await
    }

    /// GET a device endpoint and decode its JSON body.
    ///
    /// Error mapping: transport failures -> `Transport`, non-2xx ->
    /// `HttpStatus` with the body captured, undecodable 2xx body ->
    /// `Decode`.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
