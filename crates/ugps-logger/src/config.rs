//! Application configuration.
//!
//! Loaded from a TOML file when one is given (or found at the default
//! path), otherwise built from defaults. CLI flags override individual
//! fields after loading.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default config file path, used when no `--config` or `UGPS_CONFIG` is
/// given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the device REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Directory session directories are created under.
    #[serde(default = "default_save_dir")]
    pub save_dir: String,
    /// Whether readings are persisted at all (`--no-save` clears this).
    #[serde(default = "default_persist")]
    pub persist: bool,
    /// Poll cadence per position kind (ms).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Per-request timeout on the device API (ms).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Collector queue capacity in readings. Pollers block on push when
    /// the writer lags this far behind.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Console status summary cadence (seconds).
    #[serde(default = "default_status_interval_secs")]
    pub status_interval_secs: u64,
    /// Dump IMU/orientation diagnostics once at startup.
    #[serde(default)]
    pub startup_diagnostics: bool,
}

fn default_base_url() -> String {
    "https://demo.waterlinked.com".to_string()
}

fn default_save_dir() -> String {
    "save".to_string()
}

fn default_persist() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_queue_capacity() -> usize {
    1_024
}

fn default_status_interval_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            save_dir: default_save_dir(),
            persist: default_persist(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            queue_capacity: default_queue_capacity(),
            status_interval_secs: default_status_interval_secs(),
            startup_diagnostics: false,
        }
    }
}

impl AppConfig {
    /// Load from the default path if it exists, otherwise use defaults.
    pub fn load() -> AppResult<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://demo.waterlinked.com");
        assert_eq!(config.save_dir, "save");
        assert!(config.persist);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(!config.startup_diagnostics);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AppConfig =
            toml::from_str(r#"base_url = "http://192.168.2.94""#).unwrap();
        assert_eq!(config.base_url, "http://192.168.2.94");
        assert_eq!(config.save_dir, "save");
        assert_eq!(config.queue_capacity, 1_024);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("poll_interval_ms"));
    }
}
