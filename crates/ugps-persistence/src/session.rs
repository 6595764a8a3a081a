//! Per-run session directory.
//!
//! A session is one run of the logger, identified by its start timestamp.
//! The directory holds the one-shot antenna dump plus one CSV file per
//! position kind. Restarting always creates a new directory; an existing
//! one is never reused or overwritten.

use crate::error::{PersistenceError, PersistenceResult};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use ugps_core::PositionKind;

/// Session directory name format (start timestamp, second precision).
pub const SESSION_DIR_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File name of the one-shot antenna configuration dump.
pub const ANTENNA_FILE: &str = "antenna_position.txt";

/// One run's output directory.
#[derive(Debug)]
pub struct SessionDir {
    path: PathBuf,
}

impl SessionDir {
    /// Create `{base}/{start timestamp}`.
    ///
    /// Fails if the directory already exists (two starts within the same
    /// second) rather than mixing two recordings.
    pub fn create(base: &Path, started_at: DateTime<Utc>) -> PersistenceResult<Self> {
        let path = base.join(started_at.format(SESSION_DIR_FORMAT).to_string());
        if path.exists() {
            return Err(PersistenceError::SessionExists(path));
        }
        fs::create_dir_all(&path)?;
        info!(path = %path.display(), "Created session directory");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Output file path for one position kind.
    pub fn position_file(&self, kind: PositionKind) -> PathBuf {
        self.path.join(kind.file_name())
    }

    /// Dump the antenna configuration object, pretty-printed in the
    /// device's field order.
    pub fn write_antenna_config(&self, config: &Value) -> PersistenceResult<()> {
        let dump = serde_json::to_string_pretty(config)?;
        fs::write(self.path.join(ANTENNA_FILE), dump)?;
        info!(file = ANTENNA_FILE, "Wrote antenna configuration");
        Ok(())
    }
}
