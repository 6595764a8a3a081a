//! Timestamped position readings.
//!
//! A `Reading` is one sample for one position kind, stamped at the moment
//! its fetch completed. A failed fetch still produces a `Reading` (with no
//! fix) so the pipeline sees every poll attempt.

use crate::position::{PositionFix, PositionKind};
use chrono::{DateTime, Utc};

/// Timestamp format of output rows: date, dot, time with microseconds.
///
/// Example: `20260806.142501123456`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d.%H%M%S%6f";

/// Render a capture time in the output row format.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// One timestamped sample (or failure marker) for one position kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Which subsystem produced this sample.
    pub kind: PositionKind,
    /// When the fetch completed.
    pub captured_at: DateTime<Utc>,
    /// Decoded payload; `None` marks a failed fetch.
    pub fix: Option<PositionFix>,
}

impl Reading {
    /// A successful sample, stamped now.
    pub fn success(kind: PositionKind, fix: impl Into<PositionFix>) -> Self {
        Self {
            kind,
            captured_at: Utc::now(),
            fix: Some(fix.into()),
        }
    }

    /// A failed poll attempt, stamped now.
    pub fn failure(kind: PositionKind) -> Self {
        Self {
            kind,
            captured_at: Utc::now(),
            fix: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.fix.is_none()
    }

    /// Capture time in the output row format.
    pub fn timestamp(&self) -> String {
        format_timestamp(self.captured_at)
    }

    /// Full CSV row for this reading, or `None` for a failed fetch.
    pub fn csv_row(&self) -> Option<String> {
        self.fix
            .as_ref()
            .map(|fix| format!("{},{}", self.timestamp(), fix.csv_fields()))
    }
}
