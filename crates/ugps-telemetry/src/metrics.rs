//! Prometheus metrics for the position logger.
//!
//! Counters back the operator status summary:
//! - fetch outcomes per position kind
//! - rows written / skipped per kind
//! - readings dropped because the collector closed
//! - collector queue depth
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should cause an immediate crash at startup rather than silent failure.
//! These panics only occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, register_int_gauge, CounterVec, IntGauge};

/// Outcome label recorded for a successful fetch.
pub const OUTCOME_OK: &str = "ok";

/// All fetch outcome labels, success first.
pub const FETCH_OUTCOMES: [&str; 4] = [OUTCOME_OK, "transport", "http_status", "decode"];

/// Total fetch attempts.
/// Labels: kind (acoustic/global/master), outcome (ok/transport/http_status/decode)
pub static FETCH_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ugps_fetch_total",
        "Total position fetch attempts by outcome",
        &["kind", "outcome"]
    )
    .unwrap()
});

/// Total rows appended to session files.
pub static ROWS_WRITTEN_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ugps_rows_written_total",
        "Total CSV rows appended to session files",
        &["kind"]
    )
    .unwrap()
});

/// Total readings skipped by the writer (failed fetches leave no row).
pub static ROWS_SKIPPED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ugps_rows_skipped_total",
        "Total failed readings that produced no CSV row",
        &["kind"]
    )
    .unwrap()
});

/// Total readings dropped because the collector was already closed.
pub static READINGS_DROPPED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ugps_readings_dropped_total",
        "Total readings dropped because the collector closed",
        &["kind"]
    )
    .unwrap()
});

/// Current collector queue depth.
pub static QUEUE_DEPTH: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("ugps_queue_depth", "Current collector queue depth").unwrap()
});

/// Facade for recording metrics.
pub struct Metrics;

impl Metrics {
    /// Record a successful fetch.
    pub fn fetch_ok(kind: &str) {
        FETCH_TOTAL.with_label_values(&[kind, OUTCOME_OK]).inc();
    }

    /// Record a failed fetch with its error class.
    pub fn fetch_error(kind: &str, reason: &str) {
        FETCH_TOTAL.with_label_values(&[kind, reason]).inc();
    }

    /// Record a row appended to a session file.
    pub fn row_written(kind: &str) {
        ROWS_WRITTEN_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record a failed reading that produced no row.
    pub fn row_skipped(kind: &str) {
        ROWS_SKIPPED_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record a reading dropped because the collector closed.
    pub fn reading_dropped(kind: &str) {
        READINGS_DROPPED_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Update the collector queue depth gauge.
    pub fn queue_depth(depth: i64) {
        QUEUE_DEPTH.set(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_counters_by_outcome() {
        Metrics::fetch_ok("metrics_test_kind");
        Metrics::fetch_ok("metrics_test_kind");
        Metrics::fetch_error("metrics_test_kind", "decode");

        let ok = FETCH_TOTAL
            .with_label_values(&["metrics_test_kind", OUTCOME_OK])
            .get();
        let decode = FETCH_TOTAL
            .with_label_values(&["metrics_test_kind", "decode"])
            .get();
        assert_eq!(ok as u64, 2);
        assert_eq!(decode as u64, 1);
    }
}
