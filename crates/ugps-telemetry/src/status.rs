//! Periodic console status summary.
//!
//! Reads the fetch/row counters back and logs one line per position kind
//! plus uptime. Emitted on a fixed interval while polling and once more at
//! shutdown.

use crate::metrics::{
    FETCH_OUTCOMES, FETCH_TOTAL, OUTCOME_OK, ROWS_SKIPPED_TOTAL, ROWS_WRITTEN_TOTAL,
};
use chrono::{DateTime, Utc};
use prometheus::CounterVec;
use tracing::info;

/// Counter snapshot for a single position kind.
#[derive(Debug, Clone)]
pub struct KindStats {
    pub kind: String,
    pub fetch_ok: u64,
    pub fetch_errors: u64,
    pub rows_written: u64,
    pub rows_skipped: u64,
}

/// Console status reporter.
pub struct StatusReporter {
    kinds: Vec<String>,
    start_time: DateTime<Utc>,
}

impl StatusReporter {
    /// Create a reporter over the given kind labels.
    pub fn new(kinds: Vec<String>) -> Self {
        Self {
            kinds,
            start_time: Utc::now(),
        }
    }

    /// Get current statistics for all kinds.
    pub fn get_stats(&self) -> Vec<KindStats> {
        self.kinds
            .iter()
            .map(|kind| self.get_kind_stats(kind))
            .collect()
    }

    /// Log the status summary.
    pub fn log_summary(&self) {
        let uptime_secs = (Utc::now() - self.start_time).num_seconds();
        for stats in self.get_stats() {
            info!(
                kind = %stats.kind,
                fetch_ok = stats.fetch_ok,
                fetch_errors = stats.fetch_errors,
                rows_written = stats.rows_written,
                rows_skipped = stats.rows_skipped,
                uptime_secs,
                "Status"
            );
        }
    }

    fn get_kind_stats(&self, kind: &str) -> KindStats {
        let fetch_ok = self.get_counter_value(&FETCH_TOTAL, &[kind, OUTCOME_OK]);
        let fetch_errors: u64 = FETCH_OUTCOMES
            .iter()
            .filter(|o| **o != OUTCOME_OK)
            .map(|outcome| self.get_counter_value(&FETCH_TOTAL, &[kind, outcome]))
            .sum();
        let rows_written = self.get_counter_value(&ROWS_WRITTEN_TOTAL, &[kind]);
        let rows_skipped = self.get_counter_value(&ROWS_SKIPPED_TOTAL, &[kind]);

        KindStats {
            kind: kind.to_string(),
            fetch_ok,
            fetch_errors,
            rows_written,
            rows_skipped,
        }
    }

    /// Get counter value for given labels.
    fn get_counter_value(&self, counter: &CounterVec, labels: &[&str]) -> u64 {
        counter.with_label_values(labels).get() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;

    #[test]
    fn test_stats_reflect_recorded_counters() {
        // Unique label so other tests in this binary cannot interfere.
        let kind = "status_test_kind";
        Metrics::fetch_ok(kind);
        Metrics::fetch_ok(kind);
        Metrics::fetch_error(kind, "transport");
        Metrics::row_written(kind);
        Metrics::row_skipped(kind);

        let reporter = StatusReporter::new(vec![kind.to_string()]);
        let stats = reporter.get_stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].fetch_ok, 2);
        assert_eq!(stats[0].fetch_errors, 1);
        assert_eq!(stats[0].rows_written, 1);
        assert_eq!(stats[0].rows_skipped, 1);
    }
}
