//! Periodic fetch task for a single position kind.
//!
//! Each poller owns one kind and one cadence. A fetch error degrades that
//! single reading (pushed with no fix) and the cadence continues; the
//! poller itself only stops on cancellation or when the collector closes.
//!
//! Cancellation is cooperative: the token is checked at iteration
//! boundaries and races the inter-iteration sleep. An in-flight fetch is
//! never interrupted, so the reading it produces is still delivered.

use crate::collector::CollectorHandle;
use crate::source::PositionSource;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use ugps_core::{PositionKind, Reading};
use ugps_telemetry::Metrics;

/// Poller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Running,
    Stopping,
    Stopped,
}

impl fmt::Display for PollerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Stopping => write!(f, "stopping"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Shared view of a poller's state, readable after the poller is spawned.
#[derive(Clone)]
pub struct PollerStateHandle {
    kind: PositionKind,
    state: Arc<RwLock<PollerState>>,
}

impl PollerStateHandle {
    pub fn kind(&self) -> PositionKind {
        self.kind
    }

    pub fn get(&self) -> PollerState {
        *self.state.read()
    }
}

/// Periodic fetch task for one position kind.
pub struct Poller<S> {
    kind: PositionKind,
    source: Arc<S>,
    interval: Duration,
    collector: CollectorHandle,
    shutdown: CancellationToken,
    state: Arc<RwLock<PollerState>>,
}

impl<S: PositionSource> Poller<S> {
    /// Create a poller bound to one kind and one target source.
    pub fn new(
        kind: PositionKind,
        source: Arc<S>,
        interval: Duration,
        collector: CollectorHandle,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            kind,
            source,
            interval,
            collector,
            shutdown,
            state: Arc::new(RwLock::new(PollerState::Idle)),
        }
    }

    /// Handle for observing this poller's state from outside.
    pub fn state_handle(&self) -> PollerStateHandle {
        PollerStateHandle {
            kind: self.kind,
            state: self.state.clone(),
        }
    }

    fn set_state(&self, state: PollerState) {
        *self.state.write() = state;
        debug!(kind = %self.kind, state = %state, "Poller state");
    }

    /// Run the poll loop until cancelled.
    ///
    /// Every iteration produces exactly one reading, success or failure.
    pub async fn run(self) {
        self.set_state(PollerState::Running);
        info!(kind = %self.kind, interval_ms = self.interval.as_millis() as u64, "Poller started");

        loop {
            if self.shutdown.is_cancelled() {
                self.set_state(PollerState::Stopping);
                break;
            }

            // The fetch is not raced against the token: once started it
            // runs to completion and its reading is delivered.
            let reading = match self.source.fetch(self.kind).await {
                Ok(fix) => {
                    Metrics::fetch_ok(self.kind.label());
                    Reading::success(self.kind, fix)
                }
                Err(e) => {
                    Metrics::fetch_error(self.kind.label(), e.label());
                    warn!(kind = %self.kind, error = %e, "Fetch failed");
                    Reading::failure(self.kind)
                }
            };

            if self.collector.push(reading).await.is_err() {
                Metrics::reading_dropped(self.kind.label());
                warn!(kind = %self.kind, "Collector closed, stopping poller");
                self.set_state(PollerState::Stopping);
                break;
            }

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => {
                    self.set_state(PollerState::Stopping);
                    break;
                }
            }
        }

        self.set_state(PollerState::Stopped);
        info!(kind = %self.kind, "Poller stopped");
    }
}
