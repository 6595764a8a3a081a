//! Main application orchestration.
//!
//! Coordinates all components:
//! - one-shot antenna configuration fetch and session setup
//! - one poller task per position kind
//! - the collector drain task feeding the session writer
//! - periodic console status
//! - graceful shutdown: pollers stop at their iteration boundary, the
//!   queue drains fully, files are flushed and closed

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use ugps_client::ApiClient;
use ugps_core::{PositionKind, Reading};
use ugps_feed::{Collector, LatestPositions, Poller, PollerState, PollerStateHandle};
use ugps_persistence::{SessionDir, SessionWriter};
use ugps_telemetry::{Metrics, StatusReporter};

/// Main application.
pub struct Application {
    config: AppConfig,
}

impl Application {
    /// Create a new application.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        Ok(Self { config })
    }

    /// Run until the operator interrupts with ctrl-c.
    pub async fn run(self) -> AppResult<()> {
        let shutdown = CancellationToken::new();

        let signal_token = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
        });

        self.run_with_shutdown(shutdown).await
    }

    /// Run until the given token is cancelled.
    ///
    /// Split out from `run()` so tests can trigger shutdown without a
    /// process signal.
    pub async fn run_with_shutdown(self, shutdown: CancellationToken) -> AppResult<()> {
        let client = Arc::new(ApiClient::new(
            &self.config.base_url,
            self.config.request_timeout(),
        )?);
        info!(base_url = %client.base_url(), "Using device API");

        // Required startup fetch: a device we cannot even read the
        // antenna configuration from would make a broken session.
        let antenna = client.fetch_antenna_config().await.map_err(|e| {
            AppError::Startup(format!("Initial antenna configuration fetch failed: {e}"))
        })?;
        info!(antenna = %antenna, "Antenna configuration");

        if self.config.startup_diagnostics {
            log_diagnostics(&client).await;
        }

        let writer = if self.config.persist {
            let session = SessionDir::create(Path::new(&self.config.save_dir), Utc::now())?;
            session.write_antenna_config(&antenna)?;
            Some(SessionWriter::create(&session)?)
        } else {
            info!("Persistence disabled, readings are echoed only");
            None
        };

        let (collector_handle, collector) = Collector::channel(self.config.queue_capacity);
        let latest = Arc::new(LatestPositions::new());

        // One poller per position kind, owned by the join set.
        let mut pollers = JoinSet::new();
        let mut poller_states = Vec::new();
        for kind in PositionKind::ALL {
            let poller = Poller::new(
                kind,
                client.clone(),
                self.config.poll_interval(),
                collector_handle.clone(),
                shutdown.clone(),
            );
            poller_states.push(poller.state_handle());
            pollers.spawn(poller.run());
        }
        // Pollers now hold the only push handles; once they all stop, the
        // drain loop sees the channel close and exits after emptying it.
        drop(collector_handle);

        let drain = spawn_drain_task(collector, writer, latest.clone(), self.config.persist);
        let status = spawn_status_task(
            latest.clone(),
            shutdown.clone(),
            self.config.status_interval(),
        );

        // Block until the operator interrupts, or every poller has died
        // on its own (collector gone).
        tokio::select! {
            _ = shutdown.cancelled() => {}
            _ = await_all(&mut pollers) => {
                warn!("All pollers stopped unexpectedly");
                shutdown.cancel();
            }
        }

        // Graceful teardown: pollers finish their current iteration, the
        // queue drains fully, then files close.
        while let Some(result) = pollers.join_next().await {
            if let Err(e) = result {
                error!(?e, "Poller task failed");
            }
        }
        log_poller_states(&poller_states);

        let writer = drain
            .await
            .map_err(|e| AppError::Task(format!("Drain task failed: {e}")))?;
        if let Some(writer) = writer {
            writer.close()?;
        }

        let reporter = status
            .await
            .map_err(|e| AppError::Task(format!("Status task failed: {e}")))?;
        info!("Final status:");
        reporter.log_summary();

        info!("Shutdown complete");
        Ok(())
    }
}

/// Drain the collector one reading at a time: echo to the console, track
/// the latest fix per kind, append to the session files.
///
/// Returns the writer so the caller can close it after the queue is empty.
fn spawn_drain_task(
    mut collector: Collector,
    mut writer: Option<SessionWriter>,
    latest: Arc<LatestPositions>,
    persist: bool,
) -> JoinHandle<Option<SessionWriter>> {
    tokio::spawn(async move {
        while let Some(reading) = collector.drain_one().await {
            latest.update(&reading);
            echo_reading(&reading);

            if reading.is_failure() {
                Metrics::row_skipped(reading.kind.label());
            } else if persist {
                Metrics::row_written(reading.kind.label());
            }

            if let Some(writer) = writer.as_mut() {
                // A failing disk should not kill the run; the console
                // echo and counters keep going.
                if let Err(e) = writer.append(&reading) {
                    error!(kind = %reading.kind, ?e, "Failed to append reading");
                }
            }
        }
        writer
    })
}

/// Per-reading console echo.
fn echo_reading(reading: &Reading) {
    match &reading.fix {
        Some(fix) => {
            info!(kind = %reading.kind, t = %reading.timestamp(), position = %fix, "Reading")
        }
        None => warn!(kind = %reading.kind, t = %reading.timestamp(), "Reading unavailable"),
    }
}

/// Periodic console status: latest fix per kind plus counter summary.
fn spawn_status_task(
    latest: Arc<LatestPositions>,
    shutdown: CancellationToken,
    interval: std::time::Duration,
) -> JoinHandle<StatusReporter> {
    let reporter = StatusReporter::new(
        PositionKind::ALL
            .iter()
            .map(|kind| kind.label().to_string())
            .collect(),
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The immediate first tick would just print zeros.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    for reading in latest.snapshot() {
                        match &reading.fix {
                            Some(fix) => info!(kind = %reading.kind, t = %reading.timestamp(), position = %fix, "Latest"),
                            None => warn!(kind = %reading.kind, t = %reading.timestamp(), "Latest unavailable"),
                        }
                    }
                    reporter.log_summary();
                }
                _ = shutdown.cancelled() => break,
            }
        }
        reporter
    })
}

/// Wait for every poller task to finish without consuming their results.
async fn await_all(pollers: &mut JoinSet<()>) {
    while pollers.join_next().await.is_some() {}
}

fn log_poller_states(states: &[PollerStateHandle]) {
    for state in states {
        let current = state.get();
        if current == PollerState::Stopped {
            debug!(kind = %state.kind(), "Poller reported stopped");
        } else {
            warn!(kind = %state.kind(), state = %current, "Poller in unexpected final state");
        }
    }
}

/// One-shot diagnostic dump of the IMU and external readouts.
///
/// Best effort: the demo device does not expose every endpoint, so
/// failures are reported and ignored.
async fn log_diagnostics(client: &ApiClient) {
    match client.fetch_imu_calibration().await {
        Ok(state) => info!(state = %state, "IMU calibration"),
        Err(e) => warn!(error = %e, "IMU calibration unavailable"),
    }
    match client.fetch_external_imu().await {
        Ok(readout) => info!(readout = %readout, "External IMU"),
        Err(e) => warn!(error = %e, "External IMU unavailable"),
    }
    match client.fetch_external_orientation().await {
        Ok(readout) => info!(readout = %readout, "External orientation"),
        Err(e) => warn!(error = %e, "External orientation unavailable"),
    }
}
