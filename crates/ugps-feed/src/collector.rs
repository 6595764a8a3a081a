//! Ordered sink between pollers and the writer.
//!
//! A bounded mpsc channel with single-consumer semantics: any poller may
//! push, exactly one drain loop consumes. Arrival order is preserved, and
//! per-sender FIFO means each kind's readings stay in emission order.
//!
//! The bound replaces the original's unbounded queue: if the writer stalls,
//! pollers block on `push` instead of growing memory without limit.

use crate::error::{FeedError, FeedResult};
use tokio::sync::mpsc;
use ugps_core::Reading;
use ugps_telemetry::Metrics;

/// Default queue capacity in readings.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Push side of the collector queue. Cheap to clone; one per poller.
#[derive(Clone)]
pub struct CollectorHandle {
    tx: mpsc::Sender<Reading>,
}

impl CollectorHandle {
    /// Push one reading, waiting for queue capacity if the writer lags.
    ///
    /// Fails only when the drain side is gone.
    pub async fn push(&self, reading: Reading) -> FeedResult<()> {
        self.tx
            .send(reading)
            .await
            .map_err(|_| FeedError::QueueClosed)?;
        let depth = self.tx.max_capacity() - self.tx.capacity();
        Metrics::queue_depth(depth as i64);
        Ok(())
    }
}

/// Drain side of the collector queue. Owned by the single writer task.
pub struct Collector {
    rx: mpsc::Receiver<Reading>,
}

impl Collector {
    /// Create a bounded collector queue.
    pub fn channel(capacity: usize) -> (CollectorHandle, Collector) {
        let (tx, rx) = mpsc::channel(capacity);
        (CollectorHandle { tx }, Collector { rx })
    }

    /// Receive the next reading in arrival order.
    ///
    /// Returns `None` once every `CollectorHandle` is dropped and the
    /// queue is empty, so a clean shutdown drains fully before the writer
    /// exits.
    pub async fn drain_one(&mut self) -> Option<Reading> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugps_core::{AcousticFix, GeoFix, PositionKind};

    fn acoustic(seq: f64) -> Reading {
        Reading::success(
            PositionKind::Acoustic,
            AcousticFix {
                x: seq,
                y: 0.0,
                z: 0.0,
            },
        )
    }

    fn geo(seq: f64) -> Reading {
        Reading::success(PositionKind::Global, GeoFix { lat: seq, lon: 0.0 })
    }

    #[tokio::test]
    async fn test_fifo_per_sender() {
        let (handle, mut collector) = Collector::channel(16);

        for seq in 0..5 {
            handle.push(acoustic(seq as f64)).await.unwrap();
        }
        drop(handle);

        let mut seen = Vec::new();
        while let Some(reading) = collector.drain_one().await {
            match reading.fix.unwrap() {
                ugps_core::PositionFix::Acoustic(fix) => seen.push(fix.x),
                other => panic!("unexpected fix {other:?}"),
            }
        }
        assert_eq!(seen, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[tokio::test]
    async fn test_concurrent_pushes_lose_nothing() {
        const PER_PRODUCER: usize = 200;
        let (handle, mut collector) = Collector::channel(8);

        let mut producers = Vec::new();
        for _ in 0..3 {
            let handle = handle.clone();
            producers.push(tokio::spawn(async move {
                for seq in 0..PER_PRODUCER {
                    handle.push(geo(seq as f64)).await.unwrap();
                }
            }));
        }
        drop(handle);

        let drain = tokio::spawn(async move {
            let mut total = 0usize;
            while collector.drain_one().await.is_some() {
                total += 1;
            }
            total
        });

        for producer in producers {
            producer.await.unwrap();
        }
        let total = drain.await.unwrap();
        assert_eq!(total, 3 * PER_PRODUCER, "pushed must equal drained");
    }

    #[tokio::test]
    async fn test_push_after_drain_side_dropped_fails() {
        let (handle, collector) = Collector::channel(4);
        drop(collector);

        let err = handle.push(acoustic(1.0)).await.unwrap_err();
        assert!(matches!(err, FeedError::QueueClosed));
    }
}
