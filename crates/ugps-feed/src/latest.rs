//! Latest reading per position kind.
//!
//! Updated by the drain loop as readings pass through, snapshot-readable
//! by the status task for console output. Failed readings overwrite the
//! entry too, so the console reflects a subsystem going dark.

use dashmap::DashMap;
use ugps_core::{PositionKind, Reading};

/// Most recent reading per kind.
#[derive(Default)]
pub struct LatestPositions {
    map: DashMap<PositionKind, Reading>,
}

impl LatestPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading as the latest for its kind.
    pub fn update(&self, reading: &Reading) {
        self.map.insert(reading.kind, reading.clone());
    }

    /// Latest reading for one kind, if any has arrived yet.
    pub fn get(&self, kind: PositionKind) -> Option<Reading> {
        self.map.get(&kind).map(|entry| entry.value().clone())
    }

    /// Latest readings in kind order.
    pub fn snapshot(&self) -> Vec<Reading> {
        PositionKind::ALL
            .iter()
            .filter_map(|kind| self.get(*kind))
            .collect()
    }
}
