//! Position pollers and the collector channel for the UGPS logger.
//!
//! One poller task per position kind fetches from a `PositionSource` on a
//! fixed cadence and pushes timestamped readings into the `Collector`, a
//! bounded single-consumer channel drained by the writer task.

pub mod collector;
pub mod error;
pub mod latest;
pub mod poller;
pub mod source;

pub use collector::{Collector, CollectorHandle};
pub use error::{FeedError, FeedResult};
pub use latest::LatestPositions;
pub use poller::{Poller, PollerState, PollerStateHandle};
pub use source::PositionSource;
