//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The collector's receive side is gone; pushed readings have nowhere
    /// to go.
    #[error("Collector queue closed")]
    QueueClosed,
}

pub type FeedResult<T> = Result<T, FeedError>;
