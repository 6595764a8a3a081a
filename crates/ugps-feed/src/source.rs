//! Fetch seam between pollers and the HTTP client.
//!
//! Pollers only need "give me the current fix for this kind"; the trait
//! keeps them testable against scripted success/failure sequences.

use std::future::Future;
use ugps_client::{ApiClient, ClientResult};
use ugps_core::{PositionFix, PositionKind};

/// A source of position fixes.
pub trait PositionSource: Send + Sync + 'static {
    /// Fetch the current fix for the given kind.
    fn fetch(
        &self,
        kind: PositionKind,
    ) -> impl Future<Output = ClientResult<PositionFix>> + Send;
}

impl PositionSource for ApiClient {
    fn fetch(
        &self,
        kind: PositionKind,
    ) -> impl Future<Output = ClientResult<PositionFix>> + Send {
        self.fetch_position(kind)
    }
}
