//! Seam between the poller and the backend.

use std::future::Future;

use qwatch_protocol::DashboardSnapshot;

use super::errors::ApiError;
use crate::auth::Session;

/// Source of dashboard snapshots.
///
/// One call is one read of the full query mapping. Implementations do not
/// cache and do not retry; a failure means "no update this tick".
pub trait SnapshotFetcher: Send + Sync + 'static {
    fn fetch(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<DashboardSnapshot, ApiError>> + Send;
}
