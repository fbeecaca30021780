//! HTTP client for the monitoring backend.

pub mod client;
pub mod errors;
pub mod traits;

pub use client::BackendClient;
pub use errors::{ApiError, TransportError};
pub use traits::SnapshotFetcher;
