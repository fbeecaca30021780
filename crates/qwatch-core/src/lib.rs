//! qwatch-core: Core library for the qwatch change-monitoring client
//!
//! This library owns everything between the backend's HTTP API and a
//! viewer: sessions, the live status poller and audible match alerts. It is
//! used by the CLI.
//!
//! # Main Entry Points
//!
//! - [`poller`] - Refresh the status board on a fixed cadence
//! - [`notify`] - Decide per-query glyphs and alerts
//! - [`alert`] - Resolve and play alert sounds
//! - [`api`] - Backend client and the [`SnapshotFetcher`] seam
//! - [`auth`] - Session store and on-disk session persistence

pub mod alert;
pub mod api;
pub mod auth;
pub mod errors;
pub mod events;
pub mod logging;
pub mod notify;
pub mod poller;

// Re-export wire types from qwatch-protocol
pub use qwatch_protocol::{
    DashboardSnapshot, QueryForm, QuerySnapshot, QueryStatus, Settings, status_label,
};

pub use alert::{AlertDispatcher, AudioResolutionError, MutedDispatcher, dispatcher_from_config};
pub use api::{ApiError, BackendClient, SnapshotFetcher, TransportError};
pub use auth::{Gate, Session, SessionError, SessionStore};
pub use errors::{QwatchError, QwatchResult};
pub use notify::{Glyph, Notification};
pub use poller::{Board, BoardRow, Poller, PollerHandle, PollerState};

// Re-export config types from qwatch-config
pub use qwatch_config::{CliOverrides, ConfigError, QwatchConfig};
pub use qwatch_paths::QwatchPaths;

// Re-export logging initialization
pub use logging::init_logging;
