//! Login state.
//!
//! A [`Session`] is what a successful login yields. [`SessionStore`] holds
//! the current one in-process and publishes changes through a watch channel,
//! so a running poller notices logout immediately. [`persistence`] keeps it
//! on disk between CLI invocations.

pub mod errors;
pub mod persistence;

pub use errors::SessionError;

use std::sync::Arc;

use qwatch_protocol::SessionRequest;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
}

impl Session {
    pub fn request(&self) -> SessionRequest {
        SessionRequest {
            username: self.username.clone(),
            token: self.token.clone(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Either the authorized value or the "Access Denied" placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate<T> {
    Authorized(T),
    Denied,
}

impl<T> Gate<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Gate<U> {
        match self {
            Gate::Authorized(value) => Gate::Authorized(f(value)),
            Gate::Denied => Gate::Denied,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Gate::Denied)
    }

    pub fn ok_or<E>(self, error: E) -> Result<T, E> {
        match self {
            Gate::Authorized(value) => Ok(value),
            Gate::Denied => Err(error),
        }
    }
}

impl<T> From<Option<T>> for Gate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Gate::Denied, Gate::Authorized)
    }
}

/// In-process holder of the current session.
///
/// Cloning shares the same underlying channel.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    pub fn new(initial: Option<Session>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn login(&self, session: Session) {
        info!(event = "core.session.login_completed", username = %session.username);
        self.tx.send_replace(Some(session));
    }

    pub fn logout(&self) {
        info!(event = "core.session.logout_completed");
        self.tx.send_replace(None);
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn gate(&self) -> Gate<Session> {
        self.current().into()
    }

    /// Receiver that observes every login/logout from now on.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}
