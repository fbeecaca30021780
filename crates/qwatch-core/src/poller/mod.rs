//! Live status poller.
//!
//! A mounted [`Poller`] refreshes the board on a fixed cadence:
//! fetch → evaluate → dispatch alerts → publish. It is a small state machine:
//!
//! - **Idle**: not mounted, or mounted without a session. No timer.
//! - **Active**: the refresh task is running.
//! - **Stopped**: terminal. Reached on [`PollerHandle::stop`], on dropping the
//!   handle, on logout, or when the backend rejects the session.
//!
//! Ticks run inside the single refresh task, so they never overlap. A fetch
//! that fails leaves the board untouched and the loop keeps going.

mod board;


pub use board::{Board, BoardRow, evaluate_snapshot};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Local;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::alert::AlertDispatcher;
use crate::api::SnapshotFetcher;
use crate::auth::Session;
use crate::errors::QwatchError;
use crate::notify::Glyph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Active,
    Stopped,
}

impl std::fmt::Display for PollerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollerState::Idle => write!(f, "idle"),
            PollerState::Active => write!(f, "active"),
            PollerState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Unmounted poller. [`Poller::mount`] consumes it; a remount needs a new one.
pub struct Poller<F: SnapshotFetcher> {
    fetcher: Arc<F>,
    dispatcher: Arc<dyn AlertDispatcher>,
    interval: Duration,
}

impl<F: SnapshotFetcher> Poller<F> {
    pub fn new(fetcher: F, dispatcher: Arc<dyn AlertDispatcher>, interval: Duration) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            dispatcher,
            interval,
        }
    }

    /// Mount the poller against a session source.
    ///
    /// Without a session this returns an idle handle and never fetches.
    /// Otherwise it runs one tick, then arms the timer; it returns only after
    /// that first tick has completed.
    pub async fn mount(self, mut auth: watch::Receiver<Option<Session>>) -> PollerHandle {
        let (board_tx, board_rx) = watch::channel(Board::default());
        let shared = Arc::new(Shared {
            board: board_tx,
            unnotified: AtomicBool::new(false),
            publish_gate: Mutex::new(()),
        });
        let cancel = CancellationToken::new();

        let current = auth.borrow_and_update().clone();
        let Some(session) = current else {
            info!(event = "core.poller.mount_skipped", reason = "not authenticated");
            return PollerHandle {
                cancel,
                shared,
                board: board_rx,
                task: None,
                mounted: false,
            };
        };

        info!(
            event = "core.poller.mount_started",
            username = %session.username,
            interval_secs = self.interval.as_secs()
        );

        let ticker = Ticker {
            fetcher: self.fetcher,
            dispatcher: self.dispatcher,
            shared: Arc::clone(&shared),
            cancel: cancel.clone(),
            auth: auth.clone(),
        };

        if ticker.tick(&session).await == TickOutcome::AuthLost {
            ticker.stop("session rejected");
        }
        let task = if cancel.is_cancelled() {
            None
        } else {
            Some(tokio::spawn(run_loop(ticker, auth, session, self.interval)))
        };

        PollerHandle {
            cancel,
            shared,
            board: board_rx,
            task,
            mounted: true,
        }
    }
}

/// State shared between the refresh task and the handle.
struct Shared {
    board: watch::Sender<Board>,
    unnotified: AtomicBool,
    /// Held while publishing and while stopping, so nothing is published
    /// or dispatched once `stop` has returned.
    publish_gate: Mutex<()>,
}

impl Shared {
    fn gate(&self) -> MutexGuard<'_, ()> {
        self.publish_gate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Published,
    Failed,
    Discarded,
    AuthLost,
}

struct Ticker<F: SnapshotFetcher> {
    fetcher: Arc<F>,
    dispatcher: Arc<dyn AlertDispatcher>,
    shared: Arc<Shared>,
    cancel: CancellationToken,
    auth: watch::Receiver<Option<Session>>,
}

impl<F: SnapshotFetcher> Ticker<F> {
    async fn tick(&self, session: &Session) -> TickOutcome {
        debug!(event = "core.poller.tick_started");

        let fetch = self.fetcher.fetch(session);
        tokio::pin!(fetch);
        let result = tokio::select! {
            biased;
            result = &mut fetch => result,
            () = logged_out(self.auth.clone()) => {
                // The fetch still runs to completion; its result is dropped below.
                self.stop("logged out");
                fetch.await
            }
        };

        let _gate = self.shared.gate();
        if self.auth.borrow().is_none() {
            self.cancel_locked("logged out");
        }
        if self.cancel.is_cancelled() {
            debug!(event = "core.poller.tick_discarded");
            return TickOutcome::Discarded;
        }

        match result {
            Ok(snapshot) => {
                let rows = evaluate_snapshot(&snapshot);

                let mut alerts = 0;
                for row in rows.iter().filter(|row| row.alert_eligible) {
                    self.dispatcher.dispatch(&row.alert_sound);
                    alerts += 1;
                }

                if rows.iter().any(|row| row.glyph == Glyph::Bang) {
                    self.shared.unnotified.store(true, Ordering::SeqCst);
                }

                let row_count = rows.len();
                self.shared.board.send_replace(Board {
                    rows,
                    last_refresh: Some(Local::now()),
                    unnotified_new: self.shared.unnotified.load(Ordering::SeqCst),
                });

                info!(
                    event = "core.poller.tick_completed",
                    rows = row_count,
                    alerts = alerts
                );
                TickOutcome::Published
            }
            Err(e) if e.is_auth_expired() => {
                warn!(
                    event = "core.poller.tick_failed",
                    error = %e,
                    error_code = e.error_code()
                );
                TickOutcome::AuthLost
            }
            Err(e) => {
                warn!(
                    event = "core.poller.tick_failed",
                    error = %e,
                    error_code = e.error_code()
                );
                TickOutcome::Failed
            }
        }
    }

    fn stop(&self, reason: &'static str) {
        let _gate = self.shared.gate();
        self.cancel_locked(reason);
    }

    /// Caller holds the publish gate.
    fn cancel_locked(&self, reason: &'static str) {
        if !self.cancel.is_cancelled() {
            self.cancel.cancel();
            info!(event = "core.poller.stop_completed", reason = reason);
        }
    }
}

/// Resolves when the session store is cleared. Never resolves once the
/// store is gone, since polling then continues with the last session.
async fn logged_out(mut auth: watch::Receiver<Option<Session>>) {
    let store_dropped = auth.wait_for(Option::is_none).await.is_err();
    if store_dropped {
        std::future::pending::<()>().await;
    }
}

/// First grid point strictly after `now`, counting from `deadline`.
fn next_deadline(deadline: Instant, period: Duration, now: Instant) -> Option<Instant> {
    let mut next = deadline.checked_add(period)?;
    if next <= now {
        let behind = now.duration_since(next).as_nanos() / period.as_nanos();
        let skipped = u32::try_from(behind + 1).ok()?;
        next = next.checked_add(period.checked_mul(skipped)?)?;
    }
    Some(next)
}

async fn run_loop<F: SnapshotFetcher>(
    ticker: Ticker<F>,
    mut auth: watch::Receiver<Option<Session>>,
    mut session: Session,
    period: Duration,
) {
    let first = if period.is_zero() {
        None
    } else {
        Instant::now().checked_add(period)
    };
    let Some(first) = first else {
        warn!(
            event = "core.poller.arm_failed",
            interval_secs = period.as_secs(),
            error = "refresh interval out of range"
        );
        ticker.stop("invalid interval");
        return;
    };
    let mut interval = tokio::time::interval_at(first, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut auth_open = true;

    loop {
        tokio::select! {
            biased;

            _ = ticker.cancel.cancelled() => break,

            changed = auth.changed(), if auth_open => {
                if changed.is_err() {
                    // Store dropped: keep polling with the last session.
                    auth_open = false;
                    continue;
                }
                let current = auth.borrow_and_update().clone();
                match current {
                    Some(next) => session = next,
                    None => {
                        ticker.stop("logged out");
                        break;
                    }
                }
            }

            deadline = interval.tick() => {
                if ticker.tick(&session).await == TickOutcome::AuthLost {
                    ticker.stop("session rejected");
                    break;
                }
                // After an overrun, wait for the next grid point instead of
                // firing the late tick right away.
                match next_deadline(deadline, period, Instant::now()) {
                    Some(next) => interval.reset_at(next),
                    None => {
                        ticker.stop("invalid interval");
                        break;
                    }
                }
            }
        }
    }

    debug!(event = "core.poller.loop_exited");
}

/// Owner of a mounted poller. Dropping it stops the poller.
pub struct PollerHandle {
    cancel: CancellationToken,
    shared: Arc<Shared>,
    board: watch::Receiver<Board>,
    task: Option<JoinHandle<()>>,
    mounted: bool,
}

impl PollerHandle {
    pub fn state(&self) -> PollerState {
        if !self.mounted {
            PollerState::Idle
        } else if self.cancel.is_cancelled() {
            PollerState::Stopped
        } else {
            PollerState::Active
        }
    }

    /// Stop polling. Synchronous: once this returns, no further board update
    /// is published and no further alert is dispatched.
    pub fn stop(&self) {
        let _gate = self.shared.gate();
        if !self.cancel.is_cancelled() {
            self.cancel.cancel();
            info!(event = "core.poller.stop_completed", reason = "unmounted");
        }
    }

    /// Current board.
    pub fn board(&self) -> Board {
        self.board.borrow().clone()
    }

    /// Receiver notified on every published board.
    pub fn subscribe(&self) -> watch::Receiver<Board> {
        self.board.clone()
    }

    /// Clear the fresh-match indicator.
    pub fn acknowledge(&self) {
        let _gate = self.shared.gate();
        self.shared.unnotified.store(false, Ordering::SeqCst);
        self.shared
            .board
            .send_if_modified(|board| std::mem::replace(&mut board.unnotified_new, false));
    }

    /// Resolves once the poller has been stopped, for any reason.
    pub async fn stopped(&self) {
        self.cancel.cancelled().await;
    }

    /// Stop and wait for the refresh task to finish.
    pub async fn join(mut self) {
        self.stop();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!(event = "core.poller.join_failed", error = %e);
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
