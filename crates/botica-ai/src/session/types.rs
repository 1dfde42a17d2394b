//! Session errors and the single-request guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use botica_common::{Event, EventBus};

use crate::AiError;

use super::manager::SessionManager;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("message is empty")]
    EmptyInput,

    #[error("a request is already in flight")]
    Busy,

    #[error("completion failed: {0}")]
    UpstreamFailure(#[source] AiError),

    #[error("corrupt history snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("history storage error: {0}")]
    Storage(String),
}

/// Holds the pending slot. Clearing happens on drop, so the slot is
/// released on every exit path, including a dropped future.
pub(crate) struct PendingGuard<'a> {
    flag: &'a AtomicBool,
    events: Option<&'a EventBus>,
}

impl<'a> PendingGuard<'a> {
    /// Take the slot, or fail with `Busy` if a request is in flight.
    pub(crate) fn acquire(
        flag: &'a AtomicBool,
        events: Option<&'a EventBus>,
    ) -> Result<Self, SessionError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(SessionError::Busy);
        }
        Ok(Self { flag, events })
    }

    /// Keep the slot held past this guard. The caller becomes responsible
    /// for calling `release`.
    pub(crate) fn hand_off(self) {
        std::mem::forget(self);
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        release(self.flag, self.events);
    }
}

fn release(flag: &AtomicBool, events: Option<&EventBus>) {
    flag.store(false, Ordering::Release);
    if let Some(events) = events {
        events.publish(Event::PendingChanged(false));
    }
}

/// A turn whose pending slot is already taken and whose user message is
/// already in history. `run` waits for the reply; dropping the turn
/// without running it, or mid-run, releases the slot.
pub struct PendingTurn {
    session: Arc<SessionManager>,
    text: String,
}

impl std::fmt::Debug for PendingTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTurn")
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl PendingTurn {
    pub(super) fn new(session: Arc<SessionManager>, text: String) -> Self {
        Self { session, text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub async fn run(self) -> Result<String, SessionError> {
        self.session.complete_turn(&self.text).await
    }
}

impl Drop for PendingTurn {
    fn drop(&mut self) {
        release(&self.session.busy, self.session.events.as_ref());
    }
}
