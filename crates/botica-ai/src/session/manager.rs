//! SessionManager struct, construction, and read-only views.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use botica_common::{Event, EventBus, Notification};
use tracing::{info, warn};

use crate::token_tracker::TokenTracker;
use crate::{AiClient, Message, TokenUsage};

use super::store::{self, HistoryStore};
use super::types::SessionError;

/// Owns the conversation history and the single pending-request slot.
pub struct SessionManager {
    pub(super) history: Mutex<Vec<Message>>,
    pub(super) busy: AtomicBool,
    pub(super) client: Arc<dyn AiClient>,
    pub(super) store: Arc<dyn HistoryStore>,
    pub(super) events: Option<EventBus>,
    pub(super) tracker: Mutex<TokenTracker>,
    /// Optional limit on one completion call. `None` waits indefinitely.
    pub(super) turn_timeout: Option<Duration>,
}

impl SessionManager {
    /// Create a manager with empty history.
    pub fn new(client: Arc<dyn AiClient>, store: Arc<dyn HistoryStore>) -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            busy: AtomicBool::new(false),
            client,
            store,
            events: None,
            tracker: Mutex::new(TokenTracker::new()),
            turn_timeout: None,
        }
    }

    /// Create a manager seeded from the store. Never fails: a missing,
    /// unreadable or corrupt snapshot leaves the history empty.
    pub fn open(client: Arc<dyn AiClient>, store: Arc<dyn HistoryStore>) -> Self {
        Self::new(client, store).restore_persisted()
    }

    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = Some(timeout);
        self
    }

    /// Replace the history with the persisted snapshot, if any.
    pub fn restore_persisted(self) -> Self {
        let restored = match self.store.load() {
            Ok(Some(snapshot)) => match Self::restore(&snapshot) {
                Ok(messages) => messages,
                Err(e) => {
                    warn!(error = %e, "Discarding stored history");
                    self.notify(Notification::warning(
                        "saved history could not be read; starting fresh",
                    ));
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to load stored history");
                Vec::new()
            }
        };

        let count = restored.len();
        *self.lock_history() = restored;
        if count > 0 {
            info!(messages = count, "History restored");
        }
        self.publish(Event::HistoryRestored(count));
        self
    }

    /// Parse a serialized snapshot.
    pub fn restore(serialized: &str) -> Result<Vec<Message>, SessionError> {
        store::restore(serialized)
    }

    /// Copy of the ordered message log.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock_history().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.lock_history().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_history().is_empty()
    }

    /// Content of the most recent assistant message.
    pub fn last_assistant(&self) -> Option<String> {
        self.lock_history()
            .iter()
            .rev()
            .find(|m| m.is_assistant())
            .map(|m| m.content.clone())
    }

    /// Content of message `number` (1-based, in history order) if it is an
    /// assistant reply.
    pub fn assistant_reply(&self, number: usize) -> Option<String> {
        let history = self.lock_history();
        let message = history.get(number.checked_sub(1)?)?;
        message.is_assistant().then(|| message.content.clone())
    }

    /// Cumulative token usage reported by the completion backend.
    pub fn usage(&self) -> TokenUsage {
        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .total()
    }

    pub fn events(&self) -> Option<&EventBus> {
        self.events.as_ref()
    }

    /// Append one message and write the whole history through to the store.
    pub(super) fn append(&self, message: Message) {
        {
            let mut history = self.lock_history();
            history.push(message.clone());
            if let Err(e) = store::serialize(&history).and_then(|s| self.store.save(&s)) {
                warn!(error = %e, "Failed to persist history");
                self.notify(Notification::warning(format!(
                    "history could not be saved: {e}"
                )));
            }
        }
        self.publish(Event::MessageAppended(message));
    }

    pub(super) fn record_usage(&self, model: &str, usage: &TokenUsage) {
        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(model, usage);
    }

    pub(super) fn publish(&self, event: Event) {
        if let Some(ref events) = self.events {
            events.publish(event);
        }
    }

    pub(super) fn notify(&self, notification: Notification) {
        self.publish(Event::Notification(notification));
    }

    fn lock_history(&self) -> MutexGuard<'_, Vec<Message>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
