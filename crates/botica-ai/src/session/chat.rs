//! The submit turn.

use std::sync::Arc;

use botica_common::{Event, Notification};
use tracing::{debug, warn};

use crate::{AiError, Message};

use super::manager::SessionManager;
use super::types::{PendingGuard, PendingTurn, SessionError};

impl SessionManager {
    /// Send `text` and wait for the reply.
    ///
    /// The user message is appended and persisted before the completion
    /// call; the reply is appended only on success. Only `text` goes
    /// upstream, never earlier history. Blank input and a second call while
    /// one is in flight are rejected without touching history.
    pub async fn submit(&self, text: &str) -> Result<String, SessionError> {
        let _guard = self.open_turn(text)?;
        self.complete_turn(text).await
    }

    /// Synchronous half of `submit`: check the input, take the pending
    /// slot and append the user message. The returned turn owns the slot
    /// and can be driven on another task.
    pub fn begin(self: &Arc<Self>, text: impl Into<String>) -> Result<PendingTurn, SessionError> {
        let text = text.into();
        self.open_turn(&text)?.hand_off();
        Ok(PendingTurn::new(Arc::clone(self), text))
    }

    fn open_turn(&self, text: &str) -> Result<PendingGuard<'_>, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        let guard = PendingGuard::acquire(&self.busy, self.events.as_ref())?;

        self.append(Message::user(text));
        self.publish(Event::PendingChanged(true));
        Ok(guard)
    }

    /// Completion half of a turn. The caller holds the pending slot.
    pub(super) async fn complete_turn(&self, text: &str) -> Result<String, SessionError> {
        let outcome = match self.turn_timeout {
            Some(limit) => tokio::time::timeout(limit, self.client.complete(text))
                .await
                .unwrap_or(Err(AiError::Timeout)),
            None => self.client.complete(text).await,
        };

        match outcome {
            Ok(response) => {
                debug!(
                    model = %response.model,
                    tokens = response.usage.total_tokens(),
                    "Completion received"
                );
                self.record_usage(&response.model, &response.usage);
                self.append(Message::assistant(response.content.clone()));
                Ok(response.content)
            }
            Err(e) => {
                warn!(error = %e, "Completion failed");
                self.notify(Notification::error(format!("could not get a reply: {e}")));
                Err(SessionError::UpstreamFailure(e))
            }
        }
    }
}
