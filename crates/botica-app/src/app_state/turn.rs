//! Sending the draft as a chat turn on a background task.

use botica_ai::SessionError;
use botica_common::Notification;

use super::core::ChatApp;

impl ChatApp {
    /// Take the draft and submit it. The draft is left untouched when there
    /// is nothing to send or a request is already in flight.
    pub(super) fn send_draft(&mut self) {
        if self.draft.is_blank() {
            self.notify(Notification::info("nothing to send"));
            return;
        }

        // The pending slot is taken here, before anything is spawned.
        let turn = match self.session.begin(self.draft.text()) {
            Ok(turn) => turn,
            Err(e) => {
                self.notify(Notification::warning(e.to_string()));
                return;
            }
        };
        self.draft.clear();
        tracing::debug!(chars = turn.text().chars().count(), "Turn started");

        let events = self.events.clone();
        self.turn = Some(tokio::spawn(async move {
            match turn.run().await {
                // Upstream failures are already reported by the session.
                Ok(_) | Err(SessionError::UpstreamFailure(_)) => {}
                Err(e) => {
                    events.notify(Notification::warning(e.to_string()));
                }
            }
        }));
    }
}
