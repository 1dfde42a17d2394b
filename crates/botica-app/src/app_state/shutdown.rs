//! Graceful shutdown: stop speech, drop background work, flush the printer.

use botica_common::Event;

use super::core::ChatApp;

impl ChatApp {
    /// Order matters: the printer is stopped last so notifications raised
    /// while shutting down are still shown.
    pub(super) async fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if let Err(e) = self.speaker.cancel() {
            tracing::warn!(error = %e, "Failed to stop speech");
        }

        if self.session.is_pending() {
            tracing::info!("Abandoning in-flight request");
        }
        if let Some(turn) = self.turn.take() {
            turn.abort();
        }
        if let Some(capture) = self.capture.take() {
            capture.abort();
        }

        self.events.publish(Event::Shutdown);
        if let Some(printer) = self.printer.take() {
            let _ = printer.await;
        }

        tracing::info!("Graceful shutdown complete");
    }
}
