//! Printing session events to the terminal.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::warn;

use botica_common::{Event, Message, Role};
use botica_config::schema::ExportConfig;

/// Role prefixes used when printing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Labels {
    pub user: String,
    pub assistant: String,
}

impl From<&ExportConfig> for Labels {
    fn from(config: &ExportConfig) -> Self {
        Self {
            user: config.user_label.clone(),
            assistant: config.assistant_label.clone(),
        }
    }
}

/// Print events until `Shutdown` arrives or the bus closes.
pub(super) fn spawn_printer(mut rx: broadcast::Receiver<Event>, labels: Labels) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(Event::Shutdown) | Err(RecvError::Closed) => break,
                Ok(event) => {
                    if let Some(line) = render_event(&event, &labels) {
                        println!("{line}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event printer fell behind");
                }
            }
        }
    })
}

/// Terminal line for an event, if it should be shown at all.
pub(super) fn render_event(event: &Event, labels: &Labels) -> Option<String> {
    match event {
        // The user typed it; echoing would duplicate the line.
        Event::MessageAppended(message) if message.is_user() => None,
        Event::MessageAppended(message) => Some(format_message(message, labels)),
        Event::PendingChanged(true) => Some("thinking...".to_string()),
        Event::PendingChanged(false) => None,
        Event::HistoryRestored(0) => None,
        Event::HistoryRestored(count) => {
            Some(format!("restored {count} messages (/history to show them)"))
        }
        Event::Notification(notification) => Some(notification.to_string()),
        Event::Shutdown => None,
    }
}

pub(super) fn format_message(message: &Message, labels: &Labels) -> String {
    let label = match message.role {
        Role::User => &labels.user,
        Role::Assistant => &labels.assistant,
    };
    format!("{label}{}", message.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use botica_common::Notification;

    fn labels() -> Labels {
        Labels::from(&ExportConfig::default())
    }

    #[test]
    fn assistant_messages_are_printed_with_label() {
        let line = render_event(&Event::MessageAppended(Message::assistant("Hi there")), &labels());
        assert_eq!(line.as_deref(), Some("Assistant: Hi there"));
    }

    #[test]
    fn user_messages_are_not_echoed() {
        assert_eq!(
            render_event(&Event::MessageAppended(Message::user("Hello")), &labels()),
            None
        );
    }

    #[test]
    fn pending_shows_thinking_indicator() {
        assert_eq!(
            render_event(&Event::PendingChanged(true), &labels()).as_deref(),
            Some("thinking...")
        );
        assert_eq!(render_event(&Event::PendingChanged(false), &labels()), None);
    }

    #[test]
    fn notifications_and_restore() {
        assert_eq!(
            render_event(&Event::Notification(Notification::error("boom")), &labels()).as_deref(),
            Some("[error] boom")
        );
        assert_eq!(render_event(&Event::HistoryRestored(0), &labels()), None);
        assert!(render_event(&Event::HistoryRestored(4), &labels())
            .unwrap()
            .contains("4 messages"));
    }

    #[test]
    fn format_message_uses_role_labels() {
        assert_eq!(format_message(&Message::user("Hello"), &labels()), "You: Hello");
    }

    #[tokio::test]
    async fn printer_stops_on_shutdown() {
        let bus = botica_common::EventBus::new(8);
        let printer = spawn_printer(bus.subscribe(), labels());
        bus.publish(Event::PendingChanged(true));
        bus.publish(Event::Shutdown);
        printer.await.unwrap();
    }
}
