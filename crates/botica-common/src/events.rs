use tokio::sync::broadcast;

use crate::notifications::Notification;
use crate::types::Message;

/// State changes published by the session layer for the rendering layer.
#[derive(Debug, Clone)]
pub enum Event {
    HistoryRestored(usize),
    MessageAppended(Message),
    PendingChanged(bool),
    Notification(Notification),
    Shutdown,
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn notify(&self, notification: Notification) -> usize {
        self.publish(Event::Notification(notification))
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
