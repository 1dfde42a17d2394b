//! ChatApp struct definition and constructor.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use botica_ai::{Draft, SessionManager, VoiceCapture};
use botica_common::{EventBus, Notification};
use botica_config::BoticaConfig;
use botica_platform::{Clipboard, Speaker};

/// Top-level application state.
pub struct ChatApp {
    pub(super) config: BoticaConfig,
    pub(super) events: EventBus,
    pub(super) session: Arc<SessionManager>,
    pub(super) draft: Draft,

    // Voice input: finished transcripts come back over the channel
    pub(super) voice: Arc<VoiceCapture>,
    pub(super) transcript_tx: mpsc::UnboundedSender<String>,
    pub(super) transcript_rx: Option<mpsc::UnboundedReceiver<String>>,

    // Voice output
    pub(super) speaker: Arc<dyn Speaker>,

    // Created on first copy; some platforms drop the contents with the handle
    pub(super) clipboard: Option<Clipboard>,

    // Background tasks
    pub(super) turn: Option<JoinHandle<()>>,
    pub(super) capture: Option<JoinHandle<()>>,
    pub(super) printer: Option<JoinHandle<()>>,
}

impl ChatApp {
    pub fn new(
        config: BoticaConfig,
        events: EventBus,
        session: Arc<SessionManager>,
        voice: Arc<VoiceCapture>,
        speaker: Arc<dyn Speaker>,
    ) -> Self {
        let (transcript_tx, transcript_rx) = mpsc::unbounded_channel();
        Self {
            config,
            events,
            session,
            draft: Draft::new(),
            voice,
            transcript_tx,
            transcript_rx: Some(transcript_rx),
            speaker,
            clipboard: None,
            turn: None,
            capture: None,
            printer: None,
        }
    }

    pub(super) fn notify(&self, notification: Notification) {
        self.events.notify(notification);
    }
}
