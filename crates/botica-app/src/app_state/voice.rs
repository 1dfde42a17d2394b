//! Voice input: transcribing audio files into the draft.

use std::path::PathBuf;

use botica_ai::CaptureError;
use botica_common::Notification;

use super::core::ChatApp;

impl ChatApp {
    /// Start transcribing `path` in the background. The transcript is
    /// delivered through the transcript channel.
    pub(super) fn start_voice_capture(&mut self, path: PathBuf) {
        if self.voice.is_listening() {
            self.notify(Notification::info("already listening"));
            return;
        }

        let voice = self.voice.clone();
        let events = self.events.clone();
        let transcripts = self.transcript_tx.clone();

        self.capture = Some(tokio::spawn(async move {
            let audio = match tokio::fs::read(&path).await {
                Ok(audio) => audio,
                Err(e) => {
                    events.notify(Notification::error(format!(
                        "could not read {}: {e}",
                        path.display()
                    )));
                    return;
                }
            };
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "audio.wav".to_string());

            events.notify(Notification::info("listening..."));
            match voice.capture(audio, &filename).await {
                Ok(text) => {
                    // The loop owns the draft; a closed channel means it has exited.
                    let _ = transcripts.send(text);
                }
                Err(CaptureError::AlreadyListening) => {
                    events.notify(Notification::info("already listening"));
                }
                Err(e) => {
                    events.notify(Notification::error(e.to_string()));
                }
            }
        }));
    }

    /// Add a finished transcript to the draft.
    pub(super) fn apply_transcript(&mut self, transcript: &str) {
        self.draft.append_transcript(transcript);
        self.notify(Notification::success(format!("added to draft: {transcript}")));
    }
}
