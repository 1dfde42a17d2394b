//! Single-slot voice capture.
//!
//! Only one capture may run at a time. The transcript is handed back to the
//! caller, which adds it to the draft; history is never touched here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use botica_common::PlatformError;
use tracing::{debug, warn};

use crate::Transcriber;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("already listening")]
    AlreadyListening,

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Releases the listening slot on drop, including when the capture future
/// is dropped mid-flight.
struct ListeningGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ListeningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CaptureError> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| CaptureError::AlreadyListening)?;
        Ok(Self { flag })
    }
}

impl Drop for ListeningGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct VoiceCapture {
    transcriber: Option<Arc<dyn Transcriber>>,
    listening: AtomicBool,
}

impl VoiceCapture {
    /// `None` means no speech-to-text backend is configured; every capture
    /// then fails with `VoiceUnavailable`.
    pub fn new(transcriber: Option<Arc<dyn Transcriber>>) -> Self {
        Self {
            transcriber,
            listening: AtomicBool::new(false),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// Transcribe one recording.
    pub async fn capture(&self, audio: Vec<u8>, filename: &str) -> Result<String, CaptureError> {
        let _guard = ListeningGuard::acquire(&self.listening)?;

        let transcriber = self.transcriber.as_ref().ok_or_else(|| {
            PlatformError::VoiceUnavailable("speech recognition is not configured".into())
        })?;

        debug!(filename, bytes = audio.len(), "Starting voice capture");
        let text = transcriber.transcribe(audio, filename).await.map_err(|e| {
            warn!(error = %e, "Transcription failed");
            PlatformError::VoiceError(e.to_string())
        })?;

        let text = text.trim();
        if text.is_empty() {
            return Err(PlatformError::VoiceError("no speech recognized".into()).into());
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AiError;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    struct FixedTranscriber(&'static str);

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(&self, _audio: Vec<u8>, _filename: &str) -> Result<String, AiError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingTranscriber;

    #[async_trait]
    impl Transcriber for FailingTranscriber {
        async fn transcribe(&self, _audio: Vec<u8>, _filename: &str) -> Result<String, AiError> {
            Err(AiError::NetworkError("connection refused".into()))
        }
    }

    struct GatedTranscriber {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl Transcriber for GatedTranscriber {
        async fn transcribe(&self, _audio: Vec<u8>, _filename: &str) -> Result<String, AiError> {
            self.gate.notified().await;
            Ok("late".into())
        }
    }

    #[tokio::test]
    async fn capture_returns_trimmed_transcript() {
        let capture = VoiceCapture::new(Some(Arc::new(FixedTranscriber("  bar \n"))));
        let text = capture.capture(vec![1, 2, 3], "clip.wav").await.unwrap();
        assert_eq!(text, "bar");
        assert!(!capture.is_listening());
    }

    #[tokio::test]
    async fn capture_without_backend_is_unavailable() {
        let capture = VoiceCapture::new(None);
        let err = capture.capture(vec![], "clip.wav").await.unwrap_err();
        assert!(matches!(
            err,
            CaptureError::Platform(PlatformError::VoiceUnavailable(_))
        ));
        assert!(!capture.is_listening());
    }

    #[tokio::test]
    async fn transcription_failure_is_voice_error() {
        let capture = VoiceCapture::new(Some(Arc::new(FailingTranscriber)));
        let err = capture.capture(vec![0], "clip.wav").await.unwrap_err();
        assert!(matches!(
            err,
            CaptureError::Platform(PlatformError::VoiceError(ref m)) if m.contains("connection refused")
        ));
    }

    #[tokio::test]
    async fn blank_transcript_is_voice_error() {
        let capture = VoiceCapture::new(Some(Arc::new(FixedTranscriber("   "))));
        let err = capture.capture(vec![0], "clip.wav").await.unwrap_err();
        assert!(matches!(
            err,
            CaptureError::Platform(PlatformError::VoiceError(_))
        ));
    }

    #[tokio::test]
    async fn second_capture_while_listening_is_refused() {
        let gate = Arc::new(Notify::new());
        let capture = Arc::new(VoiceCapture::new(Some(Arc::new(GatedTranscriber {
            gate: gate.clone(),
        }))));

        let first = {
            let capture = capture.clone();
            tokio::spawn(async move { capture.capture(vec![0], "a.wav").await })
        };
        while !capture.is_listening() {
            tokio::task::yield_now().await;
        }

        let err = capture.capture(vec![0], "b.wav").await.unwrap_err();
        assert!(matches!(err, CaptureError::AlreadyListening));

        gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), "late");
        assert!(!capture.is_listening());
    }
}
