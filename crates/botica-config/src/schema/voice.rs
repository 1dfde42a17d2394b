//! Voice input and output configuration types.

use serde::{Deserialize, Serialize};

/// Speech-to-text settings (Whisper).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub model: String,
    /// ISO-639-1 language hint sent with each request.
    pub language: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: "whisper-1".into(),
            language: "pt".into(),
        }
    }
}

/// Text-to-speech settings. The command receives the text as its last argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: "espeak-ng".into(),
            args: vec!["-v".into(), "pt-br".into()],
        }
    }
}

/// Voice input and output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub enabled: bool,
    pub transcription: TranscriptionConfig,
    pub speech: SpeechConfig,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            transcription: TranscriptionConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}
