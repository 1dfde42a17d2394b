//! OpenAI Whisper API client for speech-to-text.
//!
//! Used for voice input: a recorded audio file is transcribed to text,
//! which the caller adds to the draft.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiError, Transcriber};

const WHISPER_API_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Whisper API client configuration.
#[derive(Clone)]
pub struct WhisperConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub language: Option<String>,
}

impl std::fmt::Debug for WhisperConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("language", &self.language)
            .finish()
    }
}

impl WhisperConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: WHISPER_API_URL.to_string(),
            model: "whisper-1".to_string(),
            language: None,
        }
    }

    /// Create config from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, AiError> {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(AiError::NotConfigured(
                "speech-to-text not configured. Set OPENAI_API_KEY.".into(),
            )),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }
}

/// Whisper speech-to-text client.
pub struct WhisperClient {
    config: WhisperConfig,
    http: reqwest::Client,
}

impl WhisperClient {
    pub fn new(config: WhisperConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }
}

/// MIME type for an audio file name, defaulting to WAV.
fn audio_mime(filename: &str) -> &'static str {
    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or("audio/wav")
}

#[async_trait]
impl Transcriber for WhisperClient {
    /// `audio` should be valid audio in a supported format
    /// (mp3, mp4, mpeg, mpga, m4a, wav, webm).
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, AiError> {
        debug!(
            model = %self.config.model,
            size = audio.len(),
            "Whisper transcription request"
        );

        let file_part = reqwest::multipart::Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str(audio_mime(filename))
            .map_err(|e| AiError::ApiError(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone());

        if let Some(ref lang) = self.config.language {
            form = form.text("language", lang.clone());
        }

        let response = self
            .http
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        json["text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| AiError::ParseError("no 'text' field in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_mime_by_extension() {
        assert_eq!(audio_mime("clip.mp3"), "audio/mpeg");
        assert_eq!(audio_mime("CLIP.MP3"), "audio/mpeg");
        assert_eq!(audio_mime("clip.ogg"), "audio/ogg");
        assert_eq!(audio_mime("clip"), "audio/wav");
    }

    #[tokio::test]
    async fn transcribe_returns_text_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/transcriptions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"text":"bar"}"#)
            .create_async()
            .await;

        let config = WhisperConfig::new("test-key")
            .with_api_url(format!("{}/v1/audio/transcriptions", server.url()))
            .with_language("pt");
        let client = WhisperClient::new(config).unwrap();

        let text = client.transcribe(vec![0u8; 16], "clip.wav").await.unwrap();
        assert_eq!(text, "bar");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transcribe_without_text_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/audio/transcriptions")
            .with_status(200)
            .with_body(r#"{"error":"nothing heard"}"#)
            .create_async()
            .await;

        let config = WhisperConfig::new("test-key")
            .with_api_url(format!("{}/v1/audio/transcriptions", server.url()));
        let client = WhisperClient::new(config).unwrap();

        let err = client.transcribe(vec![0u8; 16], "clip.wav").await.unwrap_err();
        assert!(matches!(err, AiError::ParseError(_)));
    }
}
