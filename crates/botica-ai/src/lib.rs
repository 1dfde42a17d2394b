//! AI engine for Botica.
//!
//! Provides:
//! - the completion seam (`AiClient`) and its Gemini implementation
//! - the speech-to-text seam (`Transcriber`) and its Whisper implementation
//! - the conversation session manager with history persistence
//! - the draft buffer and single-slot voice capture
//! - token usage tracking

pub mod gemini;
pub mod session;
pub mod token_tracker;
pub mod voice;
pub mod whisper;

use async_trait::async_trait;

pub use botica_common::{Message, Role};
pub use gemini::{GeminiClient, GeminiConfig};
pub use session::{
    Draft, HistoryStore, JsonFileStore, MemoryStore, PendingTurn, SessionError, SessionManager,
};
pub use token_tracker::TokenTracker;
pub use voice::{CaptureError, VoiceCapture};
pub use whisper::{WhisperClient, WhisperConfig};

/// Completion collaborator: turns one prompt into one reply.
///
/// Implementations receive only the prompt text. Conversation history is
/// never forwarded upstream.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<AiResponse, AiError>;
}

/// Speech-to-text collaborator.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio bytes; `filename` carries the container format.
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, AiError>;
}

#[derive(Debug, Clone, Default)]
pub struct AiResponse {
    pub content: String,
    /// Model that produced the reply, as reported upstream when available.
    pub model: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Not configured: {0}")]
    NotConfigured(String),
}
