//! Completion API configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini generateContent settings. The API key is never stored here; it
/// comes from `GEMINI_API_KEY`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub model: String,
    pub api_base: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro".into(),
            api_base: DEFAULT_GEMINI_API_BASE.into(),
            temperature: 0.7,
            max_tokens: 4096,
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}
