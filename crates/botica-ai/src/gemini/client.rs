//! Gemini API client struct, request building, and response parsing.

use crate::{AiError, AiResponse, TokenUsage};

use super::config::GeminiConfig;

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub(crate) fn api_url(&self) -> String {
        format!("{}/{}:generateContent", self.config.api_base, self.config.model)
    }

    /// Build the JSON request body: a single user turn carrying `prompt`.
    pub(crate) fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        })
    }

    /// Parse a Gemini response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
            return Err(AiError::ApiError(format!("prompt blocked: {reason}")));
        }

        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let content: String = first["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();

        if content.is_empty() {
            if let Some(reason) = first["finishReason"].as_str() {
                if reason != "STOP" {
                    return Err(AiError::ApiError(format!("response blocked: {reason}")));
                }
            }
        }

        let usage = TokenUsage {
            input_tokens: json["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0),
            output_tokens: json["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0),
        };

        let model = json["modelVersion"]
            .as_str()
            .unwrap_or(&self.config.model)
            .to_string();

        Ok(AiResponse {
            content,
            model,
            usage,
        })
    }
}
