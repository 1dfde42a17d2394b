//! Building the app from config: completion client, transcriber, speaker,
//! history store, and the session manager.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use botica_ai::{
    AiClient, AiError, AiResponse, GeminiClient, GeminiConfig, JsonFileStore, SessionManager,
    Transcriber, VoiceCapture, WhisperClient, WhisperConfig,
};
use botica_common::{BoticaError, EventBus, PlatformError};
use botica_config::schema::{GeminiSettings, VoiceConfig};
use botica_config::BoticaConfig;
use botica_platform::{CommandSpeaker, Speaker};

use super::core::ChatApp;
use super::render::{self, Labels};
use crate::cli::Args;

/// Stand-in used when no API key is available. Every turn fails with
/// `NotConfigured`, which the session reports like any other upstream error.
struct UnconfiguredClient {
    reason: String,
}

#[async_trait]
impl AiClient for UnconfiguredClient {
    async fn complete(&self, _prompt: &str) -> Result<AiResponse, AiError> {
        Err(AiError::NotConfigured(self.reason.clone()))
    }
}

impl ChatApp {
    /// Wire up every collaborator. Must be called inside a tokio runtime.
    pub fn from_config(config: BoticaConfig, args: &Args) -> Result<Self, BoticaError> {
        let events = EventBus::default();
        // Subscribe before restoring so the restore event is printed.
        let printer = render::spawn_printer(events.subscribe(), Labels::from(&config.export));

        let client = completion_client(&config.gemini);
        let store = Arc::new(JsonFileStore::new(history_path(&config, args)?));
        info!(path = %store.path().display(), "Using history file");

        let mut session = SessionManager::new(client, store).with_events(events.clone());
        if let Some(secs) = config.session.turn_timeout_secs {
            session = session.with_turn_timeout(Duration::from_secs(secs));
        }
        let session = Arc::new(session.restore_persisted());

        let voice = Arc::new(VoiceCapture::new(transcriber(&config.voice)));
        let speaker: Arc<dyn Speaker> = Arc::new(CommandSpeaker::new(
            config.voice.speech.command.clone(),
            config.voice.speech.args.clone(),
        ));

        let mut app = ChatApp::new(config, events, session, voice, speaker);
        app.printer = Some(printer);
        Ok(app)
    }
}

/// History file: CLI flag, then config, then the platform data directory.
fn history_path(config: &BoticaConfig, args: &Args) -> Result<PathBuf, PlatformError> {
    match args
        .history
        .as_deref()
        .or(config.session.history_file.as_deref())
    {
        Some(path) => Ok(PathBuf::from(path)),
        None => botica_platform::history_file(),
    }
}

fn completion_client(settings: &GeminiSettings) -> Arc<dyn AiClient> {
    let model = settings.model.as_str();
    let config = match GeminiConfig::from_env() {
        Ok(config) => config
            .with_model(model)
            .with_api_base(settings.api_base.as_str())
            .with_max_tokens(settings.max_tokens)
            .with_temperature(settings.temperature)
            .with_timeouts(
                Duration::from_secs(settings.connect_timeout_secs),
                Duration::from_secs(settings.request_timeout_secs),
            ),
        Err(e) => {
            warn!(error = %e, "Gemini client unavailable");
            return Arc::new(UnconfiguredClient {
                reason: "GEMINI_API_KEY is not set".into(),
            });
        }
    };

    match GeminiClient::new(config) {
        Ok(client) => {
            info!(model, "Gemini client ready");
            Arc::new(client)
        }
        Err(e) => {
            warn!(error = %e, "Gemini client unavailable");
            Arc::new(UnconfiguredClient {
                reason: e.to_string(),
            })
        }
    }
}

fn transcriber(voice: &VoiceConfig) -> Option<Arc<dyn Transcriber>> {
    if !voice.enabled {
        info!("Voice input disabled in config");
        return None;
    }

    let mut config = match WhisperConfig::from_env() {
        Ok(config) => config.with_model(voice.transcription.model.as_str()),
        Err(e) => {
            warn!(error = %e, "Voice input unavailable");
            return None;
        }
    };
    if !voice.transcription.language.trim().is_empty() {
        config = config.with_language(voice.transcription.language.as_str());
    }

    match WhisperClient::new(config) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!(error = %e, "Voice input unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn history_path_prefers_cli_then_config() {
        let mut config = BoticaConfig::default();
        config.session.history_file = Some("/from/config.json".into());

        let args = Args::parse_from(["botica", "--history", "/from/cli.json"]);
        assert_eq!(
            history_path(&config, &args).unwrap(),
            PathBuf::from("/from/cli.json")
        );

        let args = Args::parse_from(["botica"]);
        assert_eq!(
            history_path(&config, &args).unwrap(),
            PathBuf::from("/from/config.json")
        );
    }

    #[tokio::test]
    async fn unconfigured_client_reports_not_configured() {
        let client = UnconfiguredClient {
            reason: "GEMINI_API_KEY is not set".into(),
        };
        let err = client.complete("Hello").await.unwrap_err();
        assert!(matches!(err, AiError::NotConfigured(ref m) if m.contains("GEMINI_API_KEY")));
    }

    #[test]
    fn disabled_voice_has_no_transcriber() {
        let mut voice = VoiceConfig::default();
        voice.enabled = false;
        assert!(transcriber(&voice).is_none());
    }
}
