//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = BoticaConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_temperature_out_of_range() {
    let mut config = BoticaConfig::default();
    config.gemini.temperature = 2.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("gemini.temperature"));
}

#[test]
fn catches_zero_max_tokens() {
    let mut config = BoticaConfig::default();
    config.gemini.max_tokens = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("gemini.max_tokens"));
}

#[test]
fn catches_blank_model() {
    let mut config = BoticaConfig::default();
    config.gemini.model = "   ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("gemini.model must not be empty"));
}

#[test]
fn catches_zero_turn_timeout() {
    let mut config = BoticaConfig::default();
    config.session.turn_timeout_secs = Some(0);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.turn_timeout_secs"));
}

#[test]
fn blank_speech_command_ignored_when_voice_disabled() {
    let mut config = BoticaConfig::default();
    config.voice.speech.command = String::new();
    assert!(validate(&config).is_err());

    config.voice.enabled = false;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_import_limit() {
    let mut config = BoticaConfig::default();
    config.import.max_chars = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("import.max_chars"));
}

#[test]
fn catches_page_too_short() {
    let mut config = BoticaConfig::default();
    config.export.page_height = 12;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("export.page_height"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = BoticaConfig::default();
    config.gemini.temperature = -1.0;
    config.export.wrap_width = 5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("gemini.temperature"));
    assert!(err.contains("export.wrap_width"));
    assert!(err.contains("; "));
}

#[test]
fn huge_top_margin_is_rejected_not_overflowed() {
    let mut config = BoticaConfig::default();
    config.export.top_margin = u32::MAX;
    config.export.page_height = u32::MAX;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("export.top_margin"));
    assert!(err.contains("export.page_height"));
}
