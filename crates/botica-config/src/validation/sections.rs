//! Per-section validators.

use crate::schema::BoticaConfig;

use super::helpers::{validate_not_blank, validate_range, validate_range_f64};

/// Validate completion API settings.
pub(crate) fn validate_gemini(errors: &mut Vec<String>, config: &BoticaConfig) {
    let gemini = &config.gemini;
    validate_not_blank(errors, "gemini.model", &gemini.model);
    validate_not_blank(errors, "gemini.api_base", &gemini.api_base);
    validate_range_f64(errors, "gemini.temperature", gemini.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "gemini.max_tokens",
        u64::from(gemini.max_tokens),
        1,
        65536,
    );
    validate_range(
        errors,
        "gemini.connect_timeout_secs",
        gemini.connect_timeout_secs,
        1,
        300,
    );
    validate_range(
        errors,
        "gemini.request_timeout_secs",
        gemini.request_timeout_secs,
        1,
        3600,
    );
}

/// Validate session settings.
pub(crate) fn validate_session(errors: &mut Vec<String>, config: &BoticaConfig) {
    if let Some(secs) = config.session.turn_timeout_secs {
        validate_range(errors, "session.turn_timeout_secs", secs, 1, 3600);
    }
    if let Some(ref file) = config.session.history_file {
        validate_not_blank(errors, "session.history_file", file);
    }
}

/// Validate voice settings. Only checked when voice is enabled.
pub(crate) fn validate_voice(errors: &mut Vec<String>, config: &BoticaConfig) {
    let voice = &config.voice;
    if !voice.enabled {
        return;
    }
    validate_not_blank(errors, "voice.transcription.model", &voice.transcription.model);
    validate_not_blank(errors, "voice.speech.command", &voice.speech.command);
}

/// Validate import and export settings.
pub(crate) fn validate_files(errors: &mut Vec<String>, config: &BoticaConfig) {
    validate_range(
        errors,
        "import.max_chars",
        config.import.max_chars as u64,
        1,
        100_000,
    );

    let export = &config.export;
    validate_not_blank(errors, "export.file_name", &export.file_name);
    validate_not_blank(errors, "export.response_file_name", &export.response_file_name);
    validate_range(errors, "export.wrap_width", u64::from(export.wrap_width), 20, 400);
    validate_range(errors, "export.line_height", u64::from(export.line_height), 1, 50);
    validate_range(errors, "export.message_gap", u64::from(export.message_gap), 0, 50);
    validate_range(errors, "export.top_margin", u64::from(export.top_margin), 0, 500);
    validate_range(errors, "export.page_height", u64::from(export.page_height), 1, 10_000);
    let first_line = u64::from(export.top_margin) + u64::from(export.line_height);
    if u64::from(export.page_height) < first_line {
        errors.push(format!(
            "export.page_height = {} must leave room for one line below top_margin = {}",
            export.page_height, export.top_margin
        ));
    }
}
