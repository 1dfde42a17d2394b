//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod sections;

#[cfg(test)]
mod tests;

use crate::schema::BoticaConfig;
use botica_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BoticaConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_gemini(&mut errors, config);
    sections::validate_session(&mut errors, config);
    sections::validate_voice(&mut errors, config);
    sections::validate_files(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
