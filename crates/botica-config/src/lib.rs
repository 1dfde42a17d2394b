//! Botica configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use botica_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::BoticaConfig;

use botica_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default path when `None`.
///
/// A missing file is created from the commented template. The result is
/// validated; invalid values are rejected here even though the lower-level
/// loaders only warn about them.
pub fn load_config(path: Option<&Path>) -> Result<BoticaConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_or_create(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BoticaConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
