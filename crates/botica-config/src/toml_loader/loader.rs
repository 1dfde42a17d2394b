//! Core TOML config loading: read from path or platform default.

use crate::schema::BoticaConfig;
use crate::validation;
use botica_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. Validation failures are logged
/// and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<BoticaConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: BoticaConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}; using parsed config with potentially invalid values");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from `path`, writing the commented default file there first
/// if nothing exists yet.
pub fn load_or_create(path: &Path) -> Result<BoticaConfig, ConfigError> {
    match load_from_path(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(path)?;
            Ok(BoticaConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/botica/config.toml`
/// On Linux: `~/.config/botica/config.toml`
pub fn load_default() -> Result<BoticaConfig, ConfigError> {
    load_or_create(&default_config_path()?)
}
