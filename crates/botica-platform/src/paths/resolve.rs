use std::path::PathBuf;

use botica_common::PlatformError;

pub(super) const APP_NAME: &str = "botica";

/// Fixed key of the persisted conversation slot.
pub const HISTORY_KEY: &str = "chatHistory";

/// Returns the platform-specific configuration directory for Botica.
///
/// - macOS: `~/Library/Application Support/botica`
/// - Linux: `$XDG_CONFIG_HOME/botica` (defaults to `~/.config/botica`)
/// - Windows: `%APPDATA%\botica`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory for Botica.
///
/// - macOS: `~/Library/Application Support/botica`
/// - Linux: `$XDG_DATA_HOME/botica` (defaults to `~/.local/share/botica`)
/// - Windows: `%APPDATA%\botica`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the path of the persisted history slot.
///
/// Located at `data_dir()/chatHistory.json`.
pub fn history_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join(format!("{HISTORY_KEY}.json")))
}

/// Returns the directory exports and saved replies are written to.
///
/// Uses `configured` when set, then the user's download directory, then
/// `data_dir()/exports`.
pub fn export_dir(configured: Option<&str>) -> Result<PathBuf, PlatformError> {
    if let Some(dir) = configured {
        return Ok(PathBuf::from(dir));
    }
    match dirs::download_dir() {
        Some(dir) => Ok(dir),
        None => Ok(data_dir()?.join("exports")),
    }
}
