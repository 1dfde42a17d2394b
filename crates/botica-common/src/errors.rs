use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("clipboard error: {0}")]
    ClipboardError(String),

    #[error("path error: {0}")]
    PathError(String),

    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("file read error: {0}")]
    FileReadError(String),

    #[error("voice unavailable: {0}")]
    VoiceUnavailable(String),

    #[error("voice error: {0}")]
    VoiceError(String),

    #[error("export error: {0}")]
    ExportError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BoticaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
