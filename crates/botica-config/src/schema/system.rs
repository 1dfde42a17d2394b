//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing-subscriber` filter directive for the botica crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "botica=debug",
            LogLevel::Info => "botica=info",
            LogLevel::Warning => "botica=warn",
            LogLevel::Error => "botica=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
