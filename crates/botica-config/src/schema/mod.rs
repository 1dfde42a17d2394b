//! Configuration schema types for Botica.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod files;
mod gemini;
mod session;
mod system;
mod voice;

pub use files::*;
pub use gemini::*;
pub use session::*;
pub use system::*;
pub use voice::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Botica.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BoticaConfig {
    pub gemini: GeminiSettings,
    pub session: SessionConfig,
    pub voice: VoiceConfig,
    pub import: ImportConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}
