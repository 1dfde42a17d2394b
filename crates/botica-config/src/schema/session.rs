//! Conversation session settings.

use serde::{Deserialize, Serialize};

/// Where the history snapshot lives and how long a turn may wait.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Override for the snapshot file. Defaults to `<data_dir>/botica/chatHistory.json`.
    pub history_file: Option<String>,
    /// Give up on a turn after this many seconds. Unset means wait until the
    /// upstream call settles.
    pub turn_timeout_secs: Option<u64>,
}
