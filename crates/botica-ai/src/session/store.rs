//! History persistence: a single key-value slot holding the JSON snapshot.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::Message;

use super::types::SessionError;

/// Storage slot for the serialized history.
pub trait HistoryStore: Send + Sync {
    /// Read the stored snapshot, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Overwrite the slot. Last write wins.
    fn save(&self, snapshot: &str) -> Result<(), SessionError>;
}

/// Serialize history as a JSON array of `{role, content}` objects.
pub fn serialize(history: &[Message]) -> Result<String, SessionError> {
    serde_json::to_string(history).map_err(|e| SessionError::Storage(e.to_string()))
}

/// Parse a snapshot produced by [`serialize`].
pub fn restore(snapshot: &str) -> Result<Vec<Message>, SessionError> {
    serde_json::from_str(snapshot).map_err(|e| SessionError::CorruptSnapshot(e.to_string()))
}

/// Snapshot stored in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| SessionError::Storage(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, snapshot: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SessionError::Storage(format!("{}: {e}", parent.display())))?;
        }
        std::fs::write(&self.path, snapshot)
            .map_err(|e| SessionError::Storage(format!("{}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), bytes = snapshot.len(), "History saved");
        Ok(())
    }
}

/// In-process slot, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.contents())
    }

    fn save(&self, snapshot: &str) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.to_string());
        Ok(())
    }
}
