//! Conversation session management.
//!
//! A `SessionManager` owns the ordered message log, persists it after every
//! append, and runs at most one completion request at a time. The `Draft`
//! holds not-yet-submitted input and is kept apart from history.

mod chat;
mod draft;
mod manager;
mod store;
mod types;

#[cfg(test)]
mod tests;

pub use draft::Draft;
pub use manager::SessionManager;
pub use store::{restore, serialize, HistoryStore, JsonFileStore, MemoryStore};
pub use types::{PendingTurn, SessionError};
