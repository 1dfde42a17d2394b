use std::path::PathBuf;

/// Every user-triggerable command in the chat loop.
///
/// Plain text and slash commands both resolve to a `Command`; the app state
/// dispatcher matches on this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // -- Draft / sending --
    /// Plain text: becomes the draft and is sent right away.
    Say(String),
    Send,
    ShowDraft,
    ClearDraft,

    // -- Input sources --
    Voice(PathBuf),
    Upload(PathBuf),

    // -- Output --
    // Reply commands take an optional message number as shown by /history;
    // without one they act on the latest reply.
    Export(Option<PathBuf>),
    Copy(Option<usize>),
    Save {
        reply: Option<usize>,
        path: Option<PathBuf>,
    },

    // -- Voice output --
    Speak(Option<usize>),
    Pause,
    Resume,
    Stop,

    // -- Info --
    History,
    Usage,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: /{0} (try /help)")]
    Unknown(String),

    #[error("/{0} needs a file path")]
    MissingArgument(&'static str),

    #[error("/{0} takes a message number (see /history)")]
    BadMessageNumber(&'static str),
}
