//! File import and document export settings.

use serde::{Deserialize, Serialize};

/// File import into the draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Imported text is cut to this many characters.
    pub max_chars: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { max_chars: 1000 }
    }
}

/// History export and single-reply download.
///
/// Page geometry is in millimetres from the top of an A4 page: the cursor
/// starts at `top_margin`, moves down `line_height` per line and breaks to a
/// new page once it passes `page_height`. A `file_name` ending in `.pdf`
/// exports a PDF, anything else plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory. Defaults to the platform download directory.
    pub directory: Option<String>,
    pub file_name: String,
    pub response_file_name: String,
    /// Wrap column, in characters.
    pub wrap_width: u32,
    pub page_height: u32,
    pub top_margin: u32,
    pub line_height: u32,
    pub message_gap: u32,
    pub user_label: String,
    pub assistant_label: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: "chat_history.pdf".into(),
            response_file_name: "response.txt".into(),
            wrap_width: 90,
            page_height: 280,
            top_margin: 10,
            line_height: 7,
            message_gap: 5,
            user_label: "You: ".into(),
            assistant_label: "Assistant: ".into(),
        }
    }
}
