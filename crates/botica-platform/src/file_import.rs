//! Reading user files into the draft.
//!
//! Only text-like files are accepted: any `text/*` MIME type plus
//! `application/pdf`, which is read as lossy UTF-8 rather than parsed.

use std::path::Path;

use botica_common::PlatformError;
use tracing::debug;

/// Text pulled out of an imported file, already cut to the caller's limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedText {
    pub file_name: String,
    pub mime: String,
    pub text: String,
    pub truncated: bool,
}

/// Infers the MIME type from a file name extension.
pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

pub fn is_supported_mime(mime: &str) -> bool {
    mime.starts_with("text/") || mime == "application/pdf"
}

/// Returns the first `max_chars` characters of `text` and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

/// Read `path` as text, keeping at most `max_chars` characters.
pub async fn import_text(path: &Path, max_chars: usize) -> Result<ImportedText, PlatformError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mime = guess_mime(path);
    if !is_supported_mime(&mime) {
        return Err(PlatformError::UnsupportedFileType(format!(
            "{file_name} ({mime})"
        )));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PlatformError::FileReadError(format!("{}: {e}", path.display())))?;
    let content = String::from_utf8_lossy(&bytes);
    let (text, truncated) = truncate_chars(&content, max_chars);

    debug!(
        file = %file_name,
        mime = %mime,
        bytes = bytes.len(),
        truncated,
        "imported file"
    );

    Ok(ImportedText {
        file_name,
        mime,
        text: text.to_string(),
        truncated,
    })
}
