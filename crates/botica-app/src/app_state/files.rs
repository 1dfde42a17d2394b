//! File import, history export, saving and copying replies.

use std::path::{Path, PathBuf};

use botica_common::{Notification, PlatformError};
use botica_platform::{export_dir, import_text, save_text, writer_for, Clipboard, PageLayout};

use super::core::ChatApp;

impl ChatApp {
    /// Replace the draft with the contents of a text or PDF file.
    pub(super) async fn upload(&mut self, path: &Path) {
        match import_text(path, self.config.import.max_chars).await {
            Ok(imported) => {
                self.draft.replace(imported.text);
                let mut message = format!("loaded {} into the draft", imported.file_name);
                if imported.truncated {
                    message.push_str(&format!(
                        " (first {} characters)",
                        self.config.import.max_chars
                    ));
                }
                self.notify(Notification::success(message));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "File import failed");
                self.notify(Notification::error(e.to_string()));
            }
        }
    }

    pub(super) fn export_history(&self, requested: Option<PathBuf>) {
        let result = self
            .output_path(requested, &self.config.export.file_name)
            .and_then(|path| {
                botica_platform::export_history(
                    &self.session.snapshot(),
                    &PageLayout::from(&self.config.export),
                    writer_for(&path).as_ref(),
                    &path,
                )
            });

        match result {
            Ok(Some(summary)) => self.notify(Notification::success(format!(
                "exported {} messages ({} pages) to {}",
                summary.messages,
                summary.pages,
                summary.path.display()
            ))),
            Ok(None) => self.notify(Notification::info("no messages to export")),
            Err(e) => self.notify(Notification::error(e.to_string())),
        }
    }

    pub(super) fn save_reply(&self, which: Option<usize>, requested: Option<PathBuf>) {
        let Some(reply) = self.pick_reply(which, "save") else {
            return;
        };

        let result = self
            .output_path(requested, &self.config.export.response_file_name)
            .and_then(|path| save_text(&reply, &path).map(|()| path));

        match result {
            Ok(path) => self.notify(Notification::success(format!(
                "reply saved to {}",
                path.display()
            ))),
            Err(e) => self.notify(Notification::error(e.to_string())),
        }
    }

    pub(super) fn copy_reply(&mut self, which: Option<usize>) {
        let Some(reply) = self.pick_reply(which, "copy") else {
            return;
        };

        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    self.notify(Notification::error(e.to_string()));
                    return;
                }
            }
        }

        let result = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(&reply),
            None => return,
        };
        match result {
            Ok(()) => self.notify(Notification::success("reply copied to clipboard")),
            Err(e) => self.notify(Notification::error(e.to_string())),
        }
    }

    /// `requested`, or `default_name` inside the export directory.
    fn output_path(
        &self,
        requested: Option<PathBuf>,
        default_name: &str,
    ) -> Result<PathBuf, PlatformError> {
        match requested {
            Some(path) => Ok(path),
            None => Ok(export_dir(self.config.export.directory.as_deref())?.join(default_name)),
        }
    }
}
