pub mod clipboard;
pub mod export;
pub mod file_import;
pub mod paths;
pub mod speech;

pub use clipboard::Clipboard;
pub use export::{
    export_history, save_text, writer_for, DocumentWriter, PageLayout, PdfDocumentWriter,
    TextDocumentWriter,
};
pub use file_import::{import_text, ImportedText};
pub use paths::{config_dir, data_dir, ensure_dirs, export_dir, history_file};
pub use speech::{CommandSpeaker, Speaker};
