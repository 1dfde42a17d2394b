//! Conversation export.
//!
//! Layout is separated from rendering: [`layout_history`] turns the history
//! into pages of positioned lines, and a [`DocumentWriter`] renders those
//! pages to a file.

use std::path::{Path, PathBuf};

use botica_common::{Message, PlatformError, Role};
use botica_config::schema::ExportConfig;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::info;

/// Page geometry and labels used when laying out an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub wrap_width: usize,
    pub page_height: u32,
    pub top_margin: u32,
    pub line_height: u32,
    pub message_gap: u32,
    pub user_label: String,
    pub assistant_label: String,
}

impl PageLayout {
    fn label(&self, role: Role) -> &str {
        match role {
            Role::User => &self.user_label,
            Role::Assistant => &self.assistant_label,
        }
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for PageLayout {
    fn from(config: &ExportConfig) -> Self {
        Self {
            wrap_width: config.wrap_width as usize,
            page_height: config.page_height,
            top_margin: config.top_margin,
            line_height: config.line_height,
            message_gap: config.message_gap,
            user_label: config.user_label.clone(),
            assistant_label: config.assistant_label.clone(),
        }
    }
}

/// One line of text at vertical position `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub y: u32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Greedy word wrap. Explicit newlines are kept; words longer than `width`
/// are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if line_len > 0 {
                    out.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(width);
                out.push(word.into_iter().collect());
                word = rest;
            }

            let sep = usize::from(line_len > 0);
            if line_len + sep + word.len() > width {
                out.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line_len += word.len();
            line.extend(word);
        }

        out.push(line);
    }

    out
}

/// Place every message on pages, label first, with a gap after each message.
pub fn layout_history(messages: &[Message], layout: &PageLayout) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut y = layout.top_margin;

    for msg in messages {
        let text = format!("{}{}", layout.label(msg.role), msg.content);
        for line in wrap_text(&text, layout.wrap_width) {
            if y > layout.page_height {
                pages.push(Page::default());
                y = layout.top_margin;
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine { y, text: line });
            }
            y = y.saturating_add(layout.line_height);
        }
        y = y.saturating_add(layout.message_gap);
    }

    pages
}

/// Renders laid-out pages to a file.
pub trait DocumentWriter {
    fn write(&self, pages: &[Page], path: &Path) -> Result<(), PlatformError>;
}

/// Plain-text rendering: one text line per placed line, pages separated by
/// a form feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDocumentWriter;

impl TextDocumentWriter {
    pub fn render(pages: &[Page]) -> String {
        pages
            .iter()
            .map(|page| {
                page.lines
                    .iter()
                    .map(|line| line.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\u{000C}\n")
    }
}

impl DocumentWriter for TextDocumentWriter {
    fn write(&self, pages: &[Page], path: &Path) -> Result<(), PlatformError> {
        write_file(path, Self::render(pages).as_bytes())
    }
}

/// A4 PDF rendering. Layout units are millimetres measured down from the top
/// of the page.
#[derive(Debug, Clone, Copy)]
pub struct PdfDocumentWriter {
    pub left_margin: f32,
    pub font_size: f32,
}

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;

impl Default for PdfDocumentWriter {
    fn default() -> Self {
        Self {
            left_margin: 10.0,
            font_size: 11.0,
        }
    }
}

impl DocumentWriter for PdfDocumentWriter {
    fn write(&self, pages: &[Page], path: &Path) -> Result<(), PlatformError> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            "Chat history",
            Mm(A4_WIDTH_MM),
            Mm(A4_HEIGHT_MM),
            "text",
        );
        let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;

        let mut first = Some((first_page, first_layer));
        for page in pages {
            let (page_index, layer_index) = match first.take() {
                Some(indices) => indices,
                None => doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "text"),
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);
            for line in &page.lines {
                layer.use_text(
                    line.text.as_str(),
                    self.font_size,
                    Mm(self.left_margin),
                    Mm(A4_HEIGHT_MM - line.y as f32),
                    &font,
                );
            }
        }

        let bytes = doc.save_to_bytes().map_err(pdf_error)?;
        write_file(path, &bytes)
    }
}

fn pdf_error(e: impl std::fmt::Debug) -> PlatformError {
    PlatformError::ExportError(format!("pdf: {e:?}"))
}

/// Writer chosen by output extension: `.pdf` gets a PDF, anything else
/// plain text.
pub fn writer_for(path: &Path) -> Box<dyn DocumentWriter> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Box::new(PdfDocumentWriter::default())
    } else {
        Box::new(TextDocumentWriter)
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub messages: usize,
}

/// Lay out and write `messages`. Returns `None` when there is nothing to export.
pub fn export_history(
    messages: &[Message],
    layout: &PageLayout,
    writer: &dyn DocumentWriter,
    path: &Path,
) -> Result<Option<ExportSummary>, PlatformError> {
    if messages.is_empty() {
        return Ok(None);
    }

    let pages = layout_history(messages, layout);
    writer.write(&pages, path)?;

    info!(
        path = %path.display(),
        pages = pages.len(),
        messages = messages.len(),
        "exported history"
    );

    Ok(Some(ExportSummary {
        path: path.to_path_buf(),
        pages: pages.len(),
        messages: messages.len(),
    }))
}

/// Save a single reply as a text file.
pub fn save_text(text: &str, path: &Path) -> Result<(), PlatformError> {
    write_file(path, text.as_bytes())?;
    info!(path = %path.display(), "saved reply");
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), PlatformError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlatformError::ExportError(format!("{}: {e}", parent.display()))
            })?;
        }
    }
    std::fs::write(path, contents)
        .map_err(|e| PlatformError::ExportError(format!("{}: {e}", path.display())))
}
