use crate::error::{Error, Result};
use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};
use std::fmt;
use std::path::Path;
use tokio::fs;

/// Document formats the upload path can turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Txt,
}

impl FileKind {
    /// Accepts `pdf`, `.PDF`, `docx`, `txt`, ...
    pub fn from_extension(ext: &str) -> Result<Self> {
        let normalized = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            _ => Err(Error::UnsupportedFileType(if normalized.is_empty() {
                "(no extension)".to_string()
            } else {
                format!(".{}", normalized)
            })),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

pub async fn extract_text(path: &Path, kind: FileKind) -> Result<String> {
    tracing::debug!(path = %path.display(), %kind, "Extracting text");

    let text = match kind {
        FileKind::Txt => fs::read_to_string(path).await?,
        FileKind::Pdf => {
            let data = fs::read(path).await?;
            decode_blocking(move || pdf_to_text(&data)).await?
        }
        FileKind::Docx => {
            let data = fs::read(path).await?;
            decode_blocking(move || docx_to_text(&data)).await?
        }
    };

    tracing::debug!(chars = text.len(), "Extracted text");
    Ok(text)
}

async fn decode_blocking<F>(decode: F) -> Result<String>
where
    F: FnOnce() -> Result<String> + Send + 'static,
{
    tokio::task::spawn_blocking(decode).await.map_err(|e| {
        // pdf-extract panics on some malformed documents
        if e.is_panic() {
            Error::ExtractionFailed("Decoder panicked on malformed document".into())
        } else {
            Error::Internal(format!("Decoder task failed: {}", e))
        }
    })?
}

pub fn pdf_to_text(data: &[u8]) -> Result<String> {
    if !data.starts_with(b"%PDF") {
        return Err(Error::ExtractionFailed("Invalid PDF file content".into()));
    }
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| Error::ExtractionFailed(format!("Failed to extract text from PDF: {}", e)))
}

pub fn docx_to_text(data: &[u8]) -> Result<String> {
    let docx = docx_rs::read_docx(data)
        .map_err(|e| Error::ExtractionFailed(format!("Failed to read DOCX: {:?}", e)))?;

    let mut text = String::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => push_paragraph(p, &mut text),
            DocumentChild::Table(table) => push_table(table, &mut text),
            _ => {}
        }
    }
    Ok(text)
}

/// Every paragraph, including those inside table cells, ends its own line.
fn push_paragraph(paragraph: &Paragraph, out: &mut String) {
    push_paragraph_children(&paragraph.children, out);
    out.push('\n');
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

#[allow(irrefutable_let_patterns)]
fn push_table(table: &Table, out: &mut String) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row else { continue };
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell else { continue };
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => push_paragraph(p, out),
                    TableCellContent::Table(nested) => push_table(nested, out),
                    _ => {}
                }
            }
        }
    }
}
