//! Document kind resolution and plain-text extraction.
//!
//! The declared kind is resolved once from the file extension; each format
//! sits behind the same `TextExtractor` interface so a strategy can be
//! swapped without touching the parser or scorer.

use std::path::Path;

use crate::screening::ScreeningError;

/// Declared kind of an uploaded document, resolved from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    Unsupported,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => DocumentKind::Pdf,
            "docx" | "doc" => DocumentKind::Word,
            _ => DocumentKind::Unsupported,
        }
    }
}

/// Extraction strategy for one document format.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ScreeningError>;
}

/// PDF strategy: page text concatenated in page order.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ScreeningError> {
        let text = pdf_extract::extract_text(path)
            .map_err(|e| ScreeningError::Extraction(e.to_string()))?;
        Ok(text.trim().to_string())
    }
}

/// Word strategy: textual body of a .docx, one line per paragraph.
/// Legacy .doc binaries fail the OOXML read and surface as `Extraction`.
pub struct WordExtractor;

impl TextExtractor for WordExtractor {
    fn extract(&self, path: &Path) -> Result<String, ScreeningError> {
        let bytes =
            std::fs::read(path).map_err(|e| ScreeningError::Extraction(e.to_string()))?;
        let docx = docx_rs::read_docx(&bytes)
            .map_err(|e| ScreeningError::Extraction(e.to_string()))?;

        let mut text = String::new();
        for child in docx.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                for child in paragraph.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                text.push('\n');
            }
        }

        Ok(text.trim().to_string())
    }
}

/// Extracts the full plain text of a stored document, dispatching on its
/// declared kind. Read-only; deterministic for identical bytes.
pub fn extract_text(path: &Path) -> Result<String, ScreeningError> {
    match DocumentKind::from_path(path) {
        DocumentKind::Pdf => PdfExtractor.extract(path),
        DocumentKind::Word => WordExtractor.extract(path),
        DocumentKind::Unsupported => Err(ScreeningError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}
