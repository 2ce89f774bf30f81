//! Loading local documents for review.
//!
//! Plain text and PDF become text payloads (capped at 100KB); PNG and
//! JPEG images are base64-encoded for inline upload so the model can OCR
//! them. Everything else is rejected up front, before any network call.

use std::path::Path;

use base64::Engine;

use crate::error::AppError;

/// Maximum text payload length (100KB).
const MAX_TEXT_BYTES: usize = 100_000;

/// Supported document kinds, detected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    PlainText,
    Pdf,
    Png,
    Jpeg,
    Unsupported,
}

/// Detect the document kind from the file extension.
pub fn detect_kind(path: &Path) -> DocKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "txt" => DocKind::PlainText,
        "pdf" => DocKind::Pdf,
        "png" => DocKind::Png,
        "jpg" | "jpeg" => DocKind::Jpeg,
        _ => DocKind::Unsupported,
    }
}

pub fn is_supported(path: &Path) -> bool {
    !matches!(detect_kind(path), DocKind::Unsupported)
}

/// A document ready to send to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentInput {
    Text {
        name: String,
        content: String,
    },
    Image {
        name: String,
        mime_type: String,
        data: String,
    },
}

impl DocumentInput {
    pub fn name(&self) -> &str {
        match self {
            DocumentInput::Text { name, .. } => name,
            DocumentInput::Image { name, .. } => name,
        }
    }
}

/// Load a document from disk into a reviewable payload.
pub fn load_document(path: &Path) -> Result<DocumentInput, AppError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();

    match detect_kind(path) {
        DocKind::PlainText => {
            let content = read_text(path)?;
            Ok(DocumentInput::Text {
                name,
                content: truncate_text(&content, MAX_TEXT_BYTES),
            })
        }
        DocKind::Pdf => {
            let content = extract_pdf(path)?;
            Ok(DocumentInput::Text {
                name,
                content: truncate_text(&content, MAX_TEXT_BYTES),
            })
        }
        DocKind::Png => load_image(path, name, "image/png"),
        DocKind::Jpeg => load_image(path, name, "image/jpeg"),
        DocKind::Unsupported => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown");
            Err(AppError::UnsupportedInput(format!(
                "Unsupported file type: .{}",
                ext
            )))
        }
    }
}

fn read_failed(e: std::io::Error) -> AppError {
    AppError::Internal(format!("Failed to read the file: {}", e))
}

fn read_text(path: &Path) -> Result<String, AppError> {
    // Try UTF-8, fall back to lossy conversion
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(s),
        Err(_) => {
            let bytes = std::fs::read(path).map_err(read_failed)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn extract_pdf(path: &Path) -> Result<String, AppError> {
    // pdf-extract panics on some malformed PDFs; keep the panic contained.
    let path_buf = path.to_path_buf();
    let result = std::panic::catch_unwind(move || pdf_extract::extract_text_by_pages(&path_buf));

    match result {
        Ok(Ok(pages)) => Ok(pages.join("\n")),
        Ok(Err(e)) => Err(AppError::Internal(format!(
            "Failed to process PDF file: {}",
            e
        ))),
        Err(_) => Err(AppError::Internal(
            "Failed to process PDF file: extraction panicked".to_string(),
        )),
    }
}

fn load_image(path: &Path, name: String, mime_type: &str) -> Result<DocumentInput, AppError> {
    let bytes = std::fs::read(path).map_err(read_failed)?;
    let data = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(DocumentInput::Image {
        name,
        mime_type: mime_type.to_string(),
        data,
    })
}

/// Truncate text at a safe UTF-8 boundary.
fn truncate_text(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }

    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut result = text[..end].to_string();
    result.push_str("\n\n[... content truncated at 100KB ...]");
    result
}
