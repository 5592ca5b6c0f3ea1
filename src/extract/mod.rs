//! Document text extraction
//!
//! Converts an uploaded file's raw bytes into plain text. Dispatch is purely
//! on the filename's final extension, lower-cased; no content sniffing. A
//! mismatched extension surfaces as a decode failure from the format-specific
//! extractor, not as an unsupported-format error.

pub mod docx;
pub mod image;
pub mod pdf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Jpeg,
    Png,
    Unknown,
}

impl DocumentFormat {
    /// Derive the format from the filename's final extension, case-insensitive.
    pub fn from_filename(filename: &str) -> Self {
        match final_extension(filename).as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            "jpg" | "jpeg" => DocumentFormat::Jpeg,
            "png" => DocumentFormat::Png,
            _ => DocumentFormat::Unknown,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Docx => write!(f, "docx"),
            DocumentFormat::Jpeg => write!(f, "jpeg"),
            DocumentFormat::Png => write!(f, "png"),
            DocumentFormat::Unknown => write!(f, "unknown"),
        }
    }
}

fn final_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// One uploaded file, owned by the single extraction call that processes it.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::from_filename(&self.filename)
    }
}

/// Extract plain text from an uploaded document.
///
/// An empty string is a valid result (e.g. a scanned blank page) and is
/// distinct from `UnsupportedFormat`, which only ever means the extension
/// is not one we handle.
pub fn extract(document: &UploadedDocument) -> AppResult<String> {
    let format = document.format();
    info!(
        filename = %document.filename,
        format = %format,
        size = document.bytes.len(),
        "Extracting document text"
    );

    match format {
        DocumentFormat::Pdf => pdf::extract_text(&document.bytes),
        DocumentFormat::Docx => docx::extract_text(&document.bytes),
        DocumentFormat::Jpeg | DocumentFormat::Png => image::extract_text(&document.bytes, format),
        DocumentFormat::Unknown => Err(AppError::UnsupportedFormat(final_extension(
            &document.filename,
        ))),
    }
}
