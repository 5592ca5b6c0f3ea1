//! Image OCR via the `tesseract` executable.
//!
//! The whole image is recognized in one pass: no region selection, no
//! deskew, no confidence thresholding. Recognition quality is delegated
//! entirely to the OCR engine. The image bytes are written to a temporary
//! file that is removed when the call returns.

use std::process::Command;

use tracing::warn;

use super::DocumentFormat;
use crate::types::{AppError, AppResult};

pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> AppResult<String> {
    let suffix = match format {
        DocumentFormat::Jpeg => ".jpg",
        DocumentFormat::Png => ".png",
        other => {
            return Err(AppError::Extraction(format!(
                "not an image format: {}",
                other
            )))
        }
    };

    let image_file = tempfile::Builder::new()
        .prefix("documind-ocr-")
        .suffix(suffix)
        .tempfile()
        .map_err(|e| AppError::Extraction(format!("failed to create temp image: {}", e)))?;
    std::fs::write(image_file.path(), bytes)
        .map_err(|e| AppError::Extraction(format!("failed to write temp image: {}", e)))?;

    let output = Command::new("tesseract")
        .arg(image_file.path())
        .arg("stdout")
        .output()
        .map_err(|e| AppError::Extraction(format!("failed to run tesseract: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(status = ?output.status, "tesseract exited with an error");
        return Err(AppError::Extraction(format!(
            "tesseract failed: {}",
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
