//! DOCX text extraction via `docx-rust`.
//!
//! Walks the document body and appends the text of every run in every
//! paragraph, in document order, with no inserted separator.

use std::io::Cursor;

use docx_rust::document::{BodyContent, ParagraphContent, RunContent};
use docx_rust::DocxFile;

use crate::types::{AppError, AppResult};

pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    let file = DocxFile::from_reader(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("failed to open DOCX: {:?}", e)))?;
    let docx = file
        .parse()
        .map_err(|e| AppError::Extraction(format!("failed to parse DOCX: {:?}", e)))?;

    let mut text = String::new();
    for body_content in &docx.document.body.content {
        if let BodyContent::Paragraph(paragraph) = body_content {
            for paragraph_content in &paragraph.content {
                if let ParagraphContent::Run(run) = paragraph_content {
                    for run_content in &run.content {
                        if let RunContent::Text(t) = run_content {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
        }
    }
    Ok(text)
}
