//! PDF text extraction via `lopdf`.
//!
//! Every page's text is appended in page order with no inserted separator,
//! so adjacent pages' text may run together. That is a reproducible quirk
//! of the pipeline, kept on purpose.

use lopdf::Document;

use crate::types::{AppError, AppResult};

pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("failed to load PDF: {}", e)))?;

    let mut text = String::new();
    // get_pages returns a BTreeMap keyed by page number, so iteration is
    // already in page order.
    for (page_number, _object_id) in doc.get_pages() {
        let page_text = doc.extract_text(&[page_number]).map_err(|e| {
            AppError::Extraction(format!("failed to extract page {}: {}", page_number, e))
        })?;
        text.push_str(&page_text);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a minimal PDF with one line of text per page.
    fn pdf_with_pages(page_texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page_text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 48.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*page_text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode page content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).expect("serialize PDF");
        buffer
    }

    #[test]
    fn test_pages_concatenate_in_order_without_separator() {
        let bytes = pdf_with_pages(&["A", "B", "C"]);
        let text = extract_text(&bytes).unwrap();

        // The extractor inserts nothing between pages; any whitespace in the
        // output comes from the PDF text decoder itself.
        let glyphs: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(glyphs, "ABC");
    }

    #[test]
    fn test_malformed_bytes_fail_as_extraction_error() {
        let err = extract_text(b"%PDF-garbage").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
