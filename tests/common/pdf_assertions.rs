#![allow(dead_code)]

use lopdf::Document as LopdfDocument;
use lopdf::content::Content;
use lopdf::{ObjectId, Stream};
use orcas_layout::encoding::{decode_glyph_ids, parse_to_unicode_cmap};
use std::collections::HashMap;

/// Strings shown with `Tj` on every page, in page order, mapped back to text
/// through each page's ToUnicode CMap.
pub fn page_texts(doc: &LopdfDocument) -> Vec<Vec<String>> {
    doc.get_pages()
        .values()
        .map(|page_id| {
            let cmap = page_cmap(doc, *page_id);
            doc.get_page_content(*page_id)
                .ok()
                .and_then(|data| Content::decode(&data).ok())
                .map(|content| {
                    content
                        .operations
                        .iter()
                        .filter(|op| op.operator == "Tj")
                        .filter_map(|op| op.operands.first()?.as_str().ok())
                        .map(|bytes| {
                            decode_glyph_ids(bytes)
                                .iter()
                                .map(|gid| cmap.get(gid).map(String::as_str).unwrap_or("\u{FFFD}"))
                                .collect::<String>()
                        })
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect()
}

fn page_cmap(doc: &LopdfDocument, page_id: ObjectId) -> HashMap<u16, String> {
    doc.get_page_fonts(page_id)
        .ok()
        .and_then(|fonts| fonts.into_values().next())
        .and_then(|font| font.get(b"ToUnicode").and_then(|o| o.as_reference()).ok())
        .and_then(|id| doc.get_object(id).and_then(|o| o.as_stream()).ok())
        .map(|stream: &Stream| parse_to_unicode_cmap(&stream.decompressed_content().unwrap_or_else(|_| stream.content.clone())))
        .unwrap_or_default()
}

/// Number of image XObjects in the file.
pub fn image_count(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .is_ok_and(|name| name == b"Image")
        })
        .count()
}

/// Asserts that the PDF has the expected number of pages
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $expected:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $expected,
            "Expected {} pages, got {}",
            $expected,
            $pdf.page_count()
        );
    };
}

/// Asserts that some page shows exactly `$text`
#[macro_export]
macro_rules! assert_pdf_shows_text {
    ($pdf:expr, $text:expr) => {
        let texts = $pdf.page_texts();
        assert!(
            texts.iter().flatten().any(|t| t == $text),
            "Expected PDF to show '{}', got: {:?}",
            $text,
            texts
        );
    };
}
