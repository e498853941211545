pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use orcas_report::{FontCache, ReportDocumentInput, ReportEngine, ReportError};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text shown on each page, in drawing order.
    pub fn page_texts(&self) -> Vec<Vec<String>> {
        pdf_assertions::page_texts(&self.doc)
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// An engine over the bundled assets with its own font cache.
pub fn test_engine() -> ReportEngine {
    ReportEngine::builder()
        .with_font_cache(Arc::new(FontCache::new()))
        .build()
}

/// Builds `input` with a fresh engine and parses the result.
pub fn generate_report(input: &ReportDocumentInput) -> Result<GeneratedPdf, ReportError> {
    let bytes = tokio::runtime::Runtime::new()?.block_on(test_engine().build_report_bytes(input))?;
    GeneratedPdf::from_bytes(bytes).map_err(|e| ReportError::InvalidInput(e.to_string()))
}
