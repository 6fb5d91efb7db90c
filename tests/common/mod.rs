#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use coursedoc::{DocumentPipeline, DocumentRequest, PipelineBuilder, RenderedDocument};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, 1-based
    pub fn page_text(&self, page_number: u32) -> String {
        self.doc.extract_text(&[page_number]).unwrap_or_default()
    }

    pub fn text(&self) -> String {
        pdf_assertions::extract_text(&self.doc)
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// A pipeline that leaves the timestamp out, so output bytes are reproducible.
pub fn deterministic_pipeline() -> DocumentPipeline {
    PipelineBuilder::new().with_timestamp(false).build()
}

/// Render with the deterministic pipeline, failing the test if the styled
/// path did not succeed.
pub fn render_styled(
    title: &str,
    unit_label: &str,
    body: &str,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let request = DocumentRequest::new(title, unit_label, body);
    match deterministic_pipeline().render(&request) {
        RenderedDocument::Styled(bytes) => GeneratedPdf::from_bytes(bytes),
        RenderedDocument::Degraded { reason, .. } => {
            Err(format!("expected styled output, degraded because: {reason}").into())
        }
    }
}

/// Render through the public entry point, whatever path it takes.
pub fn render_any(
    title: &str,
    unit_label: &str,
    body: &str,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    GeneratedPdf::from_bytes(coursedoc::render_unit_document(title, unit_label, body))
}
