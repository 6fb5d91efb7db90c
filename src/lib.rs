//! Renders course unit summaries to downloadable PDF documents.
//!
//! The body of a unit is written in a small markup language (headings, lists,
//! quotes, paragraphs). It is parsed into blocks, stripped of glyphs the base
//! fonts cannot draw, styled from a [`StyleTable`](coursedoc_style::StyleTable),
//! laid out on pages after a title page, and encoded as PDF.
//!
//! ```ignore
//! let bytes = coursedoc::render_unit_document("Statistics", "Unit 4", "# Sampling\n\nText.");
//! assert!(bytes.starts_with(b"%PDF-"));
//! ```
//!
//! Rendering never fails from the caller's point of view: when the styled
//! output cannot be produced, a plain version of the same text is returned.

pub mod batch;
pub mod config;
pub mod error;
pub mod pipeline;

pub use batch::render_unit_documents;
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{DocumentPipeline, DocumentRequest, PipelineBuilder, RenderedDocument};

pub use coursedoc_layout::{ComposedDocument, ComposerConfig};
pub use coursedoc_markup::{BlockKind, BlockNode};
pub use coursedoc_style::{PageLayout, StyleTable};

use once_cell::sync::Lazy;

/// MIME type to declare when serving the output.
pub const PDF_MIME_TYPE: &str = "application/pdf";

static DEFAULT_PIPELINE: Lazy<DocumentPipeline> = Lazy::new(DocumentPipeline::default);

/// Renders one unit with the default configuration. Always returns a complete
/// PDF.
pub fn render_unit_document(title: &str, unit_label: &str, body_markup: &str) -> Vec<u8> {
    DEFAULT_PIPELINE
        .render(&DocumentRequest::new(title, unit_label, body_markup))
        .into_bytes()
}

/// The download name for a unit: `<CourseArea>_Unit_<N>.pdf`.
///
/// The course area is reduced to ASCII letters and digits, each word
/// capitalised and joined, so `"data science"` becomes `DataScience`.
pub fn download_filename(course_area: &str, unit_number: u32) -> String {
    let area: String = course_area
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        })
        .collect();
    let area = if area.is_empty() { "Course".to_string() } else { area };
    format!("{area}_Unit_{unit_number}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_camel_cased() {
        assert_eq!(download_filename("data science", 3), "DataScience_Unit_3.pdf");
        assert_eq!(download_filename("Web-Dev 101", 12), "WebDev101_Unit_12.pdf");
        assert_eq!(download_filename("  ", 1), "Course_Unit_1.pdf");
    }

    #[test]
    fn default_entry_point_returns_a_pdf() {
        let bytes = render_unit_document("Course X", "Unit 1", "");
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(PDF_MIME_TYPE, "application/pdf");
    }
}
