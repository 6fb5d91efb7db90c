//! PDF encoding for composed coursedoc documents.
//!
//! [`LopdfRenderer`] streams styled pages through [`StreamingPdfWriter`];
//! [`PlainDocument`] is the separate, forgiving path used when styled output
//! cannot be produced.

mod helpers;
mod plain;
mod renderer;
mod writer;

pub use helpers::{build_outlines, font_dictionary, info_dictionary, pdf_text_string, render_elements_to_content};
pub use plain::{minimal_pdf, PlainDocument};
pub use renderer::{render_to_vec, LopdfRenderer};
pub use writer::StreamingPdfWriter;
