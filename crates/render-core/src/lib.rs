//! Core rendering abstractions for PDF generation.
//!
//! This crate provides the fundamental traits and types used by PDF rendering backends:
//! - `DocumentRenderer` trait for abstracting PDF writing operations
//! - `render_document`, which drives a renderer over a composed page tree
//! - Error types for rendering operations
//! - WinAnsi text encoding and coordinate helpers

mod error;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use traits::{render_document, DocumentRenderer};
pub use types::DocumentMetadata;
