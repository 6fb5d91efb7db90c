//! Turns a course unit's markup text into an ordered sequence of blocks.
//!
//! - [`parse_blocks`] recognizes headings, paragraphs, list items and quotes.
//!   It never fails: anything it does not understand becomes a paragraph that
//!   keeps the raw text.
//! - [`Sanitizer`] strips ornament and emoji glyphs the PDF fonts cannot show,
//!   leaving letters, digits and punctuation untouched.

mod block;
mod parser;
mod sanitize;

pub use block::{BlockKind, BlockNode};
pub use parser::parse_blocks;
pub use sanitize::{is_ornament, RuleTableError, SanitizeRule, Sanitizer, DEFAULT_RULES};
