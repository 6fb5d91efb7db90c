pub mod color;
pub mod document;
pub mod geometry;

pub use color::Color;
pub use document::{BlockKind, OutlineEntry};
pub use geometry::{Rect, Size};
