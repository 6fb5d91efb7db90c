//! Style resolution and page composition for course unit documents.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Page of {width:.2}x{height:.2}pt leaves no room for content after margins.")]
    DegenerateGeometry { width: f32, height: f32 },
}

pub mod composer;
pub mod config;
pub mod elements;
pub mod fonts;
pub mod output;
pub mod pagination;
pub mod resolve;
pub mod text;

pub use self::composer::PageComposer;
pub use self::config::ComposerConfig;
pub use self::elements::{DrawStyle, LayoutElement, PositionedElement, RectElement, TextElement};
pub use self::fonts::BaseFont;
pub use self::output::{ComposedDocument, Page};
pub use self::resolve::{resolve, resolve_all, Decoration, StyledBlock};
