//! The page tree produced by composition.

use crate::elements::PositionedElement;
use crate::resolve::StyledBlock;
use coursedoc_types::{OutlineEntry, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// One-based page number.
    pub number: usize,
    pub elements: Vec<PositionedElement>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Page {
            number,
            elements: Vec::new(),
        }
    }

    /// The text lines on this page in drawing order.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(PositionedElement::text)
    }
}

/// A fully laid-out document: the title page followed by the body pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedDocument {
    pub title: String,
    pub subject: String,
    pub page_size: Size,
    pub pages: Vec<Page>,
    /// The styled blocks that were laid out, in source order.
    pub blocks: Vec<StyledBlock>,
    pub outline: Vec<OutlineEntry>,
}

impl ComposedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages after the title page.
    pub fn body_page_count(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }

    pub fn element_count(&self) -> usize {
        self.pages.iter().map(|p| p.elements.len()).sum()
    }
}
