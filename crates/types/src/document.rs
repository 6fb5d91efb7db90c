use serde::{Deserialize, Serialize};

/// The semantic kind of a parsed markup block.
///
/// New kinds may be added; anything that does not have a style of its own is
/// rendered with the paragraph style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    ListItem,
    Quote,
}

impl BlockKind {
    /// Heading level for heading kinds, `None` otherwise.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            _ => None,
        }
    }

    /// Maps a marker count to a heading kind; levels past three clamp to `Heading3`.
    pub fn heading(level: usize) -> Self {
        match level {
            0 | 1 => BlockKind::Heading1,
            2 => BlockKind::Heading2,
            _ => BlockKind::Heading3,
        }
    }

    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }
}

/// A heading recorded during composition, used to build the PDF outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    /// Heading level (1 = top level).
    pub level: u8,
    /// The heading text as it appears on the page.
    pub text: String,
    /// Zero-based index of the page the heading starts on.
    pub page_index: usize,
    /// Distance from the top edge of the page to the heading, in points.
    pub y: f32,
}
