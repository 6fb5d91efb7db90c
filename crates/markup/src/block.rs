pub use coursedoc_types::BlockKind;

/// One semantic unit of parsed markup, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    pub text: String,
    /// The number of an ordered list item (`3.` → `Some(3)`).
    pub ordinal: Option<u32>,
    /// List nesting level; zero for top-level items and for every other kind.
    pub depth: usize,
}

impl BlockNode {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            ordinal: None,
            depth: 0,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph, text)
    }

    pub fn heading(level: usize, text: impl Into<String>) -> Self {
        Self::new(BlockKind::heading(level), text)
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Quote, text)
    }

    pub fn list_item(text: impl Into<String>, ordinal: Option<u32>, depth: usize) -> Self {
        Self {
            kind: BlockKind::ListItem,
            text: text.into(),
            ordinal,
            depth,
        }
    }
}
