//! Resolution of block kinds to concrete, fully-populated styles.

use crate::fonts::BaseFont;
use coursedoc_markup::{BlockKind, BlockNode};
use coursedoc_style::{Border, FontWeight, ListStyleType, StyleTable, TextAlign};
use coursedoc_types::Color;

const DEFAULT_FONT_SIZE: f32 = 11.0;
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Visual offset drawn behind a block, used for quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub bar: Option<Border>,
    pub background: Option<Color>,
}

/// A block together with every style value layout needs.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledBlock {
    pub block: BlockNode,
    pub font_size: f32,
    pub is_bold: bool,
    pub color: Color,
    pub alignment: TextAlign,
    pub spacing_before: f32,
    pub spacing_after: f32,
    pub left_indent: f32,
    pub right_indent: f32,
    pub line_height: f32,
    /// List marker drawn in front of the first line.
    pub prefix: String,
    pub decoration: Option<Decoration>,
}

impl StyledBlock {
    pub fn kind(&self) -> BlockKind {
        self.block.kind
    }

    pub fn text(&self) -> &str {
        &self.block.text
    }

    pub fn font(&self) -> BaseFont {
        BaseFont::for_weight(self.is_bold)
    }
}

fn positive_or(value: Option<f32>, default: f32) -> f32 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}

fn non_negative(value: Option<f32>) -> f32 {
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}

/// Looks up the style for `block` and fills in every unset attribute.
///
/// Never fails: kinds without an entry use the paragraph style, and
/// out-of-range lengths from a hand-written table fall back to defaults.
pub fn resolve(block: BlockNode, table: &StyleTable) -> StyledBlock {
    let style = table.get(block.kind);
    let font_size = positive_or(style.font_size, DEFAULT_FONT_SIZE);
    let line_height = positive_or(style.line_height, font_size * LINE_HEIGHT_FACTOR);

    let mut left_indent = non_negative(style.indent_left);
    let mut prefix = String::new();
    if block.kind == BlockKind::ListItem {
        left_indent += non_negative(Some(table.list_indent_step)) * (block.depth as f32 + 1.0);
        prefix = match style.list_style_type.unwrap_or_default() {
            ListStyleType::None => String::new(),
            _ if block.ordinal.is_some() => ListStyleType::Decimal.marker(block.ordinal),
            marker => marker.marker(None),
        };
    }

    let bar = style.border_left.clone().filter(Border::is_visible);
    let decoration = if bar.is_some() || style.background_color.is_some() {
        Some(Decoration {
            bar,
            background: style.background_color.clone(),
        })
    } else {
        None
    };

    StyledBlock {
        font_size,
        is_bold: style.font_weight.unwrap_or(FontWeight::Regular).is_bold(),
        color: style.color.clone().unwrap_or_default(),
        alignment: style.text_align.unwrap_or_default(),
        spacing_before: non_negative(style.spacing_before),
        spacing_after: non_negative(style.spacing_after),
        left_indent,
        right_indent: non_negative(style.indent_right),
        line_height,
        prefix,
        decoration,
        block,
    }
}

pub fn resolve_all(blocks: Vec<BlockNode>, table: &StyleTable) -> Vec<StyledBlock> {
    blocks
        .into_iter()
        .map(|block| resolve(block, table))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursedoc_style::BlockStyle;

    #[test]
    fn headings_follow_the_table() {
        let table = StyleTable::default();
        let h1 = resolve(BlockNode::heading(1, "Basics"), &table);
        assert_eq!(h1.font_size, 24.0);
        assert!(h1.is_bold);
        assert_eq!(h1.alignment, TextAlign::Center);
        assert_eq!(h1.font(), BaseFont::HelveticaBold);

        let h3 = resolve(BlockNode::heading(3, "Detail"), &table);
        assert_eq!(h3.font_size, 14.0);
        assert_eq!(h3.alignment, TextAlign::Left);
        assert!((h3.line_height - 14.0 * 1.2).abs() < 1e-4);
    }

    #[test]
    fn paragraph_is_regular_justified() {
        let p = resolve(BlockNode::paragraph("Hello"), &StyleTable::default());
        assert_eq!(p.font_size, 11.0);
        assert!(!p.is_bold);
        assert_eq!(p.alignment, TextAlign::Justify);
        assert!(p.prefix.is_empty());
        assert!(p.decoration.is_none());
    }

    #[test]
    fn list_indent_grows_with_depth() {
        let table = StyleTable::default();
        let top = resolve(BlockNode::list_item("a", None, 0), &table);
        let nested = resolve(BlockNode::list_item("b", None, 2), &table);
        assert_eq!(top.left_indent, 18.0);
        assert_eq!(nested.left_indent, 54.0);
        assert_eq!(top.prefix, "\u{2022} ");
    }

    #[test]
    fn ordered_items_use_their_number() {
        let item = resolve(BlockNode::list_item("step", Some(4), 0), &StyleTable::default());
        assert_eq!(item.prefix, "4. ");
    }

    #[test]
    fn quote_is_indented_on_both_sides_and_decorated() {
        let quote = resolve(BlockNode::quote("wise words"), &StyleTable::default());
        assert_eq!(quote.left_indent, quote.right_indent);
        assert!(quote.left_indent > 0.0);
        let decoration = quote.decoration.expect("quote decoration");
        assert_eq!(decoration.bar.map(|b| b.width), Some(3.0));
        assert!(decoration.background.is_some());
    }

    #[test]
    fn missing_entries_degrade_to_paragraph_style() {
        let mut table = StyleTable::default();
        table.styles.remove(&BlockKind::Quote);
        let quote = resolve(BlockNode::quote("q"), &table);
        let para = resolve(BlockNode::paragraph("q"), &table);
        assert_eq!(quote.font_size, para.font_size);
        assert_eq!(quote.alignment, para.alignment);

        table.styles.clear();
        let bare = resolve(BlockNode::heading(1, "t"), &table);
        assert_eq!(bare.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(bare.color, Color::default());
    }

    #[test]
    fn nonsense_lengths_fall_back() {
        let table = StyleTable::default().with_style(
            BlockKind::Paragraph,
            BlockStyle {
                font_size: Some(-3.0),
                line_height: Some(f32::NAN),
                spacing_after: Some(-1.0),
                ..Default::default()
            },
        );
        let p = resolve(BlockNode::paragraph("x"), &table);
        assert_eq!(p.font_size, DEFAULT_FONT_SIZE);
        assert!((p.line_height - DEFAULT_FONT_SIZE * 1.2).abs() < 1e-4);
        assert_eq!(p.spacing_after, 0.0);
    }

    #[test]
    fn resolution_is_pure() {
        let table = StyleTable::default();
        let block = BlockNode::list_item("same", Some(2), 1);
        assert_eq!(resolve(block.clone(), &table), resolve(block, &table));
    }
}
