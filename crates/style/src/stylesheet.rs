//! The style table: read-only data mapping each block kind to its visual style.

use crate::border::Border;
use crate::font::FontWeight;
use crate::list::ListStyleType;
use crate::parsers::{deserialize_length, deserialize_opt_length};
use crate::text::TextAlign;
use coursedoc_types::{BlockKind, Color};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Style attributes for one block kind. Unset attributes take the resolver's
/// defaults.
#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_opt_length")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_opt_length")]
    pub line_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    // Spacing
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_opt_length")]
    pub spacing_before: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_opt_length")]
    pub spacing_after: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_opt_length")]
    pub indent_left: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_opt_length")]
    pub indent_right: Option<f32>,

    // Decoration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_left: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,

    // List Properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_style_type: Option<ListStyleType>,
}

/// Maps block kinds to styles. Lookups never fail: kinds without an entry use
/// the `Paragraph` entry, and a table without a `Paragraph` entry uses an
/// empty style.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleTable {
    #[serde(deserialize_with = "deserialize_styles_over_defaults")]
    pub styles: BTreeMap<BlockKind, Arc<BlockStyle>>,
    /// Extra left indent added for each list nesting level.
    #[serde(deserialize_with = "deserialize_length")]
    pub list_indent_step: f32,
}

static EMPTY_STYLE: Lazy<Arc<BlockStyle>> = Lazy::new(|| Arc::new(BlockStyle::default()));

/// Entries given in the input replace the built-in entry for that kind; kinds
/// the input does not mention keep their built-in style.
fn deserialize_styles_over_defaults<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<BlockKind, Arc<BlockStyle>>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<BlockKind, Arc<BlockStyle>>::deserialize(deserializer)?;
    let mut styles = StyleTable::default().styles;
    styles.extend(overrides);
    Ok(styles)
}

static DEFAULT_TABLE: Lazy<Arc<StyleTable>> = Lazy::new(|| Arc::new(StyleTable::default()));

impl StyleTable {
    /// The built-in table, shared by every request that does not bring its own.
    pub fn shared_default() -> Arc<StyleTable> {
        Arc::clone(&DEFAULT_TABLE)
    }

    /// Parses a table from JSON. Fields and block kinds left out keep their
    /// built-in values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, kind: BlockKind) -> &Arc<BlockStyle> {
        self.styles
            .get(&kind)
            .or_else(|| self.styles.get(&BlockKind::Paragraph))
            .unwrap_or(&EMPTY_STYLE)
    }

    pub fn with_style(mut self, kind: BlockKind, style: BlockStyle) -> Self {
        self.styles.insert(kind, Arc::new(style));
        self
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        let heading = |size: f32, align: TextAlign, before: f32, after: f32| BlockStyle {
            font_size: Some(size),
            font_weight: Some(FontWeight::Bold),
            text_align: Some(align),
            color: Some(Color::rgb(0x1f, 0x2d, 0x3d)),
            spacing_before: Some(before),
            spacing_after: Some(after),
            ..Default::default()
        };
        let body = BlockStyle {
            font_size: Some(11.0),
            font_weight: Some(FontWeight::Regular),
            line_height: Some(14.5),
            color: Some(Color::gray(0x22)),
            spacing_before: Some(0.0),
            spacing_after: Some(8.0),
            ..Default::default()
        };

        let mut styles = BTreeMap::new();
        styles.insert(
            BlockKind::Heading1,
            Arc::new(heading(24.0, TextAlign::Center, 0.0, 18.0)),
        );
        styles.insert(
            BlockKind::Heading2,
            Arc::new(heading(18.0, TextAlign::Left, 14.0, 8.0)),
        );
        styles.insert(
            BlockKind::Heading3,
            Arc::new(heading(14.0, TextAlign::Left, 10.0, 6.0)),
        );
        styles.insert(
            BlockKind::Paragraph,
            Arc::new(BlockStyle {
                text_align: Some(TextAlign::Justify),
                ..body.clone()
            }),
        );
        styles.insert(
            BlockKind::ListItem,
            Arc::new(BlockStyle {
                text_align: Some(TextAlign::Left),
                spacing_after: Some(4.0),
                list_style_type: Some(ListStyleType::Disc),
                ..body.clone()
            }),
        );
        styles.insert(
            BlockKind::Quote,
            Arc::new(BlockStyle {
                text_align: Some(TextAlign::Left),
                color: Some(Color::gray(0x44)),
                indent_left: Some(24.0),
                indent_right: Some(24.0),
                spacing_before: Some(4.0),
                spacing_after: Some(12.0),
                border_left: Some(Border::solid(3.0, Color::gray(0xbb))),
                background_color: Some(Color::gray(0xf2)),
                ..body
            }),
        );

        Self {
            styles,
            list_indent_step: 18.0,
        }
    }
}
