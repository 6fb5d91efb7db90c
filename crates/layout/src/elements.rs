use crate::fonts::BaseFont;
use coursedoc_types::Color;
use std::sync::Arc;

/// Paint attributes shared by the elements of one block.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawStyle {
    pub font: BaseFont,
    pub font_size: f32,
    pub color: Color,
}

/// An element placed on a page. Coordinates are in points from the top-left
/// corner of the page.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
    pub style: Arc<DrawStyle>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
}

/// A single line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub content: String,
    /// Extra width added to each space character.
    pub word_spacing: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectElement {
    pub fill: Color,
}

impl PositionedElement {
    pub fn text(&self) -> Option<&str> {
        match &self.element {
            LayoutElement::Text(t) => Some(&t.content),
            LayoutElement::Rectangle(_) => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height, self.style.font_size]
            .iter()
            .all(|v| v.is_finite())
    }
}
