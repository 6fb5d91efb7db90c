//! Helpers that turn laid-out pages and headings into `lopdf` objects.
//! Shared by the streaming renderer; kept free of writer state where possible.

use crate::writer::StreamingPdfWriter;
use coursedoc_layout::{BaseFont, LayoutElement, PositionedElement, RectElement, TextElement};
use coursedoc_render_core::utils::{encode_win_ansi, flip_y};
use coursedoc_render_core::{DocumentMetadata, RenderError};
use coursedoc_types::{Color, OutlineEntry};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, StringFormat};
use std::collections::HashMap;
use std::io::{Seek, Write};

/// Distance from the top of a text line's box to its baseline, as a fraction
/// of the font size.
const BASELINE_RATIO: f32 = 0.8;

/// The `/Font` resource dictionary registering both Helvetica faces.
pub fn font_dictionary() -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in BaseFont::all() {
        fonts.set(
            font.resource_name(),
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            },
        );
    }
    fonts
}

/// Encodes a string for use outside content streams (outline titles, document
/// info). Printable ASCII is written as a literal, anything else as UTF-16BE
/// with a byte order mark.
pub fn pdf_text_string(text: &str) -> Object {
    if text.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// The document information dictionary.
pub fn info_dictionary(metadata: &DocumentMetadata) -> Dictionary {
    let mut info = dictionary! {
        "Title" => pdf_text_string(&metadata.title),
        "Subject" => pdf_text_string(&metadata.subject),
        "Producer" => pdf_text_string(&metadata.producer),
    };
    if let Some(date) = metadata.pdf_creation_date() {
        info.set("CreationDate", Object::string_literal(date));
    }
    info
}

/// Builds the content stream for one page.
///
/// Fails with [`RenderError::UnencodableGlyph`] when a line contains a
/// character outside WinAnsiEncoding.
pub fn render_elements_to_content(
    elements: &[PositionedElement],
    page_height: f32,
) -> Result<Content, RenderError> {
    let mut page_ctx = PageContext::new(page_height);
    for el in elements {
        page_ctx.draw_element(el)?;
    }
    Ok(page_ctx.finish())
}

struct PageContext {
    page_height: f32,
    content: Content,
    state: PageRenderState,
}

/// Graphics state already emitted into the stream, so repeated values are
/// not written again.
#[derive(Default)]
struct PageRenderState {
    font: Option<(BaseFont, f32)>,
    fill_color: Option<Color>,
    word_spacing: f32,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Rectangle(rect) => {
                self.draw_rect(rect, el);
                Ok(())
            }
        }
    }

    fn draw_rect(&mut self, rect: &RectElement, el: &PositionedElement) {
        if el.width <= 0.0 || el.height <= 0.0 {
            return;
        }
        self.set_fill_color(&rect.fill);
        let y = flip_y(el.y + el.height, self.page_height);
        self.push("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
        self.push("f", vec![]);
    }

    fn set_font(&mut self, font: BaseFont, size: f32) {
        if self.state.font != Some((font, size)) {
            self.push(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((font, size));
        }
    }

    fn set_fill_color(&mut self, color: &Color) {
        if self.state.fill_color.as_ref() != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color.clone());
        }
    }

    fn set_word_spacing(&mut self, spacing: f32) {
        if (self.state.word_spacing - spacing).abs() > f32::EPSILON {
            self.push("Tw", vec![spacing.into()]);
            self.state.word_spacing = spacing;
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) -> Result<(), RenderError> {
        if text.content.trim().is_empty() {
            return Ok(());
        }
        let encoded = encode_win_ansi(&text.content)?;
        self.push("BT", vec![]);
        self.set_font(el.style.font, el.style.font_size);
        self.set_fill_color(&el.style.color);
        self.set_word_spacing(text.word_spacing);
        let baseline_y = el.y + el.style.font_size * BASELINE_RATIO;
        let pdf_y = flip_y(baseline_y, self.page_height);
        self.push("Td", vec![el.x.into(), pdf_y.into()]);
        self.push("Tj", vec![Object::String(encoded, StringFormat::Literal)]);
        self.push("ET", vec![]);
        Ok(())
    }
}

struct OutlineNode {
    id: ObjectId,
    title: String,
    dest: Vec<Object>,
    children: Vec<OutlineNode>,
}

/// Buffers the outline (bookmark) tree for `entries` and returns the id of
/// its root dictionary, or `None` if there is nothing to show.
///
/// Entries nest by heading level: an H3 directly after an H1 becomes the H1's
/// child. Entries pointing at pages that do not exist are skipped.
pub fn build_outlines<W: Write + Seek>(
    writer: &mut StreamingPdfWriter<W>,
    entries: &[OutlineEntry],
    page_ids: &[ObjectId],
    page_height: f32,
) -> Option<ObjectId> {
    struct FlatItem {
        id: ObjectId,
        title: String,
        dest: Vec<Object>,
        parent_idx: Option<usize>,
    }

    let mut flat_list: Vec<FlatItem> = Vec::new();
    // (level, index into flat_list)
    let mut level_stack: Vec<(u8, usize)> = Vec::new();

    for entry in entries {
        let Some(&page_id) = page_ids.get(entry.page_index) else {
            log::warn!(
                "Outline entry {:?} points at missing page {}",
                entry.text,
                entry.page_index
            );
            continue;
        };
        let y_dest = flip_y(entry.y, page_height);
        let dest = vec![Object::Reference(page_id), "FitH".into(), y_dest.into()];

        while level_stack
            .last()
            .is_some_and(|(level, _)| *level >= entry.level)
        {
            level_stack.pop();
        }
        let parent_idx = level_stack.last().map(|(_, idx)| *idx);
        let new_idx = flat_list.len();
        flat_list.push(FlatItem {
            id: writer.new_object_id(),
            title: entry.text.clone(),
            dest,
            parent_idx,
        });
        level_stack.push((entry.level, new_idx));
    }

    let mut children_map: HashMap<usize, Vec<OutlineNode>> = HashMap::new();
    let mut root_items = Vec::new();
    for (i, flat) in flat_list.into_iter().enumerate().rev() {
        let mut children = children_map.remove(&i).unwrap_or_default();
        children.reverse();
        let node = OutlineNode {
            id: flat.id,
            title: flat.title,
            dest: flat.dest,
            children,
        };
        match flat.parent_idx {
            Some(parent_idx) => children_map.entry(parent_idx).or_default().push(node),
            None => root_items.push(node),
        }
    }
    root_items.reverse();

    let (first, last) = (root_items.first()?.id, root_items.last()?.id);
    let outline_root_id = writer.new_object_id();
    writer.buffer_object_at_id(
        outline_root_id,
        dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => root_items.len() as i64,
        }
        .into(),
    );
    buffer_outline_level(&root_items, outline_root_id, writer);
    Some(outline_root_id)
}

fn buffer_outline_level<W: Write + Seek>(
    items: &[OutlineNode],
    parent_id: ObjectId,
    writer: &mut StreamingPdfWriter<W>,
) {
    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => pdf_text_string(&item.title),
            "Parent" => parent_id,
            "Dest" => item.dest.clone(),
        };
        if i > 0 {
            dict.set("Prev", items[i - 1].id);
        }
        if let Some(next) = items.get(i + 1) {
            dict.set("Next", next.id);
        }
        if let (Some(first), Some(last)) = (item.children.first(), item.children.last()) {
            dict.set("First", first.id);
            dict.set("Last", last.id);
            dict.set("Count", -(item.children.len() as i64));
            buffer_outline_level(&item.children, item.id, writer);
        }
        writer.buffer_object_at_id(item.id, dict.into());
    }
}
