//! Flows styled blocks onto fixed-size pages with a running vertical cursor.
//!
//! The first page is a title page: the title and unit label are centered in
//! the content area above a branding footer. Body content always starts on a
//! fresh page. A closing disclaimer follows the last block, and body pages get
//! a "Page N of M" footer once the page count is known.

use crate::config::ComposerConfig;
use crate::elements::{DrawStyle, LayoutElement, PositionedElement, RectElement, TextElement};
use crate::fonts::BaseFont;
use crate::output::{ComposedDocument, Page};
use crate::pagination::check_child_fit;
use crate::resolve::{resolve, StyledBlock};
use crate::text::{place_line, wrap_text};
use crate::LayoutError;
use coursedoc_markup::BlockNode;
use coursedoc_style::{PageLayout, StyleTable, TextAlign};
use coursedoc_types::{Color, OutlineEntry, Rect, Size};
use std::sync::Arc;

const EPSILON: f32 = 0.01;
/// Padding between a quote's text and its tinted background.
const QUOTE_PAD: f32 = 6.0;
const TITLE_GAP: f32 = 12.0;
const DISCLAIMER_GAP: f32 = 24.0;
const FOOTER_LINE_FACTOR: f32 = 1.25;
const FOOTER_GRAY: Color = Color::gray(0x66);

#[derive(Debug, Clone, Copy)]
struct PageGeometry {
    size: Size,
    content: Rect,
}

impl PageGeometry {
    fn new(layout: &PageLayout) -> Result<Self, LayoutError> {
        let size = layout.page_size();
        let content = Rect::new(
            layout.margins.left,
            layout.margins.top,
            layout.content_width(),
            layout.content_height(),
        );
        let usable = size.width.is_finite()
            && size.height.is_finite()
            && content.is_finite()
            && content.width > 0.0
            && content.height > 0.0;
        if !usable {
            return Err(LayoutError::DegenerateGeometry {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self { size, content })
    }
}

/// Part of a decorated block that landed on one page.
#[derive(Debug, Clone, Copy)]
struct Segment {
    first_element: usize,
    top: f32,
}

struct LayoutState {
    geometry: PageGeometry,
    pages: Vec<Page>,
    /// Distance from the top of the content area.
    cursor_y: f32,
    /// Height at the bottom of the current page that flow may not use.
    bottom_reserve: f32,
    body_started: bool,
    outline: Vec<OutlineEntry>,
}

impl LayoutState {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::new(1)],
            cursor_y: 0.0,
            bottom_reserve: 0.0,
            body_started: false,
            outline: Vec::new(),
        }
    }

    fn bounds(&self) -> Rect {
        let content = self.geometry.content;
        Rect {
            height: (content.height - self.bottom_reserve).max(0.0),
            ..content
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor_y <= EPSILON
    }

    fn fits(&self, height: f32) -> bool {
        !check_child_fit(self.cursor_y, height, self.bounds()).should_break
    }

    fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page::new(number));
        self.cursor_y = 0.0;
        self.bottom_reserve = 0.0;
    }

    /// Body content never shares the title page.
    fn start_body(&mut self) {
        if !self.body_started {
            self.body_started = true;
            self.new_page();
        }
    }

    fn add_element(&mut self, element: PositionedElement) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn open_segment(&self) -> Segment {
        Segment {
            first_element: self.pages.last().map_or(0, |p| p.elements.len()),
            top: self.cursor_y,
        }
    }

    /// Inserts the decoration rectangles behind the lines placed since
    /// `segment` was opened.
    fn close_segment(&mut self, block: &StyledBlock, segment: Segment) {
        let Some(decoration) = &block.decoration else {
            return;
        };
        let height = self.cursor_y - segment.top;
        if height <= 0.0 {
            return;
        }
        let content = self.geometry.content;
        let (left_indent, right_indent) = fitted_indents(block, content.width);
        let x = content.x + left_indent - 2.0 * QUOTE_PAD;
        let right = content.x + content.width - right_indent + QUOTE_PAD;
        let y = content.y + segment.top - QUOTE_PAD / 2.0;
        let height = height + QUOTE_PAD;

        let mut rects = Vec::with_capacity(2);
        if let Some(background) = &decoration.background {
            rects.push(rectangle(x, y, right - x, height, background));
        }
        if let Some(bar) = &decoration.bar {
            rects.push(rectangle(x, y, bar.width, height, &bar.color));
        }
        if let Some(page) = self.pages.last_mut() {
            let at = segment.first_element.min(page.elements.len());
            page.elements.splice(at..at, rects);
        }
    }

    /// Places the lines of `block` below the cursor, breaking pages between
    /// lines. With `keep_with` set, the whole block plus that much extra
    /// height moves to a new page if it would not fit on this one.
    fn flow_block(&mut self, block: &StyledBlock, keep_with: Option<f32>) {
        let content = self.geometry.content;
        let font = block.font();
        let prefix_width = font.text_width(&block.prefix, block.font_size);
        let (left_indent, right_indent) = fitted_indents(block, content.width);
        let text_width =
            (content.width - left_indent - right_indent - prefix_width).max(block.font_size);
        let lines = wrap_text(block.text(), font, block.font_size, text_width);
        if lines.is_empty() {
            return;
        }

        if !self.at_page_top() {
            self.cursor_y += block.spacing_before;
        }
        if let Some(extra) = keep_with {
            let needed = lines.len() as f32 * block.line_height + extra;
            if !self.at_page_top() && !self.fits(needed) {
                self.new_page();
            }
        }

        let style = Arc::new(DrawStyle {
            font,
            font_size: block.font_size,
            color: block.color.clone(),
        });
        let text_x = content.x + left_indent + prefix_width;
        let mut segment = self.open_segment();

        for (i, line) in lines.iter().enumerate() {
            if !self.at_page_top() && !self.fits(block.line_height) {
                self.close_segment(block, segment);
                self.new_page();
                segment = self.open_segment();
            }
            let top = content.y + self.cursor_y;
            let text_y = top + (block.line_height - block.font_size) / 2.0;

            if i == 0 {
                if !block.prefix.is_empty() {
                    self.add_element(text_element(
                        content.x + left_indent,
                        text_y,
                        prefix_width,
                        block.prefix.clone(),
                        0.0,
                        &style,
                    ));
                }
                // Title page headings are not part of the outline.
                if let Some(level) = block.kind().heading_level()
                    && self.body_started
                {
                    self.outline.push(OutlineEntry {
                        level,
                        text: block.text().to_string(),
                        page_index: self.pages.len() - 1,
                        y: top,
                    });
                }
            }

            if !line.text.is_empty() {
                let placement = place_line(line, block.alignment, text_width);
                let spaces = line.text.matches(' ').count() as f32;
                self.add_element(text_element(
                    text_x + placement.x_offset,
                    text_y,
                    line.width + placement.word_spacing * spaces,
                    line.text.clone(),
                    placement.word_spacing,
                    &style,
                ));
            }
            self.cursor_y += block.line_height;
        }

        self.close_segment(block, segment);
        self.cursor_y += block.spacing_after;
    }
}

/// Left and right indents capped so deep nesting or an oversized style still
/// leaves at least a quarter of the content width for text.
fn fitted_indents(block: &StyledBlock, content_width: f32) -> (f32, f32) {
    (
        block.left_indent.min(content_width / 2.0),
        block.right_indent.min(content_width / 4.0),
    )
}

fn text_element(
    x: f32,
    y: f32,
    width: f32,
    content: String,
    word_spacing: f32,
    style: &Arc<DrawStyle>,
) -> PositionedElement {
    PositionedElement {
        x,
        y,
        width,
        height: style.font_size,
        element: LayoutElement::Text(TextElement {
            content,
            word_spacing,
        }),
        style: Arc::clone(style),
    }
}

fn rectangle(x: f32, y: f32, width: f32, height: f32, fill: &Color) -> PositionedElement {
    PositionedElement {
        x,
        y,
        width,
        height,
        element: LayoutElement::Rectangle(RectElement { fill: fill.clone() }),
        style: Arc::new(DrawStyle {
            font: BaseFont::Helvetica,
            font_size: 0.0,
            color: fill.clone(),
        }),
    }
}

fn has_content(block: &StyledBlock) -> bool {
    !block.text().trim().is_empty()
}

/// Lays out documents for one configuration. Cheap to share between threads.
#[derive(Debug, Clone)]
pub struct PageComposer {
    config: ComposerConfig,
    styles: Arc<StyleTable>,
}

impl PageComposer {
    pub fn new(config: ComposerConfig, styles: Arc<StyleTable>) -> Self {
        Self { config, styles }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn styles(&self) -> &Arc<StyleTable> {
        &self.styles
    }

    pub fn compose(
        &self,
        title: &str,
        subject: &str,
        blocks: Vec<StyledBlock>,
    ) -> Result<ComposedDocument, LayoutError> {
        let geometry = PageGeometry::new(&self.config.page)?;
        let mut state = LayoutState::new(geometry);

        self.layout_title_page(&mut state, title, subject);

        for (i, block) in blocks.iter().enumerate() {
            if !has_content(block) {
                continue;
            }
            // A heading must not end a page: keep it with the first line of
            // whatever follows.
            let keep_with = block.kind().is_heading().then(|| {
                let next = blocks[i + 1..].iter().find(|b| has_content(b));
                block.spacing_after + next.map_or(0.0, |n| n.spacing_before + n.line_height)
            });
            state.start_body();
            state.flow_block(block, keep_with);
        }

        self.layout_closing(&mut state);
        if self.config.page_numbers {
            self.number_pages(&mut state);
        }

        let document = ComposedDocument {
            title: title.to_string(),
            subject: subject.to_string(),
            page_size: geometry.size,
            pages: state.pages,
            blocks,
            outline: state.outline,
        };
        log::debug!(
            "Composed {} pages from {} blocks ({} elements, {} outline entries)",
            document.page_count(),
            document.blocks.len(),
            document.element_count(),
            document.outline.len()
        );
        Ok(document)
    }

    fn layout_title_page(&self, state: &mut LayoutState, title: &str, subject: &str) {
        let content = state.geometry.content;
        let footer_line_height = self.config.footer_font_size * FOOTER_LINE_FACTOR;
        let footer_height = self.config.branding.len() as f32 * footer_line_height;
        if footer_height > 0.0 {
            state.bottom_reserve = (footer_height + TITLE_GAP).min(content.height / 2.0);
        }

        let title_block = StyledBlock {
            alignment: TextAlign::Center,
            spacing_before: 0.0,
            spacing_after: 0.0,
            ..resolve(BlockNode::heading(1, title), &self.styles)
        };
        let height_of = |block: &StyledBlock| {
            let (left_indent, right_indent) = fitted_indents(block, content.width);
            let width = content.width - left_indent - right_indent;
            wrap_text(block.text(), block.font(), block.font_size, width).len() as f32
                * block.line_height
        };
        let title_height = height_of(&title_block);
        let label_gap = if title_height > 0.0 { TITLE_GAP } else { 0.0 };
        let label_block = StyledBlock {
            alignment: TextAlign::Center,
            spacing_before: label_gap,
            spacing_after: 0.0,
            ..resolve(BlockNode::heading(2, subject), &self.styles)
        };
        let label_height = height_of(&label_block);
        let block_height = title_height + label_height + if label_height > 0.0 { label_gap } else { 0.0 };

        let available = content.height - state.bottom_reserve;
        state.cursor_y = ((available - block_height) / 2.0).max(0.0);
        state.flow_block(&title_block, None);
        state.flow_block(&label_block, None);

        self.draw_branding(state, footer_line_height, footer_height);
    }

    fn draw_branding(&self, state: &mut LayoutState, line_height: f32, height: f32) {
        let content = state.geometry.content;
        let size = self.config.footer_font_size;
        let style = Arc::new(DrawStyle {
            font: BaseFont::Helvetica,
            font_size: size,
            color: FOOTER_GRAY,
        });
        let top = content.y + content.height - height;
        let Some(title_page) = state.pages.first_mut() else {
            return;
        };
        for (i, line) in self.config.branding.iter().enumerate() {
            let width = style.font.text_width(line, size);
            title_page.elements.push(text_element(
                content.x + ((content.width - width) / 2.0).max(0.0),
                top + i as f32 * line_height + (line_height - size) / 2.0,
                width,
                line.clone(),
                0.0,
                &style,
            ));
        }
    }

    fn layout_closing(&self, state: &mut LayoutState) {
        if self.config.closing_disclaimer.is_empty() {
            return;
        }
        let size = self.config.footer_font_size + 1.0;
        let disclaimer = StyledBlock {
            block: BlockNode::paragraph(self.config.closing_disclaimer.join("\n")),
            font_size: size,
            is_bold: false,
            color: FOOTER_GRAY,
            alignment: TextAlign::Center,
            spacing_before: DISCLAIMER_GAP,
            spacing_after: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
            line_height: size * FOOTER_LINE_FACTOR,
            prefix: String::new(),
            decoration: None,
        };
        state.flow_block(&disclaimer, Some(0.0));
    }

    fn number_pages(&self, state: &mut LayoutState) {
        let total = state.pages.len();
        if total < 2 {
            return;
        }
        let size = self.config.footer_font_size;
        let style = Arc::new(DrawStyle {
            font: BaseFont::Helvetica,
            font_size: size,
            color: FOOTER_GRAY,
        });
        let page_size = state.geometry.size;
        let y = page_size.height - self.config.page.margins.bottom / 2.0 - size / 2.0;
        for page in state.pages.iter_mut().skip(1) {
            let label = format!("Page {} of {}", page.number, total);
            let width = style.font.text_width(&label, size);
            page.elements.push(text_element(
                (page_size.width - width) / 2.0,
                y,
                width,
                label,
                0.0,
                &style,
            ));
        }
    }
}
