//! Greedy line breaking over Helvetica advance widths.

use crate::fonts::BaseFont;
use coursedoc_style::TextAlign;

const EPSILON: f32 = 0.01;

/// One line of wrapped text.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
    /// Last line of a paragraph or of a hard-broken segment. Such lines are
    /// never stretched when justifying.
    pub ends_paragraph: bool,
}

impl Line {
    fn new(text: String, font: BaseFont, size: f32, ends_paragraph: bool) -> Self {
        let width = font.text_width(&text, size);
        Self {
            text,
            width,
            ends_paragraph,
        }
    }

    fn space_count(&self) -> usize {
        self.text.matches(' ').count()
    }
}

/// Horizontal placement of a line inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinePlacement {
    pub x_offset: f32,
    /// Extra width added to every space, used for justified lines.
    pub word_spacing: f32,
}

/// Wraps `text` into lines no wider than `max_width`.
///
/// Breaks happen at spaces; `\n` forces a break; a word wider than the whole
/// line is split between characters. Every line holds at least one character,
/// so wrapping always terminates even for absurdly narrow boxes. Leading
/// indentation of a hard-broken segment is kept when it fits, so raw code and
/// table rows keep their shape.
pub fn wrap_text(text: &str, font: BaseFont, size: f32, max_width: f32) -> Vec<Line> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let space_width = font.text_width(" ", size);
    let mut lines = Vec::new();

    for segment in text.split('\n') {
        let mut current = leading_indent(segment);
        let mut current_width = font.text_width(&current, size);
        let mut has_word = false;

        for word in segment.split_whitespace() {
            let word_width = font.text_width(word, size);
            if has_word {
                if current_width + space_width + word_width <= max_width + EPSILON {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space_width + word_width;
                    continue;
                }
                lines.push(Line::new(std::mem::take(&mut current), font, size, false));
                current_width = 0.0;
            } else if current_width + word_width > max_width + EPSILON {
                current.clear();
                current_width = 0.0;
            }
            has_word = true;

            if current_width + word_width <= max_width + EPSILON {
                current.push_str(word);
                current_width += word_width;
            } else {
                let mut pieces = split_long_word(word, font, size, max_width);
                let last = pieces.pop().unwrap_or_default();
                lines.extend(
                    pieces
                        .into_iter()
                        .map(|piece| Line::new(piece, font, size, false)),
                );
                current_width = font.text_width(&last, size);
                current = last;
            }
        }
        if !has_word {
            current.clear();
        }
        lines.push(Line::new(current, font, size, true));
    }
    lines
}

/// Spaces before the first word of `segment`, with tabs expanded to four.
fn leading_indent(segment: &str) -> String {
    segment
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { "    " } else { " " })
        .collect()
}

fn split_long_word(word: &str, font: BaseFont, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;
    for c in word.chars() {
        let char_width = font.char_width(c) as f32 * size / 1000.0;
        if !piece.is_empty() && width + char_width > max_width + EPSILON {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += char_width;
    }
    pieces.push(piece);
    pieces
}

/// Computes where a line sits inside a box of `max_width`.
pub fn place_line(line: &Line, align: TextAlign, max_width: f32) -> LinePlacement {
    let free_space = (max_width - line.width).max(0.0);
    match align {
        TextAlign::Left => LinePlacement::default(),
        TextAlign::Right => LinePlacement {
            x_offset: free_space,
            word_spacing: 0.0,
        },
        TextAlign::Center => LinePlacement {
            x_offset: free_space / 2.0,
            word_spacing: 0.0,
        },
        TextAlign::Justify => {
            let spaces = line.space_count();
            if line.ends_paragraph || spaces == 0 {
                LinePlacement::default()
            } else {
                LinePlacement {
                    x_offset: 0.0,
                    word_spacing: free_space / spaces as f32,
                }
            }
        }
    }
}
