//! Line-oriented parser for the markup subset used in unit summaries.
//!
//! Every line is classified with small nom parsers, then a builder groups the
//! classified lines into blocks. Constructs outside the supported subset
//! (fenced code, tables, thematic breaks, setext underlines) become paragraphs
//! that keep their raw text, so no input is ever dropped.

use crate::block::BlockNode;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1, take_while_m_n};
use nom::character::complete::{char, one_of, space1};
use nom::combinator::{eof, map_res, opt, recognize, value};
use nom::{IResult, Parser};

const TAB_WIDTH: usize = 4;
/// Columns of indentation per list nesting level.
const LIST_INDENT_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq)]
enum Line<'a> {
    Blank,
    Heading { level: usize, text: &'a str },
    ListItem { indent: usize, ordinal: Option<u32>, text: &'a str },
    Quote(&'a str),
    Fence(char),
    TableRow(&'a str),
    ThematicBreak(&'a str),
    Text(&'a str),
}

// --- Line recognizers ---

fn indentation(input: &str) -> IResult<&str, usize> {
    let (rest, ws) = take_while(|c: char| c == ' ' || c == '\t').parse(input)?;
    let width = ws
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum();
    Ok((rest, width))
}

/// Block markers may be indented by at most three spaces.
fn block_indent(input: &str) -> IResult<&str, &str> {
    take_while_m_n(0, 3, |c: char| c == ' ').parse(input)
}

fn heading(input: &str) -> IResult<&str, usize> {
    let (rest, (_, marks, _)) = (
        block_indent,
        take_while1(|c: char| c == '#'),
        alt((space1, eof)),
    )
        .parse(input)?;
    Ok((rest, marks.len()))
}

fn bullet(input: &str) -> IResult<&str, usize> {
    let (rest, (indent, _, _)) = (indentation, one_of("-*+\u{2022}"), space1).parse(input)?;
    Ok((rest, indent))
}

fn ordered(input: &str) -> IResult<&str, (usize, u32)> {
    let (rest, (indent, number, _, _)) = (
        indentation,
        map_res(
            take_while_m_n(1, 9, |c: char| c.is_ascii_digit()),
            |digits: &str| digits.parse::<u32>(),
        ),
        one_of(".)"),
        space1,
    )
        .parse(input)?;
    Ok((rest, (indent, number)))
}

fn quote_marker(input: &str) -> IResult<&str, &str> {
    recognize((block_indent, char('>'), opt(char(' ')))).parse(input)
}

fn fence(input: &str) -> IResult<&str, char> {
    let (rest, (_, marker)) = (
        block_indent,
        alt((value('`', tag("```")), value('~', tag("~~~")))),
    )
        .parse(input)?;
    Ok((rest, marker))
}

/// Strips an ATX closing sequence (`## Title ##`). A trailing `#` glued to a
/// word (`C#`) is content.
fn heading_text(rest: &str) -> &str {
    let text = rest.trim();
    let stripped = text.trim_end_matches('#');
    if stripped.is_empty() {
        ""
    } else if stripped.ends_with(' ') {
        stripped.trim_end()
    } else {
        text
    }
}

fn strip_nested_quotes(mut rest: &str) -> &str {
    while let Some(inner) = rest.trim_start().strip_prefix('>') {
        rest = inner;
    }
    rest.trim()
}

fn is_thematic_break(trimmed: &str) -> bool {
    let mut marks = trimmed.chars().filter(|c| !c.is_whitespace());
    let Some(first) = marks.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_')
        && trimmed.chars().filter(|c| *c == first).count() >= 3
        && marks.all(|c| c == first)
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if let Ok((_, marker)) = fence(line) {
        return Line::Fence(marker);
    }
    if let Ok((rest, level)) = heading(line) {
        return Line::Heading {
            level,
            text: heading_text(rest),
        };
    }
    if is_thematic_break(trimmed) {
        return Line::ThematicBreak(trimmed);
    }
    if let Ok((rest, _)) = quote_marker(line) {
        return Line::Quote(strip_nested_quotes(rest));
    }
    if let Ok((rest, (indent, number))) = ordered(line) {
        return Line::ListItem {
            indent,
            ordinal: Some(number),
            text: rest.trim(),
        };
    }
    if let Ok((rest, indent)) = bullet(line) {
        return Line::ListItem {
            indent,
            ordinal: None,
            text: rest.trim(),
        };
    }
    if trimmed.starts_with('|') {
        return Line::TableRow(trimmed);
    }
    Line::Text(trimmed)
}

fn closes_fence(line: &str, marker: char) -> bool {
    matches!(fence(line), Ok((_, m)) if m == marker)
}

// --- Block assembly ---

enum OpenBlock<'a> {
    Paragraph(Vec<&'a str>),
    ListItem {
        ordinal: Option<u32>,
        depth: usize,
        lines: Vec<&'a str>,
    },
    Quote(Vec<&'a str>),
    Table(Vec<&'a str>),
}

impl OpenBlock<'_> {
    fn close(self) -> BlockNode {
        match self {
            OpenBlock::Paragraph(lines) => BlockNode::paragraph(lines.join(" ")),
            OpenBlock::ListItem {
                ordinal,
                depth,
                lines,
            } => BlockNode::list_item(lines.join(" "), ordinal, depth),
            OpenBlock::Quote(lines) => {
                let parts: Vec<&str> = lines.into_iter().filter(|l| !l.is_empty()).collect();
                BlockNode::quote(parts.join(" "))
            }
            OpenBlock::Table(rows) => BlockNode::paragraph(rows.join("\n")),
        }
    }
}

#[derive(Default)]
struct BlockBuilder<'a> {
    blocks: Vec<BlockNode>,
    open: Option<OpenBlock<'a>>,
}

impl<'a> BlockBuilder<'a> {
    fn flush(&mut self) {
        if let Some(open) = self.open.take() {
            self.blocks.push(open.close());
        }
    }

    fn push(&mut self, block: BlockNode) {
        self.flush();
        self.blocks.push(block);
    }

    fn open(&mut self, block: OpenBlock<'a>) {
        self.flush();
        self.open = Some(block);
    }

    fn finish(mut self) -> Vec<BlockNode> {
        self.flush();
        self.blocks
    }
}

/// Parses markup into blocks in source order. Never fails; input with no
/// recognizable structure comes back as paragraphs.
pub fn parse_blocks(input: &str) -> Vec<BlockNode> {
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut builder = BlockBuilder::default();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        match classify(line) {
            Line::Blank => builder.flush(),
            Line::Fence(marker) => {
                let end = lines[i + 1..]
                    .iter()
                    .position(|l| closes_fence(l, marker))
                    .map_or(lines.len() - 1, |offset| i + 1 + offset);
                let raw: Vec<&str> = lines[i..=end].iter().map(|l| l.trim_end()).collect();
                builder.push(BlockNode::paragraph(raw.join("\n")));
                i = end;
            }
            Line::Heading { level, text } => builder.push(BlockNode::heading(level, text)),
            Line::ThematicBreak(raw) => builder.push(BlockNode::paragraph(raw)),
            Line::Quote(text) => match &mut builder.open {
                Some(OpenBlock::Quote(quote_lines)) => quote_lines.push(text),
                _ => builder.open(OpenBlock::Quote(vec![text])),
            },
            Line::ListItem {
                indent,
                ordinal,
                text,
            } => builder.open(OpenBlock::ListItem {
                ordinal,
                depth: indent / LIST_INDENT_WIDTH,
                lines: vec![text],
            }),
            Line::TableRow(row) => match &mut builder.open {
                Some(OpenBlock::Table(rows)) => rows.push(row),
                _ => builder.open(OpenBlock::Table(vec![row])),
            },
            Line::Text(text) => match &mut builder.open {
                Some(
                    OpenBlock::Paragraph(open_lines)
                    | OpenBlock::Quote(open_lines)
                    | OpenBlock::ListItem {
                        lines: open_lines, ..
                    },
                ) => open_lines.push(text),
                _ => builder.open(OpenBlock::Paragraph(vec![text])),
            },
        }
        i += 1;
    }

    let blocks = builder.finish();
    log::debug!("Parsed {} blocks from {} lines", blocks.len(), lines.len());
    blocks
}
