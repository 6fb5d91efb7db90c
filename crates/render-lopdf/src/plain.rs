//! The degraded encoder: a minimally formatted PDF of plain paragraphs.
//!
//! Used when the styled path cannot encode a document. It shares no code with
//! the streaming writer; pages are assembled in memory with `lopdf`'s
//! [`Document`] API and saved in one go. Characters outside WinAnsiEncoding
//! are replaced with `?` instead of failing.

use crate::helpers::{font_dictionary, pdf_text_string};
use coursedoc_layout::text::wrap_text;
use coursedoc_layout::BaseFont;
use coursedoc_render_core::utils::encode_win_ansi_lossy;
use coursedoc_render_core::RenderError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 72.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;
const LEADING: f32 = 14.0;
const PARAGRAPH_GAP: f32 = 6.0;

/// Plain text to lay out top to bottom with no styling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlainDocument {
    pub title: String,
    pub subject: String,
    pub paragraphs: Vec<String>,
}

struct PlainLine {
    text: String,
    font: BaseFont,
    size: f32,
    /// Baseline, measured from the top of the page.
    baseline: f32,
}

impl PlainDocument {
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            paragraphs: Vec::new(),
        }
    }

    pub fn with_paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    fn layout(&self) -> Vec<Vec<PlainLine>> {
        let max_width = PAGE_WIDTH - 2.0 * MARGIN;
        let bottom = PAGE_HEIGHT - MARGIN;
        let mut pages: Vec<Vec<PlainLine>> = vec![Vec::new()];
        let mut cursor = MARGIN;

        let blocks = std::iter::once((self.title.as_str(), BaseFont::HelveticaBold, TITLE_SIZE))
            .chain(std::iter::once((self.subject.as_str(), BaseFont::Helvetica, BODY_SIZE)))
            .chain(self.paragraphs.iter().map(|p| (p.as_str(), BaseFont::Helvetica, BODY_SIZE)));

        for (text, font, size) in blocks {
            let leading = LEADING.max(size * 1.2);
            for line in wrap_text(text, font, size, max_width) {
                if cursor + leading > bottom {
                    pages.push(Vec::new());
                    cursor = MARGIN;
                }
                cursor += leading;
                if let Some(page) = pages.last_mut() {
                    page.push(PlainLine {
                        text: line.text,
                        font,
                        size,
                        baseline: cursor,
                    });
                }
            }
            cursor += PARAGRAPH_GAP;
        }
        pages
    }

    /// Builds the PDF. Only fails if `lopdf` cannot serialize the objects.
    pub fn render(&self) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let resources_id = doc.add_object(dictionary! { "Font" => font_dictionary() });

        let mut kids: Vec<Object> = Vec::new();
        for lines in self.layout() {
            let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(&lines).encode()?));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        let info_id = doc.add_object(dictionary! {
            "Title" => pdf_text_string(&self.title),
            "Subject" => pdf_text_string(&self.subject),
            "Producer" => pdf_text_string(concat!("coursedoc ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        log::debug!("Degraded encoder wrote {} pages, {} bytes", count, bytes.len());
        Ok(bytes)
    }
}

fn page_content(lines: &[PlainLine]) -> Content {
    let mut operations = Vec::new();
    for line in lines.iter().filter(|l| !l.text.trim().is_empty()) {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![Object::Name(line.font.resource_name().as_bytes().to_vec()), line.size.into()],
        ));
        operations.push(Operation::new(
            "Td",
            vec![MARGIN.into(), (PAGE_HEIGHT - line.baseline).into()],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi_lossy(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// A one-page PDF naming the document, assembled by hand with computed
/// offsets. The last resort when even [`PlainDocument::render`] fails.
pub fn minimal_pdf(title: &str) -> Vec<u8> {
    let escaped: String = encode_win_ansi_lossy(title)
        .into_iter()
        .filter(|b| b.is_ascii_graphic() || *b == b' ')
        .flat_map(|b| match b {
            b'(' | b')' | b'\\' => vec![b'\\' as char, b as char],
            _ => vec![b as char],
        })
        .collect();
    let stream = format!("BT /F1 16 Tf 72 770 Td ({escaped}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
        ),
        format!("<< /Length {} >>\nstream\n{stream}\nendstream", stream.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }
    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}
