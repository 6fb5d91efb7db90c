use crate::helpers;
use crate::writer::StreamingPdfWriter;
use coursedoc_layout::{ComposedDocument, PositionedElement};
use coursedoc_render_core::{render_document, DocumentMetadata, DocumentRenderer, RenderError};
use coursedoc_types::OutlineEntry;
use lopdf::{dictionary, Object, ObjectId};
use std::io::{Cursor, Seek, Write};

const PDF_VERSION: &str = "1.7";

/// Streams a composed document to PDF with `lopdf` objects, using the base-14
/// Helvetica faces so no font data is embedded.
pub struct LopdfRenderer<W: Write + Seek + Send> {
    writer: Option<StreamingPdfWriter<W>>,
    outline_root_id: Option<ObjectId>,
}

impl<W: Write + Seek + Send> Default for LopdfRenderer<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Seek + Send> LopdfRenderer<W> {
    pub fn new() -> Self {
        Self {
            writer: None,
            outline_root_id: None,
        }
    }

    fn writer_mut(&mut self) -> Result<&mut StreamingPdfWriter<W>, RenderError> {
        self.writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))
    }
}

impl<W: Write + Seek + Send> DocumentRenderer<W> for LopdfRenderer<W> {
    fn begin_document(&mut self, writer: W, metadata: &DocumentMetadata) -> Result<(), RenderError> {
        let mut pdf_writer = StreamingPdfWriter::new(writer, PDF_VERSION, helpers::font_dictionary())?;
        pdf_writer.set_info(helpers::info_dictionary(metadata));
        self.writer = Some(pdf_writer);
        Ok(())
    }

    fn render_page_content(
        &mut self,
        elements: &[PositionedElement],
        _page_width: f32,
        page_height: f32,
    ) -> Result<ObjectId, RenderError> {
        let content = helpers::render_elements_to_content(elements, page_height)?;
        self.writer_mut()?.write_content_stream(content)
    }

    fn write_page_object(
        &mut self,
        content_stream_id: ObjectId,
        page_width: f32,
        page_height: f32,
    ) -> Result<ObjectId, RenderError> {
        let writer = self.writer_mut()?;
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), page_width.into(), page_height.into()],
            "Contents" => Object::Reference(content_stream_id),
            "Resources" => writer.resources_id,
        };
        Ok(writer.write_object(page_dict.into())?)
    }

    fn build_outline(
        &mut self,
        entries: &[OutlineEntry],
        page_ids: &[ObjectId],
        page_height: f32,
    ) -> Result<(), RenderError> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))?;
        self.outline_root_id = helpers::build_outlines(writer, entries, page_ids, page_height);
        Ok(())
    }

    fn finish(self: Box<Self>, page_ids: Vec<ObjectId>) -> Result<W, RenderError> {
        let mut renderer = *self;
        let mut writer = renderer
            .writer
            .take()
            .ok_or_else(|| RenderError::Other("Document not started or already finished".into()))?;
        writer.set_page_ids(page_ids);
        writer.set_outline_root_id(renderer.outline_root_id);
        Ok(writer.finish()?)
    }
}

/// Renders `document` into an in-memory PDF.
pub fn render_to_vec(
    document: &ComposedDocument,
    metadata: &DocumentMetadata,
) -> Result<Vec<u8>, RenderError> {
    let renderer = Box::new(LopdfRenderer::<Cursor<Vec<u8>>>::new());
    let cursor = render_document(renderer, document, metadata, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}
