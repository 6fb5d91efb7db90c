use crate::error::RenderError;
use crate::types::DocumentMetadata;
use coursedoc_layout::{ComposedDocument, PositionedElement};
use coursedoc_types::OutlineEntry;
use lopdf::ObjectId;
use std::io::{Seek, Write};

/// A trait for document renderers, abstracting the PDF-writing primitives.
pub trait DocumentRenderer<W: Write + Seek + Send> {
    fn begin_document(&mut self, writer: W, metadata: &DocumentMetadata) -> Result<(), RenderError>;

    fn render_page_content(
        &mut self,
        elements: &[PositionedElement],
        page_width: f32,
        page_height: f32,
    ) -> Result<ObjectId, RenderError>;

    fn write_page_object(
        &mut self,
        content_stream_id: ObjectId,
        page_width: f32,
        page_height: f32,
    ) -> Result<ObjectId, RenderError>;

    fn build_outline(
        &mut self,
        entries: &[OutlineEntry],
        page_ids: &[ObjectId],
        page_height: f32,
    ) -> Result<(), RenderError>;

    fn finish(self: Box<Self>, page_ids: Vec<ObjectId>) -> Result<W, RenderError>;
}

fn check_geometry(document: &ComposedDocument) -> Result<(), RenderError> {
    let size = document.page_size;
    if !(size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0) {
        return Err(RenderError::DegenerateGeometry(format!(
            "page size {}x{}",
            size.width, size.height
        )));
    }
    for page in &document.pages {
        if let Some(el) = page.elements.iter().find(|el| !el.is_finite()) {
            return Err(RenderError::DegenerateGeometry(format!(
                "element at ({}, {}) on page {}",
                el.x, el.y, page.number
            )));
        }
    }
    Ok(())
}

/// Writes a composed document page by page. Each page is handed to the
/// renderer as soon as it is reached, so renderers that stream can keep
/// memory flat regardless of page count.
pub fn render_document<W, R>(
    mut renderer: Box<R>,
    document: &ComposedDocument,
    metadata: &DocumentMetadata,
    writer: W,
) -> Result<W, RenderError>
where
    W: Write + Seek + Send,
    R: DocumentRenderer<W> + ?Sized,
{
    check_geometry(document)?;
    let width = document.page_size.width;
    let height = document.page_size.height;

    renderer.begin_document(writer, metadata)?;
    let mut page_ids = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content_id = renderer.render_page_content(&page.elements, width, height)?;
        page_ids.push(renderer.write_page_object(content_id, width, height)?);
    }
    renderer.build_outline(&document.outline, &page_ids, height)?;
    renderer.finish(page_ids)
}
