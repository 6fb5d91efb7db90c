//! The orchestrator: runs a request through every stage and guarantees a
//! downloadable document comes back.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use coursedoc_layout::{resolve_all, ComposedDocument, LayoutError, PageComposer};
use coursedoc_markup::{parse_blocks, BlockNode, Sanitizer};
use coursedoc_render_core::DocumentMetadata;
use coursedoc_render_lopdf::{minimal_pdf, render_to_vec, PlainDocument};
use coursedoc_style::parsers::parse_shorthand_margins;
use coursedoc_style::{PageLayout, StyleTable};
use std::sync::Arc;

/// One document to render. Lives only for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    pub title: String,
    pub unit_label: String,
    pub body_text: String,
}

impl DocumentRequest {
    pub fn new(
        title: impl Into<String>,
        unit_label: impl Into<String>,
        body_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            unit_label: unit_label.into(),
            body_text: body_text.into(),
        }
    }
}

/// The bytes handed back to the caller. Both variants are complete PDFs.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedDocument {
    Styled(Vec<u8>),
    /// Plain-text fallback produced when the styled path failed.
    Degraded { bytes: Vec<u8>, reason: String },
}

impl RenderedDocument {
    pub fn bytes(&self) -> &[u8] {
        match self {
            RenderedDocument::Styled(bytes) => bytes,
            RenderedDocument::Degraded { bytes, .. } => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RenderedDocument::Styled(bytes) => bytes,
            RenderedDocument::Degraded { bytes, .. } => bytes,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, RenderedDocument::Degraded { .. })
    }
}

/// Parser, sanitizer, resolver, composer and encoder wired together with a
/// fixed configuration. Holds no per-request state, so one pipeline can serve
/// any number of threads.
pub struct DocumentPipeline {
    composer: PageComposer,
    sanitizer: Sanitizer,
    embed_timestamp: bool,
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl DocumentPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            composer: PageComposer::new(config.composer, config.styles),
            sanitizer: Sanitizer::default(),
            embed_timestamp: config.embed_timestamp,
        }
    }

    pub fn composer(&self) -> &PageComposer {
        &self.composer
    }

    /// Parses and sanitizes `body_text`.
    pub fn blocks(&self, body_text: &str) -> Vec<BlockNode> {
        self.sanitizer.sanitize_blocks(parse_blocks(body_text))
    }

    /// The title and unit label with ornaments removed, as they appear on
    /// the title page and in the document info.
    pub fn header(&self, request: &DocumentRequest) -> (String, String) {
        let clean = |text: &str| self.sanitizer.sanitize(text).trim().to_string();
        (clean(&request.title), clean(&request.unit_label))
    }

    /// Runs every stage up to and including page composition.
    pub fn compose(&self, request: &DocumentRequest) -> Result<ComposedDocument, LayoutError> {
        let (title, unit_label) = self.header(request);
        self.compose_with(&title, &unit_label, &request.body_text)
    }

    fn compose_with(
        &self,
        title: &str,
        unit_label: &str,
        body_text: &str,
    ) -> Result<ComposedDocument, LayoutError> {
        let styled = resolve_all(self.blocks(body_text), self.composer.styles());
        self.composer.compose(title, unit_label, styled)
    }

    /// Produces the styled PDF or the error that prevented it.
    pub fn try_render(&self, request: &DocumentRequest) -> Result<Vec<u8>, PipelineError> {
        let (title, unit_label) = self.header(request);
        let document = self.compose_with(&title, &unit_label, &request.body_text)?;
        let metadata = DocumentMetadata::new(&title, &unit_label).stamped(self.embed_timestamp);
        let bytes = render_to_vec(&document, &metadata)?;
        log::debug!(
            "Rendered {:?} to {} pages, {} bytes",
            title,
            document.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Renders `request`. Never fails: if the styled path cannot produce a
    /// document, the sanitized text is written as a plain PDF instead.
    pub fn render(&self, request: &DocumentRequest) -> RenderedDocument {
        match self.try_render(request) {
            Ok(bytes) => RenderedDocument::Styled(bytes),
            Err(err) => {
                log::warn!(
                    "Styled rendering of {:?} failed, falling back to plain output: {}",
                    request.title,
                    err
                );
                RenderedDocument::Degraded {
                    bytes: self.render_plain(request),
                    reason: err.to_string(),
                }
            }
        }
    }

    fn render_plain(&self, request: &DocumentRequest) -> Vec<u8> {
        let (title, unit_label) = self.header(request);
        let mut plain = PlainDocument::new(&title, &unit_label);
        plain.paragraphs = self
            .blocks(&request.body_text)
            .into_iter()
            .map(|block| block.text)
            .filter(|text| !text.is_empty())
            .chain(self.composer.config().closing_disclaimer.iter().cloned())
            .collect();
        plain.render().unwrap_or_else(|err| {
            log::error!("Plain rendering of {:?} failed: {}", title, err);
            minimal_pdf(&title)
        })
    }
}

/// Builds a [`DocumentPipeline`] step by step.
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
    sanitizer: Option<Sanitizer>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_config_json(self, json: &str) -> Result<Self, PipelineError> {
        Ok(self.with_config(PipelineConfig::from_json(json)?))
    }

    pub fn with_styles(mut self, styles: Arc<StyleTable>) -> Self {
        self.config.styles = styles;
        self
    }

    pub fn with_style_json(self, json: &str) -> Result<Self, PipelineError> {
        Ok(self.with_styles(Arc::new(StyleTable::from_json(json)?)))
    }

    pub fn with_page_layout(mut self, page: PageLayout) -> Self {
        self.config.composer.page = page;
        self
    }

    /// Sets the margins from CSS-style shorthand such as `"54pt 72pt"`.
    pub fn with_margins(mut self, shorthand: &str) -> Result<Self, PipelineError> {
        self.config.composer.page.margins = parse_shorthand_margins(shorthand)?;
        Ok(self)
    }

    pub fn with_branding(mut self, lines: Vec<String>) -> Self {
        self.config.composer.branding = lines;
        self
    }

    pub fn with_closing_disclaimer(mut self, lines: Vec<String>) -> Self {
        self.config.composer.closing_disclaimer = lines;
        self
    }

    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.config.composer.page_numbers = enabled;
        self
    }

    pub fn with_timestamp(mut self, embed: bool) -> Self {
        self.config.embed_timestamp = embed;
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    pub fn build(self) -> DocumentPipeline {
        let mut pipeline = DocumentPipeline::new(self.config);
        if let Some(sanitizer) = self.sanitizer {
            pipeline.sanitizer = sanitizer;
        }
        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursedoc_markup::BlockKind;
    use coursedoc_style::PageSize;

    fn deterministic() -> DocumentPipeline {
        PipelineBuilder::new().with_timestamp(false).build()
    }

    #[test]
    fn styled_render_for_latin_text() {
        let result = deterministic().render(&DocumentRequest::new("Course X", "Unit 1", "Hello."));
        assert!(!result.is_degraded());
        assert!(result.bytes().starts_with(b"%PDF-"));
    }

    #[test]
    fn unencodable_text_degrades() {
        let result = deterministic().render(&DocumentRequest::new("Course X", "Unit 1", "\u{4e2d}\u{6587}"));
        match &result {
            RenderedDocument::Degraded { reason, .. } => assert!(reason.contains("WinAnsi"), "{reason}"),
            other => panic!("expected degraded output, got {} bytes styled", other.bytes().len()),
        }
        assert!(result.into_bytes().starts_with(b"%PDF-"));
    }

    #[test]
    fn degenerate_page_degrades() {
        let pipeline = PipelineBuilder::new()
            .with_page_layout(PageLayout {
                size: PageSize::Custom { width: 100.0, height: 100.0 },
                ..Default::default()
            })
            .build();
        let request = DocumentRequest::new("T", "U", "body");
        assert!(matches!(pipeline.try_render(&request), Err(PipelineError::Layout(_))));
        assert!(pipeline.render(&request).is_degraded());
    }

    #[test]
    fn compose_exposes_the_page_tree() {
        let doc = deterministic()
            .compose(&DocumentRequest::new("Course X", "Unit 1", "# Basics\n\nHello world."))
            .unwrap();
        let kinds: Vec<BlockKind> = doc.blocks.iter().map(|b| b.kind()).collect();
        assert_eq!(kinds, vec![BlockKind::Heading1, BlockKind::Paragraph]);
        assert_eq!(doc.body_page_count(), 1);
    }

    #[test]
    fn header_is_sanitized() {
        let request = DocumentRequest::new("\u{1F4DA} Course X", "Unit 1 \u{2705}", "Hello.");
        let pipeline = deterministic();
        assert_eq!(
            pipeline.header(&request),
            ("Course X".to_string(), "Unit 1".to_string())
        );
        assert!(!pipeline.render(&request).is_degraded());
    }

    #[test]
    fn builder_applies_settings() {
        let pipeline = PipelineBuilder::new()
            .with_margins("36pt")
            .unwrap()
            .with_branding(vec!["Acme".into()])
            .with_page_numbers(false)
            .build();
        let config = pipeline.composer().config();
        assert_eq!(config.page.margins.left, 36.0);
        assert_eq!(config.branding, vec!["Acme".to_string()]);
        assert!(!config.page_numbers);
    }

    #[test]
    fn bad_margins_are_a_style_error() {
        let err = PipelineBuilder::new().with_margins("wide").err().unwrap();
        assert!(matches!(err, PipelineError::Style(_)));
    }
}
