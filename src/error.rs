use coursedoc_layout::LayoutError;
use coursedoc_render_core::RenderError;
use coursedoc_style::StyleParseError;
use thiserror::Error;

/// Errors surfaced while configuring a pipeline or producing styled output.
///
/// [`DocumentPipeline::render`](crate::DocumentPipeline::render) never returns
/// these; it degrades instead. They are visible through
/// [`try_render`](crate::DocumentPipeline::try_render) and configuration
/// loading.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration is invalid: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Style value is invalid: {0}")]
    Style(#[from] StyleParseError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// Whether the failure came from the document content rather than the
    /// configuration.
    pub fn is_encoding_failure(&self) -> bool {
        match self {
            PipelineError::Layout(_) => true,
            PipelineError::Render(err) => err.is_encoding_failure(),
            _ => false,
        }
    }
}
