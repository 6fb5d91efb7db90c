use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Character {ch:?} in {context:?} has no WinAnsi encoding")]
    UnencodableGlyph { ch: char, context: String },
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl RenderError {
    /// Failures caused by the document content rather than the output sink.
    pub fn is_encoding_failure(&self) -> bool {
        matches!(
            self,
            RenderError::UnencodableGlyph { .. } | RenderError::DegenerateGeometry(_)
        )
    }
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
