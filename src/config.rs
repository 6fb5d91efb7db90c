use crate::error::PipelineError;
use coursedoc_layout::ComposerConfig;
use coursedoc_style::StyleTable;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything a [`DocumentPipeline`](crate::DocumentPipeline) needs besides
/// the request itself. Supplied by the host in code or as JSON.
///
/// ```json
/// {
///   "composer": { "page": { "size": "Letter", "margins": "54pt" }, "pageNumbers": false },
///   "styles": { "styles": { "heading1": { "fontSize": "28pt" } } },
///   "embedTimestamp": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    pub composer: ComposerConfig,
    pub styles: Arc<StyleTable>,
    /// Write the generation time into the document info. When off, identical
    /// requests produce identical bytes.
    pub embed_timestamp: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            composer: ComposerConfig::default(),
            styles: StyleTable::shared_default(),
            embed_timestamp: true,
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursedoc_style::PageSize;
    use coursedoc_types::BlockKind;

    #[test]
    fn empty_json_is_the_default() {
        assert_eq!(PipelineConfig::from_json("{}").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn nested_sections_override_selectively() {
        let config = PipelineConfig::from_json(
            r#"{
                "composer": { "page": { "size": "Letter" }, "pageNumbers": false },
                "styles": { "styles": { "heading1": { "fontSize": "28pt" } } },
                "embedTimestamp": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.composer.page.size, PageSize::Letter);
        assert!(!config.composer.page_numbers);
        assert!(!config.embed_timestamp);
        assert_eq!(config.styles.get(BlockKind::Heading1).font_size, Some(28.0));
        assert_eq!(
            config.styles.get(BlockKind::Paragraph),
            StyleTable::default().get(BlockKind::Paragraph)
        );
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = PipelineConfig::from_json(r#"{ "embedTimestamp": "yes" }"#).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(!err.is_encoding_failure());
    }
}
