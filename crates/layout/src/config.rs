use coursedoc_style::PageLayout;
use serde::{Deserialize, Serialize};

/// Page geometry and the fixed text blocks the composer adds around the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComposerConfig {
    pub page: PageLayout,
    /// Footer lines at the bottom of the title page.
    pub branding: Vec<String>,
    /// Lines appended once after the last body block.
    pub closing_disclaimer: Vec<String>,
    /// Draw "Page N of M" on every body page.
    pub page_numbers: bool,
    pub footer_font_size: f32,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            page: PageLayout::default(),
            branding: vec![
                "Course Catalog | Unit Study Notes".to_string(),
                "Provided for personal study. Course content may change without notice.".to_string(),
                "Not a substitute for the full course materials or assessments.".to_string(),
            ],
            closing_disclaimer: vec![
                "End of unit summary.".to_string(),
                "Check the course page for the most recent version of this material.".to_string(),
            ],
            page_numbers: true,
            footer_font_size: 8.0,
        }
    }
}
