//! List marker styles.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum ListStyleType {
    #[default]
    Disc,
    Dash,
    Decimal,
    None,
}

impl ListStyleType {
    /// The prefix drawn in front of a list item's text.
    ///
    /// `Decimal` falls back to the disc marker when the item has no ordinal.
    pub fn marker(&self, ordinal: Option<u32>) -> String {
        match (self, ordinal) {
            (ListStyleType::Decimal, Some(n)) => format!("{}. ", n),
            (ListStyleType::Dash, _) => "- ".to_string(),
            (ListStyleType::None, _) => String::new(),
            _ => "\u{2022} ".to_string(),
        }
    }
}
