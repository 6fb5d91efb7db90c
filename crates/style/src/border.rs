use crate::parsers::{parse_border, run_parser};
use coursedoc_types::Color;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    None,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Border {
    pub width: f32,
    pub style: BorderStyle,
    pub color: Color,
}

impl Eq for Border {}

impl Hash for Border {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.to_bits().hash(state);
        self.style.hash(state);
        self.color.hash(state);
    }
}

impl Border {
    pub fn solid(width: f32, color: Color) -> Self {
        Self {
            width,
            style: BorderStyle::Solid,
            color,
        }
    }

    /// Whether the border produces any ink.
    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::None && self.width > 0.0
    }
}

impl<'de> Deserialize<'de> for Border {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BorderDef {
            Str(String),
            Map {
                width: f32,
                #[serde(default)]
                style: BorderStyle,
                color: Color,
            },
        }

        match BorderDef::deserialize(deserializer)? {
            BorderDef::Str(s) => run_parser(parse_border, &s).map_err(de::Error::custom),
            BorderDef::Map {
                width,
                style,
                color,
            } => Ok(Border {
                width,
                style,
                color,
            }),
        }
    }
}
