use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    GamePix,
    GameMonetize,
    Fallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::GamePix => "gamepix",
            Source::GameMonetize => "gamemonetize",
            Source::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical, source-agnostic game entity stored in the catalog.
///
/// `title` is the catalog key; everything else is display metadata filled in
/// by the normalizer when the origin feed omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub title: String,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub play_url: String,
    pub category: String,
    pub rating: f64,
    pub plays_label: String,
    pub description: String,
    pub tags: Vec<String>,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}
