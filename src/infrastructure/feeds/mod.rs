use crate::config::SourcePolicy;
use crate::domain::Source;
use crate::error::Result;
use async_trait::async_trait;

pub(crate) mod gamemonetize;
pub(crate) mod gamepix;

/// One record as the origin feed shaped it, before normalization. Clients
/// only guarantee that `title` and `play_url` are present and non-empty;
/// everything else is best-effort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub source_id: Option<String>,
    pub title: Option<String>,
    pub play_url: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub namespace: Option<String>,
    pub quality_score: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub orientation: Option<String>,
    pub game_type: Option<String>,
    pub instructions: Option<String>,
}

impl RawRecord {
    /// Records without both a title and a launch URL never reach the
    /// normalizer.
    pub fn has_identity(&self) -> bool {
        let present = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.title) && present(&self.play_url)
    }
}

/// Fetches one page of a remote feed and parses it into raw records.
#[async_trait]
pub trait FeedClient: Send + Sync {
    fn source(&self) -> Source;
    fn policy(&self) -> &SourcePolicy;
    async fn fetch_page(&self, page: u32) -> Result<Vec<RawRecord>>;
}
