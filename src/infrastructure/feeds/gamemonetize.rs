use super::{FeedClient, RawRecord};
use crate::config::{GameMonetizeSettings, SourcePolicy};
use crate::domain::Source;
use crate::error::{HubError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// RSS/XML feed client for the GameMonetize catalog.
pub struct GameMonetizeClient {
    client: Client,
    settings: GameMonetizeSettings,
}

impl GameMonetizeClient {
    pub fn new(client: Client, settings: GameMonetizeSettings) -> Self {
        Self { client, settings }
    }
}

fn child_text(item: roxmltree::Node<'_, '_>, tag: &str) -> Option<String> {
    item.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from)
}

fn parse_feed(body: &str) -> Result<Vec<RawRecord>> {
    let document = roxmltree::Document::parse(body)
        .map_err(|e| HubError::Parse(format!("invalid feed XML: {e}")))?;

    let records = document
        .descendants()
        .filter(|node| node.has_tag_name("item"))
        .map(|item| RawRecord {
            source_id: child_text(item, "id"),
            title: child_text(item, "title"),
            play_url: child_text(item, "url"),
            category: child_text(item, "category"),
            description: child_text(item, "description"),
            thumbnail: child_text(item, "thumb"),
            namespace: None,
            quality_score: None,
            width: child_text(item, "width").and_then(|w| w.parse().ok()),
            height: child_text(item, "height").and_then(|h| h.parse().ok()),
            orientation: None,
            game_type: child_text(item, "type"),
            instructions: child_text(item, "instructions"),
        })
        .filter(RawRecord::has_identity)
        .collect();

    Ok(records)
}

#[async_trait]
impl FeedClient for GameMonetizeClient {
    fn source(&self) -> Source {
        Source::GameMonetize
    }

    fn policy(&self) -> &SourcePolicy {
        &self.settings.policy
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<RawRecord>> {
        let url = format!("{}/feed.php?format=1&page={}", self.settings.base_url, page);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/xml, text/xml, application/rss+xml, */*")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HubError::Fetch {
                feed: self.source(),
                status: response.status(),
            });
        }

        let body = response.text().await?;
        parse_feed(&body)
    }
}
