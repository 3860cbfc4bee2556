use super::{FeedClient, RawRecord};
use crate::config::{GamePixSettings, SourcePolicy};
use crate::domain::Source;
use crate::error::{HubError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// JSON feed client for the GamePix catalog.
pub struct GamePixClient {
    client: Client,
    settings: GamePixSettings,
}

#[derive(Debug, Deserialize)]
struct GamePixPage {
    #[serde(default)]
    items: Vec<GamePixItem>,
}

#[derive(Debug, Deserialize)]
struct GamePixItem {
    id: Option<String>,
    title: Option<String>,
    url: Option<String>,
    namespace: Option<String>,
    category: Option<String>,
    description: Option<String>,
    banner_image: Option<String>,
    image: Option<String>,
    quality_score: Option<f64>,
    width: Option<u32>,
    height: Option<u32>,
    orientation: Option<String>,
}

impl GamePixItem {
    fn into_record(self, sid: &str) -> RawRecord {
        // The play URL must carry the site id for attribution
        let play_url = self.url.map(|url| {
            if url.contains("?sid=") {
                url
            } else {
                format!("{url}?sid={sid}")
            }
        });

        RawRecord {
            source_id: self.id,
            title: self.title,
            play_url,
            category: self.category,
            description: self.description,
            thumbnail: self.banner_image.or(self.image),
            namespace: self.namespace,
            quality_score: self.quality_score,
            width: self.width,
            height: self.height,
            orientation: self.orientation,
            game_type: None,
            instructions: None,
        }
    }
}

impl GamePixClient {
    pub fn new(client: Client, settings: GamePixSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl FeedClient for GamePixClient {
    fn source(&self) -> Source {
        Source::GamePix
    }

    fn policy(&self) -> &SourcePolicy {
        &self.settings.policy
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<RawRecord>> {
        let url = format!(
            "{}/v2/json?sid={}&pagination={}&page={}",
            self.settings.base_url, self.settings.sid, self.settings.page_size, page
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HubError::Fetch {
                feed: self.source(),
                status: response.status(),
            });
        }

        let payload: GamePixPage = response.json().await?;
        let records = payload
            .items
            .into_iter()
            .map(|item| item.into_record(&self.settings.sid))
            .filter(RawRecord::has_identity)
            .collect();

        Ok(records)
    }
}
