use crate::config::cli::Args;
use crate::error::Result;
use clap::Parser;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

pub(crate) mod cli;

pub use cli::Command;

/// Pagination heuristics for one feed source. The thresholds are content
/// heuristics, not correctness rules, so they are carried as configuration
/// rather than constants.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePolicy {
    /// Upper bound on pages requested per run.
    pub max_pages: u32,
    /// Abort after this many consecutive pages without records.
    #[serde(default = "default_empty_page_threshold")]
    pub empty_page_threshold: u32,
    /// Past this page, a page of nothing but already-seen titles stops the source.
    #[serde(default = "default_duplicate_stop_after_page")]
    pub duplicate_stop_after_page: u32,
    /// Abort after this many consecutive page errors; `None` logs and keeps going.
    #[serde(default)]
    pub error_threshold: Option<u32>,
    /// Courtesy pause between page requests.
    #[serde(default)]
    pub page_delay_ms: u64,
}

fn default_empty_page_threshold() -> u32 {
    3
}

fn default_duplicate_stop_after_page() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct GamePixSettings {
    pub base_url: String,
    pub sid: String,
    pub page_size: u32,
    pub policy: SourcePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameMonetizeSettings {
    pub base_url: String,
    pub policy: SourcePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub gamepix: GamePixSettings,
    pub gamemonetize: GameMonetizeSettings,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            gamepix: GamePixSettings {
                base_url: "https://feeds.gamepix.com".to_string(),
                sid: "447G4".to_string(),
                page_size: 96,
                policy: SourcePolicy {
                    max_pages: 25,
                    empty_page_threshold: default_empty_page_threshold(),
                    duplicate_stop_after_page: default_duplicate_stop_after_page(),
                    error_threshold: Some(5),
                    page_delay_ms: 100,
                },
            },
            gamemonetize: GameMonetizeSettings {
                base_url: "https://gamemonetize.com".to_string(),
                policy: SourcePolicy {
                    max_pages: 10,
                    empty_page_threshold: default_empty_page_threshold(),
                    duplicate_stop_after_page: default_duplicate_stop_after_page(),
                    error_threshold: None,
                    page_delay_ms: 200,
                },
            },
        }
    }
}

pub struct Config {
    pub args: Args,
    pub feeds: FeedConfig,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        let args = Args::parse();

        let feeds = match &args.config_file {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => FeedConfig::default(),
        };

        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            args,
            feeds,
            http_client,
        })
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }

        info!("Data dir exists");
        Ok(())
    }
}
