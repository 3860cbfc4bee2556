use crate::config::{Command, Config};
use crate::domain::storage::Storage;
use crate::error::Result;
use crate::infrastructure::{FeedClient, FileSystemStore, GameMonetizeClient, GamePixClient};
use crate::services::{FeedAggregator, HubService, InteractionService, RecordNormalizer};
use std::sync::Arc;
use tracing::{info, warn, Level};

mod config;
mod domain;
mod error;
mod infrastructure;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;
    init_tracing(&config.args.log_level);
    config.ensure_directories()?;

    let store: Arc<dyn Storage> = Arc::new(FileSystemStore::new(&config.args.data_dir));
    let interactions = InteractionService::new(Arc::clone(&store));

    match &config.args.command {
        Some(Command::Like { title }) => {
            let liked = interactions.toggle_like(title)?;
            info!(%title, liked, "Like toggled");
        }
        Some(Command::Dislike { title }) => {
            let disliked = interactions.toggle_dislike(title)?;
            info!(%title, disliked, "Dislike toggled");
        }
        Some(Command::Favorite { title }) => {
            let favorited = interactions.toggle_favorite(title)?;
            info!(%title, favorited, "Favorite toggled");
        }
        Some(Command::Recent) => {
            for entry in interactions.recently_played()? {
                println!("{}  {}", entry.played_at.to_rfc3339(), entry.title);
            }
        }
        Some(Command::Report {
            title,
            reason,
            details,
        }) => {
            interactions.submit_report(title, reason, details)?;
            info!(%title, "Report stored");
        }
        Some(Command::Play { title }) => {
            let catalog = build_hub(&config, Arc::clone(&store)).initialize().await?;
            let found = catalog.lock().get(title).cloned();
            match found {
                Some(game) => {
                    interactions.record_play(title)?;
                    println!("{}", game.play_url);
                }
                None => warn!(%title, "Title is not in the catalog"),
            }
        }
        None => {
            let catalog = build_hub(&config, store).initialize().await?;
            info!(total = catalog.len(), "Game hub ready");
        }
    }

    Ok(())
}

fn build_hub(config: &Config, store: Arc<dyn Storage>) -> HubService {
    let normalizer = match config.args.seed {
        Some(seed) => RecordNormalizer::with_seed(seed),
        None => RecordNormalizer::new(),
    };

    let clients: Vec<Box<dyn FeedClient>> = vec![
        Box::new(GamePixClient::new(
            config.http_client.clone(),
            config.feeds.gamepix.clone(),
        )),
        Box::new(GameMonetizeClient::new(
            config.http_client.clone(),
            config.feeds.gamemonetize.clone(),
        )),
    ];

    HubService::new(store, FeedAggregator::new(clients, normalizer))
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();
}
