use crate::domain::storage::Storage;
use crate::domain::{Manifest, SharedCatalog};
use crate::error::Result;
use crate::services::aggregation::FeedAggregator;
use crate::services::fallback::FallbackProvider;
use std::sync::Arc;
use tracing::{info, warn};

/// Ties aggregation, fallback seeding and manifest output together. The
/// returned catalog handle doubles as the "catalog ready" signal: once
/// `initialize` resolves, consumers may read through it.
pub struct HubService {
    store: Arc<dyn Storage>,
    aggregator: FeedAggregator,
}

impl HubService {
    pub fn new(store: Arc<dyn Storage + 'static>, aggregator: FeedAggregator) -> Self {
        Self { store, aggregator }
    }

    pub async fn initialize(&self) -> Result<SharedCatalog> {
        let catalog = SharedCatalog::new();

        match self.aggregator.aggregate(&catalog).await {
            Ok(summary) => {
                for report in &summary.sources {
                    info!(
                        source = %report.source,
                        pages = report.pages_fetched,
                        inserted = report.inserted,
                        outcome = ?report.outcome,
                        "Source finished"
                    );
                }
                info!(total = summary.total_inserted, "Live aggregation completed");
            }
            Err(error) => {
                warn!(%error, "Live aggregation failed, using fallback games");
                for game in FallbackProvider::seed() {
                    catalog.insert(game);
                }
            }
        }

        let manifest = Manifest::new(catalog.snapshot());
        info!(total = manifest.total_games(), "Writing catalog manifest");
        self.store.save_manifest(&manifest)?;

        Ok(catalog)
    }
}
