use crate::domain::{SharedCatalog, Source};
use crate::error::{HubError, Result};
use crate::infrastructure::FeedClient;
use crate::services::normalizer::RecordNormalizer;
use futures_util::future::join_all;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Why a source's page loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Walked every page up to the configured maximum.
    Completed,
    /// Hit the consecutive-empty-page threshold.
    StoppedEmpty,
    /// A late page carried nothing but already-seen titles.
    StoppedDuplicate,
    /// Hit the consecutive-error threshold.
    StoppedErrorLimit,
}

#[derive(Debug)]
pub struct SourceReport {
    pub source: Source,
    pub outcome: SourceOutcome,
    pub pages_fetched: u32,
    pub inserted: usize,
}

#[derive(Debug)]
pub struct AggregateSummary {
    pub total_inserted: usize,
    pub sources: Vec<SourceReport>,
}

/// Drives paginated fetches across all feed sources and fills the catalog.
///
/// Sources run concurrently; within a source pages are strictly sequential
/// so the stopping heuristics see complete results before asking for more.
/// Page-level errors are logged and counted, never propagated; only a run
/// that produces zero games surfaces as an error.
pub struct FeedAggregator {
    clients: Vec<Box<dyn FeedClient>>,
    normalizer: RecordNormalizer,
}

impl FeedAggregator {
    pub fn new(clients: Vec<Box<dyn FeedClient>>, normalizer: RecordNormalizer) -> Self {
        Self { clients, normalizer }
    }

    pub async fn aggregate(&self, catalog: &SharedCatalog) -> Result<AggregateSummary> {
        let drains = self
            .clients
            .iter()
            .map(|client| self.drain_source(client.as_ref(), catalog));
        let sources = join_all(drains).await;

        let total_inserted: usize = sources.iter().map(|report| report.inserted).sum();
        if total_inserted == 0 && catalog.is_empty() {
            return Err(HubError::Aggregation(
                "no source produced any games".to_string(),
            ));
        }

        Ok(AggregateSummary {
            total_inserted,
            sources,
        })
    }

    async fn drain_source(&self, client: &dyn FeedClient, catalog: &SharedCatalog) -> SourceReport {
        let source = client.source();
        let policy = client.policy();

        let mut consecutive_empty = 0u32;
        let mut consecutive_errors = 0u32;
        let mut inserted = 0usize;
        let mut pages_fetched = 0u32;
        let mut outcome = SourceOutcome::Completed;

        info!(%source, max_pages = policy.max_pages, "Draining feed source");

        for page in 1..=policy.max_pages {
            pages_fetched = page;

            match client.fetch_page(page).await {
                Err(error) => {
                    consecutive_errors += 1;
                    warn!(%source, page, %error, "Feed page failed");

                    if let Some(limit) = policy.error_threshold {
                        if consecutive_errors >= limit {
                            info!(%source, page, "Too many consecutive errors, stopping source");
                            outcome = SourceOutcome::StoppedErrorLimit;
                            break;
                        }
                    }
                }
                Ok(records) if records.is_empty() => {
                    consecutive_empty += 1;
                    debug!(%source, page, "Feed page carried no records");

                    if consecutive_empty >= policy.empty_page_threshold {
                        info!(%source, page, "Too many consecutive empty pages, stopping source");
                        outcome = SourceOutcome::StoppedEmpty;
                        break;
                    }
                }
                Ok(records) => {
                    consecutive_empty = 0;
                    consecutive_errors = 0;

                    let mut new_on_page = 0usize;
                    for raw in records {
                        let game = self.normalizer.normalize(raw, source);
                        if catalog.insert(game) {
                            new_on_page += 1;
                        }
                    }
                    inserted += new_on_page;
                    debug!(%source, page, new_on_page, "Feed page processed");

                    if new_on_page == 0 && page > policy.duplicate_stop_after_page {
                        info!(%source, page, "No unseen titles left, stopping source early");
                        outcome = SourceOutcome::StoppedDuplicate;
                        break;
                    }
                }
            }

            if page < policy.max_pages && policy.page_delay_ms > 0 {
                sleep(Duration::from_millis(policy.page_delay_ms)).await;
            }
        }

        info!(%source, pages = pages_fetched, inserted, ?outcome, "Feed source drained");

        SourceReport {
            source,
            outcome,
            pages_fetched,
            inserted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourcePolicy;
    use crate::error::HubError;
    use crate::infrastructure::RawRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    enum Page {
        Records(Vec<RawRecord>),
        Empty,
        Error,
    }

    struct ScriptedFeed {
        source: Source,
        policy: SourcePolicy,
        script: Vec<Page>,
        calls: AtomicU32,
    }

    impl ScriptedFeed {
        fn new(source: Source, policy: SourcePolicy, script: Vec<Page>) -> Self {
            Self {
                source,
                policy,
                script,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FeedClient for ScriptedFeed {
        fn source(&self) -> Source {
            self.source
        }

        fn policy(&self) -> &SourcePolicy {
            &self.policy
        }

        async fn fetch_page(&self, page: u32) -> crate::error::Result<Vec<RawRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script.get((page - 1) as usize) {
                Some(Page::Records(records)) => Ok(records.clone()),
                Some(Page::Error) => Err(HubError::Parse("scripted failure".to_string())),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn policy() -> SourcePolicy {
        SourcePolicy {
            max_pages: 25,
            empty_page_threshold: 3,
            duplicate_stop_after_page: 5,
            error_threshold: Some(5),
            page_delay_ms: 0,
        }
    }

    fn record(title: &str) -> RawRecord {
        RawRecord {
            title: Some(title.to_string()),
            play_url: Some(format!("http://x/{}", title.to_lowercase())),
            ..RawRecord::default()
        }
    }

    async fn drain(
        source: Source,
        policy: SourcePolicy,
        script: Vec<Page>,
    ) -> (SourceReport, u32, SharedCatalog) {
        let feed = ScriptedFeed::new(source, policy, script);
        let aggregator = FeedAggregator::new(Vec::new(), RecordNormalizer::with_seed(1));
        let catalog = SharedCatalog::new();
        let report = aggregator.drain_source(&feed, &catalog).await;
        let calls = feed.calls();
        (report, calls, catalog)
    }

    #[tokio::test]
    async fn one_data_page_then_empties_stops_after_page_four() {
        let script = vec![Page::Records(vec![record("Foo")])];
        let (report, calls, catalog) = drain(Source::GamePix, policy(), script).await;

        assert_eq!(catalog.len(), 1);
        assert!(catalog.lock().get("Foo").is_some());
        assert_eq!(report.outcome, SourceOutcome::StoppedEmpty);
        assert_eq!(report.pages_fetched, 4);
        assert_eq!(calls, 4);
        assert_eq!(report.inserted, 1);
    }

    #[tokio::test]
    async fn empty_counter_resets_on_a_data_page() {
        let script = vec![
            Page::Empty,
            Page::Empty,
            Page::Records(vec![record("Foo")]),
            Page::Empty,
            Page::Empty,
            Page::Empty,
        ];
        let (report, calls, catalog) = drain(Source::GamePix, policy(), script).await;

        assert_eq!(catalog.len(), 1);
        assert_eq!(report.outcome, SourceOutcome::StoppedEmpty);
        assert_eq!(calls, 6);
    }

    #[tokio::test]
    async fn duplicate_only_pages_stop_the_source_past_the_threshold() {
        // Every page repeats the same title; pages 2-5 are tolerated, page 6
        // is the first fully-duplicate page past the threshold.
        let script = (0..10)
            .map(|_| Page::Records(vec![record("X")]))
            .collect();
        let (report, calls, catalog) = drain(Source::GamePix, policy(), script).await;

        assert_eq!(catalog.len(), 1);
        assert_eq!(report.outcome, SourceOutcome::StoppedDuplicate);
        assert_eq!(report.pages_fetched, 6);
        assert_eq!(calls, 6);
    }

    #[tokio::test]
    async fn consecutive_errors_abort_the_source_at_the_limit() {
        let script = (0..10).map(|_| Page::Error).collect();
        let (report, calls, catalog) = drain(Source::GamePix, policy(), script).await;

        assert!(catalog.is_empty());
        assert_eq!(report.outcome, SourceOutcome::StoppedErrorLimit);
        assert_eq!(calls, 5);
    }

    #[tokio::test]
    async fn error_counter_resets_on_success() {
        let script = vec![
            Page::Error,
            Page::Error,
            Page::Error,
            Page::Error,
            Page::Records(vec![record("Foo")]),
            Page::Error,
            Page::Error,
            Page::Error,
            Page::Error,
            Page::Error,
        ];
        let (report, _, catalog) = drain(Source::GamePix, policy(), script).await;

        assert_eq!(catalog.len(), 1);
        assert_eq!(report.outcome, SourceOutcome::StoppedErrorLimit);
        assert_eq!(report.pages_fetched, 10);
    }

    #[tokio::test]
    async fn source_without_error_limit_keeps_going() {
        let mut source_policy = policy();
        source_policy.error_threshold = None;
        source_policy.max_pages = 8;

        let script = vec![
            Page::Error,
            Page::Error,
            Page::Error,
            Page::Error,
            Page::Error,
            Page::Error,
            Page::Error,
            Page::Records(vec![record("Late Bloomer")]),
        ];
        let (report, calls, catalog) = drain(Source::GameMonetize, source_policy, script).await;

        assert_eq!(catalog.len(), 1);
        assert_eq!(report.outcome, SourceOutcome::Completed);
        assert_eq!(calls, 8);
    }

    #[tokio::test]
    async fn completes_when_every_page_has_fresh_records() {
        let mut source_policy = policy();
        source_policy.max_pages = 3;

        let script = vec![
            Page::Records(vec![record("A")]),
            Page::Records(vec![record("B")]),
            Page::Records(vec![record("C")]),
        ];
        let (report, _, catalog) = drain(Source::GamePix, source_policy, script).await;

        assert_eq!(catalog.len(), 3);
        assert_eq!(report.outcome, SourceOutcome::Completed);
        assert_eq!(report.inserted, 3);
    }

    #[tokio::test]
    async fn cross_source_dedupe_keeps_one_title() {
        let mut fast = policy();
        fast.max_pages = 1;

        let a = ScriptedFeed::new(
            Source::GamePix,
            fast.clone(),
            vec![Page::Records(vec![record("X"), record("Only A")])],
        );
        let b = ScriptedFeed::new(
            Source::GameMonetize,
            fast,
            vec![Page::Records(vec![record("X"), record("Only B")])],
        );

        let aggregator = FeedAggregator::new(
            vec![Box::new(a), Box::new(b)],
            RecordNormalizer::with_seed(1),
        );
        let catalog = SharedCatalog::new();
        let summary = aggregator.aggregate(&catalog).await.unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(summary.total_inserted, 3);
        let x = catalog.snapshot().into_iter().find(|g| g.title == "X").unwrap();
        assert!(matches!(x.source, Source::GamePix | Source::GameMonetize));
    }

    #[tokio::test]
    async fn zero_games_overall_is_an_aggregation_failure() {
        let mut fast = policy();
        fast.max_pages = 1;
        fast.error_threshold = Some(1);

        let a = ScriptedFeed::new(Source::GamePix, fast.clone(), vec![Page::Error]);
        let b = ScriptedFeed::new(Source::GameMonetize, fast, vec![Page::Error]);

        let aggregator = FeedAggregator::new(
            vec![Box::new(a), Box::new(b)],
            RecordNormalizer::with_seed(1),
        );

        let catalog = SharedCatalog::new();
        let err = aggregator.aggregate(&catalog).await.unwrap_err();
        assert!(matches!(err, HubError::Aggregation(_)));
        assert!(catalog.is_empty());
    }
}
