pub(crate) mod aggregation;
pub(crate) mod fallback;
pub(crate) mod hub;
pub(crate) mod interactions;
pub(crate) mod normalizer;

pub use aggregation::FeedAggregator;
pub use hub::HubService;
pub use interactions::InteractionService;
pub use normalizer::RecordNormalizer;
