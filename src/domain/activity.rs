use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the bounded most-recent-first play history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyPlayed {
    pub title: String,
    pub played_at: DateTime<Utc>,
}

impl RecentlyPlayed {
    pub fn now(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            played_at: Utc::now(),
        }
    }
}

/// A user-submitted problem report for a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReport {
    pub title: String,
    pub reason: String,
    pub details: String,
    pub submitted_at: DateTime<Utc>,
}
