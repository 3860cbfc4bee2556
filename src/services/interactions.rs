use crate::domain::storage::{Storage, TitleCollection};
use crate::domain::{GameReport, RecentlyPlayed};
use crate::error::{HubError, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Most-recent-first history keeps at most this many entries.
const RECENT_LIMIT: usize = 12;

/// Reports below this many characters of detail are rejected.
const MIN_REPORT_DETAILS: usize = 10;

/// Likes, dislikes, favorites, play history and reports, all persisted as
/// whole collections through the storage seam. Independent of the catalog:
/// this state survives across runs, the catalog never does.
pub struct InteractionService {
    store: Arc<dyn Storage>,
}

impl InteractionService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Returns the new liked state. Liking clears a standing dislike.
    pub fn toggle_like(&self, title: &str) -> Result<bool> {
        let mut likes = self.store.load_titles(TitleCollection::Likes)?;

        if contains(&likes, title) {
            likes.retain(|t| t != title);
            self.store.save_titles(TitleCollection::Likes, &likes)?;
            return Ok(false);
        }

        let mut dislikes = self.store.load_titles(TitleCollection::Dislikes)?;
        if contains(&dislikes, title) {
            dislikes.retain(|t| t != title);
            self.store.save_titles(TitleCollection::Dislikes, &dislikes)?;
        }

        likes.push(title.to_string());
        self.store.save_titles(TitleCollection::Likes, &likes)?;
        Ok(true)
    }

    /// Returns the new disliked state. Disliking clears a standing like.
    pub fn toggle_dislike(&self, title: &str) -> Result<bool> {
        let mut dislikes = self.store.load_titles(TitleCollection::Dislikes)?;

        if contains(&dislikes, title) {
            dislikes.retain(|t| t != title);
            self.store.save_titles(TitleCollection::Dislikes, &dislikes)?;
            return Ok(false);
        }

        let mut likes = self.store.load_titles(TitleCollection::Likes)?;
        if contains(&likes, title) {
            likes.retain(|t| t != title);
            self.store.save_titles(TitleCollection::Likes, &likes)?;
        }

        dislikes.push(title.to_string());
        self.store.save_titles(TitleCollection::Dislikes, &dislikes)?;
        Ok(true)
    }

    /// Returns the new favorite state.
    pub fn toggle_favorite(&self, title: &str) -> Result<bool> {
        let mut favorites = self.store.load_titles(TitleCollection::Favorites)?;

        let added = if contains(&favorites, title) {
            favorites.retain(|t| t != title);
            false
        } else {
            favorites.push(title.to_string());
            true
        };

        self.store.save_titles(TitleCollection::Favorites, &favorites)?;
        Ok(added)
    }

    /// Moves the title to the front of the bounded play history.
    pub fn record_play(&self, title: &str) -> Result<()> {
        let mut recent = self.store.load_recently_played()?;
        recent.retain(|entry| entry.title != title);
        recent.insert(0, RecentlyPlayed::now(title));
        recent.truncate(RECENT_LIMIT);
        self.store.save_recently_played(&recent)?;

        info!(title, "Recorded play");
        Ok(())
    }

    pub fn recently_played(&self) -> Result<Vec<RecentlyPlayed>> {
        self.store.load_recently_played()
    }

    pub fn submit_report(&self, title: &str, reason: &str, details: &str) -> Result<()> {
        let details = details.trim();
        if details.chars().count() < MIN_REPORT_DETAILS {
            return Err(HubError::Report(format!(
                "please provide at least {MIN_REPORT_DETAILS} characters of detail"
            )));
        }

        let mut reports = self.store.load_reports()?;
        reports.push(GameReport {
            title: title.to_string(),
            reason: reason.to_string(),
            details: details.to_string(),
            submitted_at: Utc::now(),
        });
        self.store.save_reports(&reports)?;

        info!(title, reason, "Report submitted");
        Ok(())
    }
}

fn contains(titles: &[String], title: &str) -> bool {
    titles.iter().any(|t| t == title)
}
