use super::{GameReport, Manifest, RecentlyPlayed};
use crate::error::Result;

/// The named collections of title sets kept in user state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCollection {
    Likes,
    Dislikes,
    Favorites,
}

impl TitleCollection {
    pub fn key(&self) -> &'static str {
        match self {
            TitleCollection::Likes => StorageKeys::LIKES,
            TitleCollection::Dislikes => StorageKeys::DISLIKES,
            TitleCollection::Favorites => StorageKeys::FAVORITES,
        }
    }
}

/// Persistence seam for user-interaction state and the catalog manifest.
///
/// Collections are read and written as whole JSON blobs under stable keys;
/// a missing collection reads back as empty. The catalog itself is never
/// stored through this trait.
pub trait Storage: Send + Sync {
    fn load_titles(&self, collection: TitleCollection) -> Result<Vec<String>>;
    fn save_titles(&self, collection: TitleCollection, titles: &[String]) -> Result<()>;
    fn load_recently_played(&self) -> Result<Vec<RecentlyPlayed>>;
    fn save_recently_played(&self, entries: &[RecentlyPlayed]) -> Result<()>;
    fn load_reports(&self) -> Result<Vec<GameReport>>;
    fn save_reports(&self, reports: &[GameReport]) -> Result<()>;
    fn save_manifest(&self, manifest: &Manifest) -> Result<()>;
}

pub struct StorageKeys;

impl StorageKeys {
    // User state, one JSON blob per key
    pub const LIKES: &'static str = "likes";
    pub const DISLIKES: &'static str = "dislikes";
    pub const FAVORITES: &'static str = "favorites";
    pub const RECENTLY_PLAYED: &'static str = "recently_played";
    pub const REPORTS: &'static str = "reports";

    pub const STATE_DIR: &'static str = "state";
    pub const MANIFEST: &'static str = "manifest";
}
