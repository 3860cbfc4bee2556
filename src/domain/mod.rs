mod activity;
mod catalog;
mod game;
mod manifest;
pub(crate) mod storage;

pub use activity::{GameReport, RecentlyPlayed};
pub use catalog::SharedCatalog;
pub use game::{Game, Source};
pub use manifest::Manifest;
