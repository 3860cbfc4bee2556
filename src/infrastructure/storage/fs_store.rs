use crate::domain::storage::{Storage, StorageKeys, TitleCollection};
use crate::domain::{GameReport, Manifest, RecentlyPlayed};
use crate::error::Result;
use std::fs;
use std::path::PathBuf;

/// Filesystem analog of the browser's key-value storage: every named
/// collection is one JSON blob under the state directory, loaded whole and
/// saved whole. A missing blob reads back as an empty collection.
#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn state_path(&self, key: &str) -> PathBuf {
        self.data_dir
            .join(StorageKeys::STATE_DIR)
            .join(format!("{}.json", key))
    }

    fn write_json_file<T: serde::Serialize + ?Sized>(&self, path: PathBuf, data: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(data)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn read_json_file<T: serde::de::DeserializeOwned>(&self, path: PathBuf) -> Result<Option<T>> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(Some(serde_json::from_str(&content)?))
        } else {
            Ok(None)
        }
    }
}

impl Storage for FileSystemStore {
    fn load_titles(&self, collection: TitleCollection) -> Result<Vec<String>> {
        Ok(self
            .read_json_file(self.state_path(collection.key()))?
            .unwrap_or_default())
    }

    fn save_titles(&self, collection: TitleCollection, titles: &[String]) -> Result<()> {
        self.write_json_file(self.state_path(collection.key()), titles)
    }

    fn load_recently_played(&self) -> Result<Vec<RecentlyPlayed>> {
        Ok(self
            .read_json_file(self.state_path(StorageKeys::RECENTLY_PLAYED))?
            .unwrap_or_default())
    }

    fn save_recently_played(&self, entries: &[RecentlyPlayed]) -> Result<()> {
        self.write_json_file(self.state_path(StorageKeys::RECENTLY_PLAYED), entries)
    }

    fn load_reports(&self) -> Result<Vec<GameReport>> {
        Ok(self
            .read_json_file(self.state_path(StorageKeys::REPORTS))?
            .unwrap_or_default())
    }

    fn save_reports(&self, reports: &[GameReport]) -> Result<()> {
        self.write_json_file(self.state_path(StorageKeys::REPORTS), reports)
    }

    fn save_manifest(&self, manifest: &Manifest) -> Result<()> {
        let path = self
            .data_dir
            .join(format!("{}.json", StorageKeys::MANIFEST));
        self.write_json_file(path, manifest)
    }
}
