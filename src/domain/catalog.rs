use super::Game;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory store of canonical games, keyed by title.
///
/// Insertion is first-writer-wins: a title that is already present stays
/// untouched no matter which source tries again later. This is the only
/// de-duplication mechanism across sources and pages. The catalog lives for
/// one aggregation run and is never persisted.
#[derive(Debug, Default)]
pub struct GameCatalog {
    index: FxHashMap<String, usize>,
    games: Vec<Game>,
}

impl GameCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a game unless its title is already taken.
    ///
    /// Returns `true` when the game was actually added.
    pub fn insert(&mut self, game: Game) -> bool {
        if self.index.contains_key(&game.title) {
            return false;
        }
        self.index.insert(game.title.clone(), self.games.len());
        self.games.push(game);
        true
    }

    pub fn get(&self, title: &str) -> Option<&Game> {
        self.index.get(title).map(|&i| &self.games[i])
    }

    /// All games in insertion order.
    pub fn all(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Cloneable handle to the catalog shared between concurrently running
/// source drains. Lock poisoning is recovered since the catalog is only
/// mutated through the idempotent insert.
#[derive(Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<Mutex<GameCatalog>>,
}

impl SharedCatalog {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(GameCatalog::new())),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, GameCatalog> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert(&self, game: Game) -> bool {
        self.lock().insert(game)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Game> {
        self.lock().all().to_vec()
    }
}
