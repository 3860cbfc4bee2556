use super::Game;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Manifest {
    total_games: usize,
    last_updated: String,
    games: Vec<Game>,
}

impl Manifest {
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            total_games: games.len(),
            last_updated: chrono::Local::now().to_rfc3339(),
            games,
        }
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }
}
