use serde::{Deserialize, Serialize};

use super::{Achievement, Actor, Difficulty, MovieRecord, PlayerStats};

/// A finished connection attempt, as reported by the game screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedGame {
    pub moves: u32,
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub movies: Vec<MovieRecord>,
    pub is_win: bool,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl CompletedGame {
    pub fn win(moves: u32, difficulty: Option<Difficulty>) -> Self {
        Self {
            moves,
            actors: Vec::new(),
            movies: Vec::new(),
            is_win: true,
            difficulty,
        }
    }

    pub fn loss(moves: u32) -> Self {
        Self {
            moves,
            actors: Vec::new(),
            movies: Vec::new(),
            is_win: false,
            difficulty: None,
        }
    }

    pub fn with_actors(mut self, actors: Vec<Actor>) -> Self {
        self.actors = actors;
        self
    }

    pub fn with_movies(mut self, movies: Vec<MovieRecord>) -> Self {
        self.movies = movies;
        self
    }
}

/// What the caller gets back from recording a game.
#[derive(Debug, Clone, Serialize)]
pub struct GameReward {
    pub stats: PlayerStats,
    pub new_achievements: Vec<Achievement>,
    pub exp_gained: u64,
}
