use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ActorId, Difficulty, MovieId};

pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_NEXT_LEVEL_EXP: u64 = 100;

/// Cumulative statistics for the single local player.
///
/// Stored as one JSON document under `player_stats`. Field names are
/// camelCase on disk, and every field defaults so older documents missing a
/// counter still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub total_games: u32,
    pub total_wins: u32,
    /// Fewest moves in any win; `None` until the first win.
    pub best_move_count: Option<u32>,
    pub total_moves: u64,
    pub average_moves: f64,
    pub perfect_games: u32,
    pub quick_games: u32,
    pub easy_wins: u32,
    pub medium_wins: u32,
    pub hard_wins: u32,
    pub unique_actors_found: BTreeSet<ActorId>,
    pub movies_watched: BTreeSet<MovieId>,
    pub last_play_date: Option<NaiveDate>,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Games recorded on `last_play_date`.
    pub games_today: u32,
    pub level: u32,
    pub experience: u64,
    pub next_level_exp: u64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            total_games: 0,
            total_wins: 0,
            best_move_count: None,
            total_moves: 0,
            average_moves: 0.0,
            perfect_games: 0,
            quick_games: 0,
            easy_wins: 0,
            medium_wins: 0,
            hard_wins: 0,
            unique_actors_found: BTreeSet::new(),
            movies_watched: BTreeSet::new(),
            last_play_date: None,
            current_streak: 0,
            longest_streak: 0,
            games_today: 0,
            level: STARTING_LEVEL,
            experience: 0,
            next_level_exp: STARTING_NEXT_LEVEL_EXP,
        }
    }
}

impl PlayerStats {
    pub fn wins_for(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_wins,
            Difficulty::Medium => self.medium_wins,
            Difficulty::Hard => self.hard_wins,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_wins as f64 / self.total_games as f64
        }
    }

    /// Fraction of the way from the current level to the next, in `[0, 1)`.
    pub fn level_progress(&self) -> f64 {
        if self.next_level_exp == 0 {
            return 0.0;
        }
        (self.experience as f64 / self.next_level_exp as f64).min(1.0)
    }
}
