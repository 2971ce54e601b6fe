use serde::Serialize;

use super::Difficulty;

/// The condition a player's stats must meet to unlock an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    TotalWins(u32),
    BestMovesAtMost(u32),
    CurrentStreak(u32),
    PerfectGames(u32),
    UniqueActors(usize),
    GamesInOneDay(u32),
    DifficultyWins(Difficulty, u32),
    /// Depends on data this engine does not track; never satisfied.
    Untracked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub reward: &'static str,
    #[serde(skip)]
    pub criterion: Criterion,
}

impl Achievement {
    const fn new(
        id: &'static str,
        title: &'static str,
        description: &'static str,
        icon: &'static str,
        reward: &'static str,
        criterion: Criterion,
    ) -> Self {
        Self {
            id,
            title,
            description,
            icon,
            reward,
            criterion,
        }
    }

    pub fn by_id(id: &str) -> Option<&'static Achievement> {
        ACHIEVEMENTS.iter().find(|achievement| achievement.id == id)
    }
}

/// Every achievement, in evaluation order.
pub static ACHIEVEMENTS: [Achievement; 16] = [
    Achievement::new(
        "first_win",
        "First Victory",
        "Win your first game",
        "🏆",
        "Welcome to CineMaze!",
        Criterion::TotalWins(1),
    ),
    Achievement::new(
        "speed_demon",
        "Speed Demon",
        "Win a game in 3 moves or less",
        "⚡",
        "Lightning fast connections",
        Criterion::BestMovesAtMost(3),
    ),
    Achievement::new(
        "minimalist",
        "Minimalist",
        "Win a game in 2 moves or less",
        "🎯",
        "Efficiency expert",
        Criterion::BestMovesAtMost(2),
    ),
    Achievement::new(
        "streak_master",
        "Streak Master",
        "Play 7 days in a row",
        "🔥",
        "Dedicated movie buff",
        Criterion::CurrentStreak(7),
    ),
    Achievement::new(
        "perfectionist",
        "Perfectionist",
        "Win 10 games in 3 moves or less",
        "💎",
        "Master of connections",
        Criterion::PerfectGames(10),
    ),
    Achievement::new(
        "explorer",
        "Explorer",
        "Discover 50 different actors",
        "🧭",
        "Hollywood navigator",
        Criterion::UniqueActors(50),
    ),
    Achievement::new(
        "century_club",
        "Century Club",
        "Win 100 games",
        "💯",
        "Legendary player",
        Criterion::TotalWins(100),
    ),
    Achievement::new(
        "marathon_player",
        "Marathon Player",
        "Play 10 games in one day",
        "🏃",
        "Binge gamer",
        Criterion::GamesInOneDay(10),
    ),
    Achievement::new(
        "collector",
        "Collector",
        "Add 25 movies to your watchlist",
        "📚",
        "Curator of cinema",
        Criterion::Untracked,
    ),
    Achievement::new(
        "easy_first",
        "Getting Started",
        "Win your first easy game",
        "🟢",
        "Warmed up",
        Criterion::DifficultyWins(Difficulty::Easy, 1),
    ),
    Achievement::new(
        "medium_first",
        "Stepping Up",
        "Win your first medium game",
        "🟡",
        "Rising challenger",
        Criterion::DifficultyWins(Difficulty::Medium, 1),
    ),
    Achievement::new(
        "hard_first",
        "Into the Deep End",
        "Win your first hard game",
        "🔴",
        "Fearless",
        Criterion::DifficultyWins(Difficulty::Hard, 1),
    ),
    Achievement::new(
        "easy_25",
        "Easy Rider",
        "Win 25 easy games",
        "🚲",
        "Smooth operator",
        Criterion::DifficultyWins(Difficulty::Easy, 25),
    ),
    Achievement::new(
        "medium_25",
        "Middle Ground",
        "Win 25 medium games",
        "⚖️",
        "Balanced mind",
        Criterion::DifficultyWins(Difficulty::Medium, 25),
    ),
    Achievement::new(
        "hard_25",
        "Hardened",
        "Win 25 hard games",
        "🛡️",
        "Battle tested",
        Criterion::DifficultyWins(Difficulty::Hard, 25),
    ),
    Achievement::new(
        "hard_100",
        "Cinema Legend",
        "Win 100 hard games",
        "👑",
        "Six degrees, zero fear",
        Criterion::DifficultyWins(Difficulty::Hard, 100),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_ids_are_unique() {
        assert!(ACHIEVEMENTS.iter().map(|a| a.id).all_unique());
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(
            Achievement::by_id("century_club").map(|a| a.criterion),
            Some(Criterion::TotalWins(100))
        );
        assert!(Achievement::by_id("unknown").is_none());
    }
}
