mod achievement;
mod daily_challenge;
mod difficulty;
mod game_stats;
mod movie;
mod player_stats;

pub use achievement::{Achievement, Criterion, ACHIEVEMENTS};
pub use daily_challenge::{DailyChallengeResult, DailyUserStats, LeaderboardEntry};
pub use difficulty::Difficulty;
pub use game_stats::{CompletedGame, GameReward};
pub use movie::{Actor, ActorId, MovieId, MoviePair, MovieRecord, PathNode, MAX_KNOWN_ACTORS};
pub use player_stats::{PlayerStats, STARTING_LEVEL, STARTING_NEXT_LEVEL_EXP};
