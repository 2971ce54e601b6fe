pub mod achievement_evaluator;
pub mod challenge_pairs;
pub mod clock;
pub mod daily_challenge;
pub mod difficulty_classifier;
pub mod game_stats_service;
pub mod progression;
pub mod settings;

pub use achievement_evaluator::{evaluate, AchievementStatus, AchievementTracker};
pub use clock::{Clock, FixedClock, SystemClock};
pub use daily_challenge::DailyChallengeService;
pub use difficulty_classifier::{xp_for, DifficultyClassifier};
pub use game_stats_service::GameStatsService;
pub use settings::Settings;
