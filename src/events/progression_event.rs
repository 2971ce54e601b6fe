use crate::model::Achievement;

/// Announced by the progression engine after a game has been recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionEvent {
    GameRecorded { total_games: u32, exp_gained: u64 },
    LevelUp { level: u32 },
    StreakExtended { current_streak: u32 },
    AchievementUnlocked(Achievement),
}
