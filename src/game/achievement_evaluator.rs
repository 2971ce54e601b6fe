use std::rc::Rc;

use log::info;
use serde::Serialize;

use crate::model::{Achievement, Criterion, PlayerStats, ACHIEVEMENTS};
use crate::store::{codec, keys, KeyValueStore};

pub fn criterion_met(criterion: Criterion, stats: &PlayerStats) -> bool {
    match criterion {
        Criterion::TotalWins(n) => stats.total_wins >= n,
        Criterion::BestMovesAtMost(n) => stats.best_move_count.is_some_and(|best| best <= n),
        Criterion::CurrentStreak(n) => stats.current_streak >= n,
        Criterion::PerfectGames(n) => stats.perfect_games >= n,
        Criterion::UniqueActors(n) => stats.unique_actors_found.len() >= n,
        Criterion::GamesInOneDay(n) => stats.games_today >= n,
        Criterion::DifficultyWins(difficulty, n) => stats.wins_for(difficulty) >= n,
        Criterion::Untracked => false,
    }
}

/// Achievements not in `unlocked` whose criterion `stats` now meets, in
/// declaration order.
pub fn evaluate(stats: &PlayerStats, unlocked: &[String]) -> Vec<Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|achievement| !unlocked.iter().any(|id| id == achievement.id))
        .filter(|achievement| criterion_met(achievement.criterion, stats))
        .copied()
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub achievement: Achievement,
    pub unlocked: bool,
}

/// Owns the persisted, append-only list of unlocked achievement ids.
pub struct AchievementTracker {
    store: Rc<dyn KeyValueStore>,
}

impl AchievementTracker {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn unlocked_ids(&self) -> Vec<String> {
        codec::load_or_default(self.store.as_ref(), keys::ACHIEVEMENTS)
    }

    /// Evaluates `stats`, records any newly unlocked ids and returns the new
    /// achievements.
    pub fn check(&self, stats: &PlayerStats) -> Vec<Achievement> {
        let mut unlocked = self.unlocked_ids();
        let new_achievements = evaluate(stats, &unlocked);
        if new_achievements.is_empty() {
            return new_achievements;
        }

        for achievement in &new_achievements {
            info!(target: "achievements", "Unlocked {}", achievement.id);
            unlocked.push(achievement.id.to_string());
        }
        codec::save_logged(self.store.as_ref(), keys::ACHIEVEMENTS, &unlocked);
        new_achievements
    }

    pub fn board(&self) -> Vec<AchievementStatus> {
        let unlocked = self.unlocked_ids();
        ACHIEVEMENTS
            .iter()
            .map(|achievement| AchievementStatus {
                achievement: *achievement,
                unlocked: unlocked.iter().any(|id| id == achievement.id),
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(keys::ACHIEVEMENTS) {
            log::error!(target: "achievements", "Failed to clear achievements: {}", e);
        }
    }
}
