use std::rc::Rc;

use log::{info, trace};

use super::achievement_evaluator::{AchievementStatus, AchievementTracker};
use super::clock::Clock;
use super::progression::{apply_game, StreakChange};
use crate::events::{EventEmitter, ProgressionEvent};
use crate::model::{CompletedGame, GameReward, PlayerStats};
use crate::store::{codec, keys, KeyValueStore};

/// Progression engine: applies completed games to the persisted
/// [`PlayerStats`] and hands out experience, levels and achievements.
pub struct GameStatsService {
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    achievements: AchievementTracker,
    event_emitter: Option<EventEmitter<ProgressionEvent>>,
}

impl GameStatsService {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self {
            achievements: AchievementTracker::new(Rc::clone(&store)),
            store,
            clock,
            event_emitter: None,
        }
    }

    pub fn with_events(mut self, event_emitter: EventEmitter<ProgressionEvent>) -> Self {
        self.event_emitter = Some(event_emitter);
        self
    }

    /// Current stats; defaults when nothing (or nothing readable) is stored.
    pub fn get_player_stats(&self) -> PlayerStats {
        codec::load_or_default(self.store.as_ref(), keys::PLAYER_STATS)
    }

    pub fn get_achievements(&self) -> Vec<String> {
        self.achievements.unlocked_ids()
    }

    pub fn achievement_board(&self) -> Vec<AchievementStatus> {
        self.achievements.board()
    }

    pub fn level_progress(&self) -> f64 {
        self.get_player_stats().level_progress()
    }

    pub fn win_rate(&self) -> f64 {
        self.get_player_stats().win_rate()
    }

    pub fn record_game_complete(&self, game: &CompletedGame) -> GameReward {
        let previous = self.get_player_stats();
        let update = apply_game(&previous, game, self.clock.today());
        trace!(target: "game_stats", "Recorded game {:?}: {:?}", game, update);

        if !codec::save_logged(self.store.as_ref(), keys::PLAYER_STATS, &update.stats) {
            info!(target: "game_stats", "Continuing with unsaved stats");
        }

        let new_achievements = self.achievements.check(&update.stats);

        if let Some(emitter) = &self.event_emitter {
            emitter.emit(&ProgressionEvent::GameRecorded {
                total_games: update.stats.total_games,
                exp_gained: update.exp_gained,
            });
            for level in (previous.level + 1)..=update.stats.level {
                emitter.emit(&ProgressionEvent::LevelUp { level });
            }
            if update.streak == StreakChange::Extended {
                emitter.emit(&ProgressionEvent::StreakExtended {
                    current_streak: update.stats.current_streak,
                });
            }
            for achievement in &new_achievements {
                emitter.emit(&ProgressionEvent::AchievementUnlocked(*achievement));
            }
        }

        GameReward {
            stats: update.stats,
            new_achievements,
            exp_gained: update.exp_gained,
        }
    }

    /// Forgets all progression, including unlocked achievements.
    pub fn reset_stats(&self) {
        info!(target: "game_stats", "Resetting player stats");
        if let Err(e) = self.store.remove(keys::PLAYER_STATS) {
            log::error!(target: "game_stats", "Failed to reset stats: {}", e);
        }
        self.achievements.clear();
    }
}
