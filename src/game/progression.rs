//! The "apply game result" transaction.
//!
//! [`apply_game`] is pure: it takes the previous stats and returns the next
//! ones, so every invariant below can be checked without a store.
//!
//! - `total_wins <= total_games`
//! - `perfect_games <= quick_games`
//! - `experience < next_level_exp`
//! - `longest_streak >= current_streak`

use chrono::NaiveDate;

use super::difficulty_classifier::xp_with_multiplier;
use crate::helpers::round_to_tenth;
use crate::model::{CompletedGame, Difficulty, PlayerStats};

pub const PERFECT_GAME_MOVES: u32 = 3;
pub const QUICK_GAME_MOVES: u32 = 5;

const LEVEL_EXP_GROWTH_NUMERATOR: u64 = 6;
const LEVEL_EXP_GROWTH_DENOMINATOR: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Already played today.
    Unchanged,
    Extended,
    /// First play ever, or the previous streak was broken by a gap.
    Started,
}

#[derive(Debug, Clone)]
pub struct ProgressionUpdate {
    pub stats: PlayerStats,
    pub exp_gained: u64,
    pub levels_gained: u32,
    pub streak: StreakChange,
}

pub fn apply_game(previous: &PlayerStats, game: &CompletedGame, today: NaiveDate) -> ProgressionUpdate {
    let mut stats = previous.clone();
    stats.total_games += 1;

    let exp_gained = if game.is_win {
        // a win takes at least one move
        let moves = game.moves.max(1);
        record_win(&mut stats, moves, game.difficulty);
        let multiplier = game.difficulty.map(|d| d.xp_multiplier()).unwrap_or(1.0);
        xp_with_multiplier(moves, multiplier)
    } else {
        0
    };
    let levels_gained = gain_experience(&mut stats, exp_gained);

    stats
        .unique_actors_found
        .extend(game.actors.iter().map(|actor| actor.id));
    stats
        .movies_watched
        .extend(game.movies.iter().map(|movie| movie.id));

    let streak = update_streak(&mut stats, today);

    ProgressionUpdate {
        stats,
        exp_gained,
        levels_gained,
        streak,
    }
}

fn record_win(stats: &mut PlayerStats, moves: u32, difficulty: Option<Difficulty>) {
    stats.total_wins += 1;
    stats.total_moves += moves as u64;
    stats.best_move_count = Some(stats.best_move_count.map_or(moves, |best| best.min(moves)));
    stats.average_moves = round_to_tenth(stats.total_moves as f64 / stats.total_wins as f64);

    if moves <= PERFECT_GAME_MOVES {
        stats.perfect_games += 1;
    }
    if moves <= QUICK_GAME_MOVES {
        stats.quick_games += 1;
    }

    match difficulty {
        Some(Difficulty::Easy) => stats.easy_wins += 1,
        Some(Difficulty::Medium) => stats.medium_wins += 1,
        Some(Difficulty::Hard) => stats.hard_wins += 1,
        None => (),
    }
}

/// Adds experience and resolves every level-up it pays for.
fn gain_experience(stats: &mut PlayerStats, exp: u64) -> u32 {
    stats.experience += exp;
    let mut levels = 0;
    // a stored threshold of 0 would never terminate
    stats.next_level_exp = stats.next_level_exp.max(1);
    while stats.experience >= stats.next_level_exp {
        stats.experience -= stats.next_level_exp;
        stats.level += 1;
        stats.next_level_exp = next_threshold(stats.next_level_exp);
        levels += 1;
    }
    levels
}

/// `floor(threshold * 1.2)`, in integer arithmetic.
pub fn next_threshold(threshold: u64) -> u64 {
    (threshold * LEVEL_EXP_GROWTH_NUMERATOR / LEVEL_EXP_GROWTH_DENOMINATOR).max(1)
}

/// Play streak: consecutive calendar days with any recorded game, tolerant of
/// today not having been played yet.
fn update_streak(stats: &mut PlayerStats, today: NaiveDate) -> StreakChange {
    let change = match stats.last_play_date {
        Some(last) if last == today => StreakChange::Unchanged,
        Some(last) if today.pred_opt() == Some(last) => StreakChange::Extended,
        _ => StreakChange::Started,
    };

    match change {
        StreakChange::Unchanged => stats.games_today += 1,
        StreakChange::Extended => {
            stats.current_streak += 1;
            stats.games_today = 1;
        }
        StreakChange::Started => {
            stats.current_streak = 1;
            stats.games_today = 1;
        }
    }
    // a same-day replay after a reset still counts as day one
    stats.current_streak = stats.current_streak.max(1);
    stats.longest_streak = stats.longest_streak.max(stats.current_streak);
    stats.last_play_date = Some(today);
    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Actor, MovieRecord};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn play_wins(moves: &[u32]) -> PlayerStats {
        moves.iter().fold(PlayerStats::default(), |stats, &m| {
            apply_game(&stats, &CompletedGame::win(m, None), day(1)).stats
        })
    }

    #[test]
    fn test_average_and_best_over_wins() {
        let stats = play_wins(&[4, 2, 7]);
        assert_eq!(stats.total_wins, 3);
        assert_eq!(stats.total_moves, 13);
        assert_eq!(stats.best_move_count, Some(2));
        assert_eq!(stats.average_moves, 4.3);
        assert_eq!(stats.perfect_games, 1);
        assert_eq!(stats.quick_games, 2);
    }

    #[test]
    fn test_best_move_count_never_increases() {
        let mut stats = PlayerStats::default();
        let mut best_so_far = u32::MAX;
        for moves in [6, 3, 9, 3, 1, 8] {
            stats = apply_game(&stats, &CompletedGame::win(moves, None), day(1)).stats;
            best_so_far = best_so_far.min(moves);
            assert_eq!(stats.best_move_count, Some(best_so_far));
            assert!(stats.perfect_games <= stats.quick_games);
        }
    }

    #[test]
    fn test_zero_move_win_counts_as_one_move() {
        let update = apply_game(&PlayerStats::default(), &CompletedGame::win(0, None), day(1));
        assert_eq!(update.stats.best_move_count, Some(1));
        assert_eq!(update.stats.total_moves, 1);
        assert_eq!(update.stats.average_moves, 1.0);
        assert_eq!(update.exp_gained, xp_with_multiplier(1, 1.0));
    }

    #[test]
    fn test_loss_only_counts_game_and_discoveries() {
        let game = CompletedGame::loss(8)
            .with_actors(vec![Actor::new(1, "A"), Actor::new(2, "B")])
            .with_movies(vec![MovieRecord::new(100, "M")]);
        let update = apply_game(&PlayerStats::default(), &game, day(1));

        assert_eq!(update.exp_gained, 0);
        assert_eq!(update.stats.total_games, 1);
        assert_eq!(update.stats.total_wins, 0);
        assert_eq!(update.stats.best_move_count, None);
        assert_eq!(update.stats.average_moves, 0.0);
        assert_eq!(update.stats.unique_actors_found.len(), 2);
        assert!(update.stats.movies_watched.contains(&100));
    }

    #[test]
    fn test_discovered_sets_only_grow() {
        let first = CompletedGame::loss(3).with_actors(vec![Actor::new(1, "A"), Actor::new(2, "B")]);
        let second = CompletedGame::win(3, None).with_actors(vec![Actor::new(2, "B")]);
        let stats = apply_game(&PlayerStats::default(), &first, day(1)).stats;
        let stats = apply_game(&stats, &second, day(1)).stats;
        assert_eq!(stats.unique_actors_found.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_win_without_difficulty_counts_in_no_tier() {
        let stats = play_wins(&[3]);
        assert_eq!(stats.easy_wins + stats.medium_wins + stats.hard_wins, 0);

        let update = apply_game(&stats, &CompletedGame::win(3, Some(Difficulty::Hard)), day(1));
        assert_eq!(update.stats.hard_wins, 1);
        assert_eq!(update.exp_gained, 62);
    }

    #[test]
    fn test_single_level_up() {
        let stats = PlayerStats {
            experience: 90,
            ..Default::default()
        };
        let update = apply_game(&stats, &CompletedGame::win(6, None), day(1));
        assert_eq!(update.levels_gained, 1);
        assert_eq!(update.stats.level, 2);
        assert_eq!(update.stats.experience, 0);
        assert_eq!(update.stats.next_level_exp, 120);
    }

    #[test]
    fn test_multi_level_jump_resolves_fully() {
        let mut stats = PlayerStats::default();
        let levels = gain_experience(&mut stats, 100 + 120 + 144 + 10);
        assert_eq!(levels, 3);
        assert_eq!(stats.level, 4);
        assert_eq!(stats.experience, 10);
        assert_eq!(stats.next_level_exp, 172);
        assert!(stats.experience < stats.next_level_exp);
    }

    #[test]
    fn test_experience_stays_below_threshold() {
        let mut stats = PlayerStats::default();
        for i in 0..200 {
            let difficulty = Difficulty::all()[i % 3];
            stats = apply_game(&stats, &CompletedGame::win(1 + (i as u32 % 7), Some(difficulty)), day(1)).stats;
            assert!(stats.experience < stats.next_level_exp);
        }
        assert!(stats.level > 10);
    }

    #[test]
    fn test_next_threshold_floors() {
        assert_eq!(next_threshold(100), 120);
        assert_eq!(next_threshold(120), 144);
        assert_eq!(next_threshold(144), 172);
        assert_eq!(next_threshold(172), 206);
    }

    #[test]
    fn test_streak_extends_from_yesterday() {
        let stats = PlayerStats {
            last_play_date: Some(day(9)),
            current_streak: 4,
            longest_streak: 4,
            ..Default::default()
        };
        let update = apply_game(&stats, &CompletedGame::loss(5), day(10));
        assert_eq!(update.streak, StreakChange::Extended);
        assert_eq!(update.stats.current_streak, 5);
        assert_eq!(update.stats.longest_streak, 5);
        assert_eq!(update.stats.last_play_date, Some(day(10)));
    }

    #[test]
    fn test_streak_keeps_longer_longest() {
        let stats = PlayerStats {
            last_play_date: Some(day(9)),
            current_streak: 4,
            longest_streak: 12,
            ..Default::default()
        };
        let update = apply_game(&stats, &CompletedGame::loss(5), day(10));
        assert_eq!(update.stats.current_streak, 5);
        assert_eq!(update.stats.longest_streak, 12);
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let stats = PlayerStats {
            last_play_date: Some(day(7)),
            current_streak: 4,
            longest_streak: 4,
            ..Default::default()
        };
        let update = apply_game(&stats, &CompletedGame::win(3, None), day(10));
        assert_eq!(update.streak, StreakChange::Started);
        assert_eq!(update.stats.current_streak, 1);
        assert_eq!(update.stats.longest_streak, 4);
    }

    #[test]
    fn test_same_day_replay_does_not_inflate_streak() {
        let first = apply_game(&PlayerStats::default(), &CompletedGame::loss(4), day(3));
        assert_eq!(first.streak, StreakChange::Started);
        let second = apply_game(&first.stats, &CompletedGame::loss(4), day(3));
        assert_eq!(second.streak, StreakChange::Unchanged);
        assert_eq!(second.stats.current_streak, 1);
        assert_eq!(second.stats.games_today, 2);

        let next_day = apply_game(&second.stats, &CompletedGame::loss(4), day(4));
        assert_eq!(next_day.stats.current_streak, 2);
        assert_eq!(next_day.stats.games_today, 1);
    }

    #[test]
    fn test_streak_across_month_boundary() {
        let stats = PlayerStats {
            last_play_date: NaiveDate::from_ymd_opt(2024, 5, 31),
            current_streak: 2,
            longest_streak: 2,
            ..Default::default()
        };
        let update = apply_game(&stats, &CompletedGame::loss(4), day(1));
        assert_eq!(update.stats.current_streak, 3);
    }
}
