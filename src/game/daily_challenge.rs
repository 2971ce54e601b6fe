//! Daily challenge mode.
//!
//! Each calendar day has one movie pair, picked deterministically from the
//! bundled list. A player records at most one result per day (a resubmission
//! overwrites it), and every submission also lands as an anonymous entry on
//! that day's leaderboard.
//!
//! `check_new_day` must run before any other read so a result from a previous
//! day is never reported as today's.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use chrono::{NaiveDate, Timelike};
use itertools::Itertools;
use log::{info, warn};
use uuid::Uuid;

use super::challenge_pairs::bundled_pairs;
use super::clock::Clock;
use super::settings::Settings;
use crate::helpers::{date_key, days_since_epoch, mean, parse_date_key};
use crate::metadata::MovieMetadata;
use crate::model::{
    DailyChallengeResult, DailyUserStats, LeaderboardEntry, MoviePair, MovieRecord, PathNode,
};
use crate::store::{codec, keys, KeyValueStore};

pub const DEFAULT_HISTORY_DAYS: usize = 30;
pub const DEFAULT_LEADERBOARD_SIZE: usize = 100;

/// Leaderboard buckets keyed by `YYYY-MM-DD`.
pub type Leaderboard = BTreeMap<String, Vec<LeaderboardEntry>>;

pub struct DailyChallengeService {
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    pairs: Vec<MoviePair>,
    history_days: usize,
    leaderboard_size: usize,
}

impl DailyChallengeService {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            pairs: bundled_pairs(),
            history_days: DEFAULT_HISTORY_DAYS,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.history_days = settings.history_days.max(1);
        self.leaderboard_size = settings.leaderboard_size.max(1);
        self
    }

    /// Replaces the bundled pair list. An empty list is ignored.
    pub fn with_pairs(mut self, pairs: Vec<MoviePair>) -> Self {
        if pairs.is_empty() {
            warn!(target: "daily_challenge", "Ignoring empty challenge list");
        } else {
            self.pairs = pairs;
        }
        self
    }

    pub fn challenge_for(&self, date: NaiveDate) -> &MoviePair {
        let index = days_since_epoch(date).rem_euclid(self.pairs.len() as i64) as usize;
        &self.pairs[index]
    }

    pub fn todays_challenge(&self) -> MoviePair {
        self.challenge_for(self.clock.today()).clone()
    }

    /// Today's pair with live cast lists; a failed lookup keeps the bundled
    /// cast for that movie.
    pub fn todays_challenge_hydrated(&self, metadata: &dyn MovieMetadata) -> MoviePair {
        let pair = self.todays_challenge();
        MoviePair {
            start: hydrate(pair.start, metadata),
            target: hydrate(pair.target, metadata),
        }
    }

    /// Clears a stale "today's result" when the date has rolled over. Returns
    /// true on a new day.
    pub fn check_new_day(&self) -> bool {
        let today = date_key(self.clock.today());
        let last_check: Option<String> = codec::load(self.store.as_ref(), keys::LAST_DAILY_CHECK)
            .unwrap_or_else(|e| {
                warn!(target: "daily_challenge", "Unreadable day marker: {}", e);
                None
            });
        if last_check.as_deref() == Some(today.as_str()) {
            return false;
        }

        info!(target: "daily_challenge", "New challenge day {}", today);
        if let Err(e) = self.store.remove(keys::DAILY_CHALLENGE_RESULT) {
            log::error!(target: "daily_challenge", "Failed to clear previous result: {}", e);
        }
        codec::save_logged(self.store.as_ref(), keys::LAST_DAILY_CHECK, &today);
        true
    }

    pub fn get_todays_result(&self) -> Option<DailyChallengeResult> {
        let result: Option<DailyChallengeResult> =
            codec::load_or_default(self.store.as_ref(), keys::DAILY_CHALLENGE_RESULT);
        result.filter(|result| result.date == self.clock.today())
    }

    pub fn has_completed_today(&self) -> bool {
        self.get_todays_result().is_some()
    }

    pub fn submit_result(
        &self,
        moves: u32,
        time_taken: Duration,
        path: Vec<PathNode>,
    ) -> DailyChallengeResult {
        let today = self.clock.today();
        let completed_at = self.clock.now();
        let entry = LeaderboardEntry {
            id: Uuid::new_v4(),
            moves,
            time_taken,
            completed_at,
            rank: 0,
        };
        let result = DailyChallengeResult {
            date: today,
            moves,
            time_taken,
            path,
            completed_at,
            leaderboard_id: Some(entry.id),
        };

        codec::save_logged(self.store.as_ref(), keys::DAILY_CHALLENGE_RESULT, &result);

        let history = merge_into_history(self.get_history(), result.clone(), self.history_days);
        codec::save_logged(self.store.as_ref(), keys::CHALLENGE_HISTORY, &history);

        let mut leaderboard = self.load_leaderboard();
        let bucket = leaderboard.remove(&date_key(today)).unwrap_or_default();
        leaderboard.insert(
            date_key(today),
            insert_entry(bucket, entry, self.leaderboard_size),
        );
        prune_leaderboard(&mut leaderboard, today, self.history_days);
        codec::save_logged(self.store.as_ref(), keys::GLOBAL_LEADERBOARD, &leaderboard);

        info!(
            target: "daily_challenge",
            "Recorded daily result for {}: {} moves in {}s",
            result.date,
            moves,
            time_taken.as_secs()
        );
        result
    }

    pub fn get_todays_leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.load_leaderboard()
            .remove(&date_key(self.clock.today()))
            .unwrap_or_default()
    }

    pub fn rank_of(&self, entry_id: Uuid) -> Option<u32> {
        self.get_todays_leaderboard()
            .iter()
            .find(|entry| entry.id == entry_id)
            .map(|entry| entry.rank)
    }

    /// Most recent first.
    pub fn get_history(&self) -> Vec<DailyChallengeResult> {
        codec::load_or_default(self.store.as_ref(), keys::CHALLENGE_HISTORY)
    }

    pub fn get_user_stats(&self) -> DailyUserStats {
        user_stats_from_history(&self.get_history(), self.clock.today())
    }

    pub fn time_until_next_challenge(&self) -> Duration {
        let elapsed = self.clock.time_of_day().num_seconds_from_midnight() as u64;
        Duration::from_secs(86_400u64.saturating_sub(elapsed))
    }

    fn load_leaderboard(&self) -> Leaderboard {
        codec::load_or_default(self.store.as_ref(), keys::GLOBAL_LEADERBOARD)
    }
}

fn hydrate(movie: MovieRecord, metadata: &dyn MovieMetadata) -> MovieRecord {
    match metadata.actors_for_movie(movie.id) {
        Ok(actors) if !actors.is_empty() => movie.with_actors(actors),
        Ok(_) => movie,
        Err(e) => {
            warn!(target: "daily_challenge", "Using bundled cast for {}: {}", movie.title, e);
            movie
        }
    }
}

/// One result per date, newest date first, at most `capacity` dates.
pub fn merge_into_history(
    history: Vec<DailyChallengeResult>,
    result: DailyChallengeResult,
    capacity: usize,
) -> Vec<DailyChallengeResult> {
    std::iter::once(result)
        .chain(history)
        .unique_by(|entry| entry.date)
        .sorted_by(|a, b| b.date.cmp(&a.date))
        .take(capacity)
        .collect()
}

/// Adds `entry` to a date bucket, re-sorts by (moves, time), re-ranks every
/// entry by position and truncates.
pub fn insert_entry(
    bucket: Vec<LeaderboardEntry>,
    entry: LeaderboardEntry,
    capacity: usize,
) -> Vec<LeaderboardEntry> {
    bucket
        .into_iter()
        .chain(std::iter::once(entry))
        .sorted_by_key(|entry| (entry.moves, entry.time_taken))
        .take(capacity)
        .enumerate()
        .map(|(position, entry)| LeaderboardEntry {
            rank: position as u32 + 1,
            ..entry
        })
        .collect()
}

/// Drops buckets for dates that have fallen out of the history window.
fn prune_leaderboard(leaderboard: &mut Leaderboard, today: NaiveDate, window_days: usize) {
    let Some(oldest) = today.checked_sub_days(chrono::Days::new(window_days as u64)) else {
        return;
    };
    leaderboard.retain(|key, _| parse_date_key(key).is_some_and(|date| date > oldest));
}

/// Derives daily challenge stats from the history alone.
pub fn user_stats_from_history(history: &[DailyChallengeResult], today: NaiveDate) -> DailyUserStats {
    if history.is_empty() {
        return DailyUserStats::default();
    }

    let newest_first: Vec<&DailyChallengeResult> =
        history.iter().sorted_by(|a, b| b.date.cmp(&a.date)).collect();

    DailyUserStats {
        total_completed: history.len(),
        average_moves: mean(history.iter().map(|r| r.moves as f64)),
        best_moves: history.iter().map(|r| r.moves).min().unwrap_or(0),
        average_time: mean(history.iter().map(|r| r.time_taken.as_secs_f64())),
        best_time: history
            .iter()
            .map(|r| r.time_taken)
            .min()
            .map_or(0.0, |best| best.as_secs_f64()),
        current_streak: strict_current_streak(&newest_first, today),
        longest_streak: longest_run(&newest_first),
    }
}

/// Entry `i` (newest first) must be exactly `today - i`; the first mismatch
/// ends the streak, so a missing today means zero.
fn strict_current_streak(newest_first: &[&DailyChallengeResult], today: NaiveDate) -> u32 {
    newest_first
        .iter()
        .enumerate()
        .take_while(|(i, result)| {
            today.checked_sub_days(chrono::Days::new(*i as u64)) == Some(result.date)
        })
        .count() as u32
}

fn longest_run(newest_first: &[&DailyChallengeResult]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for result in newest_first {
        run = match previous {
            Some(later) if later.pred_opt() == Some(result.date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(result.date);
    }
    longest
}
