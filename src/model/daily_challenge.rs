use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::{DurationSecondsWithFrac, TimestampMilliSeconds};
use uuid::Uuid;

use super::PathNode;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallengeResult {
    pub date: NaiveDate,
    pub moves: u32,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_taken: Duration,
    #[serde(default)]
    pub path: Vec<PathNode>,
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub completed_at: SystemTime,
    /// The anonymous leaderboard entry created for this submission.
    #[serde(default)]
    pub leaderboard_id: Option<Uuid>,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub moves: u32,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub time_taken: Duration,
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub completed_at: SystemTime,
    pub rank: u32,
}

/// Aggregates over the daily challenge history.
///
/// `current_streak` here only counts days with a submitted result, walking
/// back from today without tolerance for a missing today. It is unrelated to
/// [`PlayerStats::current_streak`](super::PlayerStats), which counts days with
/// any recorded game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUserStats {
    pub total_completed: usize,
    pub average_moves: f64,
    pub best_moves: u32,
    pub average_time: f64,
    /// Seconds.
    pub best_time: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
}
