//! Key-value persistence collaborator.
//!
//! Every persisted structure is a JSON document stored under one of the fixed
//! [`keys`]. Services hold the store as `Rc<dyn KeyValueStore>` so the
//! progression engine and the daily challenge tracker can share one backend.

pub mod codec;
mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

pub mod keys {
    pub const PLAYER_STATS: &str = "player_stats";
    pub const ACHIEVEMENTS: &str = "achievements";
    pub const DAILY_CHALLENGE_RESULT: &str = "dailyChallengeResult";
    pub const GLOBAL_LEADERBOARD: &str = "globalLeaderboard";
    pub const CHALLENGE_HISTORY: &str = "challengeHistory";
    pub const LAST_DAILY_CHECK: &str = "lastDailyCheck";
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
