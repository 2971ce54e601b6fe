use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::daily_challenge::{DEFAULT_HISTORY_DAYS, DEFAULT_LEADERBOARD_SIZE};

const APP_DIR: &str = "cinemaze";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    /// Overrides the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_history_days")]
    pub history_days: usize,

    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Seeds the difficulty roll; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

// Helper functions for default values
fn default_version() -> u32 {
    2
}
fn default_history_days() -> usize {
    DEFAULT_HISTORY_DAYS
}
fn default_leaderboard_size() -> usize {
    DEFAULT_LEADERBOARD_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            data_dir: None,
            history_days: DEFAULT_HISTORY_DAYS,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            seed: None,
        }
    }
}

impl Settings {
    /// Loads settings from the default location, then applies environment
    /// overrides.
    pub fn load() -> Self {
        let mut settings = Self::load_from(&Self::settings_path());
        if let Some(seed) = Self::seed_from_env() {
            settings.seed = Some(seed);
        }
        settings
    }

    /// Missing or unreadable files yield defaults, which are written back.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    return settings;
                }
                Err(e) => warn!(target: "settings", "Ignoring unreadable {:?}: {}", path, e),
            }
        }
        let default = Settings::default();
        if let Err(e) = default.save_to(path) {
            warn!(target: "settings", "Could not write default settings: {}", e);
        }
        default
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Where the key-value store keeps its documents.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(Self::default_data_dir)
    }

    fn settings_path() -> PathBuf {
        Self::default_data_dir().join(SETTINGS_FILE)
    }

    fn default_data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os("CINEMAZE_DATA_DIR") {
            return PathBuf::from(dir);
        }
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join(APP_DIR);
        }
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".local/share").join(APP_DIR),
            None => PathBuf::from(format!(".{}", APP_DIR)),
        }
    }

    fn migrate(&mut self) {
        match self.version {
            0 | 1 => {
                // version 1 stored no limits; the serde defaults fill them in
                self.version = 2;
            }
            _ => (),
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}
