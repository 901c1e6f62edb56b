//! Player profile with level unlock progress
//!
//! Stored as a small JSON object next to the game. A missing or unreadable
//! profile is never fatal: the player simply starts from level 1.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::MAX_LEVEL;
use crate::error::{GameError, Result};

/// Default profile file name
pub const PROFILE_FILE: &str = "user_profile.json";

fn first_level() -> u32 {
    1
}

/// Persisted progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Highest level the player may select
    #[serde(default = "first_level")]
    pub highest_level: u32,
    /// Keys written by other tools, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            highest_level: first_level(),
            extra: Map::new(),
        }
    }
}

impl Profile {
    /// Load from `path`, falling back to a fresh profile on any failure
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No profile at {}, starting fresh", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read profile {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Profile>(&json) {
            Ok(mut profile) => {
                profile.highest_level = profile.highest_level.max(1);
                log::info!(
                    "Loaded profile {} (highest level {})",
                    path.display(),
                    profile.highest_level
                );
                profile
            }
            Err(e) => {
                log::warn!("Corrupt profile {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write to `path` atomically (temp file, then rename over the target)
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        let tmp = tmp_path(path);
        let write_err = |source| GameError::ProfileWrite {
            path: path.to_path_buf(),
            source,
        };
        fs::write(&tmp, json).map_err(write_err)?;
        if let Err(e) = fs::rename(&tmp, path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                log::warn!("Could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(write_err(e));
        }
        log::info!(
            "Profile saved to {} (highest level {})",
            path.display(),
            self.highest_level
        );
        Ok(())
    }

    /// Record completion of `completed_level`
    ///
    /// Only a level at or above the current frontier unlocks anything, and
    /// nothing past the last level is ever unlocked. Returns true on change.
    pub fn unlock_next(&mut self, completed_level: u32) -> bool {
        if completed_level >= self.highest_level && completed_level < MAX_LEVEL {
            self.highest_level = completed_level + 1;
            log::info!("Unlocked level {}", self.highest_level);
            true
        } else {
            false
        }
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        (1..=self.highest_level).contains(&level)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(PROFILE_FILE));
    name.push(".tmp");
    path.with_file_name(name)
}
