//! Level selection
//!
//! The menu is the only gate on level numbers: the session never sees a level
//! outside 1-20 or above the unlocked frontier.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;
use crate::error::{GameError, Result};
use crate::profile::Profile;

/// One menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub level: u32,
    pub unlocked: bool,
}

/// Every level with its lock state
pub fn level_entries(profile: &Profile) -> Vec<LevelEntry> {
    (1..=MAX_LEVEL)
        .map(|level| LevelEntry {
            level,
            unlocked: profile.is_unlocked(level),
        })
        .collect()
}

/// Accept `level` if it exists and is unlocked
pub fn select_level(profile: &Profile, level: u32) -> Result<u32> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return Err(GameError::LevelOutOfRange { level });
    }
    if !profile.is_unlocked(level) {
        return Err(GameError::LevelLocked {
            level,
            highest: profile.highest_level,
        });
    }
    Ok(level)
}
