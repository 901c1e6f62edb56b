//! Game settings
//!
//! Persisted separately from the profile. Every field has a default, so a
//! partial file only overrides what it names.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::profile::PROFILE_FILE;
use crate::sim::SessionConfig;

/// Default settings file name
pub const SETTINGS_FILE: &str = "sword_levels.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Round ===
    pub start_lives: u32,
    /// Distance of one direction press
    pub move_step: f32,
    pub round_duration_ms: u64,

    // === Files ===
    /// Directory holding `example_map<N>.txt`
    pub maps_dir: PathBuf,
    pub profile_path: PathBuf,

    /// Fixed RNG seed (clock-derived when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,

            start_lives: START_LIVES,
            move_step: MOVE_STEP,
            round_duration_ms: ROUND_DURATION_MS,

            maps_dir: PathBuf::from("maps"),
            profile_path: PathBuf::from(PROFILE_FILE),

            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, using defaults if it is missing or invalid
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring invalid settings {}: {}", path.display(), e),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not read settings {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Immutable configuration for one session
    ///
    /// `seed_override` wins over the configured seed; with neither, the seed
    /// comes from the system clock.
    pub fn session_config(&self, seed_override: Option<u64>) -> SessionConfig {
        SessionConfig {
            width: self.width,
            height: self.height,
            start_lives: self.start_lives,
            move_step: self.move_step,
            round_duration_ms: self.round_duration_ms,
            seed: seed_override.or(self.seed).unwrap_or_else(clock_seed),
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
