//! Sword Levels - defend your base against fruit with a sword
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, pursuit, collisions, session state machine)
//! - `map`: ASCII level maps
//! - `profile`: Persisted unlock progress
//! - `settings`: Playfield and round configuration
//! - `menu` / `app`: Level selection and the menu <-> session lifecycle
//! - `autopilot`: Scripted player used by the headless runner

pub mod app;
pub mod autopilot;
pub mod error;
pub mod map;
pub mod menu;
pub mod profile;
pub mod settings;
pub mod sim;

pub use app::App;
pub use error::{GameError, Result};
pub use profile::Profile;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Highest level shipped with the game
    pub const MAX_LEVEL: u32 = 20;

    /// Side length of one map cell in world units
    pub const CELL_SIZE: f32 = 40.0;

    /// Default playfield dimensions
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Player half-extent (render and collision box are 20x20)
    pub const PLAYER_HALF_EXTENT: f32 = 10.0;
    /// Player centre is kept this far from the playfield edges
    pub const PLAYER_MARGIN: f32 = 10.0;
    /// Distance covered by one direction press
    pub const MOVE_STEP: f32 = 20.0;
    /// Lives at the start of every level
    pub const START_LIVES: u32 = 1000;

    /// Initial sword length (tip straight above the player)
    pub const SWORD_LENGTH: f32 = 100.0;
    /// How long the sword stays lethal after a swing
    pub const SWORD_ACTIVE_MS: u64 = 100;

    /// Fruit collision radius (box is 30x30)
    pub const FRUIT_RADIUS: f32 = 15.0;
    /// Fruit speed per step is FRUIT_BASE_SPEED + level
    pub const FRUIT_BASE_SPEED: f32 = 2.0;
    /// Interval between two steps of one fruit
    pub const FRUIT_STEP_MS: u64 = 50;

    /// Round length
    pub const ROUND_DURATION_MS: u64 = 60 * 1000;
    /// Countdown resolution
    pub const COUNTDOWN_STEP_MS: u64 = 1000;
    /// No new fruit once less than this much time remains
    pub const SPAWN_CUTOFF_MS: u64 = 10_000;
    /// Spawn interval is max(SPAWN_BASE_INTERVAL_MS - level * SPAWN_INTERVAL_STEP_MS, SPAWN_MIN_INTERVAL_MS)
    pub const SPAWN_BASE_INTERVAL_MS: u64 = 1000;
    pub const SPAWN_INTERVAL_STEP_MS: u64 = 50;
    pub const SPAWN_MIN_INTERVAL_MS: u64 = 200;
}

/// Interval between two spawns on `level`
#[inline]
pub fn spawn_interval_ms(level: u32) -> u64 {
    use consts::*;
    SPAWN_BASE_INTERVAL_MS
        .saturating_sub(level as u64 * SPAWN_INTERVAL_STEP_MS)
        .max(SPAWN_MIN_INTERVAL_MS)
}

/// Format milliseconds as `MM:SS` of whole seconds
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_interval_floor() {
        assert_eq!(spawn_interval_ms(1), 950);
        assert_eq!(spawn_interval_ms(10), 500);
        assert_eq!(spawn_interval_ms(16), 200);
        assert_eq!(spawn_interval_ms(20), 200);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(60_000), "01:00");
        assert_eq!(format_clock(59_999), "00:59");
        assert_eq!(format_clock(9_000), "00:09");
        assert_eq!(format_clock(0), "00:00");
    }
}
