//! Round countdown

use serde::{Deserialize, Serialize};

use crate::consts::{COUNTDOWN_STEP_MS, SPAWN_CUTOFF_MS};
use crate::format_clock;

/// Remaining round time, counted down in whole steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    remaining_ms: u64,
}

impl GameClock {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            remaining_ms: duration_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Take one countdown step; returns true once the round has run out
    pub fn tick(&mut self) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(COUNTDOWN_STEP_MS);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }

    /// New fruit may only appear while at least the cutoff remains
    pub fn spawn_allowed(&self) -> bool {
        self.remaining_ms >= SPAWN_CUTOFF_MS
    }

    /// `MM:SS` label for the HUD
    pub fn label(&self) -> String {
        format_clock(self.remaining_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_to_expiry() {
        let mut clock = GameClock::new(3000);
        assert!(!clock.tick());
        assert!(!clock.tick());
        assert!(clock.tick());
        assert_eq!(clock.remaining_ms(), 0);
        // Saturates rather than wrapping
        assert!(clock.tick());
    }

    #[test]
    fn test_partial_step_expires() {
        let mut clock = GameClock::new(1500);
        assert!(!clock.tick());
        assert!(clock.tick());
    }

    #[test]
    fn test_spawn_cutoff() {
        assert!(GameClock::new(10_000).spawn_allowed());
        assert!(!GameClock::new(9_999).spawn_allowed());
    }

    #[test]
    fn test_label() {
        assert_eq!(GameClock::new(60_000).label(), "01:00");
        assert_eq!(GameClock::new(75_000).label(), "01:15");
    }
}
