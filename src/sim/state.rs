//! Session state and core simulation types
//!
//! Every field of a session is always present; nothing is created lazily.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::fruit::{FruitId, IconSegment};
use super::spawn::FruitColor;
use crate::consts::*;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Built but not started
    Idle,
    /// Active gameplay
    Playing,
    /// Reached the end tile
    Completed,
    /// Countdown ran out
    TimedOut,
    /// Lives reached zero
    OutOfLives,
    /// Player cancelled
    Quit,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionPhase::Idle | SessionPhase::Playing)
    }
}

/// Immutable per-session configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub width: f32,
    pub height: f32,
    pub start_lives: u32,
    pub move_step: f32,
    pub round_duration_ms: u64,
    /// RNG seed for fruit types
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            start_lives: START_LIVES,
            move_step: MOVE_STEP,
            round_duration_ms: ROUND_DURATION_MS,
            seed: 0,
        }
    }
}

impl SessionConfig {
    /// The whole playfield as a box
    pub fn playfield(&self) -> Aabb {
        Aabb::new(0.0, 0.0, self.width, self.height)
    }

    /// Where the player starts when the map has no start tile
    pub fn default_start(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), self.height - 20.0)
    }

    /// Where fruit appear when the map has no end tile
    pub fn default_spawn_point(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), 0.0)
    }
}

/// Level geometry in world coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Centre of the start tile
    pub start: Option<Vec2>,
    /// Centre of the end tile (goal and fruit spawn point)
    pub end: Option<Vec2>,
    pub walls: Vec<Aabb>,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub lives: u32,
}

impl Player {
    pub fn new(pos: Vec2, lives: u32) -> Self {
        Self { pos, lives }
    }

    pub fn bbox(&self) -> Aabb {
        Self::bbox_at(self.pos)
    }

    /// Box the player would occupy at `pos`
    pub fn bbox_at(pos: Vec2) -> Aabb {
        Aabb::from_center(pos, Vec2::splat(PLAYER_HALF_EXTENT))
    }
}

/// Sword anchored at the player, pointing at `tip`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sword {
    pub base: Vec2,
    pub tip: Vec2,
    /// Lethal for a short window after each swing
    pub active: bool,
}

impl Sword {
    /// Sword held straight up
    pub fn new(base: Vec2) -> Self {
        Self {
            base,
            tip: base - Vec2::new(0.0, SWORD_LENGTH),
            active: false,
        }
    }

    /// Move base and tip together, keeping orientation
    pub fn translate(&mut self, delta: Vec2) {
        self.base += delta;
        self.tip += delta;
    }

    pub fn aim(&mut self, pointer: Vec2) {
        self.tip = pointer;
    }

    pub fn bbox(&self) -> Aabb {
        Aabb::from_segment(self.base, self.tip)
    }
}

/// Renderable view of a fruit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FruitView {
    pub id: FruitId,
    pub pos: Vec2,
    pub color: FruitColor,
    pub hp: u32,
    /// Sword icon drawn over the fruit, in world coordinates
    pub icon: [IconSegment; 2],
}

/// End-of-session result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub phase: SessionPhase,
    pub message: String,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub level: u32,
    pub phase: SessionPhase,
    pub player: Vec2,
    pub sword_tip: Vec2,
    pub sword_active: bool,
    pub lives: u32,
    /// Remaining time as `MM:SS`
    pub time_label: String,
    pub fruits: Vec<FruitView>,
    pub walls: Vec<Aabb>,
    pub end: Option<Vec2>,
    pub outcome: Option<Outcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(!SessionPhase::Idle.is_terminal());
        assert!(!SessionPhase::Playing.is_terminal());
        assert!(SessionPhase::Completed.is_terminal());
        assert!(SessionPhase::TimedOut.is_terminal());
        assert!(SessionPhase::OutOfLives.is_terminal());
        assert!(SessionPhase::Quit.is_terminal());
    }

    #[test]
    fn test_sword_translate_keeps_orientation() {
        let mut sword = Sword::new(Vec2::new(400.0, 300.0));
        assert_eq!(sword.tip, Vec2::new(400.0, 200.0));
        sword.translate(Vec2::new(20.0, -20.0));
        assert_eq!(sword.base, Vec2::new(420.0, 280.0));
        assert_eq!(sword.tip, Vec2::new(420.0, 180.0));
    }

    #[test]
    fn test_default_points() {
        let config = SessionConfig::default();
        assert_eq!(config.default_start(), Vec2::new(400.0, 580.0));
        assert_eq!(config.default_spawn_point(), Vec2::new(400.0, 0.0));
        assert_eq!(config.playfield(), Aabb::new(0.0, 0.0, 800.0, 600.0));
    }
}
