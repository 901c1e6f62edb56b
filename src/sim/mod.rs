//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual millisecond clock driven only by `GameSession::advance`
//! - Seeded RNG only
//! - No rendering, file or platform dependencies

pub mod clock;
pub mod collision;
pub mod fruit;
pub mod schedule;
pub mod session;
pub mod spawn;
pub mod state;

pub use clock::GameClock;
pub use collision::{Aabb, fruit_hits_player, out_of_bounds, sword_hits, wall_blocks};
pub use fruit::{Fruit, FruitId, IconSegment};
pub use schedule::{Scheduler, TimerHandle};
pub use session::{Direction, GameSession, InputEvent, SessionStats};
pub use spawn::{FruitColor, SpawnProbabilities, choose_fruit_type, spawn_probabilities};
pub use state::{
    FruitView, LevelLayout, Outcome, Player, SessionConfig, SessionPhase, SessionSnapshot, Sword,
};
