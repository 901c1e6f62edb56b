//! Scripted player for headless runs
//!
//! Reads only the session snapshot and answers with the same input events a
//! keyboard and mouse would produce: swat the closest fruit in reach, and
//! otherwise walk greedily toward the end tile.

use glam::Vec2;

use crate::consts::{FRUIT_RADIUS, PLAYER_MARGIN, SWORD_LENGTH};
use crate::sim::{Direction, InputEvent, Player, SessionConfig, SessionSnapshot, wall_blocks};

/// Frames between two steps toward the goal
const STEP_EVERY_FRAMES: u64 = 4;

#[derive(Debug, Clone)]
pub struct Autopilot {
    config: SessionConfig,
    frame: u64,
    /// Last step taken, never immediately undone
    last_dir: Option<Direction>,
}

impl Autopilot {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            frame: 0,
            last_dir: None,
        }
    }

    /// Inputs for the current frame
    pub fn inputs(&mut self, snapshot: &SessionSnapshot) -> Vec<InputEvent> {
        self.frame += 1;
        let mut inputs = Vec::new();

        let reach = SWORD_LENGTH + FRUIT_RADIUS;
        let nearest = snapshot
            .fruits
            .iter()
            .map(|f| (f.pos, f.pos.distance(snapshot.player)))
            .filter(|&(_, dist)| dist <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((target, _)) = nearest {
            inputs.push(InputEvent::PointerMoved {
                x: target.x,
                y: target.y,
            });
            if !snapshot.sword_active {
                inputs.push(InputEvent::PrimaryAction);
            }
        }

        if self.frame % STEP_EVERY_FRAMES == 0 {
            if let Some(dir) = self.next_step(snapshot) {
                self.last_dir = Some(dir);
                inputs.push(InputEvent::Direction(dir));
            }
        }

        inputs
    }

    /// Greedy step toward the end tile, preferring the longer axis
    fn next_step(&self, snapshot: &SessionSnapshot) -> Option<Direction> {
        let goal = snapshot.end?;
        let delta = goal - snapshot.player;

        let horizontal = if delta.x >= 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        let vertical = if delta.y >= 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        let (primary, secondary) = if delta.x.abs() >= delta.y.abs() {
            (horizontal, vertical)
        } else {
            (vertical, horizontal)
        };

        [primary, secondary, opposite(secondary), opposite(primary)]
            .into_iter()
            .filter(|&dir| Some(opposite(dir)) != self.last_dir)
            .find(|&dir| self.can_step(snapshot, dir))
    }

    fn can_step(&self, snapshot: &SessionSnapshot, dir: Direction) -> bool {
        let step = self.config.move_step;
        let offset = match dir {
            Direction::Up => Vec2::new(0.0, -step),
            Direction::Down => Vec2::new(0.0, step),
            Direction::Left => Vec2::new(-step, 0.0),
            Direction::Right => Vec2::new(step, 0.0),
        };
        let lo = Vec2::splat(PLAYER_MARGIN);
        let hi = Vec2::new(
            self.config.width - PLAYER_MARGIN,
            self.config.height - PLAYER_MARGIN,
        );
        let dest = (snapshot.player + offset).clamp(lo, hi);
        dest != snapshot.player && !wall_blocks(&Player::bbox_at(dest), &snapshot.walls)
    }
}

fn opposite(dir: Direction) -> Direction {
    match dir {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
    }
}
