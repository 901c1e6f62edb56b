//! Timer-driven game session
//!
//! Three periodic activities run on the session's timer queue once playing:
//! the countdown (every second), the spawner (level-scaled interval) and one
//! movement chain per fruit (every 50 ms). Every handler is a no-op once the
//! session has left `Playing`, so timers queued before a terminal transition
//! simply fall through when they come due.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::GameClock;
use super::collision::{fruit_hits_player, out_of_bounds, sword_hits, wall_blocks};
use super::fruit::{Fruit, FruitId};
use super::schedule::{Scheduler, TimerHandle};
use super::spawn::choose_fruit_type;
use super::state::{
    FruitView, LevelLayout, Outcome, Player, SessionConfig, SessionPhase, SessionSnapshot, Sword,
};
use crate::consts::*;
use crate::spawn_interval_ms;

/// Arrow directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Device-independent input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer position in world coordinates (aims the sword)
    PointerMoved { x: f32, y: f32 },
    /// Swing
    PrimaryAction,
    /// Step the player
    Direction(Direction),
    /// Lose a life (debug hook)
    SecondaryAction,
    /// Abandon the level
    Cancel,
}

/// Work queued on the session's timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Countdown,
    Spawn,
    StepFruit(FruitId),
    SheatheSword,
}

/// Running tallies for logging and the end screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub spawned: u32,
    pub destroyed: u32,
    pub collided: u32,
    pub escaped: u32,
}

/// One attempt at one level
pub struct GameSession {
    config: SessionConfig,
    level: u32,
    layout: LevelLayout,
    phase: SessionPhase,
    player: Player,
    sword: Sword,
    /// Pending deactivation for the latest swing
    sword_timer: Option<TimerHandle>,
    /// Active fruit, in spawn order
    fruits: Vec<Fruit>,
    clock: GameClock,
    timers: Scheduler<Timer>,
    rng: Pcg32,
    next_fruit_id: u32,
    stats: SessionStats,
}

impl GameSession {
    /// Build an idle session for `level` on `layout`
    pub fn new(level: u32, layout: LevelLayout, config: SessionConfig) -> Self {
        let start = layout.start.unwrap_or_else(|| config.default_start());
        Self {
            level,
            phase: SessionPhase::Idle,
            player: Player::new(start, config.start_lives),
            sword: Sword::new(start),
            sword_timer: None,
            fruits: Vec::new(),
            clock: GameClock::new(config.round_duration_ms),
            timers: Scheduler::new(),
            rng: Pcg32::seed_from_u64(config.seed),
            next_fruit_id: 1,
            stats: SessionStats::default(),
            layout,
            config,
        }
    }

    /// Enter `Playing`: first fruit immediately, countdown after one second
    pub fn start(&mut self) {
        if self.phase != SessionPhase::Idle {
            return;
        }
        self.phase = SessionPhase::Playing;
        log::info!(
            "Level {} started: seed {}, {} walls, player at {}, fruit from {}",
            self.level,
            self.config.seed,
            self.layout.walls.len(),
            self.player.pos,
            self.spawn_point()
        );
        self.spawn_fruit();
        self.timers.schedule(COUNTDOWN_STEP_MS, Timer::Countdown);
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    /// Route one input event
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => self.pointer_moved(Vec2::new(x, y)),
            InputEvent::PrimaryAction => self.swing_sword(),
            InputEvent::Direction(dir) => {
                let step = self.config.move_step;
                let (dx, dy) = match dir {
                    Direction::Up => (0.0, -step),
                    Direction::Down => (0.0, step),
                    Direction::Left => (-step, 0.0),
                    Direction::Right => (step, 0.0),
                };
                self.move_player(dx, dy);
            }
            InputEvent::SecondaryAction => self.lose_life(),
            InputEvent::Cancel => self.quit(),
        }
    }

    /// Run every timer due within the next `dt_ms`
    pub fn advance(&mut self, dt_ms: u64) {
        let deadline = self.timers.now_ms() + dt_ms;
        while let Some(timer) = self.timers.pop_due(deadline) {
            match timer {
                Timer::Countdown => self.countdown(),
                Timer::Spawn => self.spawn_fruit(),
                Timer::StepFruit(id) => self.step_fruit(id),
                Timer::SheatheSword => self.sheathe_sword(),
            }
        }
        self.timers.advance_to(deadline);
    }

    /// Re-aim the sword at the pointer
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        if !self.is_playing() {
            return;
        }
        self.sword.aim(pointer);
    }

    /// Move the player by `(dx, dy)`, clamped to the playfield
    ///
    /// A move whose clamped destination touches a wall is rejected outright.
    /// Returns true if the player moved.
    pub fn move_player(&mut self, dx: f32, dy: f32) -> bool {
        if !self.is_playing() {
            return false;
        }

        let old = self.player.pos;
        let lo = Vec2::splat(PLAYER_MARGIN);
        let hi = Vec2::new(
            self.config.width - PLAYER_MARGIN,
            self.config.height - PLAYER_MARGIN,
        );
        let new = (old + Vec2::new(dx, dy)).clamp(lo, hi);

        if wall_blocks(&Player::bbox_at(new), &self.layout.walls) {
            log::debug!("Move to {} blocked by wall", new);
            return false;
        }

        // Actual delta may be shorter than requested at the edges
        let actual = new - old;
        self.player.pos = new;
        self.sword.translate(actual);

        self.check_level_complete();
        true
    }

    fn check_level_complete(&mut self) {
        let Some(end) = self.layout.end else {
            return;
        };
        let offset = (self.player.pos - end).abs();
        let reach = (CELL_SIZE / 2.0).floor();
        if offset.x <= reach && offset.y <= reach {
            self.finish(SessionPhase::Completed);
        }
    }

    /// Make the sword lethal for the next 100 ms
    ///
    /// A swing inside an open window restarts it: the earlier deactivation is
    /// cancelled so it cannot cut the new window short.
    pub fn swing_sword(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.sword.active = true;
        if let Some(pending) = self.sword_timer.take() {
            self.timers.cancel(pending);
        }
        self.sword_timer = Some(self.timers.schedule(SWORD_ACTIVE_MS, Timer::SheatheSword));
    }

    fn sheathe_sword(&mut self) {
        self.sword_timer = None;
        if !self.is_playing() {
            return;
        }
        self.sword.active = false;
    }

    /// Lose one life; running out ends the session
    pub fn lose_life(&mut self) {
        if !self.is_playing() || self.player.lives == 0 {
            return;
        }
        self.player.lives -= 1;
        log::debug!("Life lost, {} left", self.player.lives);
        if self.player.lives == 0 {
            self.finish(SessionPhase::OutOfLives);
        }
    }

    /// Abandon the level
    pub fn quit(&mut self) {
        self.finish(SessionPhase::Quit);
    }

    fn countdown(&mut self) {
        if !self.is_playing() {
            return;
        }
        if self.clock.tick() {
            self.finish(SessionPhase::TimedOut);
        } else {
            self.timers.schedule(COUNTDOWN_STEP_MS, Timer::Countdown);
        }
    }

    fn spawn_point(&self) -> Vec2 {
        self.layout
            .end
            .unwrap_or_else(|| self.config.default_spawn_point())
    }

    /// Spawn one fruit and queue the next spawn
    ///
    /// Once less than the cutoff remains nothing spawns and nothing is
    /// rescheduled, so spawning stops for good.
    fn spawn_fruit(&mut self) {
        if !self.is_playing() || !self.clock.spawn_allowed() {
            return;
        }

        let (color, hits) = choose_fruit_type(self.level, &mut self.rng);
        let id = FruitId::new(self.next_fruit_id);
        self.next_fruit_id += 1;
        self.fruits
            .push(Fruit::new(id, self.level, self.spawn_point(), color, hits));
        self.stats.spawned += 1;
        log::debug!("Spawned fruit {} ({}, {} hp)", id.get(), color.as_str(), hits);

        self.step_fruit(id);

        if self.is_playing() {
            self.timers
                .schedule(spawn_interval_ms(self.level), Timer::Spawn);
        }
    }

    /// Move one fruit toward the player and resolve its collisions
    ///
    /// Checks run sword, then player, then bounds. A fruit that survives all
    /// three queues its next step; a removed fruit's chain ends here.
    fn step_fruit(&mut self, id: FruitId) {
        if !self.is_playing() {
            return;
        }
        let Some(idx) = self.fruits.iter().position(|f| f.id == id) else {
            return;
        };

        let target = self.player.pos;
        let fruit = &mut self.fruits[idx];
        fruit.move_toward(target);

        if sword_hits(&self.sword, fruit) && fruit.take_hit() {
            self.fruits.remove(idx);
            self.stats.destroyed += 1;
            log::debug!("Fruit {} destroyed", id.get());
            return;
        }

        if fruit_hits_player(fruit, &self.player) {
            self.fruits.remove(idx);
            self.stats.collided += 1;
            log::debug!("Fruit {} reached the player", id.get());
            self.lose_life();
            return;
        }

        if out_of_bounds(fruit, &self.config.playfield()) {
            self.fruits.remove(idx);
            self.stats.escaped += 1;
            log::debug!("Fruit {} left the playfield", id.get());
            return;
        }

        self.timers.schedule(FRUIT_STEP_MS, Timer::StepFruit(id));
    }

    fn finish(&mut self, phase: SessionPhase) {
        if !self.is_playing() {
            return;
        }
        self.phase = phase;
        self.sword.active = false;
        log::info!(
            "{} (spawned {}, destroyed {}, collided {}, escaped {})",
            self.message(),
            self.stats.spawned,
            self.stats.destroyed,
            self.stats.collided,
            self.stats.escaped
        );
    }

    /// Player-facing description of the current phase
    pub fn message(&self) -> String {
        let level = self.level;
        match self.phase {
            SessionPhase::Idle => format!("Level {level} ready."),
            SessionPhase::Playing => format!("Level {level} in progress."),
            SessionPhase::Completed => format!("Level {level} complete!"),
            SessionPhase::TimedOut => format!("Time's up! Level {level} over."),
            SessionPhase::OutOfLives => format!("Out of lives! Level {level} over."),
            SessionPhase::Quit => format!("Level {level} abandoned."),
        }
    }

    /// Result once the session has ended
    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.is_terminal().then(|| Outcome {
            phase: self.phase,
            message: self.message(),
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.level,
            phase: self.phase,
            player: self.player.pos,
            sword_tip: self.sword.tip,
            sword_active: self.sword.active,
            lives: self.player.lives,
            time_label: self.clock.label(),
            fruits: self
                .fruits
                .iter()
                .map(|f| FruitView {
                    id: f.id,
                    pos: f.pos,
                    color: f.color,
                    hp: f.hp,
                    icon: f.icon(),
                })
                .collect(),
            walls: self.layout.walls.clone(),
            end: self.layout.end,
            outcome: self.outcome(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn sword(&self) -> &Sword {
        &self.sword
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn remaining_ms(&self) -> u64 {
        self.clock.remaining_ms()
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}
