//! Fruit enemies and their pursuit movement

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::spawn::FruitColor;
use crate::consts::{FRUIT_BASE_SPEED, FRUIT_RADIUS};

/// Unique identifier assigned to a fruit within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FruitId(u32);

impl FruitId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// A line segment drawn on top of the fruit, relative to its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconSegment {
    pub from: Vec2,
    pub to: Vec2,
}

/// Small sword icon: a vertical blade and a short guard below the centre
const ICON: [IconSegment; 2] = [
    IconSegment {
        from: Vec2::new(0.0, -10.0),
        to: Vec2::new(0.0, 10.0),
    },
    IconSegment {
        from: Vec2::new(-5.0, 5.0),
        to: Vec2::new(5.0, 5.0),
    },
];

/// A fruit entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub id: FruitId,
    pub pos: Vec2,
    pub color: FruitColor,
    /// Sword hits left before the fruit is destroyed
    pub hp: u32,
    /// Distance covered per step
    pub speed: f32,
}

impl Fruit {
    /// Create a fruit centred on `pos`, with speed scaled by `level`
    pub fn new(id: FruitId, level: u32, pos: Vec2, color: FruitColor, hits: u32) -> Self {
        Self {
            id,
            pos,
            color,
            hp: hits,
            speed: Self::speed_for_level(level),
        }
    }

    pub fn speed_for_level(level: u32) -> f32 {
        FRUIT_BASE_SPEED + level as f32
    }

    /// Step straight at `target`, re-aimed every call
    ///
    /// Returns the displacement applied. A fruit already on the target moves by
    /// zero (the distance is taken as 1 to keep the division finite).
    pub fn move_toward(&mut self, target: Vec2) -> Vec2 {
        let delta = target - self.pos;
        let mut dist = delta.length();
        if dist == 0.0 {
            dist = 1.0;
        }
        let step = delta / dist * self.speed;
        self.pos += step;
        step
    }

    /// Collision box
    pub fn bbox(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(FRUIT_RADIUS))
    }

    /// Apply one sword hit; returns true when the hit is lethal
    pub fn take_hit(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }

    /// Icon segments in world coordinates
    pub fn icon(&self) -> [IconSegment; 2] {
        ICON.map(|seg| IconSegment {
            from: self.pos + seg.from,
            to: self.pos + seg.to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fruit(level: u32, x: f32, y: f32) -> Fruit {
        Fruit::new(FruitId::new(1), level, Vec2::new(x, y), FruitColor::Green, 1)
    }

    #[test]
    fn test_speed_increases_with_level() {
        assert_eq!(fruit(1, 50.0, 0.0).speed, 3.0);
        assert_eq!(fruit(5, 50.0, 0.0).speed, 7.0);
    }

    #[test]
    fn test_move_uses_speed() {
        let mut f = fruit(2, 0.0, 0.0);
        let before = f.pos;
        f.move_toward(Vec2::new(100.0, 0.0));
        assert!(((f.pos - before).length() - f.speed).abs() < 1e-5);
        assert!(f.pos.y.abs() < 1e-6);
    }

    #[test]
    fn test_move_on_target_is_finite() {
        let mut f = fruit(3, 40.0, 40.0);
        let step = f.move_toward(Vec2::new(40.0, 40.0));
        assert_eq!(step, Vec2::ZERO);
        assert_eq!(f.pos, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_pursuit_reaims_each_step() {
        let mut f = fruit(1, 0.0, 0.0);
        f.move_toward(Vec2::new(100.0, 0.0));
        let step = f.move_toward(Vec2::new(3.0, 100.0));
        // Second step points (almost) straight down at the new target
        assert!(step.y > 2.9);
        assert!(step.x.abs() < 0.01);
    }

    #[test]
    fn test_icon_moves_with_fruit() {
        let mut f = fruit(1, 0.0, 0.0);
        let before = f.icon();
        f.move_toward(Vec2::new(50.0, 0.0));
        let after = f.icon();
        for (b, a) in before.iter().zip(after.iter()) {
            assert!(((a.from - b.from).length() - f.speed).abs() < 1e-5);
            assert!(((a.to - b.to).length() - f.speed).abs() < 1e-5);
        }
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_take_hit_counts_down() {
        let mut f = Fruit::new(FruitId::new(9), 1, Vec2::ZERO, FruitColor::Purple, 2);
        assert!(!f.take_hit());
        assert_eq!(f.hp, 1);
        assert!(f.take_hit());
        assert_eq!(f.hp, 0);
    }

    proptest! {
        #[test]
        fn prop_speed_is_base_plus_level(level in 1u32..=20) {
            prop_assert_eq!(Fruit::speed_for_level(level), 2.0 + level as f32);
        }
    }
}
