//! Collision detection between the player, the sword, fruit and walls
//!
//! Everything is an axis-aligned box. Two boxes overlap unless they are
//! separated on some axis; touching edges count as separated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::fruit::Fruit;
use super::state::{Player, Sword};

/// Axis-aligned rectangle `(min.x, min.y)` to `(max.x, max.y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min: Vec2::new(x1, y1),
            max: Vec2::new(x2, y2),
        }
    }

    pub fn from_center(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Bounding box of a line segment (either endpoint order)
    pub fn from_segment(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x <= other.min.x
            || self.min.x >= other.max.x
            || self.max.y <= other.min.y
            || self.min.y >= other.max.y)
    }

    /// True when the box lies entirely beyond one side of `bounds`
    #[inline]
    pub fn is_outside(&self, bounds: &Aabb) -> bool {
        self.max.x < bounds.min.x
            || self.min.x > bounds.max.x
            || self.max.y < bounds.min.y
            || self.min.y > bounds.max.y
    }
}

/// Sword strike test; the caller applies the damage on `true`
pub fn sword_hits(sword: &Sword, fruit: &Fruit) -> bool {
    sword.active && sword.bbox().overlaps(&fruit.bbox())
}

pub fn fruit_hits_player(fruit: &Fruit, player: &Player) -> bool {
    fruit.bbox().overlaps(&player.bbox())
}

/// True when `candidate` overlaps any wall
pub fn wall_blocks(candidate: &Aabb, walls: &[Aabb]) -> bool {
    walls.iter().any(|wall| candidate.overlaps(wall))
}

/// True when the fruit has fully left the playfield on some side
pub fn out_of_bounds(fruit: &Fruit, playfield: &Aabb) -> bool {
    fruit.bbox().is_outside(playfield)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fruit::FruitId;
    use crate::sim::spawn::FruitColor;

    fn fruit_at(x: f32, y: f32) -> Fruit {
        Fruit::new(FruitId::new(1), 1, Vec2::new(x, y), FruitColor::Green, 1)
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 10.0, 10.0, 20.0)));
        assert!(a.overlaps(&Aabb::new(9.9, 9.9, 20.0, 20.0)));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 60.0, 60.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_segment_box_is_normalized() {
        let b = Aabb::from_segment(Vec2::new(50.0, 10.0), Vec2::new(20.0, 80.0));
        assert_eq!(b, Aabb::new(20.0, 10.0, 50.0, 80.0));
    }

    #[test]
    fn test_sword_inactive_never_hits() {
        let mut sword = Sword::new(Vec2::new(100.0, 100.0));
        let f = fruit_at(100.0, 50.0);
        assert!(!sword_hits(&sword, &f));
        sword.active = true;
        assert!(sword_hits(&sword, &f));
    }

    #[test]
    fn test_fruit_hits_player() {
        let player = Player::new(Vec2::new(50.0, 50.0), 3);
        assert!(fruit_hits_player(&fruit_at(50.0, 50.0), &player));
        // Fruit box spans 15 each way, player 10: touching at 25 apart
        assert!(!fruit_hits_player(&fruit_at(75.0, 50.0), &player));
        assert!(fruit_hits_player(&fruit_at(74.0, 50.0), &player));
    }

    #[test]
    fn test_wall_blocks_any() {
        let walls = [
            Aabb::new(0.0, 0.0, 40.0, 40.0),
            Aabb::new(200.0, 200.0, 240.0, 240.0),
        ];
        assert!(wall_blocks(&Aabb::new(190.0, 190.0, 210.0, 210.0), &walls));
        assert!(!wall_blocks(&Aabb::new(100.0, 100.0, 120.0, 120.0), &walls));
        assert!(!wall_blocks(&Aabb::new(100.0, 100.0, 120.0, 120.0), &[]));
    }

    #[test]
    fn test_out_of_bounds_each_side() {
        let field = Aabb::new(0.0, 0.0, 800.0, 600.0);
        assert!(!out_of_bounds(&fruit_at(400.0, 0.0), &field));
        assert!(!out_of_bounds(&fruit_at(-14.0, 300.0), &field));
        assert!(out_of_bounds(&fruit_at(-16.0, 300.0), &field));
        assert!(out_of_bounds(&fruit_at(816.0, 300.0), &field));
        assert!(out_of_bounds(&fruit_at(400.0, -16.0), &field));
        assert!(out_of_bounds(&fruit_at(400.0, 616.0), &field));
    }
}
