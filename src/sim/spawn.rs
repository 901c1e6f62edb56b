//! Level-scaled fruit type distribution
//!
//! Harder fruit claim the probability budget first, so early levels are mostly
//! green while later levels crowd green out entirely.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fruit colours, which double as the fruit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FruitColor {
    Green,
    Black,
    Red,
    Purple,
    Orange,
}

impl FruitColor {
    /// Sword hits needed to destroy a fruit of this colour
    pub fn hit_count(self) -> u32 {
        match self {
            FruitColor::Black => 5,
            FruitColor::Red => 3,
            FruitColor::Purple => 2,
            FruitColor::Orange => 2,
            FruitColor::Green => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FruitColor::Green => "green",
            FruitColor::Black => "black",
            FruitColor::Red => "red",
            FruitColor::Purple => "purple",
            FruitColor::Orange => "orange",
        }
    }
}

/// Order in which colours are drawn against the cumulative distribution
const DRAW_ORDER: [FruitColor; 4] = [
    FruitColor::Black,
    FruitColor::Red,
    FruitColor::Purple,
    FruitColor::Orange,
];

/// Integer spawn percentages for one level (always sums to 100)
///
/// `orange` is `None` when the level allocates nothing to it; every other
/// colour is always present, possibly at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnProbabilities {
    pub black: u32,
    pub red: u32,
    pub purple: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orange: Option<u32>,
    pub green: u32,
}

impl SpawnProbabilities {
    /// Percentage for a colour (0 for an omitted orange entry)
    pub fn get(&self, color: FruitColor) -> u32 {
        match color {
            FruitColor::Black => self.black,
            FruitColor::Red => self.red,
            FruitColor::Purple => self.purple,
            FruitColor::Orange => self.orange.unwrap_or(0),
            FruitColor::Green => self.green,
        }
    }

    /// Present entries in a stable order
    pub fn entries(&self) -> Vec<(FruitColor, u32)> {
        let mut entries = vec![
            (FruitColor::Black, self.black),
            (FruitColor::Red, self.red),
            (FruitColor::Purple, self.purple),
        ];
        if let Some(orange) = self.orange {
            entries.push((FruitColor::Orange, orange));
        }
        entries.push((FruitColor::Green, self.green));
        entries
    }

    pub fn total(&self) -> u32 {
        self.entries().iter().map(|(_, p)| p).sum()
    }
}

/// Spawn percentages for `level` (levels below 1 are treated as 1)
pub fn spawn_probabilities(level: u32) -> SpawnProbabilities {
    let level = level.max(1);
    let mut remaining: u32 = 100;

    let mut take = |want: u32| {
        let got = want.min(remaining);
        remaining -= got;
        got
    };

    let black = take(level);
    let red = take(level.saturating_add(2));
    let purple = take((level - 1).saturating_mul(2).saturating_add(5));
    // Orange only from level 2, and only while budget is left
    let orange = if level > 1 {
        take(level.saturating_mul(2).saturating_sub(2))
    } else {
        0
    };
    let green = remaining;

    SpawnProbabilities {
        black,
        red,
        purple,
        orange: (orange > 0).then_some(orange),
        green,
    }
}

/// Pick a fruit type for `level`, returning the colour and its hit count
pub fn choose_fruit_type<R: Rng>(level: u32, rng: &mut R) -> (FruitColor, u32) {
    let roll: f64 = rng.random_range(0.0..100.0);
    pick_color(&spawn_probabilities(level), roll)
}

/// Walk the cumulative distribution; anything past it is green
fn pick_color(probs: &SpawnProbabilities, roll: f64) -> (FruitColor, u32) {
    let mut cumulative = 0.0;
    for color in DRAW_ORDER {
        cumulative += probs.get(color) as f64;
        if roll < cumulative {
            return (color, color.hit_count());
        }
    }
    (FruitColor::Green, FruitColor::Green.hit_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_level_one_distribution() {
        let probs = spawn_probabilities(1);
        assert_eq!(
            probs,
            SpawnProbabilities {
                black: 1,
                red: 3,
                purple: 5,
                orange: None,
                green: 91,
            }
        );
    }

    #[test]
    fn test_orange_appears_from_level_two() {
        let probs = spawn_probabilities(2);
        assert_eq!(probs.black, 2);
        assert_eq!(probs.red, 4);
        assert_eq!(probs.purple, 7);
        assert_eq!(probs.orange, Some(2));
        assert_eq!(probs.green, 85);
    }

    #[test]
    fn test_budget_is_capped() {
        let probs = spawn_probabilities(30);
        assert_eq!(probs.black, 30);
        assert_eq!(probs.red, 32);
        assert_eq!(probs.purple, 38);
        assert_eq!(probs.orange, None);
        assert_eq!(probs.green, 0);
    }

    #[test]
    fn test_huge_level_saturates() {
        let probs = spawn_probabilities(u32::MAX);
        assert_eq!(probs.black, 100);
        assert_eq!(probs.red, 0);
        assert_eq!(probs.purple, 0);
        assert_eq!(probs.orange, None);
        assert_eq!(probs.green, 0);
    }

    #[test]
    fn test_serialized_form_omits_empty_orange() {
        let json = serde_json::to_value(spawn_probabilities(1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"black": 1, "red": 3, "purple": 5, "green": 91})
        );
    }

    #[test]
    fn test_pick_color_walks_cumulative_mass() {
        let probs = spawn_probabilities(1);
        assert_eq!(pick_color(&probs, 0.5).0, FruitColor::Black);
        assert_eq!(pick_color(&probs, 1.0).0, FruitColor::Red);
        assert_eq!(pick_color(&probs, 3.99).0, FruitColor::Red);
        assert_eq!(pick_color(&probs, 4.0).0, FruitColor::Purple);
        assert_eq!(pick_color(&probs, 8.99).0, FruitColor::Purple);
        assert_eq!(pick_color(&probs, 9.0), (FruitColor::Green, 1));
        assert_eq!(pick_color(&probs, 99.9), (FruitColor::Green, 1));
    }

    #[test]
    fn test_pick_color_reports_hit_counts() {
        let probs = spawn_probabilities(10);
        assert_eq!(pick_color(&probs, 0.0), (FruitColor::Black, 5));
        assert_eq!(pick_color(&probs, 10.0), (FruitColor::Red, 3));
        assert_eq!(pick_color(&probs, 22.0), (FruitColor::Purple, 2));
        // black 10 + red 12 + purple 23 = 45, orange 18
        assert_eq!(pick_color(&probs, 50.0), (FruitColor::Orange, 2));
        assert_eq!(pick_color(&probs, 70.0), (FruitColor::Green, 1));
    }

    #[test]
    fn test_choose_fruit_type_is_seed_deterministic() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        for level in 1..=20 {
            assert_eq!(choose_fruit_type(level, &mut a), choose_fruit_type(level, &mut b));
        }
    }

    #[test]
    fn test_high_levels_never_yield_green() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let (color, _) = choose_fruit_type(30, &mut rng);
            assert_ne!(color, FruitColor::Green);
        }
    }

    proptest! {
        #[test]
        fn prop_percentages_sum_to_100(level in 1u32..=u32::MAX) {
            prop_assert_eq!(spawn_probabilities(level).total(), 100);
        }

        #[test]
        fn prop_orange_key_present_only_when_nonzero(level in 1u32..=u32::MAX) {
            let probs = spawn_probabilities(level);
            prop_assert!(probs.orange.map_or(true, |o| o > 0));
        }
    }
}
