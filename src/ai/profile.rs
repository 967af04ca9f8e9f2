//! Per-seat AI personality.
//!
//! A profile is rolled once when a computer seat is created. Two seats of
//! the same difficulty differ only by their profiles.

use serde::{Deserialize, Serialize};

use crate::core::{Difficulty, GemColor, RandomSource};

/// Randomized parameters a strategy reads on every decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    pub difficulty: Difficulty,

    /// Colors this seat prefers to collect and build bonuses in.
    pub focus_colors: [GemColor; 2],

    /// Minimum points for a card to be worth reserving.
    pub reserve_point_threshold: u8,

    /// Chance of playing a random legal move instead of deliberating.
    pub random_move_probability: f64,

    /// Maximum missing bonuses for a noble to count as reachable.
    pub noble_distance_tolerance: u8,

    /// Most gold this seat will spend on a single purchase.
    pub gold_affordability_threshold: u8,
}

/// Roll ranges per difficulty: `(low, high)` pairs, inclusive for integers.
struct ProfileRanges {
    random_move: (f64, f64),
    reserve_points: (u8, u8),
    noble_tolerance: (u8, u8),
    gold_threshold: (u8, u8),
}

const fn ranges(difficulty: Difficulty) -> ProfileRanges {
    match difficulty {
        Difficulty::Easy => ProfileRanges {
            random_move: (0.45, 0.65),
            reserve_points: (4, 5),
            noble_tolerance: (1, 1),
            gold_threshold: (1, 1),
        },
        Difficulty::Medium => ProfileRanges {
            random_move: (0.12, 0.22),
            reserve_points: (3, 4),
            noble_tolerance: (2, 3),
            gold_threshold: (1, 2),
        },
        Difficulty::Hard => ProfileRanges {
            random_move: (0.0, 0.03),
            reserve_points: (2, 3),
            noble_tolerance: (3, 4),
            gold_threshold: (2, 3),
        },
    }
}

fn roll_u8(rng: &mut dyn RandomSource, (low, high): (u8, u8)) -> u8 {
    low + rng.next_index(usize::from(high - low) + 1) as u8
}

impl AiProfile {
    /// Draw a profile for a seat.
    pub fn roll(difficulty: Difficulty, rng: &mut dyn RandomSource) -> Self {
        let ranges = ranges(difficulty);

        let first = GemColor::COLORED[rng.next_index(GemColor::COLORED.len())];
        let others: Vec<GemColor> = GemColor::COLORED.iter().copied().filter(|&c| c != first).collect();
        let second = others[rng.next_index(others.len())];

        Self {
            difficulty,
            focus_colors: [first, second],
            reserve_point_threshold: roll_u8(rng, ranges.reserve_points),
            random_move_probability: rng.next_between(ranges.random_move.0, ranges.random_move.1),
            noble_distance_tolerance: roll_u8(rng, ranges.noble_tolerance),
            gold_affordability_threshold: roll_u8(rng, ranges.gold_threshold),
        }
    }

    /// Whether `color` is one of this seat's focus colors.
    #[must_use]
    pub fn is_focus(&self, color: GemColor) -> bool {
        self.focus_colors.contains(&color)
    }
}
