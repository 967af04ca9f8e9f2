//! Card definitions - immutable catalog entries.
//!
//! A `Card` is created once from static content and never changes. At
//! runtime it lives in exactly one place: a tier deck, the face-up display,
//! a player's reserve, or a player's purchased pile.

use serde::{Deserialize, Serialize};

use crate::core::{GemColor, Gems};

/// Unique identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card tier (1-3). Higher tiers cost more and score more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    /// 0-based index for per-tier arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 1-based tier number.
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8 + 1
    }

    /// Tier from its 1-based number.
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Tier> {
        match level {
            1 => Some(Tier::One),
            2 => Some(Tier::Two),
            3 => Some(Tier::Three),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier {}", self.level())
    }
}

/// A purchasable card.
///
/// ## Example
///
/// ```
/// use gem_market::cards::{Card, CardId, Tier};
/// use gem_market::core::{GemColor, Gems};
///
/// let card = Card::new(CardId::new(7), Tier::Two, 2, GemColor::Blue)
///     .with_cost(Gems::from_pairs(&[(GemColor::Red, 3), (GemColor::Black, 2)]));
///
/// assert_eq!(card.cost.total(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub tier: Tier,
    /// Prestige points granted on purchase.
    pub points: u8,
    /// Permanent discount color granted on purchase. Never `Gold`.
    pub bonus: GemColor,
    /// Gem cost; missing colors cost zero.
    pub cost: Gems,
}

impl Card {
    /// Create a card with no cost.
    #[must_use]
    pub fn new(id: CardId, tier: Tier, points: u8, bonus: GemColor) -> Self {
        Self {
            id,
            tier,
            points,
            bonus,
            cost: Gems::new(),
        }
    }

    /// Builder-style cost setter.
    #[must_use]
    pub fn with_cost(mut self, cost: Gems) -> Self {
        self.cost = cost;
        self
    }
}
