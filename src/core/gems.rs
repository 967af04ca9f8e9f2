//! Gem colors and gem collections.
//!
//! ## GemColor
//!
//! Five colored gems plus the `Gold` wildcard. Colored gems double as the
//! bonus colors granted by purchased cards; gold never appears as a bonus.
//!
//! ## Gems
//!
//! A fixed-size count per color, used for the shared pool, a player's
//! holdings, card costs, noble requirements and bonus totals alike.
//! Arithmetic saturates at zero so a collection is never negative.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of distinct gem colors, wildcard included.
pub const GEM_COLOR_COUNT: usize = 6;

/// A gem color. `Gold` is the wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GemColor {
    White,
    Blue,
    Green,
    Red,
    Black,
    Gold,
}

impl GemColor {
    /// The five colored gems, in canonical order.
    pub const COLORED: [GemColor; 5] = [
        GemColor::White,
        GemColor::Blue,
        GemColor::Green,
        GemColor::Red,
        GemColor::Black,
    ];

    /// All six colors, wildcard last.
    pub const ALL: [GemColor; GEM_COLOR_COUNT] = [
        GemColor::White,
        GemColor::Blue,
        GemColor::Green,
        GemColor::Red,
        GemColor::Black,
        GemColor::Gold,
    ];

    /// Index into a `Gems` array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this is the wildcard.
    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, GemColor::Gold)
    }
}

impl std::fmt::Display for GemColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GemColor::White => "white",
            GemColor::Blue => "blue",
            GemColor::Green => "green",
            GemColor::Red => "red",
            GemColor::Black => "black",
            GemColor::Gold => "gold",
        };
        f.write_str(name)
    }
}

/// Count of gems per color.
///
/// ## Example
///
/// ```
/// use gem_market::core::{GemColor, Gems};
///
/// let mut held = Gems::new().with(GemColor::Red, 2).with(GemColor::Gold, 1);
/// assert_eq!(held.total(), 3);
///
/// held.remove(GemColor::Red, 5);
/// assert_eq!(held[GemColor::Red], 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gems([u8; GEM_COLOR_COUNT]);

impl Gems {
    /// An empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; GEM_COLOR_COUNT])
    }

    /// Same count for every colored gem, and a separate gold count.
    #[must_use]
    pub const fn uniform(colored: u8, gold: u8) -> Self {
        Self([colored, colored, colored, colored, colored, gold])
    }

    /// Build from `(color, count)` pairs. Repeated colors accumulate.
    #[must_use]
    pub fn from_pairs(pairs: &[(GemColor, u8)]) -> Self {
        let mut gems = Self::new();
        for &(color, count) in pairs {
            gems.add(color, count);
        }
        gems
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, color: GemColor, count: u8) -> Self {
        self.0[color.index()] = count;
        self
    }

    /// Count for a color.
    #[must_use]
    pub fn get(&self, color: GemColor) -> u8 {
        self.0[color.index()]
    }

    /// Add gems of one color.
    pub fn add(&mut self, color: GemColor, count: u8) {
        let slot = &mut self.0[color.index()];
        *slot = slot.saturating_add(count);
    }

    /// Remove gems of one color, flooring at zero.
    ///
    /// Returns how many were actually removed.
    pub fn remove(&mut self, color: GemColor, count: u8) -> u8 {
        let slot = &mut self.0[color.index()];
        let removed = (*slot).min(count);
        *slot -= removed;
        removed
    }

    /// Total gems, wildcard included.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&c| u32::from(c)).sum()
    }

    /// Total colored gems, wildcard excluded.
    #[must_use]
    pub fn colored_total(&self) -> u32 {
        GemColor::COLORED.iter().map(|&c| u32::from(self.get(c))).sum()
    }

    /// Whether every count is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Whether `self` holds at least `other` in every color.
    #[must_use]
    pub fn contains(&self, other: &Gems) -> bool {
        GemColor::ALL.iter().all(|&c| self.get(c) >= other.get(c))
    }

    /// Element-wise sum.
    #[must_use]
    pub fn plus(&self, other: &Gems) -> Gems {
        let mut out = *self;
        for color in GemColor::ALL {
            out.add(color, other.get(color));
        }
        out
    }

    /// Element-wise saturating difference.
    #[must_use]
    pub fn minus(&self, other: &Gems) -> Gems {
        let mut out = *self;
        for color in GemColor::ALL {
            out.remove(color, other.get(color));
        }
        out
    }

    /// Colored counts only; gold zeroed.
    #[must_use]
    pub fn without_wildcard(&self) -> Gems {
        self.with(GemColor::Gold, 0)
    }

    /// Iterate over `(color, count)` pairs with a non-zero count.
    pub fn iter(&self) -> impl Iterator<Item = (GemColor, u8)> + '_ {
        GemColor::ALL
            .iter()
            .map(move |&c| (c, self.get(c)))
            .filter(|&(_, n)| n > 0)
    }
}

impl Index<GemColor> for Gems {
    type Output = u8;

    fn index(&self, color: GemColor) -> &Self::Output {
        &self.0[color.index()]
    }
}

impl IndexMut<GemColor> for Gems {
    fn index_mut(&mut self, color: GemColor) -> &mut Self::Output {
        &mut self.0[color.index()]
    }
}

impl FromIterator<GemColor> for Gems {
    fn from_iter<I: IntoIterator<Item = GemColor>>(iter: I) -> Self {
        let mut gems = Gems::new();
        for color in iter {
            gems.add(color, 1);
        }
        gems
    }
}
