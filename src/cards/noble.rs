//! Nobles - prestige awarded for accumulated card bonuses.
//!
//! A noble's requirement is checked against a player's bonus colors (the
//! colors of purchased cards), never against held gems.

use serde::{Deserialize, Serialize};

use crate::core::Gems;

/// Unique identifier for a noble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NobleId(pub u32);

impl NobleId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NobleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Noble({})", self.0)
    }
}

/// A noble tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Noble {
    pub id: NobleId,
    pub prestige: u8,
    /// Bonus count required per color. Gold is always zero.
    pub requirement: Gems,
}

impl Noble {
    #[must_use]
    pub fn new(id: NobleId, prestige: u8, requirement: Gems) -> Self {
        Self {
            id,
            prestige,
            requirement,
        }
    }
}
