//! Action representation.
//!
//! Actions form a closed sum type: every consumer matches exhaustively, so
//! an unhandled variant is a compile error rather than a runtime path.
//! Each variant carries the acting seat.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::gems::{GemColor, Gems};
use super::player::PlayerId;
use crate::cards::{CardId, NobleId, Tier};

/// Gems picked in a take action (1-3 gems).
///
/// Stored sorted so two selections of the same gems compare equal
/// regardless of the order they were listed in.
///
/// ```
/// use gem_market::core::{GemColor, GemSelection};
///
/// let a = GemSelection::new(&[GemColor::Red, GemColor::Blue]);
/// let b = GemSelection::new(&[GemColor::Blue, GemColor::Red]);
/// assert_eq!(a, b);
/// assert!(a.is_distinct());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GemSelection(SmallVec<[GemColor; 3]>);

impl GemSelection {
    #[must_use]
    pub fn new(colors: &[GemColor]) -> Self {
        let mut inner = SmallVec::from_slice(colors);
        inner.sort();
        Self(inner)
    }

    /// Two gems of a single color.
    #[must_use]
    pub fn pair(color: GemColor) -> Self {
        Self::new(&[color, color])
    }

    #[must_use]
    pub fn colors(&self) -> &[GemColor] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every listed color is different.
    #[must_use]
    pub fn is_distinct(&self) -> bool {
        self.0.windows(2).all(|w| w[0] != w[1])
    }

    /// Whether this is exactly two gems of one color.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.0.len() == 2 && self.0[0] == self.0[1]
    }

    /// The selection as a gem collection.
    #[must_use]
    pub fn to_gems(&self) -> Gems {
        self.0.iter().copied().collect()
    }
}

/// What a reserve action takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReserveTarget {
    /// A face-up card from the display.
    Displayed(CardId),
    /// The top card of a tier's deck, unseen.
    DeckTop(Tier),
}

/// A complete game action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    TakeGems { player: PlayerId, gems: GemSelection },
    DiscardGems { player: PlayerId, gems: Gems },
    ReserveCard { player: PlayerId, target: ReserveTarget },
    PurchaseCard { player: PlayerId, card: CardId },
    ClaimNoble { player: PlayerId, noble: NobleId },
    EndTurn { player: PlayerId },
}

impl Action {
    /// The acting seat.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            Action::TakeGems { player, .. }
            | Action::DiscardGems { player, .. }
            | Action::ReserveCard { player, .. }
            | Action::PurchaseCard { player, .. }
            | Action::ClaimNoble { player, .. }
            | Action::EndTurn { player } => *player,
        }
    }

    /// Take, reserve and purchase: at most one per turn.
    #[must_use]
    pub fn is_main_action(&self) -> bool {
        match self {
            Action::TakeGems { .. } | Action::ReserveCard { .. } | Action::PurchaseCard { .. } => true,
            Action::DiscardGems { .. } | Action::ClaimNoble { .. } | Action::EndTurn { .. } => false,
        }
    }

    #[must_use]
    pub fn is_end_turn(&self) -> bool {
        matches!(self, Action::EndTurn { .. })
    }

    /// Shorthand for a take action.
    #[must_use]
    pub fn take(player: PlayerId, colors: &[GemColor]) -> Self {
        Action::TakeGems {
            player,
            gems: GemSelection::new(colors),
        }
    }

    /// Shorthand for an end-turn action.
    #[must_use]
    pub fn end_turn(player: PlayerId) -> Self {
        Action::EndTurn { player }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::TakeGems { player, gems } => {
                let names: Vec<String> = gems.colors().iter().map(ToString::to_string).collect();
                write!(f, "{player} takes [{}]", names.join(", "))
            }
            Action::DiscardGems { player, gems } => write!(f, "{player} discards {} gems", gems.total()),
            Action::ReserveCard { player, target: ReserveTarget::Displayed(card) } => {
                write!(f, "{player} reserves {card}")
            }
            Action::ReserveCard { player, target: ReserveTarget::DeckTop(tier) } => {
                write!(f, "{player} reserves from the {tier} deck")
            }
            Action::PurchaseCard { player, card } => write!(f, "{player} buys {card}"),
            Action::ClaimNoble { player, noble } => write!(f, "{player} claims {noble}"),
            Action::EndTurn { player } => write!(f, "{player} ends turn"),
        }
    }
}

/// A recorded action with the turn it was taken on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: Action,
    /// Turn number when the action was applied.
    pub turn: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, turn: u32) -> Self {
        Self { action, turn }
    }
}
