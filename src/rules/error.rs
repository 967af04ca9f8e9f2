//! Rule and transition errors.

use thiserror::Error;

use crate::cards::{CardId, NobleId, Tier};
use crate::core::{GemColor, PlayerId};

/// Why a gem selection cannot be taken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("a take must name 1 to 3 gems, got {0}")]
    SelectionSize(usize),

    #[error("gold cannot be taken directly")]
    WildcardSelected,

    #[error("selection is neither three distinct colors nor a pair")]
    InvalidShape,

    #[error("taking two {color} needs at least 4 in the pool, found {available}")]
    PairUnavailable { color: GemColor, available: u8 },

    #[error("the pool has no {0} left")]
    ColorExhausted(GemColor),
}

/// Failure of the transition function.
///
/// These are invariant checks; the controller never swallows them for
/// human-submitted actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },

    #[error("the game is finished")]
    GameFinished,

    #[error("{0} already took a main action this turn")]
    MainActionTaken(PlayerId),

    #[error("{player} must discard {count} gems first")]
    DiscardPending { player: PlayerId, count: u8 },

    #[error("no discard is owed by {0}")]
    NoDiscardOwed(PlayerId),

    #[error("discard must be exactly {expected} gems, got {actual}")]
    DiscardCount { expected: u8, actual: u32 },

    #[error("cannot discard gems that are not held")]
    DiscardNotHeld,

    #[error("invalid take: {0}")]
    InvalidTake(#[from] RuleViolation),

    #[error("{0} is not available")]
    CardUnavailable(CardId),

    #[error("the {0} deck is empty")]
    DeckEmpty(Tier),

    #[error("cannot afford {0}")]
    CannotAfford(CardId),

    #[error("already holding the maximum of {cap} reserved cards")]
    ReservationLimit { cap: usize },

    #[error("{0} is not in the noble pool")]
    NobleUnavailable(NobleId),

    #[error("requirement of {0} is not met")]
    NobleRequirementUnmet(NobleId),
}
