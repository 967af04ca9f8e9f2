//! Rules engine and the transition seam.
//!
//! - `engine`: pure predicates and arithmetic (take legality, affordability,
//!   bonuses, nobles, win detection)
//! - `transition`: the `Transition` trait the turn controller applies
//!   actions through, and the standard rules implementation
//!
//! The turn controller calls into these but never re-implements a rule.

pub mod engine;
pub mod error;
pub mod transition;

pub use engine::{
    available_colors, bonus_discount, can_afford, can_claim_noble, can_purchase, can_reserve,
    can_take_resources, colored_shortfall, effective_cost, eligible_nobles, is_game_over,
    payment_for, validate_take, TakeOutcome,
};
pub use error::{RuleViolation, TransitionError};
pub use transition::{apply_action, StandardTransition, Transition};
