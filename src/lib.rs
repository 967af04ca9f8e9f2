//! # gem-market
//!
//! A deterministic engine for a turn-based gem-and-card trading game: one
//! human against up to three computer opponents.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: every rule is a function of `(state, action)`.
//!    States are never mutated in place by callers; each applied action
//!    yields a new `GameState`.
//!
//! 2. **Closed actions**: `Action` is a sum type and every consumer matches
//!    it exhaustively.
//!
//! 3. **Deterministic by seed**: deals, AI profiles and AI decisions all
//!    draw from seeded `GameRng` streams or an injected `RandomSource`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so the
//!   controller and the AI can probe hypothetical states freely.
//!
//! - **Transition seam**: the controller applies actions through the
//!   `Transition` trait; `StandardTransition` holds the game's rules.
//!
//! - **Async chain**: after a human acts, `TurnController` plays every
//!   computer seat with a configurable pause between decisions.
//!
//! ## Modules
//!
//! - `core`: gems, players, actions, state, RNG, configuration
//! - `cards`: cards, nobles and the catalog
//! - `rules`: rule predicates and the transition function
//! - `ai`: computer opponents (easy, medium, hard)
//! - `turn`: legal actions, phases and the turn controller
//! - `setup`: dealing a catalog into a new game

pub mod ai;
pub mod cards;
pub mod core;
pub mod rules;
pub mod setup;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ControllerConfig, Difficulty, GameRng, GameState, GemColor, GemSelection,
    Gems, Phase, PlayerId, PlayerKind, PlayerState, RandomSource, ReserveTarget,
};

pub use crate::cards::{Card, CardId, Catalog, Noble, NobleId, Tier};

pub use crate::rules::{apply_action, RuleViolation, StandardTransition, Transition, TransitionError};

pub use crate::ai::{create_engine, AiConfig, AiError, AiProfile, AiRegistry, AiSeat, DecisionEngine};

pub use crate::turn::{valid_actions, TurnController, TurnError};

pub use crate::setup::{GameBuilder, SeatConfig, SetupError};
