//! Core types: gems, players, actions, state, RNG, configuration.
//!
//! Everything here is plain data. Game logic lives in `rules` (pure
//! predicates and the transition function) and `turn` (orchestration).

pub mod action;
pub mod config;
pub mod gems;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, GemSelection, ReserveTarget};
pub use config::{ControllerConfig, GEM_CAP, RESERVATION_CAP, WIN_THRESHOLD};
pub use gems::{GemColor, Gems};
pub use player::{Difficulty, PlayerId, PlayerKind, PlayerMap, PlayerState};
pub use rng::{GameRng, RandomSource, SequenceSource};
pub use state::{GameState, PendingDiscard, Phase};
