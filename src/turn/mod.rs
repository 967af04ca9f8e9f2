//! Turn orchestration.
//!
//! - `legal`: legal-action enumeration
//! - `phase`: the `Setup -> Active -> Endgame -> Finished` machine
//! - `discard`: automatic discards for computer seats
//! - `delay`: the pause before computer decisions
//! - `controller`: `TurnController`, which ties these to a `Transition`
//!   and the computer seats

pub mod controller;
pub mod delay;
pub mod discard;
pub mod legal;
pub mod phase;

pub use controller::{TurnController, TurnError};
pub use delay::{FixedDelay, NoDelay, TurnDelay};
pub use discard::auto_discard;
pub use legal::{discard_options, take_selections, valid_actions};
pub use phase::{after_advance, check_endgame};
