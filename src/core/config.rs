//! Rule constants and controller configuration.
//!
//! Rule constants are fixed by the game and are not configurable.
//! `ControllerConfig` tunes how the turn controller drives computer seats;
//! none of its values change game outcomes except the chain bounds.

use serde::{Deserialize, Serialize};

/// Maximum gems a player may hold at the end of an action.
pub const GEM_CAP: u32 = 10;

/// Maximum cards a player may hold in reserve.
pub const RESERVATION_CAP: usize = 3;

/// Prestige that triggers the endgame.
pub const WIN_THRESHOLD: u32 = 15;

/// Face-up cards per tier.
pub const DISPLAY_SIZE: usize = 4;

/// Pool size of the taking-two rule: a color needs this many to take two.
pub const TAKE_TWO_MINIMUM: u8 = 4;

/// Gold gems in the pool at setup.
pub const GOLD_SUPPLY: u8 = 5;

/// Seats a game supports.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Colored gems per color at setup, by player count.
#[must_use]
pub const fn colored_supply(player_count: usize) -> u8 {
    match player_count {
        0..=2 => 4,
        3 => 5,
        _ => 7,
    }
}

/// Turn controller configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Pause before each computer decision, in milliseconds.
    /// Purely presentational; zero in tests.
    pub ai_delay_ms: u64,

    /// Actions a computer seat may take in one turn before the controller
    /// ends its turn for it.
    pub max_ai_actions_per_turn: usize,

    /// Total computer actions one chain may apply before it stops and
    /// hands the state back.
    pub max_chain_steps: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            ai_delay_ms: 600,
            max_ai_actions_per_turn: 8,
            max_chain_steps: 10_000,
        }
    }
}

impl ControllerConfig {
    /// Defaults with no presentational delay.
    #[must_use]
    pub fn immediate() -> Self {
        Self::default().with_ai_delay_ms(0)
    }

    pub fn with_ai_delay_ms(mut self, delay_ms: u64) -> Self {
        self.ai_delay_ms = delay_ms;
        self
    }

    pub fn with_max_ai_actions_per_turn(mut self, actions: usize) -> Self {
        self.max_ai_actions_per_turn = actions;
        self
    }

    pub fn with_max_chain_steps(mut self, steps: usize) -> Self {
        self.max_chain_steps = steps;
        self
    }
}
