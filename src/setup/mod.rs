//! Game setup: deal a catalog into an initial state and seat the players.

pub mod builder;

pub use builder::{GameBuilder, SeatConfig, SetupError};
