//! Per-seat AI bookkeeping.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Action, Difficulty, GameRng, GameState, PlayerId, PlayerMap, RandomSource};

use super::{create_engine, AiError, AiProfile, DecisionContext, DecisionEngine};

/// How to seat a computer opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,

    /// Fixed seed for this seat's stream. `None` derives one from the
    /// game seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AiConfig {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty, seed: None }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One computer seat: its strategy, rolled profile and random stream.
pub struct AiSeat {
    engine: Box<dyn DecisionEngine>,
    profile: AiProfile,
    rng: Box<dyn RandomSource>,
}

impl AiSeat {
    /// Seat with an explicit strategy, profile and random source.
    pub fn new(engine: Box<dyn DecisionEngine>, profile: AiProfile, rng: Box<dyn RandomSource>) -> Self {
        Self { engine, profile, rng }
    }

    /// Seat for a difficulty tier. The profile is rolled from `rng`, which
    /// then drives every decision of this seat.
    pub fn from_rng(difficulty: Difficulty, mut rng: GameRng) -> Self {
        let profile = AiProfile::roll(difficulty, &mut rng);
        Self::new(create_engine(difficulty), profile, Box::new(rng))
    }

    /// Seat from a config; `fallback` is used when the config has no seed.
    pub fn from_config(config: &AiConfig, fallback: GameRng) -> Self {
        let rng = config.seed.map_or(fallback, GameRng::new);
        Self::from_rng(config.difficulty, rng)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.engine.difficulty()
    }

    #[must_use]
    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    /// Choose an action from `legal` for `player`.
    pub fn decide(&mut self, state: &GameState, player: PlayerId, legal: &[Action]) -> Result<Action, AiError> {
        let ctx = DecisionContext {
            state,
            player,
            legal,
            profile: &self.profile,
        };
        let action = self.engine.decide(&ctx, self.rng.as_mut())?;
        debug!(%player, difficulty = %self.engine.difficulty(), %action, options = legal.len(), "ai decided");
        Ok(action)
    }
}

impl std::fmt::Debug for AiSeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSeat")
            .field("difficulty", &self.engine.difficulty())
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

/// Computer seats by player, owned by the turn controller.
#[derive(Debug)]
pub struct AiRegistry {
    seats: PlayerMap<Option<AiSeat>>,
}

impl AiRegistry {
    /// A registry with no computer seats.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            seats: PlayerMap::new(player_count, |_| None),
        }
    }

    /// Install or replace the seat for `player`. Ignored for unknown seats.
    pub fn register(&mut self, player: PlayerId, seat: AiSeat) {
        if let Some(slot) = self.seats.try_get_mut(player) {
            *slot = Some(seat);
        }
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        matches!(self.seats.try_get(player), Some(Some(_)))
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&AiSeat> {
        self.seats.try_get(player).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut AiSeat> {
        self.seats.try_get_mut(player).and_then(Option::as_mut)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.player_count()
    }
}
