//! Initial game construction.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::ai::{AiConfig, AiRegistry, AiSeat};
use crate::cards::{Card, Catalog, Tier};
use crate::core::config::{colored_supply, DISPLAY_SIZE, GOLD_SUPPLY, MAX_PLAYERS, MIN_PLAYERS};
use crate::core::{GameRng, GameState, Gems, PlayerId, PlayerKind, PlayerState};

/// Why a game could not be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("a game seats 2 to 4 players, got {0}")]
    PlayerCount(usize),
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,

    /// Computer strategy for this seat; `None` seats a human.
    #[serde(default)]
    pub ai: Option<AiConfig>,
}

impl SeatConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self { name: name.into(), ai: None }
    }

    pub fn computer(name: impl Into<String>, ai: AiConfig) -> Self {
        Self {
            name: name.into(),
            ai: Some(ai),
        }
    }

    fn kind(&self) -> PlayerKind {
        match &self.ai {
            None => PlayerKind::Human,
            Some(ai) => PlayerKind::Computer {
                difficulty: Some(ai.difficulty),
            },
        }
    }
}

/// Builder for a dealt game and its computer seats.
///
/// ```
/// use gem_market::ai::AiConfig;
/// use gem_market::cards::Catalog;
/// use gem_market::core::Difficulty;
/// use gem_market::setup::{GameBuilder, SeatConfig};
///
/// let (state, registry) = GameBuilder::new(Catalog::new())
///     .seat(SeatConfig::human("You"))
///     .seat(SeatConfig::computer("Bot", AiConfig::new(Difficulty::Medium)))
///     .build(7)
///     .unwrap();
/// assert_eq!(state.player_count(), 2);
/// assert!(registry.contains(gem_market::core::PlayerId::new(1)));
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    catalog: Catalog,
    seats: Vec<SeatConfig>,
}

impl GameBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            seats: Vec::new(),
        }
    }

    pub fn seat(mut self, seat: SeatConfig) -> Self {
        self.seats.push(seat);
        self
    }

    pub fn seats(mut self, seats: impl IntoIterator<Item = SeatConfig>) -> Self {
        self.seats.extend(seats);
        self
    }

    /// Shuffle and deal, seat the players and roll every computer seat.
    ///
    /// The same seed and catalog always produce the same game.
    pub fn build(self, seed: u64) -> Result<(GameState, AiRegistry), SetupError> {
        let count = self.seats.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(SetupError::PlayerCount(count));
        }

        let mut rng = GameRng::new(seed);
        let players = self
            .seats
            .iter()
            .enumerate()
            .map(|(i, seat)| PlayerState::new(PlayerId::new(i as u8), seat.name.clone(), seat.kind()));
        let mut state = GameState::new(players);

        for tier in Tier::ALL {
            let mut deck: Vec<Card> = self.catalog.tier(tier).to_vec();
            rng.for_context(&format!("deck-{}", tier.level())).shuffle(&mut deck);
            let shown = deck.len().min(DISPLAY_SIZE);
            let rest = deck.split_off(shown);
            state.display[tier.index()] = Vector::from(deck);
            state.decks[tier.index()] = Vector::from(rest);
        }

        let mut nobles = self.catalog.nobles().to_vec();
        rng.for_context("nobles").shuffle(&mut nobles);
        nobles.truncate(count + 1);
        state.nobles = Vector::from(nobles);

        state.pool = Gems::uniform(colored_supply(count), GOLD_SUPPLY);

        let mut registry = AiRegistry::new(count);
        for (i, seat) in self.seats.iter().enumerate() {
            if let Some(ai) = &seat.ai {
                let fork = rng.fork();
                registry.register(PlayerId::new(i as u8), AiSeat::from_config(ai, fork));
            }
        }

        info!(seed, players = count, nobles = state.nobles.len(), "game dealt");
        Ok((state, registry))
    }
}
