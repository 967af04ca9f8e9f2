//! Shared fixtures for integration tests.

#![allow(dead_code)]

use gem_market::ai::AiConfig;
use gem_market::cards::{Card, CardId, Catalog, Noble, NobleId, Tier};
use gem_market::core::{Difficulty, GameState, GemColor, Gems, Phase, PlayerId, PlayerKind, PlayerState};
use gem_market::setup::{GameBuilder, SeatConfig};
use gem_market::AiRegistry;

/// Install a test subscriber once; honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn color(i: usize) -> GemColor {
    GemColor::COLORED[i % GemColor::COLORED.len()]
}

/// A full catalog: 40/30/20 cards and 10 nobles, with costs that grow by
/// tier.
pub fn standard_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    let mut id = 0u32;

    let mut add = |catalog: &mut Catalog, tier: Tier, points: u8, bonus: GemColor, cost: Gems| {
        id += 1;
        catalog.register_card(Card::new(CardId::new(id), tier, points, bonus).with_cost(cost));
    };

    for i in 0..40 {
        let cost = Gems::new()
            .with(color(i + 1), 1 + (i % 3) as u8)
            .with(color(i + 2), 1 + (i % 2) as u8);
        add(&mut catalog, Tier::One, u8::from(i % 8 == 0), color(i), cost);
    }
    for i in 0..30 {
        let cost = Gems::new()
            .with(color(i + 1), 2 + (i % 3) as u8)
            .with(color(i + 3), 3);
        add(&mut catalog, Tier::Two, 1 + (i % 3) as u8, color(i), cost);
    }
    for i in 0..20 {
        let cost = Gems::new()
            .with(color(i + 1), 3 + (i % 4) as u8)
            .with(color(i + 2), 3)
            .with(color(i + 4), 3);
        add(&mut catalog, Tier::Three, 3 + (i % 3) as u8, color(i), cost);
    }

    for i in 0..10u32 {
        let idx = i as usize;
        let requirement = if i % 2 == 0 {
            Gems::new().with(color(idx), 3).with(color(idx + 1), 3).with(color(idx + 2), 3)
        } else {
            Gems::new().with(color(idx), 4).with(color(idx + 3), 4)
        };
        catalog.register_noble(Noble::new(NobleId::new(i + 1), 3, requirement));
    }

    catalog
}

/// A dealt game: a human at seat 0 and one computer per difficulty given.
pub fn dealt_game(computers: &[Difficulty], seed: u64) -> (GameState, AiRegistry) {
    let mut seats = vec![SeatConfig::human("You")];
    seats.extend(
        computers
            .iter()
            .enumerate()
            .map(|(i, &d)| SeatConfig::computer(format!("Bot {}", i + 1), AiConfig::new(d))),
    );
    GameBuilder::new(standard_catalog())
        .seats(seats)
        .build(seed)
        .expect("valid seat count")
}

/// An undealt active table with the given seat kinds and a full pool.
pub fn bare_table(kinds: &[PlayerKind]) -> GameState {
    let players = kinds
        .iter()
        .enumerate()
        .map(|(i, &kind)| PlayerState::new(PlayerId::new(i as u8), format!("P{i}"), kind));
    let mut state = GameState::new(players);
    state.pool = Gems::uniform(7, 5);
    state.phase = Phase::Active;
    state
}

pub fn computer() -> PlayerKind {
    PlayerKind::Computer { difficulty: None }
}
