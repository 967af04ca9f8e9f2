//! Card and gem-selection scoring shared by the deliberate strategies.
//!
//! Every score here is a deterministic function of the state, the seat's
//! profile and a weight table. Randomness only enters through the
//! strategies that call these.

use crate::cards::{Card, Noble};
use crate::core::config::GEM_CAP;
use crate::core::{GameState, GemColor, GemSelection, Gems, PlayerId, PlayerState};
use crate::rules::{bonus_discount, can_purchase, colored_shortfall, effective_cost, eligible_nobles};

use super::profile::AiProfile;

/// Upper bound of a card score.
pub const MAX_CARD_SCORE: f64 = 100.0;

/// Penalty per gem a selection would push the seat over the cap.
const OVERFLOW_PENALTY: f64 = 6.0;

/// Share of the focus weight a single focus-colored gem earns in a take.
const FOCUS_TAKE_SHARE: f64 = 0.2;

/// Weights for a deliberate strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringWeights {
    pub points: f64,
    pub noble: f64,
    pub tier_rarity: f64,
    pub new_color: f64,
    pub focus: f64,
    /// Points per gem actually spent.
    pub efficiency: f64,
    /// Bonus for cards that are few gems away.
    pub near_term: f64,
    /// Cost of each gem still missing after a take.
    pub deficit: f64,
    /// Bonus per opponent who could buy a card we reserve.
    pub blocking: f64,
    /// Targets considered when choosing gems.
    pub top_targets: usize,
}

impl ScoringWeights {
    #[must_use]
    pub const fn medium() -> Self {
        Self {
            points: 6.0,
            noble: 4.0,
            tier_rarity: 1.5,
            new_color: 2.0,
            focus: 2.5,
            efficiency: 4.0,
            near_term: 3.0,
            deficit: 1.0,
            blocking: 2.0,
            top_targets: 3,
        }
    }

    #[must_use]
    pub const fn hard() -> Self {
        Self {
            points: 7.0,
            noble: 7.0,
            tier_rarity: 1.0,
            new_color: 2.5,
            focus: 2.0,
            efficiency: 7.0,
            near_term: 5.0,
            deficit: 1.8,
            blocking: 5.0,
            top_targets: 4,
        }
    }
}

/// A card with its score for one seat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredCard {
    pub card: Card,
    pub score: f64,
}

/// Colored gems a holding still lacks for `cost`, after gold.
#[must_use]
pub fn deficit(held: &Gems, cost: &Gems) -> u32 {
    colored_shortfall(held, cost).saturating_sub(u32::from(held[GemColor::Gold]))
}

/// Missing bonuses between a player's bonus totals and a noble.
#[must_use]
pub fn noble_distance(bonuses: &Gems, noble: &Noble) -> u32 {
    colored_shortfall(bonuses, &noble.requirement)
}

/// Nobles within the profile's bonus-distance tolerance.
#[must_use]
pub fn reachable_nobles(state: &GameState, player: &PlayerState, tolerance: u8) -> Vec<Noble> {
    let bonuses = bonus_discount(player);
    state
        .nobles
        .iter()
        .filter(|noble| noble_distance(&bonuses, noble) <= u32::from(tolerance))
        .copied()
        .collect()
}

/// Reachable nobles that still need the card's bonus color.
#[must_use]
pub fn nobles_helped(card: &Card, bonuses: &Gems, reachable: &[Noble]) -> usize {
    reachable
        .iter()
        .filter(|noble| noble.requirement[card.bonus] > bonuses[card.bonus])
        .count()
}

/// Score one card for one seat.
#[must_use]
pub fn score_card(
    card: &Card,
    player: &PlayerState,
    reachable: &[Noble],
    profile: &AiProfile,
    weights: &ScoringWeights,
) -> f64 {
    let bonuses = bonus_discount(player);
    let cost = effective_cost(player, card);

    let mut score = f64::from(card.points) * weights.points;
    score += nobles_helped(card, &bonuses, reachable) as f64 * weights.noble;
    score += (2 - card.tier.index()) as f64 * weights.tier_rarity;
    if bonuses[card.bonus] == 0 {
        score += weights.new_color;
    }
    if profile.is_focus(card.bonus) {
        score += weights.focus;
    }
    score += f64::from(card.points) / f64::from(cost.total().max(1)) * weights.efficiency;
    score += weights.near_term / f64::from(1 + deficit(&player.gems, &cost));

    score.clamp(0.0, MAX_CARD_SCORE)
}

/// Display and reserved cards, best first. Ties keep display order.
#[must_use]
pub fn rank_cards(state: &GameState, player: &PlayerState, profile: &AiProfile, weights: &ScoringWeights) -> Vec<ScoredCard> {
    let reachable = reachable_nobles(state, player, profile.noble_distance_tolerance);
    let mut ranked: Vec<ScoredCard> = state
        .displayed_cards()
        .chain(player.reserved.iter())
        .map(|card| ScoredCard {
            card: *card,
            score: score_card(card, player, &reachable, profile, weights),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

/// How a gem selection serves a seat's purchase targets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionValue {
    /// Higher is better.
    pub value: f64,
    /// Missing gems removed across targets.
    pub progress: u32,
}

/// Simulate taking `selection` and measure the summed deficit across
/// `targets`, rewarding focus colors and penalizing overflow.
#[must_use]
pub fn selection_value(
    selection: &GemSelection,
    player: &PlayerState,
    targets: &[ScoredCard],
    profile: &AiProfile,
    weights: &ScoringWeights,
) -> SelectionValue {
    let before = player.gems;
    let after = before.plus(&selection.to_gems());

    let (deficit_before, deficit_after) = targets.iter().fold((0, 0), |(b, a), target| {
        let cost = effective_cost(player, &target.card);
        (b + deficit(&before, &cost), a + deficit(&after, &cost))
    });

    let focus_hits = selection.colors().iter().filter(|&&c| profile.is_focus(c)).count();
    let overflow = after.total().saturating_sub(GEM_CAP);

    SelectionValue {
        value: -(f64::from(deficit_after) * weights.deficit) + focus_hits as f64 * weights.focus * FOCUS_TAKE_SHARE
            - f64::from(overflow) * OVERFLOW_PENALTY,
        progress: deficit_before.saturating_sub(deficit_after),
    }
}

/// Opponents who could buy `card` right now.
#[must_use]
pub fn blocking_potential(state: &GameState, player: PlayerId, card: &Card) -> usize {
    state
        .players
        .iter()
        .filter(|p| p.id != player && can_purchase(p, card))
        .count()
}

/// Prestige a purchase would bring this turn, nobles it unlocks included.
#[must_use]
pub fn prestige_after_purchase(state: &GameState, player: &PlayerState, card: &Card) -> u32 {
    let mut after = player.clone();
    after.purchased.push_back(*card);
    let mut probe = state.clone();
    if let Some(seat) = probe.player_mut(player.id) {
        *seat = after;
    }
    let nobles: u32 = eligible_nobles(&probe, player.id)
        .iter()
        .map(|n| u32::from(n.prestige))
        .sum();
    player.prestige + u32::from(card.points) + nobles
}
