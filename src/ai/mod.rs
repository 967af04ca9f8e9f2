//! Computer opponents.
//!
//! A computer seat is a [`DecisionEngine`] (the difficulty tier's strategy)
//! plus an [`AiProfile`] rolled once for that seat and its own random
//! stream. Strategies are pure functions of the state, the legal action set
//! and the random source: they never mutate the state and always return an
//! element of the legal set.
//!
//! - [`EasyStrategy`]: mostly random, with a weak lean toward points
//! - [`PlannerStrategy`]: scored purchases, targeted collection and
//!   reservations; the hard tier adds win detection and heavier weights
//!
//! ## Example
//!
//! ```
//! use gem_market::ai::{create_engine, AiProfile};
//! use gem_market::core::{Difficulty, GameRng};
//!
//! let mut rng = GameRng::new(7);
//! let engine = create_engine(Difficulty::Hard);
//! let profile = AiProfile::roll(engine.difficulty(), &mut rng);
//! assert_eq!(profile.difficulty, Difficulty::Hard);
//! ```

pub mod easy;
pub mod planner;
pub mod profile;
pub mod registry;
pub mod scoring;

pub use easy::EasyStrategy;
pub use planner::PlannerStrategy;
pub use profile::AiProfile;
pub use registry::{AiConfig, AiRegistry, AiSeat};
pub use scoring::ScoringWeights;

use thiserror::Error;

use crate::cards::{Card, CardId};
use crate::core::{Action, Difficulty, GameState, PlayerId, RandomSource};
use crate::turn::auto_discard;

// =============================================================================
// Engine trait
// =============================================================================

/// Errors a strategy can report instead of a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("{0} has no legal action")]
    NoLegalActions(PlayerId),

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),
}

/// Everything a strategy may read when choosing a move.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    pub state: &'a GameState,
    pub player: PlayerId,
    /// The complete legal set for `player`. The returned action must be one
    /// of these.
    pub legal: &'a [Action],
    pub profile: &'a AiProfile,
}

/// A difficulty tier's move chooser.
pub trait DecisionEngine: Send + Sync {
    fn difficulty(&self) -> Difficulty;

    /// Choose one action from `ctx.legal`.
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut dyn RandomSource) -> Result<Action, AiError>;
}

/// The strategy for a difficulty tier.
#[must_use]
pub fn create_engine(difficulty: Difficulty) -> Box<dyn DecisionEngine> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyStrategy),
        Difficulty::Medium => Box::new(PlannerStrategy::medium()),
        Difficulty::Hard => Box::new(PlannerStrategy::hard()),
    }
}

// =============================================================================
// Shared decision steps
// =============================================================================

/// Moves every tier makes the same way.
///
/// Fails on an empty legal set. While a discard is owed, picks the discard
/// matching [`auto_discard`]. Once the main action is spent, claims the most
/// valuable noble on offer or ends the turn. Returns `None` when the
/// strategy should deliberate.
pub(crate) fn forced_choice(ctx: &DecisionContext<'_>) -> Result<Option<Action>, AiError> {
    if ctx.legal.is_empty() {
        return Err(AiError::NoLegalActions(ctx.player));
    }

    if ctx.legal.iter().all(|a| matches!(a, Action::DiscardGems { .. })) {
        let held = ctx
            .state
            .player(ctx.player)
            .ok_or(AiError::UnknownPlayer(ctx.player))?
            .gems;
        let count = ctx.state.discard_owed_by(ctx.player).unwrap_or(0);
        let preferred = auto_discard(&held, count);
        let choice = ctx
            .legal
            .iter()
            .find(|a| matches!(a, Action::DiscardGems { gems, .. } if *gems == preferred))
            .unwrap_or(&ctx.legal[0]);
        return Ok(Some(choice.clone()));
    }

    if ctx.state.main_action_taken {
        let noble = ctx
            .legal
            .iter()
            .filter_map(|a| match a {
                Action::ClaimNoble { noble, .. } => ctx
                    .state
                    .nobles
                    .iter()
                    .find(|n| n.id == *noble)
                    .map(|n| (n.prestige, a)),
                _ => None,
            })
            .fold(None::<(u8, &Action)>, |best, (prestige, a)| match best {
                Some((p, _)) if p >= prestige => best,
                _ => Some((prestige, a)),
            });
        return Ok(Some(match noble {
            Some((_, action)) => action.clone(),
            None => end_turn_or_first(ctx),
        }));
    }

    Ok(None)
}

/// A uniformly random main action, if any is legal.
pub(crate) fn random_main_action(ctx: &DecisionContext<'_>, rng: &mut dyn RandomSource) -> Option<Action> {
    let mains: Vec<&Action> = ctx.legal.iter().filter(|a| a.is_main_action()).collect();
    if mains.is_empty() {
        return None;
    }
    Some(mains[rng.next_index(mains.len())].clone())
}

/// The legal end-turn, or the first legal action when ending is not offered.
pub(crate) fn end_turn_or_first(ctx: &DecisionContext<'_>) -> Action {
    ctx.legal
        .iter()
        .find(|a| a.is_end_turn())
        .unwrap_or(&ctx.legal[0])
        .clone()
}

/// A card the deciding seat can see: face-up, or in its own reserve.
pub(crate) fn visible_card(ctx: &DecisionContext<'_>, id: CardId) -> Option<Card> {
    ctx.state
        .displayed_cards()
        .chain(ctx.state.player(ctx.player).into_iter().flat_map(|p| p.reserved.iter()))
        .find(|card| card.id == id)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Noble, NobleId};
    use crate::core::{GemColor, Gems, PendingDiscard, PlayerKind, PlayerState, SequenceSource};
    use crate::turn::valid_actions;

    fn state() -> GameState {
        let mut state = GameState::new((0..2).map(|i| {
            PlayerState::new(PlayerId::new(i), format!("P{i}"), PlayerKind::Computer { difficulty: None })
        }));
        state.pool = Gems::uniform(4, 5);
        state
    }

    fn profile(difficulty: Difficulty) -> AiProfile {
        AiProfile::roll(difficulty, &mut SequenceSource::constant(0.0))
    }

    #[test]
    fn test_empty_legal_set_is_an_error() {
        let state = state();
        let profile = profile(Difficulty::Easy);
        let ctx = DecisionContext { state: &state, player: PlayerId::new(0), legal: &[], profile: &profile };
        assert_eq!(forced_choice(&ctx), Err(AiError::NoLegalActions(PlayerId::new(0))));
    }

    #[test]
    fn test_forced_discard_matches_auto_discard() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        state.player_mut(p0).unwrap().gems = Gems::from_pairs(&[(GemColor::Red, 6), (GemColor::Blue, 6)]);
        state.pending_discard = Some(PendingDiscard { player: p0, count: 2 });

        let legal = valid_actions(&state, p0);
        let profile = profile(Difficulty::Hard);
        let ctx = DecisionContext { state: &state, player: p0, legal: &legal, profile: &profile };

        let expected = auto_discard(&state.player(p0).unwrap().gems, 2);
        assert_eq!(forced_choice(&ctx).unwrap(), Some(Action::DiscardGems { player: p0, gems: expected }));
    }

    #[test]
    fn test_after_main_action_claims_best_noble() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        state.main_action_taken = true;
        state.nobles.push_back(Noble::new(NobleId::new(1), 2, Gems::new()));
        state.nobles.push_back(Noble::new(NobleId::new(2), 3, Gems::new()));

        let legal = valid_actions(&state, p0);
        let profile = profile(Difficulty::Medium);
        let ctx = DecisionContext { state: &state, player: p0, legal: &legal, profile: &profile };
        assert_eq!(
            forced_choice(&ctx).unwrap(),
            Some(Action::ClaimNoble { player: p0, noble: NobleId::new(2) })
        );
    }

    #[test]
    fn test_after_main_action_ends_turn() {
        let mut state = state();
        state.main_action_taken = true;
        let p0 = PlayerId::new(0);
        let legal = valid_actions(&state, p0);
        let profile = profile(Difficulty::Easy);
        let ctx = DecisionContext { state: &state, player: p0, legal: &legal, profile: &profile };
        assert_eq!(forced_choice(&ctx).unwrap(), Some(Action::end_turn(p0)));
    }

    #[test]
    fn test_create_engine_tiers() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(create_engine(difficulty).difficulty(), difficulty);
        }
    }
}
