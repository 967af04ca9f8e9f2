//! Medium and hard tiers.
//!
//! Both tiers share one decision order and differ in their weights:
//!
//! 1. A random main action, with the profile's probability
//! 2. Hard only: a purchase that reaches the win threshold this turn
//! 3. The best-scored affordable purchase within the gold threshold
//! 4. The gem selection that most reduces the deficit on the top targets
//! 5. A reservation of a valuable or contested card
//! 6. Any take, then any reservation, then ending the turn

use tracing::debug;

use crate::cards::Card;
use crate::core::config::{RESERVATION_CAP, WIN_THRESHOLD};
use crate::core::{Action, Difficulty, GemColor, PlayerState, RandomSource, ReserveTarget};
use crate::rules::{effective_cost, payment_for};

use super::scoring::{
    blocking_potential, prestige_after_purchase, rank_cards, selection_value, ScoredCard,
    ScoringWeights,
};
use super::{
    end_turn_or_first, forced_choice, random_main_action, visible_card, AiError, DecisionContext,
    DecisionEngine,
};

/// Score a reservation loses per card already held in reserve.
const RESERVE_CROWDING: f64 = 4.0;

/// Scored planning strategy.
#[derive(Clone, Debug)]
pub struct PlannerStrategy {
    difficulty: Difficulty,
    weights: ScoringWeights,
    /// Look for a purchase that wins on the spot.
    detect_wins: bool,
}

impl PlannerStrategy {
    #[must_use]
    pub fn medium() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            weights: ScoringWeights::medium(),
            detect_wins: false,
        }
    }

    #[must_use]
    pub fn hard() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            weights: ScoringWeights::hard(),
            detect_wins: true,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Affordable purchases with their cards, in legal-set order.
    fn purchases<'a>(&self, ctx: &'a DecisionContext<'_>) -> Vec<(Card, &'a Action)> {
        ctx.legal
            .iter()
            .filter_map(|action| match action {
                Action::PurchaseCard { card, .. } => visible_card(ctx, *card).map(|c| (c, action)),
                _ => None,
            })
            .collect()
    }

    fn winning_purchase(&self, ctx: &DecisionContext<'_>, seat: &PlayerState) -> Option<Action> {
        self.purchases(ctx)
            .into_iter()
            .map(|(card, action)| (prestige_after_purchase(ctx.state, seat, &card), action))
            .filter(|(prestige, _)| *prestige >= WIN_THRESHOLD)
            .fold(None::<(u32, &Action)>, |best, (prestige, action)| match best {
                Some((p, _)) if p >= prestige => best,
                _ => Some((prestige, action)),
            })
            .map(|(_, action)| action.clone())
    }

    fn best_purchase(
        &self,
        ctx: &DecisionContext<'_>,
        seat: &PlayerState,
        ranked: &[ScoredCard],
    ) -> Option<Action> {
        let gold_limit = ctx.profile.gold_affordability_threshold;
        self.purchases(ctx)
            .into_iter()
            .filter(|(card, _)| {
                payment_for(&seat.gems, &effective_cost(seat, card))
                    .is_some_and(|payment| payment[GemColor::Gold] <= gold_limit)
            })
            .map(|(card, action)| (score_of(ranked, &card), action))
            .fold(None::<(f64, &Action)>, |best, (score, action)| match best {
                Some((s, _)) if s >= score => best,
                _ => Some((score, action)),
            })
            .map(|(_, action)| action.clone())
    }

    /// Best take by selection value, with the deficit it removes.
    fn best_take(
        &self,
        ctx: &DecisionContext<'_>,
        seat: &PlayerState,
        ranked: &[ScoredCard],
    ) -> Option<(Action, u32)> {
        let targets = &ranked[..ranked.len().min(self.weights.top_targets)];
        ctx.legal
            .iter()
            .filter_map(|action| match action {
                Action::TakeGems { gems, .. } => {
                    Some((selection_value(gems, seat, targets, ctx.profile, &self.weights), action))
                }
                _ => None,
            })
            .fold(None::<(f64, u32, &Action)>, |best, (value, action)| match best {
                Some((v, _, _)) if v >= value.value => best,
                _ => Some((value.value, value.progress, action)),
            })
            .map(|(_, progress, action)| (action.clone(), progress))
    }

    /// Best face-up reservation worth making, if any.
    fn best_reservation(
        &self,
        ctx: &DecisionContext<'_>,
        seat: &PlayerState,
        ranked: &[ScoredCard],
    ) -> Option<Action> {
        let crowding = seat.reserved.len() as f64 * RESERVE_CROWDING;
        let last_slot = seat.reserved.len() + 1 >= RESERVATION_CAP;

        ctx.legal
            .iter()
            .filter_map(|action| match action {
                Action::ReserveCard { target: ReserveTarget::Displayed(id), .. } => {
                    visible_card(ctx, *id).map(|card| (card, action))
                }
                _ => None,
            })
            .filter_map(|(card, action)| {
                let blockers = blocking_potential(ctx.state, ctx.player, &card);
                let valuable = card.points >= ctx.profile.reserve_point_threshold;
                // The final slot is kept for cards that are both.
                let worth = if last_slot { valuable && blockers > 0 } else { valuable || blockers > 0 };
                worth.then(|| {
                    let score = score_of(ranked, &card) + blockers as f64 * self.weights.blocking - crowding;
                    (score, action)
                })
            })
            .fold(None::<(f64, &Action)>, |best, (score, action)| match best {
                Some((s, _)) if s >= score => best,
                _ => Some((score, action)),
            })
            .map(|(_, action)| action.clone())
    }
}

fn score_of(ranked: &[ScoredCard], card: &Card) -> f64 {
    ranked
        .iter()
        .find(|scored| scored.card.id == card.id)
        .map_or(0.0, |scored| scored.score)
}

impl DecisionEngine for PlannerStrategy {
    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut dyn RandomSource) -> Result<Action, AiError> {
        if let Some(action) = forced_choice(ctx)? {
            return Ok(action);
        }

        if rng.chance(ctx.profile.random_move_probability) {
            if let Some(action) = random_main_action(ctx, rng) {
                debug!(player = %ctx.player, %action, "random move");
                return Ok(action);
            }
        }

        let seat = ctx
            .state
            .player(ctx.player)
            .ok_or(AiError::UnknownPlayer(ctx.player))?;

        if self.detect_wins {
            if let Some(action) = self.winning_purchase(ctx, seat) {
                debug!(player = %ctx.player, %action, "winning purchase");
                return Ok(action);
            }
        }

        let ranked = rank_cards(ctx.state, seat, ctx.profile, &self.weights);

        if let Some(action) = self.best_purchase(ctx, seat, &ranked) {
            return Ok(action);
        }

        let take = self.best_take(ctx, seat, &ranked);
        if let Some((action, progress)) = &take {
            if *progress > 0 {
                return Ok(action.clone());
            }
        }

        if let Some(action) = self.best_reservation(ctx, seat, &ranked) {
            return Ok(action);
        }

        if let Some((action, _)) = take {
            return Ok(action);
        }

        if let Some(action) = ctx.legal.iter().find(|a| matches!(a, Action::ReserveCard { .. })) {
            return Ok(action.clone());
        }

        Ok(end_turn_or_first(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiProfile;
    use crate::cards::{CardId, Noble, NobleId, Tier};
    use crate::core::{GameState, Gems, PlayerId, PlayerKind, SequenceSource};
    use crate::turn::valid_actions;

    fn profile(difficulty: Difficulty) -> AiProfile {
        AiProfile {
            difficulty,
            focus_colors: [GemColor::Red, GemColor::Blue],
            reserve_point_threshold: 3,
            random_move_probability: 0.0,
            noble_distance_tolerance: 2,
            gold_affordability_threshold: 1,
        }
    }

    fn state() -> GameState {
        let mut state = GameState::new((0..2).map(|i| {
            PlayerState::new(PlayerId::new(i), format!("P{i}"), PlayerKind::Computer { difficulty: None })
        }));
        state.pool = Gems::uniform(4, 5);
        state.phase = crate::core::Phase::Active;
        state
    }

    fn decide(strategy: &PlannerStrategy, state: &GameState, profile: &AiProfile) -> Action {
        let p0 = PlayerId::new(0);
        let legal = valid_actions(state, p0);
        let ctx = DecisionContext { state, player: p0, legal: &legal, profile };
        let action = strategy.decide(&ctx, &mut SequenceSource::constant(0.5)).unwrap();
        assert!(legal.contains(&action));
        action
    }

    #[test]
    fn test_hard_takes_the_win() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        {
            let seat = state.player_mut(p0).unwrap();
            seat.prestige = 12;
            seat.gems = Gems::new().with(GemColor::Red, 3);
        }
        // Cheap high scorer and a card that wins via a noble.
        state.display[0].push_back(
            Card::new(CardId::new(1), Tier::One, 1, GemColor::Green).with_cost(Gems::new().with(GemColor::Red, 1)),
        );
        state.display[2].push_back(
            Card::new(CardId::new(2), Tier::Three, 3, GemColor::Black).with_cost(Gems::new().with(GemColor::Red, 3)),
        );
        state.nobles.push_back(Noble::new(NobleId::new(1), 3, Gems::new().with(GemColor::Green, 1)));

        let action = decide(&PlannerStrategy::hard(), &state, &profile(Difficulty::Hard));
        assert!(matches!(action, Action::PurchaseCard { .. }));
    }

    #[test]
    fn test_respects_gold_threshold() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        state.player_mut(p0).unwrap().gems = Gems::new().with(GemColor::Gold, 3);
        state.display[0].push_back(
            Card::new(CardId::new(1), Tier::One, 1, GemColor::Green).with_cost(Gems::new().with(GemColor::Red, 3)),
        );

        let action = decide(&PlannerStrategy::medium(), &state, &profile(Difficulty::Medium));
        assert!(!matches!(action, Action::PurchaseCard { .. }));
    }

    #[test]
    fn test_collects_toward_targets() {
        let mut state = state();
        state.display[1].push_back(
            Card::new(CardId::new(1), Tier::Two, 2, GemColor::Green)
                .with_cost(Gems::from_pairs(&[(GemColor::White, 2), (GemColor::Black, 2)])),
        );

        match decide(&PlannerStrategy::medium(), &state, &profile(Difficulty::Medium)) {
            Action::TakeGems { gems, .. } => {
                let useful = gems
                    .colors()
                    .iter()
                    .filter(|&&c| c == GemColor::White || c == GemColor::Black)
                    .count();
                assert_eq!(useful, 2);
            }
            other => panic!("expected a take, got {other}"),
        }
    }

    #[test]
    fn test_reserves_contested_card_when_nothing_to_collect() {
        let mut state = state();
        state.pool = Gems::new().with(GemColor::Gold, 5);
        state
            .player_mut(PlayerId::new(1))
            .unwrap()
            .gems = Gems::new().with(GemColor::Red, 5);
        state.display[2].push_back(
            Card::new(CardId::new(7), Tier::Three, 4, GemColor::White).with_cost(Gems::new().with(GemColor::Red, 5)),
        );

        let action = decide(&PlannerStrategy::hard(), &state, &profile(Difficulty::Hard));
        assert_eq!(
            action,
            Action::ReserveCard {
                player: PlayerId::new(0),
                target: ReserveTarget::Displayed(CardId::new(7)),
            }
        );
    }

    #[test]
    fn test_falls_back_to_end_turn() {
        let mut state = state();
        state.pool = Gems::new();
        for _ in 0..RESERVATION_CAP {
            state
                .player_mut(PlayerId::new(0))
                .unwrap()
                .reserved
                .push_back(Card::new(CardId::new(99), Tier::Three, 5, GemColor::Red).with_cost(Gems::uniform(7, 0)));
        }
        let action = decide(&PlannerStrategy::medium(), &state, &profile(Difficulty::Medium));
        assert_eq!(action, Action::end_turn(PlayerId::new(0)));
    }
}
