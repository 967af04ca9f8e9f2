//! Easy tier: a random player with a weak lean toward points.

use crate::core::{Action, Difficulty, RandomSource};

use super::{
    end_turn_or_first, forced_choice, random_main_action, visible_card, AiError, DecisionContext,
    DecisionEngine,
};

/// Chance of buying when a purchase is affordable.
const PURCHASE_BIAS: f64 = 0.6;

/// Plays a random main action with the profile's probability. Otherwise
/// usually buys the most valuable affordable card, else takes the gems that
/// best match its focus colors, else reserves at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct EasyStrategy;

impl DecisionEngine for EasyStrategy {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut dyn RandomSource) -> Result<Action, AiError> {
        if let Some(action) = forced_choice(ctx)? {
            return Ok(action);
        }

        if rng.chance(ctx.profile.random_move_probability) {
            if let Some(action) = random_main_action(ctx, rng) {
                return Ok(action);
            }
        }

        let mut best_purchase: Option<(u8, &Action)> = None;
        for action in ctx.legal {
            if let Action::PurchaseCard { card, .. } = action {
                let points = visible_card(ctx, *card).map_or(0, |c| c.points);
                if best_purchase.map_or(true, |(p, _)| points > p) {
                    best_purchase = Some((points, action));
                }
            }
        }
        if let Some((_, action)) = best_purchase {
            if rng.chance(PURCHASE_BIAS) {
                return Ok(action.clone());
            }
        }

        let mut best_take: Option<(usize, &Action)> = None;
        for action in ctx.legal {
            if let Action::TakeGems { gems, .. } = action {
                let hits = gems.colors().iter().filter(|&&c| ctx.profile.is_focus(c)).count();
                if best_take.map_or(true, |(h, _)| hits > h) {
                    best_take = Some((hits, action));
                }
            }
        }
        if let Some((_, action)) = best_take {
            return Ok(action.clone());
        }

        let reserves: Vec<&Action> = ctx
            .legal
            .iter()
            .filter(|a| matches!(a, Action::ReserveCard { .. }))
            .collect();
        if !reserves.is_empty() {
            return Ok(reserves[rng.next_index(reserves.len())].clone());
        }

        Ok(end_turn_or_first(ctx))
    }
}
