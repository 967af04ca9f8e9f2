//! The state-transition seam.
//!
//! The turn controller applies actions through a caller-supplied
//! [`Transition`]: a total function `(state, action) -> state` that fails on
//! any invariant violation. [`StandardTransition`] is the reference
//! implementation of the game's rules; closures with the same shape can be
//! supplied instead.
//!
//! ## Implementation Notes
//!
//! - Must never mutate the input state; return a new one
//! - Must fail, not correct, on unaffordable purchases, a full reserve,
//!   unmet noble requirements, malformed discards, or ending a turn while a
//!   discard is owed
//! - Does not install discard obligations or award nobles; the controller
//!   owns those

use crate::cards::{Card, CardId, NobleId, Tier};
use crate::core::{
    Action, ActionRecord, GameState, GemColor, GemSelection, Gems, PlayerId, PlayerState,
    ReserveTarget,
};
use crate::core::config::RESERVATION_CAP;

use super::engine::{can_claim_noble, can_reserve, effective_cost, payment_for, validate_take};
use super::error::TransitionError;

/// Pure state-transition function.
pub trait Transition: Send + Sync {
    /// Apply `action` to `state`, producing the next state.
    fn apply(&self, state: &GameState, action: &Action) -> Result<GameState, TransitionError>;
}

impl<F> Transition for F
where
    F: Fn(&GameState, &Action) -> Result<GameState, TransitionError> + Send + Sync,
{
    fn apply(&self, state: &GameState, action: &Action) -> Result<GameState, TransitionError> {
        self(state, action)
    }
}

/// The game's own rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardTransition;

impl Transition for StandardTransition {
    fn apply(&self, state: &GameState, action: &Action) -> Result<GameState, TransitionError> {
        apply_action(state, action)
    }
}

/// Apply one action under the standard rules.
pub fn apply_action(state: &GameState, action: &Action) -> Result<GameState, TransitionError> {
    if state.is_finished() {
        return Err(TransitionError::GameFinished);
    }

    let actor = action.player();
    if state.player(actor).is_none() {
        return Err(TransitionError::UnknownPlayer(actor));
    }
    if actor != state.current {
        return Err(TransitionError::NotYourTurn {
            expected: state.current,
            actual: actor,
        });
    }
    if let Some(pending) = state.pending_discard {
        if !matches!(action, Action::DiscardGems { .. }) {
            return Err(TransitionError::DiscardPending {
                player: pending.player,
                count: pending.count,
            });
        }
    }
    if action.is_main_action() && state.main_action_taken {
        return Err(TransitionError::MainActionTaken(actor));
    }

    let mut next = state.clone();
    match action {
        Action::TakeGems { gems, .. } => take_gems(&mut next, actor, gems)?,
        Action::DiscardGems { gems, .. } => discard_gems(&mut next, actor, gems)?,
        Action::ReserveCard { target, .. } => reserve_card(&mut next, actor, *target)?,
        Action::PurchaseCard { card, .. } => purchase_card(&mut next, actor, *card)?,
        Action::ClaimNoble { noble, .. } => claim_noble(&mut next, actor, *noble)?,
        Action::EndTurn { .. } => end_turn(&mut next),
    }

    next.history
        .push_back(ActionRecord::new(action.clone(), state.turn_number));
    Ok(next)
}

fn seat(state: &mut GameState, player: PlayerId) -> Result<&mut PlayerState, TransitionError> {
    state
        .player_mut(player)
        .ok_or(TransitionError::UnknownPlayer(player))
}

fn take_gems(state: &mut GameState, player: PlayerId, selection: &GemSelection) -> Result<(), TransitionError> {
    let held = seat(state, player)?.gems;
    validate_take(selection, &state.pool, &held)?;

    let taken = selection.to_gems();
    state.pool = state.pool.minus(&taken);
    let holder = seat(state, player)?;
    holder.gems = holder.gems.plus(&taken);
    state.main_action_taken = true;
    Ok(())
}

fn discard_gems(state: &mut GameState, player: PlayerId, gems: &Gems) -> Result<(), TransitionError> {
    let owed = state
        .discard_owed_by(player)
        .ok_or(TransitionError::NoDiscardOwed(player))?;
    if gems.total() != u32::from(owed) {
        return Err(TransitionError::DiscardCount {
            expected: owed,
            actual: gems.total(),
        });
    }

    let holder = seat(state, player)?;
    if !holder.gems.contains(gems) {
        return Err(TransitionError::DiscardNotHeld);
    }
    holder.gems = holder.gems.minus(gems);
    state.pool = state.pool.plus(gems);
    state.pending_discard = None;
    Ok(())
}

/// Remove a face-up card, refilling its slot from the deck when possible.
fn take_from_display(state: &mut GameState, tier: Tier, slot: usize) -> Card {
    let refill = state.decks[tier.index()].pop_front();
    let row = &mut state.display[tier.index()];
    match refill {
        Some(replacement) => row.set(slot, replacement),
        None => row.remove(slot),
    }
}

fn reserve_card(state: &mut GameState, player: PlayerId, target: ReserveTarget) -> Result<(), TransitionError> {
    if !can_reserve(seat(state, player)?) {
        return Err(TransitionError::ReservationLimit {
            cap: RESERVATION_CAP,
        });
    }

    let card = match target {
        ReserveTarget::Displayed(id) => {
            let (tier, slot) = state
                .find_displayed(id)
                .ok_or(TransitionError::CardUnavailable(id))?;
            take_from_display(state, tier, slot)
        }
        ReserveTarget::DeckTop(tier) => state.decks[tier.index()]
            .pop_front()
            .ok_or(TransitionError::DeckEmpty(tier))?,
    };

    let gold = state.pool.remove(GemColor::Gold, 1);
    let holder = seat(state, player)?;
    holder.reserved.push_back(card);
    holder.gems.add(GemColor::Gold, gold);
    state.main_action_taken = true;
    Ok(())
}

fn purchase_card(state: &mut GameState, player: PlayerId, id: CardId) -> Result<(), TransitionError> {
    let buyer = state.player(player).ok_or(TransitionError::UnknownPlayer(player))?;
    let reserved_slot = buyer.reserved_position(id);

    let card = match reserved_slot {
        Some(slot) => buyer.reserved[slot],
        None => {
            let (tier, slot) = state
                .find_displayed(id)
                .ok_or(TransitionError::CardUnavailable(id))?;
            state.display[tier.index()][slot]
        }
    };

    let payment = payment_for(&buyer.gems, &effective_cost(buyer, &card))
        .ok_or(TransitionError::CannotAfford(id))?;

    match reserved_slot {
        Some(slot) => {
            seat(state, player)?.reserved.remove(slot);
        }
        None => {
            if let Some((tier, slot)) = state.find_displayed(id) {
                take_from_display(state, tier, slot);
            }
        }
    }

    let holder = seat(state, player)?;
    holder.gems = holder.gems.minus(&payment);
    holder.purchased.push_back(card);
    holder.prestige += u32::from(card.points);
    state.pool = state.pool.plus(&payment);
    state.main_action_taken = true;
    Ok(())
}

fn claim_noble(state: &mut GameState, player: PlayerId, id: NobleId) -> Result<(), TransitionError> {
    let slot = state
        .nobles
        .iter()
        .position(|n| n.id == id)
        .ok_or(TransitionError::NobleUnavailable(id))?;
    let noble = state.nobles[slot];

    if !can_claim_noble(seat(state, player)?, &noble) {
        return Err(TransitionError::NobleRequirementUnmet(id));
    }

    state.nobles.remove(slot);
    let holder = seat(state, player)?;
    holder.nobles.push_back(noble);
    holder.prestige += u32::from(noble.prestige);
    Ok(())
}

fn end_turn(state: &mut GameState) {
    state.main_action_taken = false;
    state.current = state.current.next(state.player_count());
    state.turn_number += 1;
}
