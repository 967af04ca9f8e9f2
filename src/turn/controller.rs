//! The turn controller.
//!
//! Applies the human's actions through a [`Transition`], owns the discard
//! obligation, noble awards and phase changes, then drives every computer
//! seat until play returns to a human or the game finishes.
//!
//! ## Implementation Notes
//!
//! - Only actions in the current legal set are accepted from a human
//! - A computer seat whose decision fails, or is not legal, has its turn
//!   ended safely; the failure is logged and the chain continues
//! - Computer seats with no registered strategy are skipped
//! - Chains are bounded per turn and in total, so a broken strategy or
//!   transition cannot loop forever

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ai::{AiError, AiRegistry};
use crate::core::{Action, ControllerConfig, GameState, PendingDiscard, PlayerId};
use crate::rules::{eligible_nobles, StandardTransition, Transition, TransitionError};

use super::delay::{delay_for, TurnDelay};
use super::discard::auto_discard;
use super::legal::valid_actions;
use super::phase::{after_advance, check_endgame};

/// Why a submitted action was not executed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TurnError {
    #[error("the game is finished")]
    GameFinished,

    #[error("it is {expected}'s turn, not {actual}'s")]
    WrongActor { expected: PlayerId, actual: PlayerId },

    #[error("illegal action: {0}")]
    IllegalAction(Action),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Drives a game from one human action to the next.
pub struct TurnController<T: Transition = StandardTransition> {
    transition: T,
    registry: AiRegistry,
    delay: Box<dyn TurnDelay>,
    config: ControllerConfig,
}

impl TurnController<StandardTransition> {
    /// Controller under the standard rules.
    #[must_use]
    pub fn standard(registry: AiRegistry, config: ControllerConfig) -> Self {
        Self::new(StandardTransition, registry, config)
    }
}

impl<T: Transition> TurnController<T> {
    /// Create a controller. The pause before each computer decision comes
    /// from `config.ai_delay_ms`.
    pub fn new(transition: T, registry: AiRegistry, config: ControllerConfig) -> Self {
        Self {
            transition,
            registry,
            delay: delay_for(config.ai_delay_ms),
            config,
        }
    }

    /// Replace the pause before computer decisions.
    #[must_use]
    pub fn with_delay(mut self, delay: impl TurnDelay + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &AiRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AiRegistry {
        &mut self.registry
    }

    /// Legal actions for `player` in `state`.
    #[must_use]
    pub fn valid_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        valid_actions(state, player)
    }

    /// Apply one action with the controller's bookkeeping, without any
    /// legality check beyond the transition's own.
    ///
    /// A take or reservation that leaves the actor over the gem cap installs
    /// a discard obligation for the excess. Ending a turn first awards every
    /// noble the actor qualifies for, then advances the seat and the phase.
    pub fn step(&self, state: &GameState, action: &Action) -> Result<GameState, TurnError> {
        let player = action.player();

        if !action.is_end_turn() {
            let mut next = self.transition.apply(state, action)?;
            if !matches!(action, Action::DiscardGems { .. }) {
                let excess = next.excess_gems(player);
                if excess > 0 {
                    debug!(%player, excess, "discard owed");
                    next.pending_discard = Some(PendingDiscard {
                        player,
                        count: u8::try_from(excess).unwrap_or(u8::MAX),
                    });
                }
            }
            check_endgame(&mut next);
            return Ok(next);
        }

        let mut next = state.clone();
        for noble in eligible_nobles(state, player) {
            next = self.transition.apply(&next, &Action::ClaimNoble { player, noble: noble.id })?;
            info!(%player, noble = %noble.id, prestige = noble.prestige, "noble awarded");
        }
        check_endgame(&mut next);

        let mut next = self.transition.apply(&next, action)?;
        after_advance(&mut next);
        Ok(next)
    }

    /// Execute a human's action, then run computer seats until a human is
    /// to act again or the game ends.
    pub async fn execute_turn(&mut self, state: &GameState, action: Action) -> Result<GameState, TurnError> {
        if state.is_finished() {
            return Err(TurnError::GameFinished);
        }
        if action.player() != state.current {
            return Err(TurnError::WrongActor {
                expected: state.current,
                actual: action.player(),
            });
        }
        if !valid_actions(state, action.player()).contains(&action) {
            return Err(TurnError::IllegalAction(action));
        }

        let next = self.step(state, &action)?;
        info!(player = %action.player(), %action, turn = next.turn_number, "action executed");
        Ok(self.run_ai_turns(next).await)
    }

    /// Play computer seats until a human is to act or the game finishes.
    pub async fn run_ai_turns(&mut self, mut state: GameState) -> GameState {
        let mut total_steps = 0usize;
        let mut turn_steps = 0usize;
        let mut turn_key = (state.current, state.turn_number);

        loop {
            if state.is_finished() {
                break;
            }
            let current = state.current;
            match state.player(current) {
                Some(seat) if !seat.is_human() => {}
                _ => break,
            }
            if total_steps >= self.config.max_chain_steps {
                warn!(steps = total_steps, "computer chain stopped at its step limit");
                break;
            }
            total_steps += 1;

            if turn_key != (current, state.turn_number) {
                turn_key = (current, state.turn_number);
                turn_steps = 0;
            }

            if !self.registry.contains(current) {
                debug!(player = %current, "no strategy registered; skipping seat");
                match self.skip_seat(&state) {
                    Ok(next) => state = next,
                    Err(err) => {
                        warn!(player = %current, %err, "could not skip seat");
                        break;
                    }
                }
                continue;
            }

            self.delay.pause().await;

            let attempt = if turn_steps >= self.config.max_ai_actions_per_turn {
                warn!(player = %current, steps = turn_steps, "computer turn hit its action limit");
                Err(TurnError::IllegalAction(Action::end_turn(current)))
            } else {
                turn_steps += 1;
                self.ai_step(&state, current)
            };

            match attempt {
                Ok(next) => state = next,
                Err(err) => {
                    warn!(player = %current, %err, "computer action failed; ending its turn");
                    match self.end_turn_safely(&state) {
                        Ok(next) => state = next,
                        Err(err) => {
                            warn!(player = %current, %err, "could not end computer turn");
                            break;
                        }
                    }
                }
            }
        }

        state
    }

    /// One computer decision, applied, with any discard it causes resolved.
    fn ai_step(&mut self, state: &GameState, player: PlayerId) -> Result<GameState, TurnError> {
        let legal = valid_actions(state, player);
        let seat = self
            .registry
            .get_mut(player)
            .ok_or(AiError::UnknownPlayer(player))?;
        let action = seat.decide(state, player, &legal)?;
        if !legal.contains(&action) {
            return Err(TurnError::IllegalAction(action));
        }

        let next = self.step(state, &action)?;
        self.resolve_discard(&next, player)
    }

    /// Pay an outstanding discard for `player` automatically.
    fn resolve_discard(&self, state: &GameState, player: PlayerId) -> Result<GameState, TurnError> {
        let (Some(count), Some(seat)) = (state.discard_owed_by(player), state.player(player)) else {
            return Ok(state.clone());
        };
        let gems = auto_discard(&seat.gems, count);
        debug!(%player, %count, "auto discard");
        self.step(state, &Action::DiscardGems { player, gems })
    }

    /// End the current seat's turn after a failed decision.
    fn end_turn_safely(&self, state: &GameState) -> Result<GameState, TurnError> {
        let player = state.current;
        let state = self.resolve_discard(state, player)?;
        self.step(&state, &Action::end_turn(player))
    }

    /// Pass a computer seat with no strategy: no decision, no nobles.
    fn skip_seat(&self, state: &GameState) -> Result<GameState, TurnError> {
        let player = state.current;
        let state = self.resolve_discard(state, player)?;
        let mut next = self.transition.apply(&state, &Action::end_turn(player))?;
        after_advance(&mut next);
        Ok(next)
    }
}

impl<T: Transition> std::fmt::Debug for TurnController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
