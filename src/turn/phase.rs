//! Phase machine: `Setup -> Active -> Endgame -> Finished`.
//!
//! Phases only move forward. Both checks operate on a state the controller
//! already owns, so they mutate in place.

use tracing::info;

use crate::core::{GameState, Phase, PlayerId};
use crate::rules::is_game_over;

/// After any applied action: enter the endgame the moment someone reaches
/// the win threshold. The current seat becomes the trigger.
pub fn check_endgame(state: &mut GameState) {
    if matches!(state.phase, Phase::Setup | Phase::Active) && is_game_over(state) {
        info!(trigger = %state.current, turn = state.turn_number, "endgame triggered");
        state.phase = Phase::Endgame;
        state.endgame_trigger = Some(state.current);
    }
}

/// After the actor index advanced.
///
/// Setup ends once play returns to seat 0. The endgame ends once play
/// returns to the triggering seat, and the leader is recorded as winner.
pub fn after_advance(state: &mut GameState) {
    if state.phase == Phase::Setup && state.current == PlayerId::new(0) {
        state.phase = Phase::Active;
    }

    if state.phase == Phase::Endgame && state.endgame_trigger == Some(state.current) {
        state.phase = Phase::Finished;
        state.winner = state.leader();
        info!(winner = ?state.winner, turns = state.turn_number, "game finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WIN_THRESHOLD;
    use crate::core::{PlayerKind, PlayerState};

    fn three_seats() -> GameState {
        GameState::new((0..3).map(|i| PlayerState::new(PlayerId::new(i), format!("P{i}"), PlayerKind::Human)))
    }

    #[test]
    fn test_setup_ends_on_return_to_seat_zero() {
        let mut state = three_seats();
        state.current = PlayerId::new(1);
        after_advance(&mut state);
        assert_eq!(state.phase, Phase::Setup);

        state.current = PlayerId::new(0);
        after_advance(&mut state);
        assert_eq!(state.phase, Phase::Active);
    }

    #[test]
    fn test_endgame_trigger_and_finish() {
        let mut state = three_seats();
        state.phase = Phase::Active;
        state.current = PlayerId::new(1);
        state.player_mut(PlayerId::new(1)).unwrap().prestige = WIN_THRESHOLD;

        check_endgame(&mut state);
        assert_eq!(state.phase, Phase::Endgame);
        assert_eq!(state.endgame_trigger, Some(PlayerId::new(1)));

        state.player_mut(PlayerId::new(2)).unwrap().prestige = WIN_THRESHOLD + 1;
        state.current = PlayerId::new(2);
        after_advance(&mut state);
        assert_eq!(state.phase, Phase::Endgame);

        state.current = PlayerId::new(0);
        after_advance(&mut state);
        assert_eq!(state.phase, Phase::Endgame);

        state.current = PlayerId::new(1);
        after_advance(&mut state);
        assert_eq!(state.phase, Phase::Finished);
        assert_eq!(state.winner, Some(PlayerId::new(2)));
    }

    #[test]
    fn test_endgame_does_not_retrigger() {
        let mut state = three_seats();
        state.phase = Phase::Endgame;
        state.endgame_trigger = Some(PlayerId::new(0));
        state.current = PlayerId::new(2);
        state.player_mut(PlayerId::new(2)).unwrap().prestige = 20;

        check_endgame(&mut state);
        assert_eq!(state.endgame_trigger, Some(PlayerId::new(0)));
    }
}
