//! Game state.
//!
//! `GameState` is a plain value: every operation takes an old state and
//! produces a new one. All collections are `im` persistent structures, so a
//! clone shares structure and costs O(1). Nothing ever mutates a state that
//! a caller still holds.
//!
//! ## Lifecycle invariants
//!
//! - A card is in exactly one of: a tier deck, the display, some player's
//!   reserve, some player's purchased pile.
//! - A noble is either in the pool or awarded to exactly one player.
//! - Gems only move between the pool and players; their sum per color is
//!   constant for a game.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::GEM_CAP;
use super::gems::Gems;
use super::player::{PlayerId, PlayerState};
use crate::cards::{Card, CardId, Noble, Tier};

/// Game phase. Only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// First round, until play returns to seat 0.
    Setup,
    Active,
    /// Someone reached the win threshold; remaining seats get one more turn.
    Endgame,
    Finished,
}

/// A player must shed gems before anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDiscard {
    pub player: PlayerId,
    pub count: u8,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Seats in turn order.
    pub players: Vector<PlayerState>,

    /// Seat whose turn it is.
    pub current: PlayerId,

    /// Undrawn cards per tier; the front is the top.
    pub decks: [Vector<Card>; 3],

    /// Face-up cards per tier (up to four).
    pub display: [Vector<Card>; 3],

    /// Nobles not yet awarded.
    pub nobles: Vector<Noble>,

    /// Shared gem supply.
    pub pool: Gems,

    pub phase: Phase,
    pub winner: Option<PlayerId>,
    pub pending_discard: Option<PendingDiscard>,

    /// Seat whose turn triggered the endgame.
    pub endgame_trigger: Option<PlayerId>,

    /// Whether the current seat already took, reserved or purchased.
    pub main_action_taken: bool,

    /// Completed turns so far.
    pub turn_number: u32,

    /// Every applied action, in order.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// A state with the given seats and nothing on the table.
    ///
    /// Use `setup::GameBuilder` for a dealt game.
    #[must_use]
    pub fn new(players: impl IntoIterator<Item = PlayerState>) -> Self {
        Self {
            players: players.into_iter().collect(),
            current: PlayerId::new(0),
            decks: Default::default(),
            display: Default::default(),
            nobles: Vector::new(),
            pool: Gems::new(),
            phase: Phase::Setup,
            winner: None,
            pending_discard: None,
            endgame_trigger: None,
            main_action_taken: false,
            turn_number: 0,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// A seat's state, or `None` for an unknown seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(id.index())
    }

    /// Mutable seat access; clones shared structure on write.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(id.index())
    }

    /// The seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&PlayerState> {
        self.player(self.current)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Discard obligation for `player`, if one is outstanding.
    #[must_use]
    pub fn discard_owed_by(&self, player: PlayerId) -> Option<u8> {
        self.pending_discard
            .filter(|pending| pending.player == player)
            .map(|pending| pending.count)
    }

    /// Gems a player holds beyond the cap.
    #[must_use]
    pub fn excess_gems(&self, player: PlayerId) -> u32 {
        self.player(player)
            .map(|p| p.gems.total().saturating_sub(GEM_CAP))
            .unwrap_or(0)
    }

    /// Face-up cards of a tier.
    #[must_use]
    pub fn display_row(&self, tier: Tier) -> &Vector<Card> {
        &self.display[tier.index()]
    }

    /// Undrawn cards left in a tier.
    #[must_use]
    pub fn deck_size(&self, tier: Tier) -> usize {
        self.decks[tier.index()].len()
    }

    /// Locate a face-up card.
    #[must_use]
    pub fn find_displayed(&self, card: CardId) -> Option<(Tier, usize)> {
        Tier::ALL.iter().find_map(|&tier| {
            self.display[tier.index()]
                .iter()
                .position(|c| c.id == card)
                .map(|slot| (tier, slot))
        })
    }

    /// Iterate over every face-up card.
    pub fn displayed_cards(&self) -> impl Iterator<Item = &Card> {
        self.display.iter().flat_map(|row| row.iter())
    }

    /// Sum of the pool and every player's gems.
    #[must_use]
    pub fn gem_supply(&self) -> Gems {
        self.players
            .iter()
            .fold(self.pool, |acc, player| acc.plus(&player.gems))
    }

    /// Seat with the strictly highest prestige; ties go to the lowest seat.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        let mut best: Option<&PlayerState> = None;
        for player in &self.players {
            if best.map_or(true, |b| player.prestige > b.prestige) {
                best = Some(player);
            }
        }
        best.map(|p| p.id)
    }
}
