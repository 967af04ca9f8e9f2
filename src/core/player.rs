//! Player identification, per-seat storage and per-player game data.
//!
//! ## PlayerId
//!
//! Type-safe seat index. A game seats 2-4 players.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## PlayerState
//!
//! Everything a player owns: held gems, purchased and reserved cards,
//! awarded nobles and prestige.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::gems::{GemColor, Gems};
use crate::cards::{Card, CardId, Noble};

/// Seat identifier. Indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The next seat, wrapping around a table of `player_count`.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count.max(1)) as u8)
    }

    /// Iterate over all player IDs for a table of `player_count`.
    ///
    /// ```
    /// use gem_market::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use gem_market::core::{PlayerId, PlayerMap};
///
/// let mut wins: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// wins[PlayerId::new(1)] += 1;
/// assert_eq!(wins[PlayerId::new(1)], 1);
/// assert!(wins.try_get(PlayerId::new(5)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        let data = (0..player_count.min(u8::MAX as usize) as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a seat's data, or `None` for an index outside the table.
    #[must_use]
    pub fn try_get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Mutable variant of [`try_get`](Self::try_get).
    pub fn try_get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// AI difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}

/// Who controls a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    /// Computer-controlled, with an optional tier label for display.
    Computer { difficulty: Option<Difficulty> },
}

impl PlayerKind {
    #[must_use]
    pub fn is_human(self) -> bool {
        matches!(self, PlayerKind::Human)
    }
}

/// Everything a single player owns.
///
/// Collections use `im::Vector` so cloning a `GameState` stays cheap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    /// Held gems, wildcard included.
    pub gems: Gems,
    /// Purchased cards, in purchase order. Append-only.
    pub purchased: Vector<Card>,
    /// Reserved cards (at most three).
    pub reserved: Vector<Card>,
    pub prestige: u32,
    pub nobles: Vector<Noble>,
}

impl PlayerState {
    /// A fresh player with nothing.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            gems: Gems::new(),
            purchased: Vector::new(),
            reserved: Vector::new(),
            prestige: 0,
            nobles: Vector::new(),
        }
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        self.kind.is_human()
    }

    /// Per-color count of purchased cards granting that color.
    #[must_use]
    pub fn bonuses(&self) -> Gems {
        self.purchased.iter().map(|card| card.bonus).collect()
    }

    /// Bonus count for a single color.
    #[must_use]
    pub fn bonus(&self, color: GemColor) -> u8 {
        self.purchased.iter().filter(|card| card.bonus == color).count() as u8
    }

    /// Position of a reserved card.
    #[must_use]
    pub fn reserved_position(&self, card: CardId) -> Option<usize> {
        self.reserved.iter().position(|c| c.id == card)
    }
}
