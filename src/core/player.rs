//! Seats at the table and per-seat storage.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A seat, 0-based. Games seat 2 to 5 players; turn order walks the
/// seats in a fixed cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat acting after this one, wrapping past the last seat.
    ///
    /// ```
    /// use fireworks_ai::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).next(3), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self((self.index() + 1) as u8 % player_count as u8)
    }

    /// Every seat of a `player_count`-player game, in turn order.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexed by [`PlayerId`].
///
/// The game state keeps its hands in one of these; indexing is direct
/// into the backing `Vec`.
///
/// ```
/// use fireworks_ai::core::{PlayerId, PlayerMap};
///
/// let mut tokens = PlayerMap::new(3, |seat| seat.index() as u32);
/// tokens[PlayerId::new(2)] += 10;
/// assert_eq!(tokens[PlayerId::new(2)], 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a map by calling `init` once per seat.
    ///
    /// # Panics
    ///
    /// Panics on zero seats or more than 255.
    pub fn new(player_count: usize, init: impl Fn(PlayerId) -> T) -> Self {
        assert!(
            (1..=255).contains(&player_count),
            "player count {} outside 1..=255",
            player_count
        );

        Self {
            data: PlayerId::all(player_count).map(init).collect(),
        }
    }

    /// How many seats this map covers.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
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
