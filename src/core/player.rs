//! Players, per-player storage, and observers.
//!
//! ## Observer
//!
//! A view of the game is always produced *for* someone: either a seated
//! player, or the omniscient observer (referee, logs, debugging) that sees
//! everything. `Observer` makes that choice explicit instead of using a
//! sentinel player index.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_tabletop::core::PlayerId;
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

/// Who a state view is being produced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observer {
    /// Sees every real value. Snapshots for this observer are exact copies.
    Omniscient,
    /// A seated player.
    Player(PlayerId),
}

impl Observer {
    /// The observing player, if any.
    #[must_use]
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            Observer::Omniscient => None,
            Observer::Player(p) => Some(p),
        }
    }

    #[must_use]
    pub const fn is_omniscient(self) -> bool {
        matches!(self, Observer::Omniscient)
    }

    /// Can this observer see a collection that is private to `owner`?
    ///
    /// Neutral collections (`owner == None`) are private to nobody, so
    /// only the omniscient observer sees them.
    ///
    /// ```
    /// use rust_tabletop::core::{Observer, PlayerId};
    ///
    /// let p1 = Observer::Player(PlayerId::new(1));
    /// assert!(p1.sees_private_of(Some(PlayerId::new(1))));
    /// assert!(!p1.sees_private_of(Some(PlayerId::new(0))));
    /// assert!(!p1.sees_private_of(None));
    /// assert!(Observer::Omniscient.sees_private_of(None));
    /// ```
    #[must_use]
    pub fn sees_private_of(self, owner: Option<PlayerId>) -> bool {
        match self {
            Observer::Omniscient => true,
            Observer::Player(p) => owner == Some(p),
        }
    }
}

impl From<PlayerId> for Observer {
    fn from(player: PlayerId) -> Self {
        Observer::Player(player)
    }
}

impl std::fmt::Display for Observer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Observer::Omniscient => write!(f, "Omniscient"),
            Observer::Player(p) => write!(f, "{}", p),
        }
    }
}

/// Per-player data storage, one entry per seat.
///
/// ```
/// use rust_tabletop::core::{PlayerId, PlayerMap};
///
/// let mut bullets: PlayerMap<i64> = PlayerMap::with_value(4, 6);
/// bullets[PlayerId::new(2)] -= 1;
/// assert_eq!(bullets[PlayerId::new(2)], 5);
/// assert_eq!(bullets.get(PlayerId::new(9)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per player from a factory.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Checked lookup; `None` for a seat outside the game.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
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
