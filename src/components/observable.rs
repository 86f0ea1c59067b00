//! Decks with per-item, per-player visibility.
//!
//! Each held item carries a visibility row with one flag per player. The
//! row travels with the item through every mutation (add, draw, shuffle,
//! set), so visibility is always defined for every held item and every
//! player in `[0, player_count)`.
//!
//! `copy_for` duplicates the deck and reports which positions the observer
//! cannot see. It does not decide what to do about them; that is the
//! redaction policy's job.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deck::Deck;
use crate::core::error::DeckError;
use crate::core::player::{Observer, PlayerId};
use crate::core::rng::GameRng;

/// One flag per player. Inline for up to 8 players.
pub type VisibilityRow = SmallVec<[bool; 8]>;

/// A deck copy together with the positions hidden from its observer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservedCopy<T: Clone> {
    pub deck: PartiallyObservableDeck<T>,
    /// Ascending indices not visible to the observer.
    pub hidden: Vec<usize>,
}

/// A deck with a visibility matrix.
///
/// ```
/// use rust_tabletop::components::PartiallyObservableDeck;
/// use rust_tabletop::core::{Observer, PlayerId};
///
/// let mut planned: PartiallyObservableDeck<&str> = PartiallyObservableDeck::new(3);
/// planned.add_public("move").unwrap();
/// planned.add_visible_to("shoot", Some(PlayerId::new(0))).unwrap();
///
/// // "shoot" is on top, hidden from player 1.
/// assert_eq!(planned.is_visible(0, PlayerId::new(1)), Ok(false));
///
/// let view = planned.copy_for(Observer::Player(PlayerId::new(1)));
/// assert_eq!(view.hidden, vec![0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartiallyObservableDeck<T: Clone> {
    deck: Deck<T>,
    visibility: Vector<VisibilityRow>,
    player_count: usize,
}

impl<T: Clone> PartiallyObservableDeck<T> {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            deck: Deck::new(),
            visibility: Vector::new(),
            player_count,
        }
    }

    #[must_use]
    pub fn with_capacity(player_count: usize, capacity: usize) -> Self {
        Self {
            deck: Deck::with_capacity(capacity),
            visibility: Vector::new(),
            player_count,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.deck.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// The underlying items, read-only.
    #[must_use]
    pub fn deck(&self) -> &Deck<T> {
        &self.deck
    }

    pub fn get(&self, index: usize) -> Result<&T, DeckError> {
        self.deck.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.deck.iter()
    }

    fn row(&self, visible: &[bool]) -> Result<VisibilityRow, DeckError> {
        if visible.len() != self.player_count {
            return Err(DeckError::VisibilityArity {
                expected: self.player_count,
                got: visible.len(),
            });
        }
        Ok(SmallVec::from_slice(visible))
    }

    fn row_for(&self, player: Option<PlayerId>) -> Result<VisibilityRow, DeckError> {
        if let Some(p) = player {
            self.check_player(p)?;
        }
        Ok(PlayerId::all(self.player_count).map(|q| Some(q) == player).collect())
    }

    fn check_player(&self, player: PlayerId) -> Result<(), DeckError> {
        if player.index() < self.player_count {
            Ok(())
        } else {
            Err(DeckError::PlayerOutOfRange {
                player,
                player_count: self.player_count,
            })
        }
    }

    /// Put an item on top with an explicit visibility row.
    pub fn add_with_visibility(&mut self, item: T, visible: &[bool]) -> Result<(), DeckError> {
        let row = self.row(visible)?;
        self.deck.add(item)?;
        self.visibility.push_front(row);
        Ok(())
    }

    /// Insert at `index` with an explicit visibility row.
    pub fn add_at_with_visibility(&mut self, item: T, index: usize, visible: &[bool]) -> Result<(), DeckError> {
        let row = self.row(visible)?;
        self.deck.add_at(item, index)?;
        self.visibility.insert(index, row);
        Ok(())
    }

    /// Put an item on top, visible to everyone.
    pub fn add_public(&mut self, item: T) -> Result<(), DeckError> {
        let row: VisibilityRow = SmallVec::from_elem(true, self.player_count);
        self.deck.add(item)?;
        self.visibility.push_front(row);
        Ok(())
    }

    /// Put an item on top, visible only to `player` (or to nobody).
    pub fn add_visible_to(&mut self, item: T, player: Option<PlayerId>) -> Result<(), DeckError> {
        let row = self.row_for(player)?;
        self.deck.add(item)?;
        self.visibility.push_front(row);
        Ok(())
    }

    /// Insert at `index`, visible only to `player` (or to nobody).
    pub fn add_at_visible_to(&mut self, item: T, index: usize, player: Option<PlayerId>) -> Result<(), DeckError> {
        let row = self.row_for(player)?;
        self.deck.add_at(item, index)?;
        self.visibility.insert(index, row);
        Ok(())
    }

    /// Remove and return the top item; its visibility row goes with it.
    pub fn draw(&mut self) -> Result<T, DeckError> {
        let item = self.deck.draw()?;
        self.visibility.pop_front();
        Ok(item)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T, DeckError> {
        let item = self.deck.remove_at(index)?;
        self.visibility.remove(index);
        Ok(item)
    }

    /// Remove the first item equal to `item`.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.deck.position(|i| i == item) {
            Some(index) => {
                // In range: position came from the deck itself.
                let _ = self.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Replace the item at `index`, keeping that slot's visibility.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, DeckError> {
        self.deck.set(index, item)
    }

    pub fn is_visible(&self, index: usize, player: PlayerId) -> Result<bool, DeckError> {
        self.check_player(player)?;
        let row = self.visibility.get(index).ok_or(DeckError::IndexOutOfRange {
            index,
            size: self.size(),
        })?;
        Ok(row[player.index()])
    }

    pub fn set_visibility(&mut self, index: usize, player: PlayerId, visible: bool) -> Result<(), DeckError> {
        self.check_player(player)?;
        let size = self.size();
        let row = self
            .visibility
            .get_mut(index)
            .ok_or(DeckError::IndexOutOfRange { index, size })?;
        row[player.index()] = visible;
        Ok(())
    }

    /// Reveal a slot to every player.
    pub fn reveal(&mut self, index: usize) -> Result<(), DeckError> {
        let size = self.size();
        let row = self
            .visibility
            .get_mut(index)
            .ok_or(DeckError::IndexOutOfRange { index, size })?;
        row.iter_mut().for_each(|v| *v = true);
        Ok(())
    }

    /// Slots the observer cannot see. Always empty for the omniscient observer.
    #[must_use]
    pub fn hidden_indices(&self, observer: Observer) -> Vec<usize> {
        let Some(player) = observer.player() else {
            return Vec::new();
        };
        self.visibility
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.get(player.index()).copied().unwrap_or(false))
            .map(|(i, _)| i)
            .collect()
    }

    /// Permute items together with their visibility rows.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut pairs: Vec<(T, VisibilityRow)> = self
            .deck
            .iter()
            .cloned()
            .zip(self.visibility.iter().cloned())
            .collect();
        rng.shuffle(&mut pairs);

        let (items, rows): (Vec<T>, Vec<VisibilityRow>) = pairs.into_iter().unzip();
        self.deck.replace_items(items);
        self.visibility = rows.into_iter().collect();
    }

    /// Duplicate the deck and record what `observer` cannot see.
    #[must_use]
    pub fn copy_for(&self, observer: Observer) -> ObservedCopy<T> {
        ObservedCopy {
            deck: self.clone(),
            hidden: self.hidden_indices(observer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_visibility_follows_item() {
        let mut deck: PartiallyObservableDeck<u32> = PartiallyObservableDeck::new(2);
        deck.add_visible_to(1, Some(p(0))).unwrap();
        deck.add_public(2).unwrap();

        // [2 (public), 1 (p0 only)]
        assert_eq!(deck.is_visible(0, p(1)), Ok(true));
        assert_eq!(deck.is_visible(1, p(1)), Ok(false));

        assert_eq!(deck.draw(), Ok(2));
        assert_eq!(deck.is_visible(0, p(0)), Ok(true));
        assert_eq!(deck.is_visible(0, p(1)), Ok(false));
    }

    #[test]
    fn test_set_visibility_and_reveal() {
        let mut deck: PartiallyObservableDeck<u32> = PartiallyObservableDeck::new(3);
        deck.add_visible_to(5, None).unwrap();
        assert_eq!(deck.hidden_indices(Observer::Player(p(2))), vec![0]);

        deck.set_visibility(0, p(2), true).unwrap();
        assert!(deck.hidden_indices(Observer::Player(p(2))).is_empty());
        assert_eq!(deck.hidden_indices(Observer::Player(p(1))), vec![0]);

        deck.reveal(0).unwrap();
        assert!(deck.hidden_indices(Observer::Player(p(1))).is_empty());
    }

    #[test]
    fn test_out_of_range_lookups() {
        let mut deck: PartiallyObservableDeck<u32> = PartiallyObservableDeck::new(2);
        deck.add_public(1).unwrap();

        assert_eq!(deck.is_visible(3, p(0)), Err(DeckError::IndexOutOfRange { index: 3, size: 1 }));
        assert_eq!(
            deck.is_visible(0, p(2)),
            Err(DeckError::PlayerOutOfRange { player: p(2), player_count: 2 })
        );
        assert_eq!(
            deck.set_visibility(0, p(5), true),
            Err(DeckError::PlayerOutOfRange { player: p(5), player_count: 2 })
        );
        assert_eq!(
            deck.add_with_visibility(2, &[true]),
            Err(DeckError::VisibilityArity { expected: 2, got: 1 })
        );
        assert_eq!(deck.size(), 1);
    }

    #[test]
    fn test_set_keeps_slot_visibility() {
        let mut deck: PartiallyObservableDeck<u32> = PartiallyObservableDeck::new(2);
        deck.add_visible_to(1, Some(p(1))).unwrap();
        deck.set(0, 9).unwrap();
        assert_eq!(deck.get(0), Ok(&9));
        assert_eq!(deck.is_visible(0, p(0)), Ok(false));
    }

    #[test]
    fn test_add_at_visible_to() {
        let mut deck: PartiallyObservableDeck<u32> = PartiallyObservableDeck::new(2);
        for i in 0..4 {
            deck.add_visible_to(i, None).unwrap();
        }
        deck.add_at_visible_to(99, 2, Some(p(0))).unwrap();
        assert_eq!(deck.get(2), Ok(&99));
        assert_eq!(deck.hidden_indices(Observer::Player(p(0))), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_shuffle_moves_rows_with_items() {
        let mut deck: PartiallyObservableDeck<u32> = PartiallyObservableDeck::new(2);
        for i in 0..10 {
            // Even items are visible to player 0 only.
            let owner = if i % 2 == 0 { Some(p(0)) } else { None };
            deck.add_visible_to(i, owner).unwrap();
        }
        deck.shuffle(&mut GameRng::new(11));

        for i in 0..deck.size() {
            let item = *deck.get(i).unwrap();
            assert_eq!(deck.is_visible(i, p(0)), Ok(item % 2 == 0));
        }
    }

    #[test]
    fn test_copy_for_omniscient_hides_nothing() {
        let mut deck: PartiallyObservableDeck<u32> = PartiallyObservableDeck::new(2);
        deck.add_visible_to(1, None).unwrap();

        let view = deck.copy_for(Observer::Omniscient);
        assert!(view.hidden.is_empty());
        assert_eq!(view.deck, deck);
    }

    #[test]
    fn test_remove_by_value() {
        let mut deck: PartiallyObservableDeck<u32> = PartiallyObservableDeck::new(2);
        deck.add_visible_to(1, Some(p(1))).unwrap();
        deck.add_public(2).unwrap();

        assert!(deck.remove(&2));
        assert!(!deck.remove(&2));
        assert_eq!(deck.is_visible(0, p(0)), Ok(false));
    }
}
