//! Ordered, mutable collection of items.
//!
//! Index 0 is the top of the deck: `draw` takes from it and `add` puts onto
//! it. Storage is an `im::Vector`, so `copy` is O(1) and the copy and the
//! original never observe each other's mutations.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::error::DeckError;
use crate::core::rng::GameRng;

/// An ordered deck of items.
///
/// ## Usage
///
/// ```
/// use rust_tabletop::components::Deck;
///
/// let mut deck: Deck<u32> = Deck::from_items([1, 2, 3]);
/// deck.add(0).unwrap();
///
/// assert_eq!(deck.draw(), Ok(0));
/// assert_eq!(deck.size(), 3);
/// assert_eq!(deck.get(0), Ok(&1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck<T: Clone> {
    items: Vector<T>,
    capacity: Option<usize>,
}

impl<T: Clone> Default for Deck<T> {
    fn default() -> Self {
        Self {
            items: Vector::new(),
            capacity: None,
        }
    }
}

impl<T: Clone> Deck<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A deck that refuses to grow past `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vector::new(),
            capacity: Some(capacity),
        }
    }

    /// Build a deck whose first item is the top.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
            capacity: None,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn ensure_room(&self, extra: usize) -> Result<(), DeckError> {
        match self.capacity {
            Some(capacity) if self.items.len() + extra > capacity => Err(DeckError::Full { capacity }),
            _ => Ok(()),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), DeckError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(DeckError::IndexOutOfRange {
                index,
                size: self.items.len(),
            })
        }
    }

    /// Put an item on top.
    pub fn add(&mut self, item: T) -> Result<(), DeckError> {
        self.ensure_room(1)?;
        self.items.push_front(item);
        Ok(())
    }

    /// Insert at `index`; `index == size()` puts it at the bottom.
    pub fn add_at(&mut self, item: T, index: usize) -> Result<(), DeckError> {
        if index > self.items.len() {
            return Err(DeckError::IndexOutOfRange {
                index,
                size: self.items.len(),
            });
        }
        self.ensure_room(1)?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Put every item of `other` on top, keeping `other`'s order.
    pub fn add_all(&mut self, other: &Deck<T>) -> Result<(), DeckError> {
        self.ensure_room(other.size())?;
        let mut merged = other.items.clone();
        merged.append(std::mem::take(&mut self.items));
        self.items = merged;
        Ok(())
    }

    /// Remove and return the top item.
    pub fn draw(&mut self) -> Result<T, DeckError> {
        self.items.pop_front().ok_or(DeckError::Empty)
    }

    /// Remove the first item equal to `item`. Returns whether one was found.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.items.index_of(item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T, DeckError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&T, DeckError> {
        self.items.get(index).ok_or(DeckError::IndexOutOfRange {
            index,
            size: self.items.len(),
        })
    }

    /// Replace the item at `index`, returning the old one.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, DeckError> {
        self.check_index(index)?;
        Ok(self.items.set(index, item))
    }

    /// Index of the first item matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&T) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    /// Permute in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut items: Vec<T> = self.items.iter().cloned().collect();
        rng.shuffle(&mut items);
        self.replace_items(items);
    }

    /// Swap in new contents, keeping the capacity.
    pub(crate) fn replace_items(&mut self, items: impl IntoIterator<Item = T>) {
        self.items = items.into_iter().collect();
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Independent duplicate: same order, same items.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> FromIterator<T> for Deck<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: u32) -> Deck<u32> {
        Deck::from_items(0..n)
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = numbers(3);
        assert_eq!(deck.draw(), Ok(0));
        assert_eq!(deck.draw(), Ok(1));
        assert_eq!(deck.draw(), Ok(2));
        assert_eq!(deck.draw(), Err(DeckError::Empty));
    }

    #[test]
    fn test_add_puts_on_top() {
        let mut deck = numbers(2);
        deck.add(9).unwrap();
        assert_eq!(deck.iter().copied().collect::<Vec<_>>(), vec![9, 0, 1]);
    }

    #[test]
    fn test_add_at() {
        let mut deck = numbers(3);
        deck.add_at(7, 1).unwrap();
        deck.add_at(8, 4).unwrap(); // bottom
        assert_eq!(deck.iter().copied().collect::<Vec<_>>(), vec![0, 7, 1, 2, 8]);
        assert_eq!(
            deck.add_at(5, 9),
            Err(DeckError::IndexOutOfRange { index: 9, size: 5 })
        );
    }

    #[test]
    fn test_add_all_keeps_order_on_top() {
        let mut deck = Deck::from_items([10, 11]);
        deck.add_all(&Deck::from_items([1, 2])).unwrap();
        assert_eq!(deck.iter().copied().collect::<Vec<_>>(), vec![1, 2, 10, 11]);
    }

    #[test]
    fn test_remove() {
        let mut deck = numbers(4);
        assert!(deck.remove(&2));
        assert!(!deck.remove(&2));
        assert_eq!(deck.size(), 3);
    }

    #[test]
    fn test_get_and_set() {
        let mut deck = numbers(3);
        assert_eq!(deck.set(1, 42), Ok(1));
        assert_eq!(deck.get(1), Ok(&42));
        assert_eq!(deck.get(3), Err(DeckError::IndexOutOfRange { index: 3, size: 3 }));
        assert_eq!(deck.set(3, 0), Err(DeckError::IndexOutOfRange { index: 3, size: 3 }));
    }

    #[test]
    fn test_capacity() {
        let mut deck: Deck<u32> = Deck::with_capacity(2);
        deck.add(1).unwrap();
        deck.add(2).unwrap();
        assert_eq!(deck.add(3), Err(DeckError::Full { capacity: 2 }));
        assert_eq!(deck.add_all(&numbers(1)), Err(DeckError::Full { capacity: 2 }));
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a = numbers(20);
        let mut b = numbers(20);
        a.shuffle(&mut GameRng::new(5));
        b.shuffle(&mut GameRng::new(5));
        assert_eq!(a, b);
        assert_ne!(a, numbers(20));

        let mut sorted: Vec<_> = a.iter().copied().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_copy_is_independent() {
        let original = numbers(5);
        let mut copy = original.copy();
        assert_eq!(copy, original);

        copy.draw().unwrap();
        copy.set(0, 99).unwrap();
        assert_eq!(original.size(), 5);
        assert_eq!(original.get(0), Ok(&0));
        assert_eq!(original.get(1), Ok(&1));
    }
}
