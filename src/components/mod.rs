//! Entity containers.
//!
//! ## Key Types
//!
//! - `Deck`: ordered, mutable collection with draw/add/remove/shuffle
//! - `PartiallyObservableDeck`: a deck plus per-item, per-player visibility
//! - `CollectionStore`: the storage a `GameState` keeps per collection

pub mod deck;
pub mod observable;

pub use deck::Deck;
pub use observable::{ObservedCopy, PartiallyObservableDeck, VisibilityRow};

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;

/// Storage for one collection of a `GameState`.
///
/// Collections with per-item visibility need the matrix; everything else
/// is a plain deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionStore {
    Plain(Deck<Entity>),
    Observable(PartiallyObservableDeck<Entity>),
}

impl CollectionStore {
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            CollectionStore::Plain(deck) => deck.size(),
            CollectionStore::Observable(deck) => deck.size(),
        }
    }

    /// Read-only view of the items, whatever the storage.
    #[must_use]
    pub fn deck(&self) -> &Deck<Entity> {
        match self {
            CollectionStore::Plain(deck) => deck,
            CollectionStore::Observable(deck) => deck.deck(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.deck().iter()
    }
}
