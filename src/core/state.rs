//! Game state: public counters plus every collection's contents.
//!
//! ## PublicState
//!
//! Information every observer sees:
//! - Round and turn counters, active player
//! - Per-player counters (bullets left, character, score)
//!
//! ## GameState
//!
//! Complete game state including:
//! - Public state
//! - One `CollectionStore` per configured collection
//! - RNG
//!
//! Collection sizes are always public: redaction may change *what* is in a
//! collection, never *how many*.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::{CategoryId, CollectionId, GameConfig};
use super::entity::{Entity, EntityId};
use super::error::{ConfigError, StateError};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::components::{CollectionStore, Deck, PartiallyObservableDeck};

/// Public game state - observable by all players.
///
/// ## Counter Values (i64 only)
///
/// `counters` use `FxHashMap<String, i64>`. Booleans are 0/1, enums are
/// discriminants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    player_count: usize,

    /// Index of the round being played (starts at 0). Round cards after
    /// this index are still undetermined.
    pub round: u32,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    pub active_player: PlayerId,

    /// Per-player counters - games define keys.
    pub counters: PlayerMap<FxHashMap<String, i64>>,
}

impl PublicState {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            round: 0,
            turn_number: 1,
            active_player: PlayerId::new(0),
            counters: PlayerMap::with_default(player_count),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    /// Get a counter with default.
    #[must_use]
    pub fn get_counter(&self, player: PlayerId, key: &str, default: i64) -> i64 {
        self.counters
            .get(player)
            .and_then(|c| c.get(key))
            .copied()
            .unwrap_or(default)
    }

    pub fn set_counter(&mut self, player: PlayerId, key: impl Into<String>, value: i64) {
        self.counters[player].insert(key.into(), value);
    }

    /// Modify a counter by delta.
    pub fn modify_counter(&mut self, player: PlayerId, key: &str, delta: i64) {
        let current = self.get_counter(player, key, 0);
        self.counters[player].insert(key.to_string(), current + delta);
    }

    /// Advance to the next turn, passing play to the next seat.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.active_player = PlayerId::new(((self.active_player.index() + 1) % self.player_count) as u8);
    }

    pub fn advance_round(&mut self) {
        self.round += 1;
    }
}

/// Full game state including private information.
///
/// Persistent storage throughout, so `clone` is cheap and a clone never
/// observes mutations of the original.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Public state (observable by all).
    pub public: PublicState,

    collections: FxHashMap<CollectionId, CollectionStore>,

    /// Deterministic RNG for in-game randomness.
    pub rng: GameRng,

    next_entity_id: u32,
}

impl GameState {
    /// Create an empty state with one store per configured collection.
    ///
    /// Collections with per-item visibility get a `PartiallyObservableDeck`;
    /// the rest get a plain `Deck`.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let collections = config
            .collections
            .iter()
            .map(|c| {
                let store = match (c.rule.is_per_item(), c.capacity) {
                    (true, Some(cap)) => {
                        CollectionStore::Observable(PartiallyObservableDeck::with_capacity(config.player_count, cap))
                    }
                    (true, None) => CollectionStore::Observable(PartiallyObservableDeck::new(config.player_count)),
                    (false, Some(cap)) => CollectionStore::Plain(Deck::with_capacity(cap)),
                    (false, None) => CollectionStore::Plain(Deck::new()),
                };
                (c.id, store)
            })
            .collect();

        Self {
            public: PublicState::new(config.player_count),
            collections,
            rng: GameRng::new(seed),
            next_entity_id: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.public.player_count()
    }

    // === Entities ===

    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Create an entity with a fresh id. It is not placed anywhere.
    pub fn spawn(&mut self, category: CategoryId, value: i64, owner: Option<PlayerId>) -> Entity {
        let mut entity = Entity::new(self.alloc_entity(), category, value);
        entity.owner = owner;
        entity
    }

    /// Locate an entity: its collection and index.
    #[must_use]
    pub fn find(&self, entity: EntityId) -> Option<(CollectionId, usize)> {
        self.collections.iter().find_map(|(&id, store)| {
            store.deck().position(|e| e.id == entity).map(|index| (id, index))
        })
    }

    // === Collections ===

    /// Configured collection ids, ascending.
    #[must_use]
    pub fn collection_ids(&self) -> Vec<CollectionId> {
        let mut ids: Vec<CollectionId> = self.collections.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn collection(&self, id: CollectionId) -> Result<&CollectionStore, StateError> {
        self.collections
            .get(&id)
            .ok_or(StateError::Config(ConfigError::UnknownCollection(id)))
    }

    pub fn collection_mut(&mut self, id: CollectionId) -> Result<&mut CollectionStore, StateError> {
        self.collections
            .get_mut(&id)
            .ok_or(StateError::Config(ConfigError::UnknownCollection(id)))
    }

    /// Items of any collection, read-only.
    pub fn deck(&self, id: CollectionId) -> Result<&Deck<Entity>, StateError> {
        Ok(self.collection(id)?.deck())
    }

    /// Mutable access to a plain collection.
    pub fn deck_mut(&mut self, id: CollectionId) -> Result<&mut Deck<Entity>, StateError> {
        match self.collection_mut(id)? {
            CollectionStore::Plain(deck) => Ok(deck),
            CollectionStore::Observable(_) => Err(ConfigError::StorageMismatch {
                collection: id,
                expected: "plain",
            }
            .into()),
        }
    }

    pub fn observable(&self, id: CollectionId) -> Result<&PartiallyObservableDeck<Entity>, StateError> {
        match self.collection(id)? {
            CollectionStore::Observable(deck) => Ok(deck),
            CollectionStore::Plain(_) => Err(ConfigError::StorageMismatch {
                collection: id,
                expected: "per-item visibility",
            }
            .into()),
        }
    }

    pub fn observable_mut(&mut self, id: CollectionId) -> Result<&mut PartiallyObservableDeck<Entity>, StateError> {
        match self.collection_mut(id)? {
            CollectionStore::Observable(deck) => Ok(deck),
            CollectionStore::Plain(_) => Err(ConfigError::StorageMismatch {
                collection: id,
                expected: "per-item visibility",
            }
            .into()),
        }
    }

    #[must_use]
    pub fn size(&self, id: CollectionId) -> usize {
        self.collections.get(&id).map_or(0, CollectionStore::size)
    }

    /// Sizes of every collection, ascending by id.
    #[must_use]
    pub fn sizes(&self) -> Vec<(CollectionId, usize)> {
        self.collection_ids()
            .into_iter()
            .map(|id| (id, self.size(id)))
            .collect()
    }

    /// Put an entity on top of a collection.
    ///
    /// Per-item collections receive it face up; use `observable_mut` to
    /// place with narrower visibility.
    pub fn add_to(&mut self, id: CollectionId, entity: Entity) -> Result<(), StateError> {
        match self.collection_mut(id)? {
            CollectionStore::Plain(deck) => deck.add(entity),
            CollectionStore::Observable(deck) => deck.add_public(entity),
        }
        .map_err(StateError::deck(id))
    }

    /// Remove an entity by id from a collection.
    pub fn take(&mut self, id: CollectionId, entity: EntityId) -> Result<Entity, StateError> {
        let index = self
            .deck(id)?
            .position(|e| e.id == entity)
            .ok_or(StateError::EntityNotFound { entity, collection: id })?;
        match self.collection_mut(id)? {
            CollectionStore::Plain(deck) => deck.remove_at(index),
            CollectionStore::Observable(deck) => deck.remove_at(index),
        }
        .map_err(StateError::deck(id))
    }

    /// Move an entity between collections, onto the top of `to`.
    pub fn move_entity(&mut self, from: CollectionId, to: CollectionId, entity: EntityId) -> Result<(), StateError> {
        self.collection(to)?;
        let moved = self.take(from, entity)?;
        self.add_to(to, moved)
    }

    /// Draw the top entity of a collection.
    pub fn draw(&mut self, id: CollectionId) -> Result<Entity, StateError> {
        match self.collection_mut(id)? {
            CollectionStore::Plain(deck) => deck.draw(),
            CollectionStore::Observable(deck) => deck.draw(),
        }
        .map_err(StateError::deck(id))
    }

    /// Shuffle a collection with the state's own RNG.
    pub fn shuffle(&mut self, id: CollectionId) -> Result<(), StateError> {
        let Self { collections, rng, .. } = self;
        match collections
            .get_mut(&id)
            .ok_or(StateError::Config(ConfigError::UnknownCollection(id)))?
        {
            CollectionStore::Plain(deck) => deck.shuffle(rng),
            CollectionStore::Observable(deck) => deck.shuffle(rng),
        }
        Ok(())
    }

    // === Persistence ===

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StateError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
