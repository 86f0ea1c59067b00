//! Error taxonomy.
//!
//! - `DeckError`: positional and capacity failures on a single collection.
//! - `ConfigError`: the game configuration is wrong. Not recoverable; it is
//!   a setup bug and surfaces at validation or snapshot time.
//! - `StateError`: anything that can go wrong while reading, mutating or
//!   snapshotting a `GameState`, with the offending collection attached.
//!
//! Nothing here is retried or masked: these are pure local computations, so
//! an error means an invariant was broken upstream.

use thiserror::Error;

use super::config::{CategoryId, CollectionId};
use super::entity::EntityId;
use super::player::{Observer, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("cannot draw from an empty deck")]
    Empty,
    #[error("deck is full (capacity {capacity})")]
    Full { capacity: usize },
    #[error("index {index} out of range for deck of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
    #[error("{player} out of range for {player_count} players")]
    PlayerOutOfRange { player: PlayerId, player_count: usize },
    #[error("visibility row has {got} entries, expected {expected}")]
    VisibilityArity { expected: usize, got: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown category {0}")]
    UnknownCategory(CategoryId),
    #[error("category {0} declared twice")]
    DuplicateCategory(CategoryId),
    #[error("category {0} has an empty value distribution")]
    EmptyDistribution(CategoryId),
    #[error("category {0} has a distribution whose weights sum to zero")]
    InvalidWeight(CategoryId),
    #[error("unknown collection {0}")]
    UnknownCollection(CollectionId),
    #[error("collection {0} declared twice")]
    DuplicateCollection(CollectionId),
    #[error("collection {collection} cannot use {pool} as its pool: {reason}")]
    InvalidPool {
        collection: CollectionId,
        pool: CollectionId,
        reason: &'static str,
    },
    #[error("collection {collection} is owned by {player}, but the game has {player_count} players")]
    OwnerOutOfRange {
        collection: CollectionId,
        player: PlayerId,
        player_count: usize,
    },
    #[error("collection {collection} does not have {expected} storage")]
    StorageMismatch {
        collection: CollectionId,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{collection}: {source}")]
    Deck {
        collection: CollectionId,
        #[source]
        source: DeckError,
    },

    #[error("{entity} not found in {collection}")]
    EntityNotFound {
        entity: EntityId,
        collection: CollectionId,
    },

    #[error("{entity} in {collection} has no owner to return it to")]
    MissingOwner {
        entity: EntityId,
        collection: CollectionId,
    },

    #[error("{entity} cannot be played from {collection}")]
    Unplayable {
        entity: EntityId,
        collection: CollectionId,
    },

    #[error("observer {observer} is not seated in a {player_count}-player game")]
    ObserverOutOfRange { observer: Observer, player_count: usize },

    #[error("{player} is not seated in a {player_count}-player game")]
    PlayerOutOfRange { player: PlayerId, player_count: usize },

    #[error("state has {state} players but the configuration expects {config}")]
    PlayerCountMismatch { state: usize, config: usize },

    #[error("state encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

impl StateError {
    /// Attach a collection id to a deck failure.
    pub(crate) fn deck(collection: CollectionId) -> impl FnOnce(DeckError) -> Self {
        move |source| StateError::Deck { collection, source }
    }
}
