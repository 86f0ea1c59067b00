//! # rust-tabletop
//!
//! A multi-game tabletop engine core that turns an omniscient game state
//! into per-player views.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded hands, loot or round cards. Games
//!    declare categories and collections at startup.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    No convenience methods that assume 2 players.
//!
//! 3. **Configuration Over Convention**: Games describe what is hidden from
//!    whom with `ObservabilityRule`s on `CollectionConfig`; snapshots are
//!    derived from those rules, not from per-game copy code.
//!
//! ## Architecture
//!
//! - **Consistent Views**: A redacted snapshot keeps every public fact and
//!   every collection size. Hidden content is resampled from what the
//!   observer could infer: the same pool of cards, the same loot types.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so a snapshot
//!   costs little more than the redactions it performs.
//!
//! - **Explicit Randomness**: No global RNG. Every shuffle takes a
//!   `GameRng`, so any snapshot can be replayed from its seed.
//!
//! ## Modules
//!
//! - `core`: Entities, players, observers, state, RNG, configuration, errors
//! - `components`: `Deck` and `PartiallyObservableDeck`
//! - `redaction`: Value substitution, reshuffle-and-redeal, slot permutation
//! - `snapshot`: Redaction plans, snapshot builder, unknown component tracker
//! - `games`: Colt Express, Exploding Kittens, Virus

pub mod core;
pub mod components;
pub mod redaction;
pub mod snapshot;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Categorized, Component, Entity, EntityId, Owned,
    Observer, PlayerId, PlayerMap,
    GameRng, GameRngState,
    CategoryConfig, CategoryId, CollectionConfig, CollectionId, GameConfig, ObservabilityRule, ReturnTo,
    ValueDistribution,
    ConfigError, DeckError, StateError,
    PublicState, GameState,
};

pub use crate::components::{CollectionStore, Deck, ObservedCopy, PartiallyObservableDeck};

pub use crate::snapshot::{RedactionPlan, RedactionStep, StateSnapshotBuilder, UnknownComponentTracker, UnknownComponents};

pub use crate::games::TabletopGame;
