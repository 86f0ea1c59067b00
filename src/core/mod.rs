//! Core engine types: entities, players, state, RNG, configuration, errors.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games configure these via `GameConfig` rather than modifying the core.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use entity::{Categorized, Component, Entity, EntityId, Owned};
pub use player::{Observer, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{
    CategoryConfig, CategoryId, CollectionConfig, CollectionId, GameConfig, ObservabilityRule, ReturnTo,
    ValueDistribution,
};
pub use error::{ConfigError, DeckError, StateError};
pub use state::{GameState, PublicState};
