//! Exploding Kittens.
//!
//! Hands are hidden and drawn from a shared pile. The pile is mostly
//! unknown to everyone, except cards a player has seen (See the Future) or
//! placed (a defused kitten put back at a chosen depth).
//!
//! Supports 2-5 players.

mod game;

pub use game::{ExplodingKittens, ExplodingKittensBuilder, KittenCard};
