//! Colt Express.
//!
//! Bandits plan action cards onto a shared stack, some of them face down,
//! then resolve them to move through the train and grab loot.
//!
//! What each player cannot see:
//! - Opponents' hands (known: the deck they were drawn from)
//! - Loot values (known: the loot type)
//! - Round cards after the current round (known: they are round cards,
//!   the last one an end-of-train card)
//! - Face-down planned actions of other players
//!
//! Supports 2-6 players.

mod game;

pub use game::{CardKind, Character, ColtExpress, ColtExpressBuilder, Compartment, LootKind, PlayerCollections, RoundKind};
