//! Game implementations.
//!
//! Each game declares its categories and collections through `GameConfig`
//! and exposes a builder that returns the game together with its initial
//! state, plus the state mutations whose visibility effects matter.

pub mod colt_express;
pub mod exploding_kittens;
pub mod virus;

pub use colt_express::{ColtExpress, ColtExpressBuilder};
pub use exploding_kittens::{ExplodingKittens, ExplodingKittensBuilder};
pub use virus::{Virus, VirusBuilder};

use crate::core::GameConfig;

/// A configured game.
pub trait TabletopGame {
    fn name(&self) -> &'static str;

    /// Categories, collections and observability rules of the game.
    fn config(&self) -> &GameConfig;
}
