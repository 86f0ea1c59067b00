//! Observer-specific views of a game state.
//!
//! ## Key Types
//!
//! - `RedactionPlan`: what to replace for one observer, derived from the
//!   configured observability rules
//! - `StateSnapshotBuilder`: applies the plan to a copy of the state
//! - `UnknownComponentTracker`: reports the plan as ids
//!
//! ## Usage
//!
//! ```
//! use rust_tabletop::core::{Observer, PlayerId};
//! use rust_tabletop::games::{TabletopGame, VirusBuilder};
//! use rust_tabletop::snapshot::{StateSnapshotBuilder, UnknownComponentTracker};
//!
//! let (game, state) = VirusBuilder::new().player_count(3).build(5).unwrap();
//! let observer = Observer::Player(PlayerId::new(1));
//!
//! let unknown = UnknownComponentTracker::new(game.config()).unknown_components(&state, observer).unwrap();
//! let mut builder = StateSnapshotBuilder::for_game(&game, 11).unwrap();
//! let view = builder.snapshot(&state, observer).unwrap();
//!
//! for (id, _) in view.sizes() {
//!     if view.deck(id).unwrap() != state.deck(id).unwrap() {
//!         assert!(unknown.contains_collection(id));
//!     }
//! }
//! ```

pub mod builder;
pub mod plan;
pub mod tracker;

pub use builder::StateSnapshotBuilder;
pub use plan::{RedactionPlan, RedactionStep};
pub use tracker::{UnknownComponentTracker, UnknownComponents};
