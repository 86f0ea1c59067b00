//! Which components of a state an observer cannot know.
//!
//! Built from the same `RedactionPlan` the snapshot builder applies, so the
//! answer is exactly "what a snapshot for this observer may replace".

use rustc_hash::FxHashSet;
use tracing::debug;

use super::builder::check;
use super::plan::RedactionPlan;
use crate::core::config::{CollectionId, GameConfig};
use crate::core::entity::EntityId;
use crate::core::error::StateError;
use crate::core::player::Observer;
use crate::core::state::GameState;

/// Unknown collections and entities.
///
/// A collection is listed when its contents may be reordered or exchanged
/// wholesale (opponent hands and decks, loot piles). An entity is listed
/// when its own slot may be replaced (future round cards, face-down plans).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnknownComponents {
    pub collections: FxHashSet<CollectionId>,
    pub entities: FxHashSet<EntityId>,
}

impl UnknownComponents {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.entities.is_empty()
    }

    #[must_use]
    pub fn contains_collection(&self, id: CollectionId) -> bool {
        self.collections.contains(&id)
    }

    #[must_use]
    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }
}

/// Reports unknown components for one configuration.
///
/// ```
/// use rust_tabletop::core::{Observer, PlayerId};
/// use rust_tabletop::games::{ColtExpressBuilder, TabletopGame};
/// use rust_tabletop::snapshot::UnknownComponentTracker;
///
/// let (game, state) = ColtExpressBuilder::new().player_count(2).build(1).unwrap();
/// let tracker = UnknownComponentTracker::new(game.config());
///
/// let unknown = tracker.unknown_components(&state, Observer::Player(PlayerId::new(0))).unwrap();
/// assert!(!unknown.is_empty());
/// assert!(tracker.unknown_components(&state, Observer::Omniscient).unwrap().is_empty());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct UnknownComponentTracker<'a> {
    config: &'a GameConfig,
}

impl<'a> UnknownComponentTracker<'a> {
    #[must_use]
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    pub fn unknown_components(&self, state: &GameState, observer: Observer) -> Result<UnknownComponents, StateError> {
        check(self.config, state, observer)?;

        let plan = RedactionPlan::build(self.config, state, observer)?;
        let (collections, entities) = plan.touched(state)?;
        let unknown = UnknownComponents {
            collections: collections.into_iter().collect(),
            entities: entities.into_iter().collect(),
        };

        debug!(
            %observer,
            collections = unknown.collections.len(),
            entities = unknown.entities.len(),
            "unknown components"
        );
        Ok(unknown)
    }
}
