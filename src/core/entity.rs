//! Entity identification and the entity model.
//!
//! Every countable game object (card, loot token, round card) is an `Entity`
//! with a stable `EntityId`. The id is the object's identity; its category and
//! value are its content. Redaction may replace content, never identity.
//!
//! ## Capabilities
//!
//! Entities are not arranged in a class hierarchy. Generic code asks for the
//! capability it needs instead:
//! - `Component`: has a stable id
//! - `Categorized`: has a public category and a (possibly hidden) value
//! - `Owned`: may belong to a player
//!
//! ```
//! use rust_tabletop::core::{CategoryId, Categorized, Entity, EntityId, PlayerId};
//!
//! let purse = Entity::owned(EntityId(7), CategoryId::new(0), 250, PlayerId::new(1));
//! let swapped = purse.with_value(400);
//!
//! assert_eq!(swapped.id, purse.id);
//! assert_eq!(swapped.category(), purse.category());
//! assert_eq!(swapped.value(), 400);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::CategoryId;
use super::player::PlayerId;

/// Unique identifier for any game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Anything with a stable component id.
pub trait Component {
    fn component_id(&self) -> EntityId;
}

/// Anything that may belong to a player.
pub trait Owned {
    fn owner(&self) -> Option<PlayerId>;
}

/// A component whose category is public but whose value may be hidden.
///
/// `with_value` rebuilds the component with the same identity and category,
/// which is what type-preserving substitution needs.
pub trait Categorized: Component {
    fn category(&self) -> CategoryId;

    fn value(&self) -> i64;

    #[must_use]
    fn with_value(&self, value: i64) -> Self
    where
        Self: Sized;
}

/// A countable game object.
///
/// ## State Values (i64 only)
///
/// Extra per-entity state (tapped, infected, vaccinated) lives in `state`
/// as `i64`, the same encoding `PublicState` counters use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identity.
    pub id: EntityId,

    /// Public category (loot type, card type, round card deck).
    pub category: CategoryId,

    /// Concrete content within the category (loot value, card kind).
    pub value: i64,

    /// Owning player. `None` for neutral entities.
    pub owner: Option<PlayerId>,

    #[serde(default)]
    pub state: FxHashMap<String, i64>,
}

impl Entity {
    /// Create a neutral entity.
    #[must_use]
    pub fn new(id: EntityId, category: CategoryId, value: i64) -> Self {
        Self {
            id,
            category,
            value,
            owner: None,
            state: FxHashMap::default(),
        }
    }

    /// Create an entity owned by a player.
    #[must_use]
    pub fn owned(id: EntityId, category: CategoryId, value: i64, owner: PlayerId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::new(id, category, value)
        }
    }

    /// Get a state value with a default.
    #[must_use]
    pub fn get_state(&self, key: &str, default: i64) -> i64 {
        self.state.get(key).copied().unwrap_or(default)
    }

    /// Set a state value.
    pub fn set_state(&mut self, key: impl Into<String>, value: i64) {
        self.state.insert(key.into(), value);
    }
}

impl Component for Entity {
    fn component_id(&self) -> EntityId {
        self.id
    }
}

impl Owned for Entity {
    fn owner(&self) -> Option<PlayerId> {
        self.owner
    }
}

impl Categorized for Entity {
    fn category(&self) -> CategoryId {
        self.category
    }

    fn value(&self) -> i64 {
        self.value
    }

    fn with_value(&self, value: i64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_owned_entity() {
        let e = Entity::owned(EntityId(3), CategoryId::new(1), 5, PlayerId::new(2));
        assert_eq!(e.owner(), Some(PlayerId::new(2)));
        assert_eq!(e.component_id(), EntityId(3));

        let neutral = Entity::new(EntityId(4), CategoryId::new(1), 5);
        assert_eq!(neutral.owner(), None);
    }

    #[test]
    fn test_with_value_keeps_identity_and_state() {
        let mut e = Entity::new(EntityId(9), CategoryId::new(2), 100);
        e.set_state("face_up", 1);

        let replaced = e.with_value(300);
        assert_eq!(replaced.id, EntityId(9));
        assert_eq!(replaced.category, CategoryId::new(2));
        assert_eq!(replaced.value, 300);
        assert_eq!(replaced.get_state("face_up", 0), 1);
    }

    #[test]
    fn test_serialization() {
        let e = Entity::owned(EntityId(1), CategoryId::new(0), 250, PlayerId::new(0));
        let json = serde_json::to_string(&e).unwrap();
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
