//! Game configuration types.
//!
//! Games configure the core at startup by providing:
//! - `CategoryConfig`: entity categories and the values each may take
//! - `CollectionConfig`: every deck-like collection, its owner, and the
//!   rule that decides what is hidden from whom
//! - `GameConfig`: combines all configuration
//!
//! The core never hardcodes hands, loot or round cards; games declare them.
//! All types derive `serde`, so an external content loader can produce a
//! `GameConfig` from JSON.
//!
//! ```
//! use rust_tabletop::core::{
//!     CategoryConfig, CategoryId, CollectionConfig, CollectionId, GameConfig,
//!     ObservabilityRule, PlayerId, ValueDistribution,
//! };
//!
//! let gold = CategoryId::new(0);
//! let config = GameConfig::new(2)
//!     .with_category(CategoryConfig::new(gold, "Gold", ValueDistribution::uniform([100, 200, 300])))
//!     .with_collection(
//!         CollectionConfig::new(CollectionId::new(0), "P0 Loot")
//!             .with_owner(PlayerId::new(0))
//!             .with_rule(ObservabilityRule::HiddenValues { visible_to_owner: true }),
//!     );
//!
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::{PlayerId, PlayerMap};

/// Collection identifier. Games define what collections exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionId(pub u16);

impl CollectionId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Collection({})", self.0)
    }
}

/// Entity category identifier (loot type, card type, round card deck).
///
/// A category is always public knowledge; only the value inside it may be
/// hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub u16);

impl CategoryId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Category({})", self.0)
    }
}

/// Ordered `(value, weight)` pairs a category's values are drawn from.
///
/// Weights are relative counts (e.g. how many physical tokens of that value
/// exist), not probabilities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDistribution {
    entries: Vec<(i64, u32)>,
}

impl ValueDistribution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value equally likely.
    #[must_use]
    pub fn uniform(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            entries: values.into_iter().map(|v| (v, 1)).collect(),
        }
    }

    /// Add a value with a relative weight.
    #[must_use]
    pub fn with_value(mut self, value: i64, weight: u32) -> Self {
        self.entries.push((value, weight));
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[(i64, u32)] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Could `value` have been drawn from this distribution?
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.entries.iter().any(|&(v, w)| v == value && w > 0)
    }

    pub(crate) fn weights(&self) -> Vec<u32> {
        self.entries.iter().map(|&(_, w)| w).collect()
    }

    fn validate(&self, category: CategoryId) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::EmptyDistribution(category));
        }
        if self.entries.iter().all(|&(_, w)| w == 0) {
            return Err(ConfigError::InvalidWeight(category));
        }
        Ok(())
    }
}

/// An entity category and its legal values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub id: CategoryId,
    pub name: String,
    pub distribution: ValueDistribution,
}

impl CategoryConfig {
    pub fn new(id: CategoryId, name: impl Into<String>, distribution: ValueDistribution) -> Self {
        Self {
            id,
            name: name.into(),
            distribution,
        }
    }
}

/// Where hidden items of a partially observable collection go back to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnTo {
    /// The item's owner's collection (planned action cards go back to the
    /// deck of the player who played them).
    OwnerCollection(PlayerMap<CollectionId>),
    /// No outside pool: hidden items are permuted among the hidden slots.
    HiddenSlots,
}

/// What a collection hides, and from whom.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservabilityRule {
    /// Everything is visible to everyone.
    Public,

    /// Contents hidden from everyone but the owner (neutral collections are
    /// hidden from every player). The count stays public.
    ///
    /// With a `pool`, the collection is reshuffled into the pool and redealt;
    /// without one, it is shuffled in place.
    Hidden { pool: Option<CollectionId> },

    /// Each entity's category is public but its value is not. Hidden values
    /// are substituted from the category's distribution.
    HiddenValues { visible_to_owner: bool },

    /// Entities after the current round index are undetermined and get
    /// substituted (round cards still to be revealed).
    FutureRounds,

    /// Partially observable deck with per-item, per-player visibility.
    PerItem { return_to: ReturnTo },
}

impl ObservabilityRule {
    /// Does this rule need per-item visibility storage?
    #[must_use]
    pub fn is_per_item(&self) -> bool {
        matches!(self, ObservabilityRule::PerItem { .. })
    }
}

/// Configuration for a single collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub id: CollectionId,

    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Owner. `None` for shared collections (draw pile, train roof).
    pub owner: Option<PlayerId>,

    pub rule: ObservabilityRule,

    /// Maximum entities allowed. `None` for unlimited.
    pub capacity: Option<usize>,
}

impl CollectionConfig {
    /// Create a public, unowned collection.
    pub fn new(id: CollectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            owner: None,
            rule: ObservabilityRule::Public,
            capacity: None,
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: ObservabilityRule) -> Self {
        self.rule = rule;
        self
    }

    /// Hidden from non-owners, redealt from `pool`.
    #[must_use]
    pub fn hidden_with_pool(self, pool: CollectionId) -> Self {
        self.with_rule(ObservabilityRule::Hidden { pool: Some(pool) })
    }

    /// Hidden from non-owners, shuffled in place.
    #[must_use]
    pub fn hidden(self) -> Self {
        self.with_rule(ObservabilityRule::Hidden { pool: None })
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    pub categories: Vec<CategoryConfig>,

    /// Collections, in the order redaction visits them.
    pub collections: Vec<CollectionConfig>,
}

impl GameConfig {
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            categories: Vec::new(),
            collections: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryConfig) -> Self {
        self.categories.push(category);
        self
    }

    #[must_use]
    pub fn with_collection(mut self, collection: CollectionConfig) -> Self {
        self.collections.push(collection);
        self
    }

    #[must_use]
    pub fn get_category(&self, id: CategoryId) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn get_collection(&self, id: CollectionId) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Distribution for a category; a miss is a configuration bug.
    pub fn distribution(&self, id: CategoryId) -> Result<&ValueDistribution, ConfigError> {
        self.get_category(id)
            .map(|c| &c.distribution)
            .ok_or(ConfigError::UnknownCategory(id))
    }

    pub fn collection(&self, id: CollectionId) -> Result<&CollectionConfig, ConfigError> {
        self.get_collection(id).ok_or(ConfigError::UnknownCollection(id))
    }

    /// Check the whole configuration for setup bugs.
    ///
    /// Pools are checked so that redealing can never move a card the
    /// observer was allowed to see into a slot they are not: a pool must
    /// itself be hidden whenever the collection drawing from it is.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.validate_inner();
        if let Err(err) = &result {
            tracing::warn!(error = %err, "rejected game configuration");
        }
        result
    }

    fn validate_inner(&self) -> Result<(), ConfigError> {
        for (i, category) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|c| c.id == category.id) {
                return Err(ConfigError::DuplicateCategory(category.id));
            }
            category.distribution.validate(category.id)?;
        }

        for (i, collection) in self.collections.iter().enumerate() {
            if self.collections[..i].iter().any(|c| c.id == collection.id) {
                return Err(ConfigError::DuplicateCollection(collection.id));
            }
            if let Some(owner) = collection.owner {
                if owner.index() >= self.player_count {
                    return Err(ConfigError::OwnerOutOfRange {
                        collection: collection.id,
                        player: owner,
                        player_count: self.player_count,
                    });
                }
            }
        }

        for collection in &self.collections {
            match &collection.rule {
                ObservabilityRule::Hidden { pool: Some(pool) } => {
                    self.validate_pool(collection, *pool, collection.owner)?;
                }
                ObservabilityRule::PerItem {
                    return_to: ReturnTo::OwnerCollection(pools),
                } => {
                    if pools.player_count() != self.player_count {
                        return Err(ConfigError::InvalidPool {
                            collection: collection.id,
                            pool: *pools.values().next().unwrap_or(&collection.id),
                            reason: "one pool per player is required",
                        });
                    }
                    for (player, pool) in pools.iter() {
                        self.validate_pool(collection, *pool, Some(player))?;
                        if !matches!(self.collection(*pool)?.rule, ObservabilityRule::Hidden { .. }) {
                            return Err(ConfigError::InvalidPool {
                                collection: collection.id,
                                pool: *pool,
                                reason: "returned items need a plain hidden deck",
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn validate_pool(
        &self,
        collection: &CollectionConfig,
        pool: CollectionId,
        owner: Option<PlayerId>,
    ) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidPool {
            collection: collection.id,
            pool,
            reason,
        };

        if pool == collection.id {
            return Err(invalid("a collection cannot be its own pool"));
        }
        let target = self.collection(pool)?;
        if !matches!(
            target.rule,
            ObservabilityRule::Hidden { pool: None } | ObservabilityRule::PerItem { return_to: ReturnTo::HiddenSlots }
        ) {
            return Err(invalid("pool must be hidden and not draw from another pool"));
        }
        if target.owner.is_some() && target.owner != owner {
            return Err(invalid("pool is visible to a player the collection is hidden from"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> CategoryConfig {
        CategoryConfig::new(
            CategoryId::new(0),
            "Gold",
            ValueDistribution::new().with_value(100, 1).with_value(200, 1).with_value(300, 1),
        )
    }

    fn hand_and_deck(player: PlayerId) -> (CollectionConfig, CollectionConfig) {
        let hand = CollectionId::new(player.0 as u16 * 2);
        let deck = CollectionId::new(player.0 as u16 * 2 + 1);
        (
            CollectionConfig::new(hand, "Hand").with_owner(player).hidden_with_pool(deck),
            CollectionConfig::new(deck, "Deck").with_owner(player).hidden(),
        )
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(format!("{}", CollectionId::new(5)), "Collection(5)");
        assert_eq!(format!("{}", CategoryId::new(2)), "Category(2)");
    }

    #[test]
    fn test_distribution_contains() {
        let dist = ValueDistribution::new().with_value(100, 1).with_value(200, 0);
        assert!(dist.contains(100));
        assert!(!dist.contains(200)); // zero weight is never drawn
        assert!(!dist.contains(300));
    }

    #[test]
    fn test_valid_hand_and_deck() {
        let (hand, deck) = hand_and_deck(PlayerId::new(0));
        let config = GameConfig::new(2).with_category(gold()).with_collection(hand).with_collection(deck);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_empty_distribution_rejected() {
        let config = GameConfig::new(2).with_category(CategoryConfig::new(
            CategoryId::new(4),
            "Nothing",
            ValueDistribution::new(),
        ));
        assert_eq!(config.validate(), Err(ConfigError::EmptyDistribution(CategoryId::new(4))));
    }

    #[test]
    fn test_zero_weights_rejected() {
        let config = GameConfig::new(2).with_category(CategoryConfig::new(
            CategoryId::new(1),
            "Zero",
            ValueDistribution::new().with_value(5, 0),
        ));
        assert_eq!(config.validate(), Err(ConfigError::InvalidWeight(CategoryId::new(1))));
    }

    #[test]
    fn test_duplicates_rejected() {
        let config = GameConfig::new(2).with_category(gold()).with_category(gold());
        assert_eq!(config.validate(), Err(ConfigError::DuplicateCategory(CategoryId::new(0))));

        let c = CollectionConfig::new(CollectionId::new(1), "Pile");
        let config = GameConfig::new(2).with_collection(c.clone()).with_collection(c);
        assert_eq!(config.validate(), Err(ConfigError::DuplicateCollection(CollectionId::new(1))));
    }

    #[test]
    fn test_pool_owned_by_someone_else_rejected() {
        let (hand, _) = hand_and_deck(PlayerId::new(0));
        let (_, other_deck) = hand_and_deck(PlayerId::new(1));
        let hand = hand.hidden_with_pool(other_deck.id);
        let config = GameConfig::new(2).with_collection(hand).with_collection(other_deck);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPool { .. })));
    }

    #[test]
    fn test_public_pool_rejected() {
        let discard = CollectionConfig::new(CollectionId::new(9), "Discard");
        let hand = CollectionConfig::new(CollectionId::new(0), "Hand")
            .with_owner(PlayerId::new(0))
            .hidden_with_pool(discard.id);
        let config = GameConfig::new(2).with_collection(hand).with_collection(discard);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPool { .. })));
    }

    #[test]
    fn test_missing_pool_rejected() {
        let hand = CollectionConfig::new(CollectionId::new(0), "Hand").hidden_with_pool(CollectionId::new(99));
        let config = GameConfig::new(2).with_collection(hand);
        assert_eq!(config.validate(), Err(ConfigError::UnknownCollection(CollectionId::new(99))));
    }

    #[test]
    fn test_owner_out_of_range() {
        let c = CollectionConfig::new(CollectionId::new(0), "Hand").with_owner(PlayerId::new(3));
        let config = GameConfig::new(2).with_collection(c);
        assert!(matches!(config.validate(), Err(ConfigError::OwnerOutOfRange { .. })));
    }

    #[test]
    fn test_distribution_lookup() {
        let config = GameConfig::new(2).with_category(gold());
        assert_eq!(config.distribution(CategoryId::new(0)).map(|d| d.entries().len()), Ok(3));
        assert_eq!(
            config.distribution(CategoryId::new(7)).err(),
            Some(ConfigError::UnknownCategory(CategoryId::new(7)))
        );
    }

    #[test]
    fn test_config_json_roundtrip() {
        let (hand, deck) = hand_and_deck(PlayerId::new(1));
        let config = GameConfig::new(2).with_category(gold()).with_collection(hand).with_collection(deck);

        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
