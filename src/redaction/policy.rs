//! Redaction primitives.
//!
//! Each function replaces hidden content with content that is consistent
//! with what the observer knows, using only the caller's generator:
//!
//! - `substitute_value`: keep the entity, resample its value from the
//!   distribution of its public category.
//! - `reshuffle_and_redeal`: merge a hidden deck into its pool, shuffle,
//!   deal the same number of items back.
//! - `redeal_from_slots`: the same, when the pool is a partially observable
//!   deck and only some of its slots are hidden.
//! - `exchange_with_pool`: return individual items to a pool and draw the
//!   same number of replacements.
//! - `permute_hidden`: shuffle items among the hidden slots of one deck.
//!
//! None of these read a hidden value to decide its replacement, and all of
//! them conserve counts: what goes into a pool comes back out.

use crate::components::{Deck, PartiallyObservableDeck};
use crate::core::config::{CategoryId, ValueDistribution};
use crate::core::entity::Categorized;
use crate::core::error::{ConfigError, DeckError};
use crate::core::rng::GameRng;

/// Draw a value from `distribution` according to its weights.
pub fn sample_value(
    category: CategoryId,
    distribution: &ValueDistribution,
    rng: &mut GameRng,
) -> Result<i64, ConfigError> {
    if distribution.is_empty() {
        return Err(ConfigError::EmptyDistribution(category));
    }
    let index = rng
        .choose_weighted(&distribution.weights())
        .ok_or(ConfigError::InvalidWeight(category))?;
    Ok(distribution.entries()[index].0)
}

/// Type-preserving value substitution.
///
/// The replacement has the entity's id, category and owner, and a value
/// sampled from the category's distribution. The hidden value is never
/// consulted.
///
/// ```
/// use rust_tabletop::core::{CategoryId, Categorized, Entity, EntityId, GameRng, ValueDistribution};
/// use rust_tabletop::redaction::substitute_value;
///
/// let gold = CategoryId::new(0);
/// let dist = ValueDistribution::uniform([100, 200, 300]);
/// let token = Entity::new(EntityId(5), gold, 200);
///
/// let view = substitute_value(&token, &dist, &mut GameRng::new(1)).unwrap();
/// assert_eq!(view.category(), gold);
/// assert!([100, 200, 300].contains(&view.value()));
/// ```
pub fn substitute_value<T: Categorized>(
    entity: &T,
    distribution: &ValueDistribution,
    rng: &mut GameRng,
) -> Result<T, ConfigError> {
    let value = sample_value(entity.category(), distribution, rng)?;
    Ok(entity.with_value(value))
}

/// Merge `hidden` into `pool`, shuffle, and deal the same count back.
///
/// Afterwards `hidden` has its original size and `pool` has its original
/// size; which items ended up where is uniformly random. The merge happens
/// off-deck, so a pool at capacity redeals like any other.
pub fn reshuffle_and_redeal<T: Clone>(hidden: &mut Deck<T>, pool: &mut Deck<T>, rng: &mut GameRng) {
    let count = hidden.size();
    let mut pooled: Vec<T> = hidden.iter().chain(pool.iter()).cloned().collect();
    rng.shuffle(&mut pooled);

    let rest = pooled.split_off(count);
    hidden.replace_items(pooled);
    pool.replace_items(rest);
}

/// Reshuffle-and-redeal against a partially observable pool.
///
/// Only the pool's `slots` take part: visible slots keep their item, so a
/// card the observer watched being placed stays where it was placed.
pub fn redeal_from_slots<T: Clone>(
    hidden: &mut Deck<T>,
    pool: &mut PartiallyObservableDeck<T>,
    slots: &[usize],
    rng: &mut GameRng,
) -> Result<(), DeckError> {
    let count = hidden.size();
    let mut pooled: Vec<T> = hidden.iter().cloned().collect();
    for &slot in slots {
        pooled.push(pool.get(slot)?.clone());
    }
    rng.shuffle(&mut pooled);

    let rest = pooled.split_off(count);
    hidden.replace_items(pooled);
    for (&slot, item) in slots.iter().zip(rest) {
        pool.set(slot, item)?;
    }
    Ok(())
}

/// Put `returned` into `pool`, shuffle, and draw as many replacements.
///
/// The pool keeps its size, capacity or not.
pub fn exchange_with_pool<T: Clone>(returned: Vec<T>, pool: &mut Deck<T>, rng: &mut GameRng) -> Vec<T> {
    let count = returned.len();
    let mut pooled = returned;
    pooled.extend(pool.iter().cloned());
    rng.shuffle(&mut pooled);

    let rest = pooled.split_off(count);
    pool.replace_items(rest);
    pooled
}

/// Shuffle the items sitting in `slots` among those same slots.
pub fn permute_hidden<T: Clone>(
    deck: &mut PartiallyObservableDeck<T>,
    slots: &[usize],
    rng: &mut GameRng,
) -> Result<(), DeckError> {
    let mut items = slots
        .iter()
        .map(|&slot| deck.get(slot).cloned())
        .collect::<Result<Vec<T>, DeckError>>()?;
    rng.shuffle(&mut items);

    for (&slot, item) in slots.iter().zip(items) {
        deck.set(slot, item)?;
    }
    Ok(())
}
