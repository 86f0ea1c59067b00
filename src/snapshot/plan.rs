//! The list of redactions a snapshot performs.
//!
//! `RedactionPlan::build` walks the configured collections in order and
//! decides, from the observer and the authoritative state alone, what has to
//! be replaced. The builder applies the plan; the tracker reports it. Both
//! read the same plan, so they cannot disagree.

use tracing::trace;

use crate::components::CollectionStore;
use crate::core::config::{CollectionId, GameConfig, ObservabilityRule, ReturnTo};
use crate::core::entity::EntityId;
use crate::core::error::StateError;
use crate::core::player::Observer;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::redaction::{exchange_with_pool, permute_hidden, redeal_from_slots, reshuffle_and_redeal, substitute_value};

/// One redaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedactionStep {
    /// Merge `hand` into the plain deck `pool`, shuffle, redeal.
    Redeal { hand: CollectionId, pool: CollectionId },

    /// Merge `hand` with the hidden `slots` of a per-item `pool`, shuffle,
    /// redeal; the rest of the pool is left alone.
    RedealIntoSlots {
        hand: CollectionId,
        pool: CollectionId,
        slots: Vec<usize>,
    },

    /// Shuffle in place.
    Shuffle { collection: CollectionId },

    /// Resample every value in the collection.
    SubstituteAll { collection: CollectionId },

    /// Resample values from index `start` to the end.
    SubstituteFrom { collection: CollectionId, start: usize },

    /// Send hidden slots back to their owners' pools and refill each slot
    /// with a draw from the same pool. `slots` pairs slot index with pool.
    ReturnToPool {
        collection: CollectionId,
        slots: Vec<(usize, CollectionId)>,
    },

    /// Shuffle items among the hidden slots.
    PermuteSlots { collection: CollectionId, slots: Vec<usize> },
}

/// Ordered redactions for one observer and one state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedactionPlan {
    steps: Vec<RedactionStep>,
}

impl RedactionPlan {
    /// Decide what `observer` cannot know in `state`.
    ///
    /// The omniscient observer gets an empty plan.
    pub fn build(config: &GameConfig, state: &GameState, observer: Observer) -> Result<Self, StateError> {
        let mut steps = Vec::new();
        if observer.is_omniscient() {
            return Ok(Self { steps });
        }

        for collection in &config.collections {
            let id = collection.id;
            let hidden = !observer.sees_private_of(collection.owner);
            let size = state.deck(id)?.size();

            match &collection.rule {
                ObservabilityRule::Public => {}
                ObservabilityRule::Hidden { pool: Some(pool) } if hidden => match state.collection(*pool)? {
                    CollectionStore::Plain(_) => steps.push(RedactionStep::Redeal { hand: id, pool: *pool }),
                    CollectionStore::Observable(deck) => steps.push(RedactionStep::RedealIntoSlots {
                        hand: id,
                        pool: *pool,
                        slots: deck.hidden_indices(observer),
                    }),
                },
                ObservabilityRule::Hidden { pool: None } if hidden && size > 1 => {
                    steps.push(RedactionStep::Shuffle { collection: id });
                }
                ObservabilityRule::Hidden { .. } => {}
                ObservabilityRule::HiddenValues { visible_to_owner } => {
                    if size > 0 && !(*visible_to_owner && !hidden) {
                        steps.push(RedactionStep::SubstituteAll { collection: id });
                    }
                }
                ObservabilityRule::FutureRounds => {
                    let start = state.public.round as usize + 1;
                    if start < size {
                        steps.push(RedactionStep::SubstituteFrom { collection: id, start });
                    }
                }
                ObservabilityRule::PerItem {
                    return_to: ReturnTo::OwnerCollection(pools),
                } => {
                    let deck = state.observable(id)?;
                    let mut slots = Vec::new();
                    for index in deck.hidden_indices(observer) {
                        let entity = deck.get(index).map_err(StateError::deck(id))?;
                        let owner = entity.owner.ok_or(StateError::MissingOwner {
                            entity: entity.id,
                            collection: id,
                        })?;
                        let pool = *pools.get(owner).ok_or(StateError::MissingOwner {
                            entity: entity.id,
                            collection: id,
                        })?;
                        // The observer's own deck is known to them; leave those slots be.
                        let pool_owner = config.collection(pool)?.owner;
                        if !observer.sees_private_of(pool_owner) {
                            slots.push((index, pool));
                        }
                    }
                    if !slots.is_empty() {
                        steps.push(RedactionStep::ReturnToPool { collection: id, slots });
                    }
                }
                ObservabilityRule::PerItem {
                    return_to: ReturnTo::HiddenSlots,
                } => {
                    let slots = state.observable(id)?.hidden_indices(observer);
                    if slots.len() > 1 {
                        steps.push(RedactionStep::PermuteSlots { collection: id, slots });
                    }
                }
            }
        }

        Ok(Self { steps })
    }

    #[must_use]
    pub fn steps(&self) -> &[RedactionStep] {
        &self.steps
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Collections and entities this plan may replace, evaluated against
    /// the state it was built from.
    pub(crate) fn touched(
        &self,
        state: &GameState,
    ) -> Result<(Vec<CollectionId>, Vec<EntityId>), StateError> {
        let mut collections = Vec::new();
        let mut entities = Vec::new();

        for step in &self.steps {
            match step {
                RedactionStep::Redeal { hand, pool } => {
                    collections.push(*hand);
                    collections.push(*pool);
                }
                RedactionStep::RedealIntoSlots { hand, pool, slots } => {
                    // Visible slots of the pool keep their item.
                    collections.push(*hand);
                    let deck = state.deck(*pool)?;
                    for &index in slots {
                        entities.push(deck.get(index).map_err(StateError::deck(*pool))?.id);
                    }
                }
                RedactionStep::Shuffle { collection } => collections.push(*collection),
                RedactionStep::SubstituteAll { collection } => {
                    collections.push(*collection);
                    entities.extend(state.deck(*collection)?.iter().map(|e| e.id));
                }
                RedactionStep::SubstituteFrom { collection, start } => {
                    entities.extend(state.deck(*collection)?.iter().skip(*start).map(|e| e.id));
                }
                RedactionStep::ReturnToPool { collection, slots } => {
                    let deck = state.deck(*collection)?;
                    for &(index, pool) in slots {
                        entities.push(deck.get(index).map_err(StateError::deck(*collection))?.id);
                        collections.push(pool);
                    }
                }
                RedactionStep::PermuteSlots { collection, slots } => {
                    let deck = state.deck(*collection)?;
                    for &index in slots {
                        entities.push(deck.get(index).map_err(StateError::deck(*collection))?.id);
                    }
                }
            }
        }

        Ok((collections, entities))
    }

    /// Apply every step to `view`, a copy of the state the plan was built from.
    pub fn apply(&self, config: &GameConfig, view: &mut GameState, rng: &mut GameRng) -> Result<(), StateError> {
        for step in &self.steps {
            trace!(?step, "redacting");
            apply_step(config, view, step, rng)?;
        }
        Ok(())
    }
}

fn apply_step(
    config: &GameConfig,
    view: &mut GameState,
    step: &RedactionStep,
    rng: &mut GameRng,
) -> Result<(), StateError> {
    match step {
        RedactionStep::Redeal { hand, pool } => {
            let mut hidden = view.deck(*hand)?.copy();
            let mut pooled = view.deck(*pool)?.copy();
            reshuffle_and_redeal(&mut hidden, &mut pooled, rng);
            *view.deck_mut(*hand)? = hidden;
            *view.deck_mut(*pool)? = pooled;
        }
        RedactionStep::RedealIntoSlots { hand, pool, slots } => {
            let mut hidden = view.deck(*hand)?.copy();
            let pooled = view.observable_mut(*pool)?;
            redeal_from_slots(&mut hidden, pooled, slots, rng).map_err(StateError::deck(*pool))?;
            *view.deck_mut(*hand)? = hidden;
        }
        RedactionStep::Shuffle { collection } => match view.collection_mut(*collection)? {
            CollectionStore::Plain(deck) => deck.shuffle(rng),
            CollectionStore::Observable(deck) => deck.shuffle(rng),
        },
        RedactionStep::SubstituteAll { collection } => substitute_from(config, view, *collection, 0, rng)?,
        RedactionStep::SubstituteFrom { collection, start } => {
            substitute_from(config, view, *collection, *start, rng)?;
        }
        RedactionStep::ReturnToPool { collection, slots } => {
            // Group by pool, keeping first-seen order so replays are stable.
            let mut groups: Vec<(CollectionId, Vec<usize>)> = Vec::new();
            for &(index, pool) in slots {
                match groups.iter_mut().find(|(p, _)| *p == pool) {
                    Some((_, indices)) => indices.push(index),
                    None => groups.push((pool, vec![index])),
                }
            }

            for (pool, indices) in groups {
                let returned = {
                    let deck = view.observable(*collection)?;
                    indices
                        .iter()
                        .map(|&i| deck.get(i).cloned())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(StateError::deck(*collection))?
                };
                let drawn = exchange_with_pool(returned, view.deck_mut(pool)?, rng);
                let deck = view.observable_mut(*collection)?;
                for (index, entity) in indices.into_iter().zip(drawn) {
                    deck.set(index, entity).map_err(StateError::deck(*collection))?;
                }
            }
        }
        RedactionStep::PermuteSlots { collection, slots } => {
            permute_hidden(view.observable_mut(*collection)?, slots, rng).map_err(StateError::deck(*collection))?;
        }
    }
    Ok(())
}

fn substitute_from(
    config: &GameConfig,
    view: &mut GameState,
    collection: CollectionId,
    start: usize,
    rng: &mut GameRng,
) -> Result<(), StateError> {
    let deck = view.deck_mut(collection)?;
    for index in start..deck.size() {
        let entity = deck.get(index).map_err(StateError::deck(collection))?;
        let replacement = substitute_value(entity, config.distribution(entity.category)?, rng)?;
        deck.set(index, replacement).map_err(StateError::deck(collection))?;
    }
    Ok(())
}
