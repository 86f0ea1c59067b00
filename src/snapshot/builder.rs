//! Per-observer state copies.
//!
//! ## Randomness
//!
//! The builder owns a `GameRng` and forks it for every `snapshot` call, so
//! two snapshots of the same state generally differ while a builder created
//! from the same seed replays the same sequence. `snapshot_with_rng` takes
//! the generator from the caller instead. `snapshot_for_round` opts into a
//! stream that depends only on the builder seed and the current round.
//!
//! The copy's own `rng` is replaced by a fork of the redaction stream, so a
//! search running on the view cannot replay the authoritative shuffles.

use tracing::debug;

use super::plan::RedactionPlan;
use crate::core::config::GameConfig;
use crate::core::error::{ConfigError, StateError};
use crate::core::player::Observer;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::games::TabletopGame;

/// Produces redacted copies of a game state for one configuration.
///
/// ```
/// use rust_tabletop::core::{Observer, PlayerId};
/// use rust_tabletop::games::ColtExpressBuilder;
/// use rust_tabletop::snapshot::StateSnapshotBuilder;
///
/// let (game, state) = ColtExpressBuilder::new().player_count(3).build(7).unwrap();
/// let mut builder = StateSnapshotBuilder::for_game(&game, 99).unwrap();
///
/// let view = builder.snapshot(&state, Observer::Player(PlayerId::new(0))).unwrap();
/// assert_eq!(view.sizes(), state.sizes());
///
/// let full = builder.snapshot(&state, Observer::Omniscient).unwrap();
/// assert_eq!(full, state);
/// ```
#[derive(Clone, Debug)]
pub struct StateSnapshotBuilder {
    config: GameConfig,
    rng: GameRng,
}

impl StateSnapshotBuilder {
    /// Validate `config` and seed the builder's generator.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: GameRng::new(seed),
        })
    }

    /// Builder for a configured game.
    pub fn for_game<G: TabletopGame>(game: &G, seed: u64) -> Result<Self, ConfigError> {
        Self::new(game.config().clone(), seed)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Snapshot with a fresh stream forked from the builder's generator.
    pub fn snapshot(&mut self, state: &GameState, observer: Observer) -> Result<GameState, StateError> {
        let mut rng = self.rng.fork();
        self.snapshot_with_rng(state, observer, &mut rng)
    }

    /// Snapshot whose randomness depends only on the builder seed and
    /// `state.public.round`: the same round always redacts the same way.
    pub fn snapshot_for_round(&self, state: &GameState, observer: Observer) -> Result<GameState, StateError> {
        let mut rng = GameRng::new(self.rng.seed()).for_round(state.public.round);
        self.snapshot_with_rng(state, observer, &mut rng)
    }

    /// Snapshot using the caller's generator.
    pub fn snapshot_with_rng(
        &self,
        state: &GameState,
        observer: Observer,
        rng: &mut GameRng,
    ) -> Result<GameState, StateError> {
        check(&self.config, state, observer)?;

        if observer.is_omniscient() {
            debug!(%observer, "exact snapshot");
            return Ok(state.clone());
        }

        let plan = RedactionPlan::build(&self.config, state, observer)?;
        let mut view = state.clone();
        plan.apply(&self.config, &mut view, rng)?;
        view.rng = rng.fork();

        debug!(%observer, redactions = plan.len(), round = state.public.round, "redacted snapshot");
        Ok(view)
    }
}

/// The state must match the configuration and the observer must be seated.
pub(crate) fn check(config: &GameConfig, state: &GameState, observer: Observer) -> Result<(), StateError> {
    if state.player_count() != config.player_count {
        return Err(StateError::PlayerCountMismatch {
            state: state.player_count(),
            config: config.player_count,
        });
    }
    if let Some(player) = observer.player() {
        if player.index() >= config.player_count {
            return Err(StateError::ObserverOutOfRange {
                observer,
                player_count: config.player_count,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CategoryConfig, CategoryId, CollectionConfig, CollectionId, ObservabilityRule, ValueDistribution};
    use crate::core::player::PlayerId;

    const LOOT: CollectionId = CollectionId::new(0);
    const GOLD: CategoryId = CategoryId::new(0);

    fn config() -> GameConfig {
        GameConfig::new(3)
            .with_category(CategoryConfig::new(GOLD, "Gold", ValueDistribution::uniform([100, 200, 300])))
            .with_collection(
                CollectionConfig::new(LOOT, "Loot")
                    .with_owner(PlayerId::new(0))
                    .with_rule(ObservabilityRule::HiddenValues { visible_to_owner: true }),
            )
    }

    fn state() -> GameState {
        let mut state = GameState::new(&config(), 1);
        for _ in 0..12 {
            let gold = state.spawn(GOLD, 200, Some(PlayerId::new(0)));
            state.add_to(LOOT, gold).unwrap();
        }
        state
    }

    fn values(state: &GameState) -> Vec<i64> {
        state.deck(LOOT).unwrap().iter().map(|e| e.value).collect()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let bad = GameConfig::new(2).with_category(CategoryConfig::new(GOLD, "Gold", ValueDistribution::new()));
        assert_eq!(
            StateSnapshotBuilder::new(bad, 0).err(),
            Some(ConfigError::EmptyDistribution(GOLD))
        );
    }

    #[test]
    fn test_owner_sees_own_values() {
        let builder = StateSnapshotBuilder::new(config(), 4).unwrap();
        let view = builder
            .snapshot_with_rng(&state(), Observer::Player(PlayerId::new(0)), &mut GameRng::new(1))
            .unwrap();
        assert_eq!(values(&view), vec![200; 12]);
    }

    #[test]
    fn test_snapshots_are_fresh_but_replayable() {
        let mut a = StateSnapshotBuilder::new(config(), 4).unwrap();
        let mut b = StateSnapshotBuilder::new(config(), 4).unwrap();
        let observer = Observer::Player(PlayerId::new(2));

        let first = a.snapshot(&state(), observer).unwrap();
        let second = a.snapshot(&state(), observer).unwrap();
        assert_ne!(values(&first), values(&second));

        assert_eq!(b.snapshot(&state(), observer).unwrap(), first);
    }

    #[test]
    fn test_round_snapshots_repeat() {
        let builder = StateSnapshotBuilder::new(config(), 4).unwrap();
        let observer = Observer::Player(PlayerId::new(1));
        let mut state = state();

        let a = builder.snapshot_for_round(&state, observer).unwrap();
        let b = builder.snapshot_for_round(&state, observer).unwrap();
        assert_eq!(a, b);

        state.public.advance_round();
        let c = builder.snapshot_for_round(&state, observer).unwrap();
        assert_ne!(values(&a), values(&c));
    }

    #[test]
    fn test_view_rng_is_reseeded() {
        let builder = StateSnapshotBuilder::new(config(), 4).unwrap();
        let state = state();
        let view = builder
            .snapshot_with_rng(&state, Observer::Player(PlayerId::new(1)), &mut GameRng::new(1))
            .unwrap();
        assert_ne!(view.rng, state.rng);
    }

    #[test]
    fn test_rejects_unseated_observer() {
        let builder = StateSnapshotBuilder::new(config(), 4).unwrap();
        let result = builder.snapshot_with_rng(&state(), Observer::Player(PlayerId::new(3)), &mut GameRng::new(0));
        assert!(matches!(result, Err(StateError::ObserverOutOfRange { .. })));
    }

    #[test]
    fn test_rejects_mismatched_state() {
        let builder = StateSnapshotBuilder::new(config(), 4).unwrap();
        let other = GameState::new(&GameConfig::new(2), 0);
        let result = builder.snapshot_with_rng(&other, Observer::Omniscient, &mut GameRng::new(0));
        assert!(matches!(result, Err(StateError::PlayerCountMismatch { state: 2, config: 3 })));
    }
}
