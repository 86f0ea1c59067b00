//! Unknown component tracking against real snapshots.
//!
//! Whatever a snapshot replaces must be reported as unknown, and whatever is
//! reported as unknown must actually vary between snapshots.

use std::collections::BTreeSet;

use rust_tabletop::core::{CollectionId, EntityId, GameRng, GameState, Observer, PlayerId};
use rust_tabletop::games::{ColtExpressBuilder, ExplodingKittensBuilder, TabletopGame, VirusBuilder};
use rust_tabletop::snapshot::{StateSnapshotBuilder, UnknownComponentTracker, UnknownComponents};

/// Every collection or entity that differs in the view is listed.
fn assert_changes_are_tracked(state: &GameState, view: &GameState, unknown: &UnknownComponents) {
    for id in state.collection_ids() {
        let real = state.deck(id).unwrap();
        let seen = view.deck(id).unwrap();
        if unknown.contains_collection(id) {
            continue;
        }
        for (r, s) in real.iter().zip(seen.iter()) {
            if r != s {
                assert!(
                    unknown.contains_entity(r.id),
                    "{} changed in {} but is not tracked",
                    r.id,
                    id
                );
            }
        }
    }
}

fn contents(state: &GameState, id: CollectionId) -> Vec<(EntityId, i64)> {
    state.deck(id).unwrap().iter().map(|e| (e.id, e.value)).collect()
}

/// Colt Express: changed components are all tracked, for every player.
#[test]
fn test_colt_express_changes_are_tracked() {
    let (game, mut state) = ColtExpressBuilder::new().player_count(4).build(21).unwrap();
    for player in PlayerId::all(4) {
        let card = state.deck(game.player(player).unwrap().hand).unwrap().get(0).unwrap().id;
        game.plan_card(&mut state, player, card, player.index() % 2 == 0).unwrap();
    }

    let tracker = UnknownComponentTracker::new(game.config());
    let builder = StateSnapshotBuilder::for_game(&game, 0).unwrap();
    for player in PlayerId::all(4) {
        let observer = Observer::Player(player);
        let unknown = tracker.unknown_components(&state, observer).unwrap();
        for seed in 0..10 {
            let view = builder.snapshot_with_rng(&state, observer, &mut GameRng::new(seed)).unwrap();
            assert_changes_are_tracked(&state, &view, &unknown);
        }
    }
}

/// Exploding Kittens: seen-the-future cards stay known to the viewer.
#[test]
fn test_exploding_kittens_changes_are_tracked() {
    let (game, mut state) = ExplodingKittensBuilder::new().player_count(3).build(4).unwrap();
    let p0 = PlayerId::new(0);
    game.see_the_future(&mut state, p0, 3).unwrap();

    let tracker = UnknownComponentTracker::new(game.config());
    let builder = StateSnapshotBuilder::for_game(&game, 0).unwrap();
    let unknown = tracker.unknown_components(&state, Observer::Player(p0)).unwrap();

    let top: Vec<EntityId> = state.deck(game.draw_pile()).unwrap().iter().take(3).map(|e| e.id).collect();
    for seed in 0..10 {
        let view = builder
            .snapshot_with_rng(&state, Observer::Player(p0), &mut GameRng::new(seed))
            .unwrap();
        assert_changes_are_tracked(&state, &view, &unknown);
        let seen: Vec<EntityId> = view.deck(game.draw_pile()).unwrap().iter().take(3).map(|e| e.id).collect();
        assert_eq!(seen, top);
    }
}

/// Cards a player has seen on top of the pile are known to them; only the
/// hidden slots of the pile are reported.
#[test]
fn test_seen_pile_slots_are_known() {
    let (game, mut state) = ExplodingKittensBuilder::new().player_count(3).build(4).unwrap();
    let p0 = PlayerId::new(0);
    game.see_the_future(&mut state, p0, 3).unwrap();

    let unknown = UnknownComponentTracker::new(game.config())
        .unknown_components(&state, Observer::Player(p0))
        .unwrap();
    let pile: Vec<EntityId> = state.deck(game.draw_pile()).unwrap().iter().map(|e| e.id).collect();

    assert!(!unknown.contains_collection(game.draw_pile()));
    assert!(unknown.contains_collection(game.hand(PlayerId::new(1)).unwrap()));
    assert!(pile[..3].iter().all(|&id| !unknown.contains_entity(id)));
    assert!(pile[3..].iter().all(|&id| unknown.contains_entity(id)));
}

/// Each unknown collection takes more than one arrangement across seeds.
#[test]
fn test_unknown_collections_vary() {
    let (game, state) = VirusBuilder::new().player_count(3).build(6).unwrap();
    let observer = Observer::Player(PlayerId::new(0));
    let unknown = UnknownComponentTracker::new(game.config())
        .unknown_components(&state, observer)
        .unwrap();
    assert!(!unknown.is_empty());

    let builder = StateSnapshotBuilder::for_game(&game, 0).unwrap();
    let views: Vec<GameState> = (0..10)
        .map(|seed| builder.snapshot_with_rng(&state, observer, &mut GameRng::new(seed)).unwrap())
        .collect();

    for &id in &unknown.collections {
        let arrangements: BTreeSet<Vec<(EntityId, i64)>> = views.iter().map(|v| contents(v, id)).collect();
        assert!(arrangements.len() > 1, "{} never changes", id);
    }
}

/// Known collections are reported as known and stay identical.
#[test]
fn test_known_collections_stay_identical() {
    let (game, state) = VirusBuilder::new().player_count(3).build(6).unwrap();
    let me = PlayerId::new(1);
    let unknown = UnknownComponentTracker::new(game.config())
        .unknown_components(&state, Observer::Player(me))
        .unwrap();

    assert!(!unknown.contains_collection(game.hand(me).unwrap()));
    assert!(!unknown.contains_collection(game.discard()));
    assert!(unknown.contains_collection(game.hand(PlayerId::new(0)).unwrap()));
    assert!(unknown.contains_collection(game.draw_pile()));
}

/// The omniscient observer knows everything.
#[test]
fn test_omniscient_knows_everything() {
    let (game, state) = ColtExpressBuilder::new().player_count(2).build(3).unwrap();
    let unknown = UnknownComponentTracker::new(game.config())
        .unknown_components(&state, Observer::Omniscient)
        .unwrap();
    assert!(unknown.is_empty());
}
