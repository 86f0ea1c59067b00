//! N-player game setup and snapshot verification tests.
//!
//! These tests verify that the bundled games have no hidden 2-player
//! assumptions and that their configurations survive persistence.

use rust_tabletop::core::{GameConfig, GameState, Observer, PlayerId};
use rust_tabletop::games::colt_express::{Character, LootKind};
use rust_tabletop::games::{ColtExpressBuilder, ExplodingKittensBuilder, TabletopGame, VirusBuilder};
use rust_tabletop::snapshot::StateSnapshotBuilder;

/// Test that every game builds a valid configuration at every player count.
#[test]
fn test_configs_validate_for_all_player_counts() {
    for player_count in 2..=6 {
        let (game, state) = ColtExpressBuilder::new().player_count(player_count).build(42).unwrap();
        assert!(game.config().validate().is_ok());
        assert_eq!(state.player_count(), player_count);
        assert_eq!(game.train().len(), player_count + 1);

        let (game, _) = VirusBuilder::new().player_count(player_count).build(42).unwrap();
        assert!(game.config().validate().is_ok());
    }
    for player_count in 2..=5 {
        let (game, _) = ExplodingKittensBuilder::new().player_count(player_count).build(42).unwrap();
        assert!(game.config().validate().is_ok());
    }
}

/// Test that every seated player gets a snapshot and unseated ones are rejected.
#[test]
fn test_snapshot_every_seat() {
    let player_count = 5;
    let (game, state) = ColtExpressBuilder::new().player_count(player_count).build(7).unwrap();
    let mut builder = StateSnapshotBuilder::for_game(&game, 3).unwrap();

    for player in PlayerId::all(player_count) {
        let view = builder.snapshot(&state, Observer::Player(player)).unwrap();
        assert_eq!(view.player_count(), player_count);
    }
    assert!(builder.snapshot(&state, Observer::Player(PlayerId::new(5))).is_err());
}

/// Test that public counters reach every view unchanged.
#[test]
fn test_public_counters_survive_snapshots() {
    let (game, mut state) = ColtExpressBuilder::new().player_count(3).build(1).unwrap();
    let (p0, p1, p2) = (PlayerId::new(0), PlayerId::new(1), PlayerId::new(2));
    game.add_bullet(&mut state, p1, Some(p0)).unwrap();
    game.add_bullet(&mut state, p2, None).unwrap();
    game.assign_character(&mut state, p2, Character::Cheyenne).unwrap();

    let mut builder = StateSnapshotBuilder::for_game(&game, 0).unwrap();
    let view = builder.snapshot(&state, Observer::Player(p1)).unwrap();

    assert_eq!(game.bullets_left(&view, p0), 5);
    assert_eq!(game.bullets_left(&view, p1), 6);
    assert_eq!(game.character(&view, p2), Some(Character::Cheyenne));
}

/// Test that round-keyed snapshots repeat within a round and change across rounds.
#[test]
fn test_round_keyed_snapshots() {
    let (game, mut state) = VirusBuilder::new().player_count(3).build(9).unwrap();
    let builder = StateSnapshotBuilder::for_game(&game, 77).unwrap();
    let observer = Observer::Player(PlayerId::new(0));
    let hand = game.hand(PlayerId::new(1)).unwrap();

    let first = builder.snapshot_for_round(&state, observer).unwrap();
    let again = builder.snapshot_for_round(&state, observer).unwrap();
    assert_eq!(first, again);

    let mut hands = vec![first.deck(hand).unwrap().clone()];
    for _ in 0..5 {
        state.public.advance_round();
        hands.push(builder.snapshot_for_round(&state, observer).unwrap().deck(hand).unwrap().clone());
    }
    assert!(hands.iter().any(|h| h != &hands[0]));
}

/// Test that collected loot is revealed by type but not by value.
#[test]
fn test_collected_loot_keeps_type() {
    let (game, mut state) = ColtExpressBuilder::new().player_count(2).build(5).unwrap();
    let p0 = PlayerId::new(0);
    let inside = game.train()[0].inside;
    let strongbox = state.deck(inside).unwrap().get(0).unwrap().id;
    game.collect_loot(&mut state, p0, inside, strongbox).unwrap();
    let jewel = game.add_loot(&mut state, p0, LootKind::Jewel, 500).unwrap();

    let mut builder = StateSnapshotBuilder::for_game(&game, 0).unwrap();
    let view = builder.snapshot(&state, Observer::Player(PlayerId::new(1))).unwrap();
    let loot = view.deck(game.player(p0).unwrap().loot).unwrap();

    assert_eq!(loot.size(), 3);
    for id in [strongbox, jewel] {
        let token = loot.iter().find(|e| e.id == id).unwrap();
        let real = state.deck(game.player(p0).unwrap().loot).unwrap().iter().find(|e| e.id == id).unwrap().clone();
        assert_eq!(token.category, real.category);
        assert_eq!(token.owner, Some(p0));
    }
}

/// Test that a game configuration round-trips through JSON.
#[test]
fn test_config_json_round_trip() {
    let (game, _) = ExplodingKittensBuilder::new().player_count(4).build(0).unwrap();
    let json = serde_json::to_string(game.config()).unwrap();
    let restored: GameConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, game.config());
}

/// Test that a state and a view of it both persist with bincode.
#[test]
fn test_state_bytes_round_trip() {
    let (game, state) = VirusBuilder::new().player_count(4).build(12).unwrap();
    let restored = GameState::from_bytes(&state.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, state);

    let mut builder = StateSnapshotBuilder::for_game(&game, 0).unwrap();
    let view = builder.snapshot(&restored, Observer::Player(PlayerId::new(3))).unwrap();
    assert_eq!(view.sizes(), state.sizes());
}
