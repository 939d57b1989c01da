//! Tests for the settings snapshot and the persistence port.

use tictactoe_match::{
    MatchEngine, MatchType, MemoryStore, OpponentMode, Player, SETTINGS_KEY, Scores,
    SettingsStore, Snapshot, Strategy, load_settings, save_settings,
};

#[test]
fn test_missing_key_falls_back_to_defaults() {
    let store = MemoryStore::new();
    assert_eq!(load_settings(&store), Snapshot::default());
}

#[test]
fn test_malformed_payload_falls_back_to_defaults() {
    let mut store = MemoryStore::new();
    store
        .save(SETTINGS_KEY, "not json at all".to_string())
        .unwrap();
    assert_eq!(load_settings(&store), Snapshot::default());

    store.save(SETTINGS_KEY, "{\"mode\": 12}".to_string()).unwrap();
    assert_eq!(load_settings(&store), Snapshot::default());
}

#[test]
fn test_save_then_load_round_trips() {
    let mut store = MemoryStore::new();
    let snapshot = Snapshot {
        mode: OpponentMode::Computer,
        difficulty: Strategy::Optimal,
        starting_player: Player::O,
        match_type: MatchType::BestOf,
        match_length: 7,
        winning_score: Scores { x: 2, o: 1 },
    };
    save_settings(&mut store, &snapshot).unwrap();
    assert_eq!(load_settings(&store), snapshot);
}

#[test]
fn test_partial_payload_fills_defaults_and_ignores_unknown_fields() {
    let mut store = MemoryStore::new();
    store
        .save(
            SETTINGS_KEY,
            "{\"matchType\":\"bestOf\",\"winningScore\":{\"X\":3,\"O\":1},\"theme\":\"dark\"}"
                .to_string(),
        )
        .unwrap();
    let snapshot = load_settings(&store);
    assert_eq!(snapshot.match_type, MatchType::BestOf);
    assert_eq!(snapshot.winning_score, Scores { x: 3, o: 1 });
    // Everything else keeps its default.
    assert_eq!(snapshot.mode, OpponentMode::Human);
    assert_eq!(snapshot.difficulty, Strategy::Random);
    assert_eq!(snapshot.starting_player, Snapshot::default().starting_player);
    assert_eq!(snapshot.match_length, Snapshot::default().match_length);
}

#[test]
fn test_apply_clamps_match_length() {
    let mut engine = MatchEngine::default();
    let snapshot = Snapshot {
        match_length: 99,
        ..Snapshot::default()
    };
    snapshot.apply(&mut engine);
    assert_eq!(engine.config().match_length, 15);

    let snapshot = Snapshot {
        match_length: 0,
        ..Snapshot::default()
    };
    snapshot.apply(&mut engine);
    assert_eq!(engine.config().match_length, 1);
}

#[test]
fn test_apply_rederives_match_winner_from_scores() {
    let mut engine = MatchEngine::default();
    let snapshot = Snapshot {
        match_type: MatchType::FirstTo,
        match_length: 2,
        winning_score: Scores { x: 2, o: 0 },
        ..Snapshot::default()
    };
    snapshot.apply(&mut engine);
    assert_eq!(engine.scores(), &Scores { x: 2, o: 0 });
    assert_eq!(engine.match_winner(), Some(Player::X));
    // The restored match is closed; no moves until a match reset.
    assert!(!engine.make_move(0));
}

#[test]
fn test_apply_below_target_leaves_match_open() {
    let mut engine = MatchEngine::default();
    let snapshot = Snapshot {
        match_type: MatchType::BestOf,
        match_length: 5,
        winning_score: Scores { x: 2, o: 2 },
        starting_player: Player::O,
        ..Snapshot::default()
    };
    snapshot.apply(&mut engine);
    assert_eq!(engine.match_winner(), None);
    assert_eq!(engine.current_player(), Player::O);
    assert!(engine.make_move(0));
}

#[test]
fn test_capture_reflects_engine_and_controller_state() {
    let mut engine = MatchEngine::default();
    engine.update_settings(tictactoe_match::SettingsUpdate {
        match_type: Some(MatchType::BestOf),
        match_length: Some(3),
        ..Default::default()
    });
    // X wins a round: top row.
    for pos in [0, 3, 1, 4, 2] {
        assert!(engine.make_move(pos));
    }
    let snapshot = Snapshot::capture(&engine, OpponentMode::Computer, Strategy::Heuristic);
    assert_eq!(snapshot.mode, OpponentMode::Computer);
    assert_eq!(snapshot.difficulty, Strategy::Heuristic);
    assert_eq!(snapshot.match_type, MatchType::BestOf);
    assert_eq!(snapshot.match_length, 3);
    assert_eq!(snapshot.winning_score, Scores { x: 1, o: 0 });
}

#[test]
fn test_settings_option_labels() {
    assert_eq!(MatchType::FirstTo.label(), "First to");
    assert_eq!(MatchType::BestOf.label(), "Best of");
    assert_eq!(Strategy::Optimal.label(), "Optimal");
}

#[test]
fn test_wire_format_field_names() {
    let mut store = MemoryStore::new();
    save_settings(&mut store, &Snapshot::default()).unwrap();
    let raw = store.load(SETTINGS_KEY).unwrap();
    assert!(raw.contains("\"startingPlayer\":\"X\""));
    assert!(raw.contains("\"matchType\":\"firstTo\""));
    assert!(raw.contains("\"matchLength\":5"));
    assert!(raw.contains("\"winningScore\":{\"X\":0,\"O\":0}"));
    assert!(raw.contains("\"mode\":\"human\""));
    assert!(raw.contains("\"difficulty\":\"random\""));
}
