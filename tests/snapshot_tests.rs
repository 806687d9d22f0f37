//! Snapshot tests - render snapshots and progression save/restore

use tetrino::core::{Game, GameConfig, GameSnapshot, ProgressSnapshot, RestoreError, ScriptedShapes};
use tetrino::types::{GamePhase, MoveType, Shape};

fn started(shapes: &[Shape]) -> Game<ScriptedShapes> {
    let mut game = Game::new(GameConfig::default(), ScriptedShapes::new(shapes.to_vec()));
    game.update(MoveType::Confirm, 0.0);
    game
}

#[test]
fn test_snapshot_mirrors_game() {
    let mut game = started(&[Shape::Pyramid, Shape::Bar]);
    game.hard_drop();

    let snap = game.snapshot();
    assert_eq!(snap.phase, GamePhase::Play);
    assert_eq!((snap.width, snap.height), (10, 22));
    assert_eq!(snap.board.as_slice(), game.board().cells());
    assert_eq!(snap.clearing.len(), 22);
    assert_eq!(snap.cell(21, 4), Some(3));
    assert_eq!(snap.cell(22, 0), None);

    let active = snap.active.unwrap();
    assert_eq!(active.shape, Shape::Bar);
    assert_eq!(active.dim, 4);
    assert_eq!(active.get(1, 0), Some(2));
    assert_eq!(snap.next.unwrap().shape, Shape::Pyramid);
    assert_eq!(snap.shadow_row, game.shadow_row());
    assert_eq!(snap.progress, game.progress());
}

#[test]
fn test_snapshot_into_reuses_buffers() {
    let mut game = started(&[Shape::S, Shape::Z]);
    let mut snap = GameSnapshot::default();

    game.snapshot_into(&mut snap);
    let board_ptr = snap.board.as_ptr();
    let clearing_ptr = snap.clearing.as_ptr();

    game.update(MoveType::HardDrop, 0.1);
    game.snapshot_into(&mut snap);

    assert_eq!(snap.board.as_ptr(), board_ptr);
    assert_eq!(snap.clearing.as_ptr(), clearing_ptr);
    assert_eq!(snap.board.as_slice(), game.board().cells());
    assert_eq!(snap, game.snapshot());
}

#[test]
fn test_snapshot_before_play_has_no_pieces() {
    let game = Game::new(GameConfig::default(), ScriptedShapes::new(vec![Shape::J]));
    let snap = game.snapshot();

    assert_eq!(snap.phase, GamePhase::Start);
    assert!(snap.active.is_none());
    assert!(snap.next.is_none());
    assert!(snap.shadow_row.is_none());
    assert!(!snap.playable());
}

#[test]
fn test_progress_json_round_trip() {
    let saved = ProgressSnapshot {
        start_level: 5,
        level: 9,
        points: 98_760,
        cleared_line_count: 120,
    };

    let json = serde_json::to_string(&saved).unwrap();
    assert!(json.contains("\"cleared_line_count\":120"));

    let loaded: ProgressSnapshot = serde_json::from_str(&json).unwrap();
    let mut game = started(&[Shape::L]);
    game.restore_progress(&loaded).unwrap();

    assert_eq!(game.start_level(), 5);
    assert_eq!(game.level(), 9);
    assert_eq!(game.points(), 98_760);
    assert_eq!(game.cleared_line_count(), 120);
}

#[test]
fn test_restore_rejects_level_below_start() {
    let mut game = started(&[Shape::L]);
    let before = game.progress();

    let err = game
        .restore_progress(&ProgressSnapshot {
            start_level: 8,
            level: 2,
            points: 0,
            cleared_line_count: 0,
        })
        .unwrap_err();

    assert_eq!(err, RestoreError::LevelBelowStart);
    assert_eq!(err.code(), "invalid_progress");
    assert_eq!(game.progress(), before);
}

#[test]
fn test_restore_rejected_during_line_clear() {
    let config = GameConfig {
        width: 4,
        height: 6,
        start_level: 0,
    };
    let mut game = Game::new(config, ScriptedShapes::new(vec![Shape::Bar]));
    game.update(MoveType::Confirm, 0.0);
    game.update(MoveType::HardDrop, 0.1);
    assert_eq!(game.phase(), GamePhase::LineClear);

    let err = game.restore_progress(&ProgressSnapshot::default()).unwrap_err();
    assert_eq!(err, RestoreError::LineClearPending);
    assert!(err.to_string().contains("lines are being cleared"));
}

#[test]
fn test_render_snapshot_serializes() {
    let game = started(&[Shape::Square]);
    let json = serde_json::to_value(game.snapshot()).unwrap();

    assert_eq!(json["phase"], "Play");
    assert_eq!(json["width"], 10);
    assert_eq!(json["active"]["shape"], "Square");
    assert_eq!(json["board"].as_array().unwrap().len(), 220);
}
