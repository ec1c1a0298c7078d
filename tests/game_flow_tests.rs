//! Integration tests for the game session lifecycle

use tile_merge::core::{Board, EngineConfig, GameSnapshot, GameState, TileIds};
use tile_merge::types::{Direction, GameEvent, GameStatus, CELL_COUNT};

fn play_cycle(game: &mut GameState, moves: usize) {
    for (i, dir) in Direction::ALL.into_iter().cycle().take(moves).enumerate() {
        game.apply_move(dir, i as u64 * 250);
    }
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345);
    assert_eq!(game.status(), GameStatus::Idle);

    let snap = game.new_game();
    assert_eq!(snap.status, GameStatus::Playing);
    assert_eq!(snap.tiles.len(), 2);
    assert_eq!(snap.score, 0);
    assert!(!snap.can_undo);
    assert!(snap.playable());
}

#[test]
fn test_every_successful_move_spawns_one_tile() {
    let mut game = GameState::new(99);
    game.new_game();

    for (i, dir) in Direction::ALL.into_iter().cycle().take(60).enumerate() {
        if game.status() == GameStatus::GameOver {
            break;
        }
        let before = game.tiles().len();
        let result = game.apply_move(dir, i as u64 * 400);
        if result.moved {
            let spawned = result.spawned.expect("a move always leaves an empty cell");
            assert!(spawned.value == 2 || spawned.value == 4);
            assert!(spawned.just_spawned);
            assert_eq!(game.tiles().len(), before - result.merges.len() + 1);
        } else {
            assert!(result.spawned.is_none());
            assert_eq!(game.tiles().len(), before);
        }
    }
}

#[test]
fn test_tile_ids_unique_and_cells_distinct() {
    let mut game = GameState::new(2024);
    game.new_game();
    play_cycle(&mut game, 80);

    let tiles = game.tiles();
    assert!(tiles.len() <= CELL_COUNT);
    for (i, a) in tiles.iter().enumerate() {
        for b in &tiles[i + 1..] {
            assert_ne!(a.id, b.id);
            assert_ne!(a.position(), b.position());
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(7);
    let mut b = GameState::new(7);
    a.new_game();
    b.new_game();

    play_cycle(&mut a, 50);
    play_cycle(&mut b, 50);

    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_next_values_preview_the_spawn() {
    let mut game = GameState::new(31);
    game.new_game();

    for (i, dir) in Direction::ALL.into_iter().cycle().take(30).enumerate() {
        let preview = game.next_values();
        let result = game.apply_move(dir, i as u64 * 100);
        if let Some(tile) = result.spawned {
            assert_eq!(tile.value, preview[0]);
        }
    }
}

#[test]
fn test_game_over_is_final() {
    let config = EngineConfig {
        spawn_four_permille: 0,
        ..EngineConfig::default()
    };
    let mut game = GameState::with_config(5, config).unwrap();
    let board = Board::from_values(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 8, 8]],
        &mut TileIds::new(),
    );
    game.load_board(board);

    let result = game.apply_move(Direction::Left, 0);

    assert!(result.moved);
    assert!(game.game_over());
    assert!(result
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert!(game.available_moves().is_empty());
    assert!(!game.can_undo());

    let frozen = game.snapshot();
    assert!(!frozen.playable());
    for dir in Direction::ALL {
        assert!(!game.apply_move(dir, 100).moved);
    }
    assert_eq!(game.snapshot(), frozen);
}

#[test]
fn test_win_keeps_playing() {
    let mut game = GameState::new(11);
    let board = Board::from_values(
        [[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]],
        &mut TileIds::new(),
    );
    game.load_board(board);

    let result = game.apply_move(Direction::Left, 0);

    assert!(result.events.contains(&GameEvent::Win));
    assert_eq!(game.status(), GameStatus::Won);
    assert!(game.has_won());

    let next = Direction::ALL
        .into_iter()
        .find(|&d| game.can_move(d))
        .unwrap();
    let result = game.apply_move(next, 100);
    assert!(result.moved);
    assert!(!result.events.contains(&GameEvent::Win));
}

#[test]
fn test_custom_win_value() {
    let config = EngineConfig {
        win_value: 64,
        ..EngineConfig::default()
    };
    let mut game = GameState::with_config(1, config).unwrap();
    game.load_board(Board::from_values(
        [[32, 32, 0, 0], [0; 4], [0; 4], [0; 4]],
        &mut TileIds::new(),
    ));

    let result = game.apply_move(Direction::Right, 0);
    assert!(result.events.contains(&GameEvent::Win));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EngineConfig {
        spawn_four_permille: 2000,
        ..EngineConfig::default()
    };
    assert!(GameState::with_config(1, config).is_err());
}

#[test]
fn test_undo_restores_previous_state_once() {
    let mut game = GameState::new(8);
    game.load_board(Board::from_values(
        [[4, 4, 0, 0], [0, 0, 2, 0], [0; 4], [0; 4]],
        &mut TileIds::new(),
    ));
    let before = game.snapshot();

    game.apply_move(Direction::Left, 0);
    assert_eq!(game.score(), 8);
    assert!(game.can_undo());

    assert!(game.undo());
    let after = game.snapshot();
    assert_eq!(after.tiles, before.tiles);
    assert_eq!(after.score, before.score);
    assert!(!after.can_undo);
    assert_eq!(after.best_score, 8);

    assert!(!game.undo());
}

#[test]
fn test_fever_through_session() {
    let mut game = GameState::new(3);
    game.new_game();

    // Scoring moves are not guaranteed from a random board; just check the
    // multiplier stays consistent with fever state.
    for (i, dir) in Direction::ALL.into_iter().cycle().take(200).enumerate() {
        let now = i as u64 * 100;
        game.tick(now);
        let fever_before = game.fever_active();
        let result = game.apply_move(dir, now);
        if !result.moved || result.raw_score_delta == 0 {
            continue;
        }
        if fever_before {
            assert_eq!(result.score_delta, result.raw_score_delta * 2);
        } else {
            assert_eq!(result.score_delta, result.raw_score_delta);
        }
        if game.game_over() {
            break;
        }
    }
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut game = GameState::new(555);
    game.new_game();
    play_cycle(&mut game, 12);

    let snap = game.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"bestScore\""));
    assert!(json.contains("\"nextValues\""));

    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn test_events_serialize_with_type_tag() {
    let json = serde_json::to_string(&GameEvent::MilestoneReached { value: 256 }).unwrap();
    assert_eq!(json, r#"{"type":"milestoneReached","value":256}"#);
}
