//! Session lifecycle integration tests.
//!
//! These tests cover whole games: starting, playing, ending, restarting,
//! and storing sessions between commands.

use tile_forge::core::{Board, Direction, GameConfig, GameMode, Position};
use tile_forge::game::{GameEngine, Session};
use tile_forge::rules::{GameOutcome, GamePhase};

fn engine() -> GameEngine {
    GameEngine::new(GameConfig::default()).unwrap()
}

/// Cycle through directions until the game ends or `limit` moves pass.
fn play(engine: &GameEngine, mut session: Session, limit: usize) -> Session {
    for step in 0..limit {
        if session.phase().is_over() {
            break;
        }
        let direction = Direction::ALL[step % Direction::ALL.len()];
        session = engine.apply_move(&session, direction).session;
    }
    session
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Idle, then in progress, then over.
#[test]
fn test_phases() {
    let engine = engine();
    assert_eq!(engine.idle().phase(), GamePhase::Idle);

    let session = engine.new_game(1);
    assert_eq!(session.phase(), GamePhase::InProgress);

    let over = play(&engine, session, 10_000);
    assert!(over.phase().is_over());
}

/// A locked board ends the game on the next move attempt.
#[test]
fn test_locked_board_ends_game() {
    let engine = engine();
    let board = Board::from_layout("2 4 2 4\n4 2 4 2\n2 4 2 4\n4 2 4 8").unwrap();
    let session = engine.session_from_board(board, 3).unwrap();

    assert_eq!(session.phase(), GamePhase::GameOver(GameOutcome::Lost));

    let outcome = engine.apply_move(&session, Direction::Left);
    assert!(!outcome.report.moved);
}

/// A move that fills the last cell without a pair left ends the game.
#[test]
fn test_last_move_locks_board() {
    let engine = GameEngine::new(GameConfig::default().with_grid_size(2)).unwrap();
    let board = Board::from_layout("4 .\n8 16").unwrap();
    let session = engine.session_from_board(board, 0).unwrap();

    // Sliding right fills (0, 1) with the 4 and leaves (0, 0) for the spawn.
    let outcome = engine.apply_move(&session, Direction::Right);

    assert_eq!(outcome.report.spawned, Some(Position::new(0, 0)));
    assert!(outcome.session.state.is_game_over);
    assert_eq!(outcome.session.summary().outcome, Some(GameOutcome::Lost));
}

/// Winning does not end the game.
#[test]
fn test_keep_playing_after_win() {
    let engine = GameEngine::new(GameConfig::default().with_blocker_threshold(None)).unwrap();
    let board = Board::from_layout("1024 1024 . .\n. . . .\n. . . .\n. . . .").unwrap();
    let session = engine.session_from_board(board, 5).unwrap();

    let won = engine.apply_move(&session, Direction::Left).session;
    assert!(won.state.has_won);
    assert_eq!(won.phase(), GamePhase::InProgress);

    let later = play(&engine, won, 40);
    assert!(later.state.has_won);
}

/// Time attack ends after the move limit.
#[test]
fn test_time_attack_limit() {
    let engine = engine();
    let session = engine.new_game_with_mode(8, GameMode::TimeAttack { move_limit: 5 }, 0);

    let over = play(&engine, session, 100);

    assert!(over.phase().is_over());
    assert_eq!(over.state.moves_made, 5);
    assert_eq!(over.summary().moves_made, 5);
}

/// The host's clock can end the game at any time.
#[test]
fn test_expire() {
    let engine = engine();
    let session = play(&engine, engine.new_game(2), 3);

    let expired = engine.expire(&session);

    assert!(expired.phase().is_over());
    assert_eq!(expired.state.board, session.state.board);
}

/// Tiles at the largest value stay put instead of overflowing.
#[test]
fn test_largest_tiles_do_not_merge() {
    let engine = GameEngine::new(GameConfig::default().with_blocker_threshold(None)).unwrap();
    let board = Board::from_layout("2147483648 2147483648 . .\n. . . .\n. . . .\n. . . .").unwrap();
    let session = engine.session_from_board(board, 3).unwrap();

    let outcome = engine.apply_move(&session, Direction::Left);

    assert!(!outcome.report.moved);
    assert!(outcome.report.merges.is_empty());
    assert_eq!(outcome.session.state.board.tile_count(), 2);

    let outcome = engine.apply_move(&session, Direction::Right);
    assert!(outcome.report.moved);
    assert!(outcome.report.merges.is_empty());
    assert_eq!(outcome.session.state.score, 0);
}

// =============================================================================
// Restart & Best Score
// =============================================================================

/// Best score survives a restart.
#[test]
fn test_restart_carries_best_score() {
    let engine = engine();
    let finished = play(&engine, engine.new_game(4), 10_000);
    let best = finished.state.best_score;
    assert!(best > 0);

    let next = engine.restart(&finished);

    assert_eq!(next.state.best_score, best);
    assert_eq!(next.state.score, 0);
    assert_eq!(next.state.board.tile_count(), 2);
    assert!(next.state.available_powerups.is_empty());
    assert!(next.state.used_powerup_types.is_empty());
    assert!(!next.can_undo());
}

/// Best score never trails the score.
#[test]
fn test_best_score_tracks_score() {
    let engine = engine();
    let mut session = engine.new_game(12);

    for step in 0..200 {
        if session.phase().is_over() {
            break;
        }
        session = engine.apply_move(&session, Direction::ALL[step % 4]).session;
        assert!(session.state.best_score >= session.state.score);
    }
}

// =============================================================================
// Determinism
// =============================================================================

/// The same seed and moves give the same game.
#[test]
fn test_replay_is_identical() {
    let engine = engine();

    let a = play(&engine, engine.new_game(99), 150);
    let b = play(&engine, engine.new_game(99), 150);

    assert_eq!(a, b);
}

/// Commands never modify the session they are given.
#[test]
fn test_input_session_untouched() {
    let engine = engine();
    let session = engine.new_game(6);
    let copy = session.clone();

    let _ = engine.apply_move(&session, Direction::Down);
    let _ = engine.restart(&session);
    let _ = engine.expire(&session);

    assert_eq!(session, copy);
}

// =============================================================================
// Persistence
// =============================================================================

/// A stored session comes back identical and keeps playing identically.
#[test]
fn test_store_and_resume() {
    let engine = engine();
    let session = play(&engine, engine.new_game(21), 30);

    let bytes = engine.encode(&session).unwrap();
    let restored = engine.try_restore(&bytes).unwrap();

    assert_eq!(restored, session);
    assert_eq!(
        engine.apply_move(&restored, Direction::Left),
        engine.apply_move(&session, Direction::Left)
    );
}

/// Truncated data degrades to a fresh game.
#[test]
fn test_truncated_data_degrades() {
    let engine = engine();
    let bytes = engine.encode(&engine.new_game(21)).unwrap();

    assert!(engine.try_restore(&bytes[..bytes.len() / 2]).is_err());
    assert_eq!(engine.restore(&bytes[..bytes.len() / 2], 5), engine.new_game(5));
}

/// A session from a differently sized engine is refused.
#[test]
fn test_restore_rejects_other_grid_size() {
    let small = GameEngine::new(GameConfig::default().with_grid_size(3)).unwrap();
    let bytes = small.encode(&small.new_game(1)).unwrap();

    assert!(engine().try_restore(&bytes).is_err());
}

/// Sessions also round-trip through JSON for hosts that prefer text.
#[test]
fn test_json_session() {
    let engine = engine();
    let session = play(&engine, engine.new_game(8), 12);

    let json = serde_json::to_string(&session).unwrap();
    let decoded: Session = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, session);
    engine.validate_state(&decoded).unwrap();
}
