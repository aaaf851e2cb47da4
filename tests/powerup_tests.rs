//! Powerup integration tests.
//!
//! These tests run powerups through the engine the way a host would:
//! earn them by score, hold them, activate them, and check the board and
//! bookkeeping afterward.

use tile_forge::core::{Board, CommandError, Direction, GameConfig, Position, TileKind};
use tile_forge::game::{GameEngine, Session};
use tile_forge::powerups::{AwardResolution, PowerupTarget, PowerupType};

fn engine() -> GameEngine {
    GameEngine::new(GameConfig::default()).unwrap()
}

fn session_with(layout: &str, held: &[PowerupType]) -> Session {
    let mut session = engine()
        .session_from_board(Board::from_layout(layout).unwrap(), 17)
        .unwrap();
    for kind in held {
        session.state.available_powerups.push_back(*kind);
    }
    session
}

// =============================================================================
// Awards
// =============================================================================

/// Crossing 1000 points awards exactly one powerup.
#[test]
fn test_first_milestone_awards_one() {
    let session = session_with("512 512 . .\n. . . .\n. . . .\n. . . .", &[]);

    let outcome = engine().apply_move(&session, Direction::Left);

    assert_eq!(outcome.session.state.score, 1024);
    assert_eq!(outcome.report.awarded.len(), 1);
    assert_eq!(outcome.session.state.available_powerups.len(), 1);
}

/// Staying between milestones awards nothing more.
#[test]
fn test_between_milestones_awards_nothing() {
    let mut session = session_with("2 2 . .\n. . . .\n. . . .\n. . . .", &[PowerupType::RowClear]);
    session.state.score = 1500;
    session.state.best_score = 1500;
    session.state.total_powerups_unlocked = 1;
    session.state.unlocked_powerup_types.insert(PowerupType::RowClear);

    let outcome = engine().apply_move(&session, Direction::Left);

    assert!(outcome.report.awarded.is_empty());
}

/// A full inventory parks the award until the host decides.
#[test]
fn test_full_inventory_then_discard() {
    let engine = engine();
    let session = session_with(
        "512 512 . .\n. . . .\n. . . .\n. . . .",
        &[PowerupType::RowClear, PowerupType::ColumnClear, PowerupType::ShuffleBoard],
    );

    let outcome = engine.apply_move(&session, Direction::Left);
    let awarded = outcome.report.awarded[0];
    assert_eq!(outcome.report.rejected_awards, vec![CommandError::InventoryFull(awarded)]);

    let settled = engine
        .resolve_pending_award(&outcome.session, awarded, AwardResolution::Discard)
        .unwrap();

    assert!(settled.state.pending_awards.is_empty());
    assert!(!settled.state.holds(awarded));
    assert_eq!(settled.state.available_powerups.len(), 3);
}

/// Adding directly to a full inventory is refused and changes nothing.
#[test]
fn test_add_to_full_inventory() {
    let session = session_with(
        "2 . . .\n. . . .\n. . . .\n. . . .",
        &[PowerupType::RowClear, PowerupType::ColumnClear, PowerupType::ShuffleBoard],
    );

    let result = engine().add_powerup(&session, PowerupType::UndoMove);

    assert_eq!(result, Err(CommandError::InventoryFull(PowerupType::UndoMove)));
}

/// Adding a held type reports the duplicate.
#[test]
fn test_add_duplicate() {
    let session = session_with("2 . . .\n. . . .\n. . . .\n. . . .", &[PowerupType::RowClear]);

    let result = engine().add_powerup(&session, PowerupType::RowClear);

    assert_eq!(result, Err(CommandError::AlreadyHeld(PowerupType::RowClear)));
}

// =============================================================================
// Instant Powerups
// =============================================================================

/// Tile destroyer on an empty cell changes nothing and keeps the powerup.
#[test]
fn test_destroyer_on_empty_cell() {
    let session = session_with("2 . . .\n. . . .\n. . . .\n. . . .", &[PowerupType::TileDestroyer]);

    let result = engine().apply_interactive_powerup(&session, PowerupType::TileDestroyer, PowerupTarget::cell(3, 3));

    assert!(matches!(result, Err(CommandError::InvalidTarget { .. })));
    assert!(session.state.holds(PowerupType::TileDestroyer));
    assert!(!session.state.has_used(PowerupType::TileDestroyer));
}

/// Column clear removes one column and scores five percent per tile.
#[test]
fn test_column_clear() {
    let session = session_with(
        "128 4 . .\n256 . . .\n. . . .\nB . . .",
        &[PowerupType::ColumnClear],
    );

    let next = engine()
        .apply_interactive_powerup(&session, PowerupType::ColumnClear, PowerupTarget::Column(0))
        .unwrap();

    assert_eq!(next.state.board.tile_count(), 1);
    // round(6.4) + round(12.8)
    assert_eq!(next.state.score, 19);
}

/// Value upgrade can reach the winning tile.
#[test]
fn test_value_upgrade_can_win() {
    let session = session_with("1024 B . .\n2 . . .\n. . . .\n. . . .", &[PowerupType::ValueUpgrade]);

    let next = engine().apply_instant_powerup(&session, PowerupType::ValueUpgrade).unwrap();

    assert!(next.state.has_won);
    assert_eq!(next.state.highest_tile, 2048);
    assert_eq!(next.state.board.get(Position::new(0, 1)).unwrap().kind, TileKind::Blocker);
    // round(102.4) + round(0.2)
    assert_eq!(next.state.score, 102);
}

/// Shuffle keeps every tile and records the rng advance.
#[test]
fn test_shuffle_board() {
    let session = session_with("2 4 8 16\nB . . .\n. . . .\n. . . .", &[PowerupType::ShuffleBoard]);

    let next = engine().apply_instant_powerup(&session, PowerupType::ShuffleBoard).unwrap();

    let mut before: Vec<_> = session.state.board.tiles().map(|t| (t.id, t.kind)).collect();
    let mut after: Vec<_> = next.state.board.tiles().map(|t| (t.id, t.kind)).collect();
    before.sort_by_key(|entry| entry.0);
    after.sort_by_key(|entry| entry.0);
    assert_eq!(before, after);
    next.state.board.validate().unwrap();
}

/// Shuffle never spawns and never touches the undo history.
#[test]
fn test_powerups_leave_history_alone() {
    let engine = engine();
    let session = session_with("2 2 . .\n. . . .\n. . . .\n. . . .", &[PowerupType::ShuffleBoard]);
    let moved = engine.apply_move(&session, Direction::Left).session;

    let shuffled = engine.apply_instant_powerup(&moved, PowerupType::ShuffleBoard).unwrap();

    assert_eq!(shuffled.history, moved.history);
    assert_eq!(shuffled.state.board.tile_count(), moved.state.board.tile_count());
    assert_eq!(shuffled.state.moves_made, moved.state.moves_made);
}

// =============================================================================
// Undo
// =============================================================================

/// Undo restores the pre-move board but keeps inventory changes.
#[test]
fn test_undo_keeps_inventory_changes() {
    let engine = engine();
    let start = session_with("2 2 . .\n. . . .\n. . . .\n. . . .", &[PowerupType::UndoMove, PowerupType::RowClear]);

    let moved = engine.apply_move(&start, Direction::Left).session;
    let undone = engine.apply_instant_powerup(&moved, PowerupType::UndoMove).unwrap();

    assert!(undone.state.board.tiles().eq(start.state.board.tiles()));
    assert_eq!(undone.state.score, start.state.score);
    assert!(undone.state.holds(PowerupType::RowClear));
    assert!(!undone.state.holds(PowerupType::UndoMove));
    assert!(undone.state.has_used(PowerupType::UndoMove));
}

/// Undo clears continuous effects.
#[test]
fn test_undo_clears_active_effects() {
    let engine = engine();
    let start = session_with(
        "2 2 . .\n. . . .\n. . . .\n. . . .",
        &[PowerupType::UndoMove, PowerupType::BlockerShield],
    );

    let moved = engine.apply_move(&start, Direction::Left).session;
    let shielded = engine.apply_instant_powerup(&moved, PowerupType::BlockerShield).unwrap();
    assert_eq!(shielded.state.moves_remaining(PowerupType::BlockerShield), Some(5));

    let undone = engine.apply_instant_powerup(&shielded, PowerupType::UndoMove).unwrap();

    assert!(undone.state.active_powerups.is_empty());
    assert!(undone.state.has_used(PowerupType::BlockerShield));
}

/// Undo with no move made yet is rejected and keeps the powerup.
#[test]
fn test_undo_unavailable() {
    let session = session_with("2 . . .\n. . . .\n. . . .\n. . . .", &[PowerupType::UndoMove]);

    let result = engine().apply_instant_powerup(&session, PowerupType::UndoMove);

    assert_eq!(result, Err(CommandError::UndoUnavailable));
    assert!(session.state.holds(PowerupType::UndoMove));
}

// =============================================================================
// Continuous Powerups
// =============================================================================

/// Freeze stops spawns for exactly three accepted moves.
#[test]
fn test_freeze_covers_three_moves() {
    let engine = engine();
    let session = session_with("2 . . .\n. . . .\n. . . .\n. . . .", &[PowerupType::TileFreeze]);
    let mut session = engine.apply_instant_powerup(&session, PowerupType::TileFreeze).unwrap();

    let directions = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];
    let mut spawns = Vec::new();
    for direction in directions {
        let outcome = engine.apply_move(&session, direction);
        assert!(outcome.report.moved);
        spawns.push(outcome.report.spawned.is_some());
        session = outcome.session;
    }

    assert_eq!(spawns, vec![false, false, false, true]);
    assert!(session.state.active_powerups.is_empty());
}

/// Shield stops blocker conversion while active.
#[test]
fn test_shield_blocks_conversion() {
    let engine = engine();
    let session = session_with(
        "128 128 . .\n. . . .\n. . . .\n128 128 . .",
        &[PowerupType::BlockerShield],
    );
    let session = engine.apply_instant_powerup(&session, PowerupType::BlockerShield).unwrap();

    let outcome = engine.apply_move(&session, Direction::Left);

    assert!(outcome.report.converted.is_empty());
    assert_eq!(outcome.session.state.board.blocker_count(), 0);
}

/// A type can be used once per game even if it comes back.
#[test]
fn test_one_shot_per_game() {
    let engine = engine();
    let session = session_with("2 . . .\n. . . .\n. . . .\n. . . .", &[PowerupType::TileFreeze]);

    let mut used = engine.apply_instant_powerup(&session, PowerupType::TileFreeze).unwrap();
    used.state.available_powerups.push_back(PowerupType::TileFreeze);

    let result = engine.apply_instant_powerup(&used, PowerupType::TileFreeze);

    assert_eq!(result, Err(CommandError::PowerupUnavailable(PowerupType::TileFreeze)));
    assert_eq!(used.state.used_powerup_types.len(), 1);
}

/// Activating something not held is rejected.
#[test]
fn test_activate_not_held() {
    let session = session_with("2 . . .\n. . . .\n. . . .\n. . . .", &[]);

    let result = engine().activate_powerup(&session, PowerupType::RowClear, Some(PowerupTarget::Row(0)));

    assert_eq!(result, Err(CommandError::PowerupUnavailable(PowerupType::RowClear)));
}
