//! Game-over and win detection.
//!
//! - `is_locked`: no empty cell and no adjacent pair that could merge
//! - `has_winning_tile`: some numeric tile reached the winning value
//! - `GamePhase`: lifecycle derived from a state's flags

use serde::{Deserialize, Serialize};

use crate::core::{Board, GameState, Position};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The winning tile was reached at some point.
    Won,
    Lost,
}

/// Lifecycle phase of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game started yet.
    Idle,
    InProgress,
    GameOver(GameOutcome),
}

impl GamePhase {
    /// Phase of a state.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        if !state.started {
            GamePhase::Idle
        } else if state.is_game_over {
            let outcome = if state.has_won { GameOutcome::Won } else { GameOutcome::Lost };
            GamePhase::GameOver(outcome)
        } else {
            GamePhase::InProgress
        }
    }

    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::GameOver(_))
    }
}

/// True when no swipe can change the board.
///
/// Numeric tiles pair up on equal value, blockers pair up with each other.
#[must_use]
pub fn is_locked(board: &Board) -> bool {
    if !board.is_full() {
        return false;
    }

    let size = board.size();
    for index in 0..size * size {
        let pos = Position::from_index(index, size);
        let Some(tile) = board.get(pos) else { continue };
        for neighbour in pos.forward_neighbours(size) {
            if let Some(other) = board.get(neighbour) {
                if tile.kind.merges_with(other.kind) {
                    return false;
                }
            }
        }
    }

    true
}

/// True if a numeric tile of at least `winning_value` is on the board.
#[must_use]
pub fn has_winning_tile(board: &Board, winning_value: u32) -> bool {
    board.highest_value() >= winning_value
}

/// Whether the game is closed for good: host expiry or an exhausted move
/// budget. Nothing can reopen it.
#[must_use]
pub fn is_closed(state: &GameState) -> bool {
    state.expired || state.mode.move_limit().is_some_and(|limit| state.moves_made >= limit)
}

/// Whether a state has ended: closed, or a locked board.
#[must_use]
pub fn is_finished(state: &GameState) -> bool {
    is_closed(state) || is_locked(&state.board)
}

/// Recompute the terminal flags of a state in place. `has_won` is sticky.
pub fn refresh_flags(state: &mut GameState, winning_value: u32) {
    if !state.started {
        return;
    }
    state.has_won = state.has_won || has_winning_tile(&state.board, winning_value);
    state.is_game_over = is_finished(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameMode, GameRngState};

    fn board(layout: &str) -> Board {
        Board::from_layout(layout).unwrap()
    }

    fn state(layout: &str) -> GameState {
        GameState::new(board(layout), GameMode::Classic, 0, GameRngState::seeded(0))
    }

    #[test]
    fn test_board_with_gap_is_not_locked() {
        assert!(!is_locked(&board("2 4\n. 8")));
    }

    #[test]
    fn test_alternating_full_board_is_locked() {
        assert!(is_locked(&board("2 4 2 4\n4 2 4 2\n2 4 2 4\n4 2 4 2")));
    }

    #[test]
    fn test_equal_neighbours_unlock() {
        assert!(!is_locked(&board("2 2\n4 8")));
        assert!(!is_locked(&board("2 4\n2 8")));
    }

    #[test]
    fn test_blocker_pair_unlocks() {
        assert!(!is_locked(&board("B B\n4 8")));
        assert!(is_locked(&board("B 2\n4 B")));
    }

    #[test]
    fn test_winning_tile() {
        assert!(has_winning_tile(&board("2048 .\n. ."), 2048));
        assert!(has_winning_tile(&board("4096 .\n. ."), 2048));
        assert!(!has_winning_tile(&board("1024 B\n. ."), 2048));
    }

    #[test]
    fn test_refresh_flags_win_is_sticky() {
        let mut state = state("2048 .\n. .");
        refresh_flags(&mut state, 2048);
        assert!(state.has_won);
        assert!(!state.is_game_over);

        state.board = board("2 .\n. .");
        refresh_flags(&mut state, 2048);
        assert!(state.has_won);
    }

    #[test]
    fn test_move_limit_ends_game() {
        let mut state = state("2 .\n. .");
        state.mode = GameMode::TimeAttack { move_limit: 3 };
        state.moves_made = 3;

        refresh_flags(&mut state, 2048);

        assert!(state.is_game_over);
        assert_eq!(state.phase(), GamePhase::GameOver(GameOutcome::Lost));
    }

    #[test]
    fn test_expired_ends_game() {
        let mut state = state("2 .\n. .");
        state.expired = true;
        refresh_flags(&mut state, 2048);
        assert!(state.phase().is_over());
    }

    #[test]
    fn test_locked_board_is_finished_not_closed() {
        let mut state = state("2 4\n4 2");
        refresh_flags(&mut state, 2048);
        assert!(state.is_game_over);
        assert!(!is_closed(&state));

        state.board.remove(Position::new(0, 0));
        refresh_flags(&mut state, 2048);
        assert!(!state.is_game_over);
    }

    #[test]
    fn test_idle_flags_untouched() {
        let mut state = GameState::idle(4, 0, GameRngState::seeded(0));
        refresh_flags(&mut state, 2048);
        assert_eq!(state.phase(), GamePhase::Idle);
    }
}
