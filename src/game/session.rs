//! A game in progress: state plus undo history.

use serde::{Deserialize, Serialize};

use super::history::UndoHistory;
use crate::core::{GameMode, GameState};
use crate::powerups::PowerupType;
use crate::rules::{GameOutcome, GamePhase};

/// Everything a host keeps between commands.
///
/// The undo history lives next to the state rather than inside it, so a
/// snapshot never carries its own predecessors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub state: GameState,
    pub history: UndoHistory,
}

impl Session {
    /// Wrap a state with an empty history of `undo_depth` entries.
    #[must_use]
    pub fn new(state: GameState, undo_depth: usize) -> Self {
        Self {
            state,
            history: UndoHistory::new(undo_depth),
        }
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    /// Whether an undo powerup would have something to restore.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Read-only view for statistics and leaderboards.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        let state = &self.state;
        let outcome = match state.phase() {
            GamePhase::GameOver(outcome) => Some(outcome),
            GamePhase::Idle | GamePhase::InProgress => None,
        };
        GameSummary {
            score: state.score,
            best_score: state.best_score,
            mode: state.mode,
            moves_made: state.moves_made,
            highest_tile: state.highest_tile,
            powerups_used: state.used_powerup_types.iter().copied().collect(),
            outcome,
        }
    }
}

/// Final figures of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u64,
    pub best_score: u64,
    pub mode: GameMode,
    /// Game length in accepted moves.
    pub moves_made: u32,
    pub highest_tile: u32,
    pub powerups_used: Vec<PowerupType>,
    /// `None` while the game is still running.
    pub outcome: Option<GameOutcome>,
}
