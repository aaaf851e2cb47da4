//! Game state: everything a host persists between commands.
//!
//! ## GameState
//!
//! - Board and score (current and best)
//! - Terminal flags (`is_game_over`, sticky `has_won`)
//! - Powerup bookkeeping: inventory, active continuous effects, one-shot
//!   usage history, award counters, awards waiting for a replace/discard
//!   decision
//! - Mode, move counter, highest tile reached
//! - RNG position
//!
//! Collections use `im` persistent data structures, so cloning a state to
//! build the next one is O(1). Transitions never mutate their input.
//!
//! Undo snapshots are deliberately *not* part of `GameState`; they live in
//! the orchestrator's bounded history (see `game::UndoHistory`).

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::config::GameMode;
use super::rng::GameRngState;
use crate::powerups::{ActivePowerup, PowerupType};
use crate::rules::GamePhase;

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    // === Board & Score ===
    pub board: Board,

    /// Non-decreasing except through undo.
    pub score: u64,

    /// Always `max(best_score, score)`.
    pub best_score: u64,

    // === Terminal Flags ===
    pub is_game_over: bool,

    /// Sticky once true.
    pub has_won: bool,

    /// Set when the host ended the game (time-attack clock ran out).
    pub expired: bool,

    /// False only for the idle placeholder before the first game.
    pub started: bool,

    // === Powerups ===
    /// Held, unused powerups. Unique types, bounded by inventory capacity.
    pub available_powerups: Vector<PowerupType>,

    /// Continuous effects in progress.
    pub active_powerups: Vector<ActivePowerup>,

    /// Types activated this game. Each type at most once, ever.
    pub used_powerup_types: OrdSet<PowerupType>,

    /// Types awarded by score milestones this game.
    pub unlocked_powerup_types: OrdSet<PowerupType>,

    /// Number of milestone awards granted this game.
    pub total_powerups_unlocked: u32,

    /// Awards that did not fit in the inventory and await a decision.
    pub pending_awards: Vector<PowerupType>,

    // === Progress ===
    pub mode: GameMode,

    /// Accepted moves this game.
    pub moves_made: u32,

    /// Highest numeric value ever produced this game.
    pub highest_tile: u32,

    // === Randomness ===
    pub rng: GameRngState,
}

impl GameState {
    /// Create a state around a board with zeroed counters.
    #[must_use]
    pub fn new(board: Board, mode: GameMode, best_score: u64, rng: GameRngState) -> Self {
        let highest_tile = board.highest_value();
        Self {
            board,
            score: 0,
            best_score,
            is_game_over: false,
            has_won: false,
            expired: false,
            started: true,
            available_powerups: Vector::new(),
            active_powerups: Vector::new(),
            used_powerup_types: OrdSet::new(),
            unlocked_powerup_types: OrdSet::new(),
            total_powerups_unlocked: 0,
            pending_awards: Vector::new(),
            mode,
            moves_made: 0,
            highest_tile,
            rng,
        }
    }

    /// Placeholder state before any game has started.
    #[must_use]
    pub fn idle(grid_size: usize, best_score: u64, rng: GameRngState) -> Self {
        Self {
            started: false,
            ..Self::new(Board::new(grid_size), GameMode::Classic, best_score, rng)
        }
    }

    /// Whether the inventory holds a type.
    #[must_use]
    pub fn holds(&self, kind: PowerupType) -> bool {
        self.available_powerups.contains(&kind)
    }

    /// Whether a type was already activated this game.
    #[must_use]
    pub fn has_used(&self, kind: PowerupType) -> bool {
        self.used_powerup_types.contains(&kind)
    }

    /// Moves remaining for an active continuous powerup.
    #[must_use]
    pub fn moves_remaining(&self, kind: PowerupType) -> Option<u32> {
        self.active_powerups
            .iter()
            .find(|active| active.kind == kind)
            .map(|active| active.moves_remaining)
    }

    /// Add to the score, keeping `best_score` in step.
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.best_score = self.best_score.max(self.score);
    }

    /// Record a newly produced tile value.
    pub fn note_tile(&mut self, value: u32) {
        self.highest_tile = self.highest_tile.max(value);
    }

    /// Lifecycle phase derived from the flags.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        GamePhase::of(self)
    }
}
