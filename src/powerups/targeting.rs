//! Targets for interactive powerups.
//!
//! Hosts decode a tap into a `PowerupTarget`. The engine does not trust the
//! host to only offer legal targets: every target is checked against the
//! powerup type and the current board before anything changes.

use serde::{Deserialize, Serialize};

use super::PowerupType;
use crate::core::{Board, CommandError, Position};

/// A caller-supplied target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupTarget {
    /// A single cell (tile destroyer).
    Cell { row: usize, col: usize },
    /// A whole row (row clear).
    Row(usize),
    /// A whole column (column clear).
    Column(usize),
}

impl PowerupTarget {
    /// Target a cell.
    #[must_use]
    pub const fn cell(row: usize, col: usize) -> Self {
        Self::Cell { row, col }
    }
}

impl From<Position> for PowerupTarget {
    fn from(pos: Position) -> Self {
        Self::Cell { row: pos.row, col: pos.col }
    }
}

/// A target checked against the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// An occupied cell.
    Cell(Position),
    Row(usize),
    Column(usize),
}

fn invalid(kind: PowerupType, reason: String) -> CommandError {
    CommandError::InvalidTarget { kind, reason }
}

/// Check that `target` fits `kind` on `board`.
///
/// - a tile destroyer needs an occupied, in-range cell
/// - a row or column clear needs an in-range line
/// - a target of the wrong shape is rejected
pub fn resolve_target(kind: PowerupType, target: Option<PowerupTarget>, board: &Board) -> Result<ResolvedTarget, CommandError> {
    let Some(target) = target else {
        return Err(CommandError::TargetRequired(kind));
    };
    let size = board.size();

    match (kind, target) {
        (PowerupType::TileDestroyer, PowerupTarget::Cell { row, col }) => {
            let pos = board
                .position(row, col)
                .ok_or_else(|| invalid(kind, format!("cell ({row}, {col}) is off the board")))?;
            if !board.is_occupied(pos) {
                return Err(invalid(kind, format!("cell {pos} is empty")));
            }
            Ok(ResolvedTarget::Cell(pos))
        }
        (PowerupType::RowClear, PowerupTarget::Row(row)) => {
            if row >= size {
                return Err(invalid(kind, format!("row {row} is off the board")));
            }
            Ok(ResolvedTarget::Row(row))
        }
        (PowerupType::ColumnClear, PowerupTarget::Column(col)) => {
            if col >= size {
                return Err(invalid(kind, format!("column {col} is off the board")));
            }
            Ok(ResolvedTarget::Column(col))
        }
        (_, other) => Err(invalid(kind, format!("{other:?} does not fit"))),
    }
}
