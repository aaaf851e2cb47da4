//! Error types.
//!
//! Two families:
//!
//! - [`CommandError`]: a player command the engine declined. Recoverable;
//!   the caller still holds its unchanged input session.
//! - [`EngineError`]: programmer error or corrupt data (bad configuration,
//!   malformed board, undecodable snapshot).

use thiserror::Error;

use super::position::Position;
use crate::powerups::PowerupType;

/// A command the engine rejected without changing state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Interactive powerup aimed at an empty or out-of-range target.
    #[error("invalid target for {kind}: {reason}")]
    InvalidTarget { kind: PowerupType, reason: String },

    /// Interactive powerup activated without a target.
    #[error("{0} needs a target")]
    TargetRequired(PowerupType),

    /// Powerup not held, or already used this game.
    #[error("{0} is not available")]
    PowerupUnavailable(PowerupType),

    /// Inventory already holds the maximum number of powerups.
    #[error("inventory is full, cannot add {0}")]
    InventoryFull(PowerupType),

    /// The inventory already holds this type.
    #[error("{0} is already in the inventory")]
    AlreadyHeld(PowerupType),

    /// Undo requested with no snapshot to return to.
    #[error("no move to undo")]
    UndoUnavailable,

    /// Shuffle requested on a board with no tiles.
    #[error("board has no tiles to shuffle")]
    NothingToShuffle,

    /// No pending award of this type to resolve.
    #[error("{0} is not waiting for a decision")]
    NotPending(PowerupType),
}

/// Hard failures: invalid configuration or corrupt data.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed board: {0}")]
    MalformedBoard(String),

    #[error("tile at {cell} records position {recorded}")]
    PositionMismatch { cell: Position, recorded: Position },

    #[error("corrupt game state: {0}")]
    CorruptState(String),

    #[error("snapshot encoding failed: {0}")]
    Codec(#[from] bincode::Error),
}
