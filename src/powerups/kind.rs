//! Powerup definitions.
//!
//! Powerups form a closed set. Each type carries three tags:
//!
//! - **primary**: can be awarded by score milestones
//! - **interactive**: needs a target (cell, row or column) to activate
//! - **default duration**: moves a continuous effect lasts; 0 = instant
//!
//! ## Instant Powerups
//!
//! Resolve once, at activation:
//! - `TileDestroyer`: remove one tile
//! - `RowClear` / `ColumnClear`: remove a whole line
//! - `ValueUpgrade`: double every numeric tile
//! - `UndoMove`: return to the board before the last move
//! - `ShuffleBoard`: scatter tiles across the board
//!
//! ## Continuous Powerups
//!
//! Stay active for a number of accepted moves:
//! - `TileFreeze`: no tile spawns
//! - `BlockerShield`: big merges do not turn into blockers

use serde::{Deserialize, Serialize};

/// A powerup type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerupType {
    TileDestroyer,
    RowClear,
    ColumnClear,
    ValueUpgrade,
    UndoMove,
    ShuffleBoard,
    TileFreeze,
    BlockerShield,
}

impl PowerupType {
    /// Every powerup type, in declaration order.
    pub const ALL: [PowerupType; 8] = [
        PowerupType::TileDestroyer,
        PowerupType::RowClear,
        PowerupType::ColumnClear,
        PowerupType::ValueUpgrade,
        PowerupType::UndoMove,
        PowerupType::ShuffleBoard,
        PowerupType::TileFreeze,
        PowerupType::BlockerShield,
    ];

    /// Can be awarded by score milestones.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        match self {
            PowerupType::TileDestroyer
            | PowerupType::RowClear
            | PowerupType::ColumnClear
            | PowerupType::ValueUpgrade
            | PowerupType::UndoMove
            | PowerupType::ShuffleBoard
            | PowerupType::TileFreeze
            | PowerupType::BlockerShield => true,
        }
    }

    /// Needs a caller-supplied target.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(
            self,
            PowerupType::TileDestroyer | PowerupType::RowClear | PowerupType::ColumnClear
        )
    }

    /// Moves a continuous effect lasts (0 for instant types).
    #[must_use]
    pub const fn default_duration(self) -> u32 {
        match self {
            PowerupType::TileFreeze => 3,
            PowerupType::BlockerShield => 5,
            _ => 0,
        }
    }

    /// Resolves at activation rather than over several moves.
    #[must_use]
    pub const fn is_instant(self) -> bool {
        self.default_duration() == 0
    }

    /// Primary types, in declaration order.
    pub fn primary() -> impl Iterator<Item = PowerupType> {
        Self::ALL.into_iter().filter(|kind| kind.is_primary())
    }
}

impl std::fmt::Display for PowerupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PowerupType::TileDestroyer => "tile destroyer",
            PowerupType::RowClear => "row clear",
            PowerupType::ColumnClear => "column clear",
            PowerupType::ValueUpgrade => "value upgrade",
            PowerupType::UndoMove => "undo move",
            PowerupType::ShuffleBoard => "shuffle board",
            PowerupType::TileFreeze => "tile freeze",
            PowerupType::BlockerShield => "blocker shield",
        };
        f.write_str(name)
    }
}

/// A continuous powerup in effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePowerup {
    pub kind: PowerupType,
    /// Accepted moves still covered.
    pub moves_remaining: u32,
}

impl ActivePowerup {
    /// Start an effect with the type's default duration.
    #[must_use]
    pub const fn new(kind: PowerupType) -> Self {
        Self {
            kind,
            moves_remaining: kind.default_duration(),
        }
    }
}
