//! Tiles and tile identity.
//!
//! Every tile on the board has a unique `TileId`. Identity survives
//! sliding, merging (the leading tile keeps its id), blocker conversion and
//! shuffling, so a presentation layer can animate a tile from one cell to
//! another.
//!
//! ```
//! use tile_forge::core::{Position, Tile, TileId, TileKind};
//!
//! let tile = Tile::number(TileId(7), 8, Position::new(0, 1));
//! assert_eq!(tile.value(), Some(8));
//! assert!(!tile.is_blocker());
//!
//! let blocker = tile.into_blocker();
//! assert_eq!(blocker.id, TileId(7));
//! assert_eq!(blocker.kind, TileKind::Blocker);
//! assert_eq!(blocker.value(), None);
//! ```

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Largest tile value a `u32` can hold. Tiles at this value no longer merge.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Unique identifier for a tile within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// What a tile carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// A numeric tile. The value is always a positive power of two.
    Number(u32),
    /// A blocker. Merges only with another blocker; both vanish.
    Blocker,
}

impl TileKind {
    /// Whether two tiles of these kinds merge when they meet.
    #[must_use]
    pub fn merges_with(self, other: TileKind) -> bool {
        match (self, other) {
            (TileKind::Number(a), TileKind::Number(b)) => a == b && a < MAX_TILE_VALUE,
            (TileKind::Blocker, TileKind::Blocker) => true,
            _ => false,
        }
    }
}

/// A tile on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    /// Always equal to the cell holding the tile.
    pub position: Position,
}

impl Tile {
    /// Create a numeric tile.
    #[must_use]
    pub const fn number(id: TileId, value: u32, position: Position) -> Self {
        Self {
            id,
            kind: TileKind::Number(value),
            position,
        }
    }

    /// Create a blocker tile.
    #[must_use]
    pub const fn blocker(id: TileId, position: Position) -> Self {
        Self {
            id,
            kind: TileKind::Blocker,
            position,
        }
    }

    /// Numeric value, or `None` for a blocker.
    #[must_use]
    pub const fn value(&self) -> Option<u32> {
        match self.kind {
            TileKind::Number(value) => Some(value),
            TileKind::Blocker => None,
        }
    }

    #[must_use]
    pub const fn is_blocker(&self) -> bool {
        matches!(self.kind, TileKind::Blocker)
    }

    /// Same tile, relocated.
    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Same tile with its value doubled, or `None` for a blocker or a tile
    /// already at `MAX_TILE_VALUE`.
    #[must_use]
    pub fn doubled(self) -> Option<Self> {
        match self.kind {
            TileKind::Number(value) if value < MAX_TILE_VALUE => Some(self.with_value(value * 2)),
            _ => None,
        }
    }

    /// Same tile with a different value.
    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.kind = TileKind::Number(value);
        self
    }

    /// Same tile identity, turned into a blocker.
    #[must_use]
    pub fn into_blocker(mut self) -> Self {
        self.kind = TileKind::Blocker;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_merge_rule() {
        assert!(TileKind::Number(4).merges_with(TileKind::Number(4)));
        assert!(!TileKind::Number(4).merges_with(TileKind::Number(8)));
    }

    #[test]
    fn test_blocker_merge_rule() {
        assert!(TileKind::Blocker.merges_with(TileKind::Blocker));
        assert!(!TileKind::Blocker.merges_with(TileKind::Number(2)));
        assert!(!TileKind::Number(2).merges_with(TileKind::Blocker));
    }

    #[test]
    fn test_capped_tiles_do_not_merge() {
        assert!(TileKind::Number(MAX_TILE_VALUE / 2).merges_with(TileKind::Number(MAX_TILE_VALUE / 2)));
        assert!(!TileKind::Number(MAX_TILE_VALUE).merges_with(TileKind::Number(MAX_TILE_VALUE)));
    }

    #[test]
    fn test_doubled() {
        let tile = Tile::number(TileId(1), 8, Position::new(0, 0));
        assert_eq!(tile.doubled().and_then(|t| t.value()), Some(16));
        assert_eq!(Tile::number(TileId(1), MAX_TILE_VALUE, Position::new(0, 0)).doubled(), None);
        assert_eq!(Tile::blocker(TileId(2), Position::new(0, 0)).doubled(), None);
    }

    #[test]
    fn test_relocate_keeps_identity() {
        let tile = Tile::number(TileId(3), 16, Position::new(0, 0));
        let moved = tile.at(Position::new(2, 1));
        assert_eq!(moved.id, tile.id);
        assert_eq!(moved.value(), Some(16));
        assert_eq!(moved.position, Position::new(2, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TileId(42)), "Tile(42)");
    }

    #[test]
    fn test_serialization() {
        let tile = Tile::blocker(TileId(9), Position::new(1, 1));
        let json = serde_json::to_string(&tile).unwrap();
        let deserialized: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(tile, deserialized);
    }
}
