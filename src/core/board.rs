//! The N×N tile grid.
//!
//! `Board` stores cells row-major in an `im::Vector`, so cloning a board
//! (for an undo snapshot or a copy-on-write transition) is O(1) and only
//! touched chunks are copied on write.
//!
//! The board also owns tile id allocation: ids are never reused within a
//! game, including across merges, blocker removals and undo.
//!
//! ## Layout text
//!
//! Boards can be built from and rendered to a compact text layout, one row
//! per line, cells separated by whitespace: a number for a numeric tile,
//! `B` for a blocker, `.` for an empty cell.
//!
//! ```
//! use tile_forge::core::{Board, Position};
//!
//! let board = Board::from_layout(
//!     "2 2 . .
//!      . B . .
//!      . . 8 .
//!      . . . .",
//! )
//! .unwrap();
//!
//! assert_eq!(board.size(), 4);
//! assert_eq!(board.tile_count(), 4);
//! assert!(board.get(Position::new(1, 1)).unwrap().is_blocker());
//! assert_eq!(board.highest_value(), 8);
//! ```

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use super::error::EngineError;
use super::position::Position;
use super::tile::{Tile, TileId, TileKind};

/// Square grid of optional tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vector<Option<Tile>>,
    next_tile_id: u32,
}

impl Board {
    /// Create an empty `size`×`size` board.
    ///
    /// Panics if `size` is outside the supported range; configurations are
    /// validated before boards are built from them.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(
            (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size),
            "Board size must be {MIN_GRID_SIZE}-{MAX_GRID_SIZE}"
        );

        Self {
            size,
            cells: std::iter::repeat(None).take(size * size).collect(),
            next_tile_id: 0,
        }
    }

    /// Parse a board from layout text. Tile ids are assigned row-major.
    pub fn from_layout(layout: &str) -> Result<Self, EngineError> {
        let rows: Vec<Vec<&str>> = layout
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>())
            .filter(|tokens| !tokens.is_empty())
            .collect();

        let size = rows.len();
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(EngineError::MalformedBoard(format!("{size} rows")));
        }

        let mut board = Self::new(size);
        for (row, tokens) in rows.iter().enumerate() {
            if tokens.len() != size {
                return Err(EngineError::MalformedBoard(format!(
                    "row {row} has {} cells, expected {size}",
                    tokens.len()
                )));
            }
            for (col, token) in tokens.iter().enumerate() {
                let kind = match *token {
                    "." => continue,
                    "B" | "b" => TileKind::Blocker,
                    number => {
                        let value: u32 = number
                            .parse()
                            .map_err(|_| EngineError::MalformedBoard(format!("bad cell `{number}`")))?;
                        if value < 2 || !value.is_power_of_two() {
                            return Err(EngineError::MalformedBoard(format!(
                                "{value} is not a power of two >= 2"
                            )));
                        }
                        TileKind::Number(value)
                    }
                };
                board.place(kind, Position::new(row, col));
            }
        }

        Ok(board)
    }

    /// Edge length N.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// A board of the same size and id counter with no tiles.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            size: self.size,
            cells: std::iter::repeat(None).take(self.size * self.size).collect(),
            next_tile_id: self.next_tile_id,
        }
    }

    /// Bounds-checked position on this board.
    #[must_use]
    pub fn position(&self, row: usize, col: usize) -> Option<Position> {
        Position::checked(row, col, self.size)
    }

    /// Tile at a cell. Out-of-range positions are simply empty.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        self.cells.get(pos.index(self.size)).and_then(Option::as_ref)
    }

    /// Whether a cell holds a tile.
    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Create a new tile at an empty cell and return its id.
    ///
    /// Panics if the cell is occupied or out of range.
    pub fn place(&mut self, kind: TileKind, pos: Position) -> TileId {
        assert!(!self.is_occupied(pos), "Cell {pos} already holds a tile");

        let id = self.alloc_id();
        self.put(Tile { id, kind, position: pos });
        id
    }

    /// Store an existing tile at its recorded position, replacing the cell.
    pub fn put(&mut self, tile: Tile) {
        assert!(
            tile.position.row < self.size && tile.position.col < self.size,
            "Tile position {} is off the board",
            tile.position
        );
        let index = tile.position.index(self.size);
        self.cells.set(index, Some(tile));
    }

    /// Remove and return the tile at a cell.
    pub fn remove(&mut self, pos: Position) -> Option<Tile> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        self.cells.set(pos.index(self.size), None)
    }

    /// Allocate a fresh tile id.
    pub fn alloc_id(&mut self) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        id
    }

    /// Id the next allocated tile will get.
    #[must_use]
    pub fn next_tile_id(&self) -> u32 {
        self.next_tile_id
    }

    /// Never hand out an id below `next`.
    pub fn reserve_ids(&mut self, next: u32) {
        self.next_tile_id = self.next_tile_id.max(next);
    }

    /// Iterate over tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().filter_map(Option::as_ref)
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| Position::from_index(index, self.size))
            .collect()
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    /// True if every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// True if no cell holds a tile.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Highest numeric value on the board (0 if none).
    #[must_use]
    pub fn highest_value(&self) -> u32 {
        self.tiles().filter_map(Tile::value).max().unwrap_or(0)
    }

    /// Sum of numeric tile values.
    #[must_use]
    pub fn value_sum(&self) -> u64 {
        self.tiles().filter_map(Tile::value).map(u64::from).sum()
    }

    /// Number of blocker tiles.
    #[must_use]
    pub fn blocker_count(&self) -> usize {
        self.tiles().filter(|tile| tile.is_blocker()).count()
    }

    /// Row-major grid of cell kinds, for rendering or comparison.
    #[must_use]
    pub fn kinds(&self) -> Vec<Vec<Option<TileKind>>> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.get(Position::new(row, col)).map(|tile| tile.kind))
                    .collect()
            })
            .collect()
    }

    /// Check the structural invariants of a board that came from outside
    /// the engine (a persisted snapshot).
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.size) {
            return Err(EngineError::MalformedBoard(format!("size {}", self.size)));
        }
        if self.cells.len() != self.size * self.size {
            return Err(EngineError::MalformedBoard(format!(
                "{} cells for a {}x{} board",
                self.cells.len(),
                self.size,
                self.size
            )));
        }

        let mut seen = FxHashSet::default();
        for (index, cell) in self.cells.iter().enumerate() {
            let Some(tile) = cell else { continue };
            let cell_pos = Position::from_index(index, self.size);
            if tile.position != cell_pos {
                return Err(EngineError::PositionMismatch {
                    cell: cell_pos,
                    recorded: tile.position,
                });
            }
            if let TileKind::Number(value) = tile.kind {
                if value < 2 || !value.is_power_of_two() {
                    return Err(EngineError::MalformedBoard(format!(
                        "tile {} holds {value}",
                        tile.id
                    )));
                }
            }
            if tile.id.0 >= self.next_tile_id {
                return Err(EngineError::MalformedBoard(format!(
                    "tile {} is beyond the id counter {}",
                    tile.id, self.next_tile_id
                )));
            }
            if !seen.insert(tile.id) {
                return Err(EngineError::MalformedBoard(format!("duplicate {}", tile.id)));
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            let cells: Vec<String> = (0..self.size)
                .map(|col| match self.get(Position::new(row, col)).map(|tile| tile.kind) {
                    None => ".".to_string(),
                    Some(TileKind::Blocker) => "B".to_string(),
                    Some(TileKind::Number(value)) => value.to_string(),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
