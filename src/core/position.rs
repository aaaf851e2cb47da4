//! Grid coordinates and move directions.
//!
//! ## Position
//!
//! A `(row, col)` cell address. Rows grow downward, columns grow to the
//! right, both 0-based. A `Position` only knows it is in bounds relative to
//! a board size, so use [`Position::checked`] when the coordinates come
//! from outside the engine (a tap, a persisted snapshot).
//!
//! ## Direction
//!
//! The four swipe directions. Each direction defines, for every line of
//! the grid, the cells in *travel order*: the first cell is the wall the
//! tiles slide toward.
//!
//! ```
//! use tile_forge::core::{Direction, Position};
//!
//! // Sliding left along row 1 of a 4x4 board starts at the left wall.
//! let cells = Direction::Left.line(4, 1);
//! assert_eq!(cells[0], Position::new(1, 0));
//! assert_eq!(cells[3], Position::new(1, 3));
//!
//! // Sliding down along column 2 starts at the bottom wall.
//! let cells = Direction::Down.line(4, 2);
//! assert_eq!(cells[0], Position::new(3, 2));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::MAX_GRID_SIZE;

/// Cells of a single line in travel order.
pub type Line = SmallVec<[Position; MAX_GRID_SIZE]>;

/// A cell address on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a position without bounds checking.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Create a position if it lies on a `size`×`size` board.
    ///
    /// ```
    /// use tile_forge::core::Position;
    ///
    /// assert_eq!(Position::checked(3, 0, 4), Some(Position::new(3, 0)));
    /// assert_eq!(Position::checked(4, 0, 4), None);
    /// ```
    #[must_use]
    pub const fn checked(row: usize, col: usize, size: usize) -> Option<Self> {
        if row < size && col < size {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Row-major index into a `size`-wide grid.
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of [`Position::index`].
    #[must_use]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Right and down neighbours that exist on the board.
    ///
    /// Visiting these for every cell covers each adjacent pair once.
    pub fn forward_neighbours(self, size: usize) -> impl Iterator<Item = Position> {
        let right = Self::checked(self.row, self.col + 1, size);
        let down = Self::checked(self.row + 1, self.col, size);
        right.into_iter().chain(down)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A swipe direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Cells of line `index` in travel order.
    ///
    /// Horizontal directions walk row `index`; vertical ones walk column
    /// `index`.
    #[must_use]
    pub fn line(self, size: usize, index: usize) -> Line {
        (0..size)
            .map(|step| match self {
                Direction::Left => Position::new(index, step),
                Direction::Right => Position::new(index, size - 1 - step),
                Direction::Up => Position::new(step, index),
                Direction::Down => Position::new(size - 1 - step, index),
            })
            .collect()
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}
