//! Slide-and-merge for one swipe.
//!
//! For each line of the board, in travel order:
//!
//! 1. **Slide**: tiles are packed toward the wall, gaps removed.
//! 2. **Scan**: adjacent pairs are examined from the wall outward. A pair
//!    merges when both tiles are numeric with equal value, or both are
//!    blockers. Each tile takes part in at most one merge per move, so
//!    `[2, 2, 4]` becomes `[4, 4]`, never `[8]`.
//!
//! A numeric merge keeps the leading tile's id, doubles its value and adds
//! the new value to the score delta. A blocker pair disappears and scores
//! nothing.
//!
//! ```
//! use tile_forge::core::{Board, Direction};
//! use tile_forge::rules::move_board;
//!
//! let board = Board::from_layout("2 2 . .\n. . . .\n. . . .\n. . . .").unwrap();
//! let result = move_board(&board, Direction::Left);
//!
//! assert!(result.moved);
//! assert_eq!(result.score_delta, 4);
//! assert_eq!(result.board.to_string().lines().next(), Some("4 . . ."));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Board, Direction, Position, Tile, TileId, TileKind, MAX_GRID_SIZE};

/// What a merge produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergeKind {
    /// Two equal numeric tiles became one tile of `value`.
    Numeric { value: u32 },
    /// Two blockers met and both vanished.
    Blockers,
}

/// A single merge within a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeEvent {
    /// Cell where the merge landed. For a blocker pair this cell is left
    /// empty by the merge itself.
    pub position: Position,
    /// Leading tile. Survives a numeric merge.
    pub survivor: TileId,
    /// Trailing tile, always removed.
    pub absorbed: TileId,
    pub kind: MergeKind,
}

impl MergeEvent {
    /// Produced value for a numeric merge.
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        match self.kind {
            MergeKind::Numeric { value } => Some(value),
            MergeKind::Blockers => None,
        }
    }
}

/// Outcome of sliding the whole board in one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    /// Sum of values produced by numeric merges.
    pub score_delta: u64,
    /// False iff no tile changed cell and nothing merged. The board is then
    /// identical to the input.
    pub moved: bool,
    pub merges: Vec<MergeEvent>,
}

type LineTiles = SmallVec<[Tile; MAX_GRID_SIZE]>;

/// Merge recorded against a slot index within its line.
#[derive(Clone, Copy, Debug)]
struct LineMerge {
    slot: usize,
    survivor: TileId,
    absorbed: TileId,
    kind: MergeKind,
}

/// Collapsed line: surviving tiles in slot order plus the merges.
#[derive(Debug, Default)]
struct LineOutcome {
    tiles: LineTiles,
    merges: SmallVec<[LineMerge; MAX_GRID_SIZE / 2]>,
    score: u64,
}

/// Collapse a gap-free run of tiles given in travel order.
fn collapse_line(tiles: &[Tile]) -> LineOutcome {
    let mut outcome = LineOutcome::default();
    let mut i = 0;

    while i < tiles.len() {
        let lead = tiles[i];
        match tiles.get(i + 1) {
            Some(next) if lead.kind.merges_with(next.kind) => {
                let slot = outcome.tiles.len();
                let kind = match lead.kind {
                    TileKind::Number(value) => {
                        let doubled = value * 2;
                        outcome.tiles.push(lead.with_value(doubled));
                        outcome.score += u64::from(doubled);
                        MergeKind::Numeric { value: doubled }
                    }
                    TileKind::Blocker => MergeKind::Blockers,
                };
                outcome.merges.push(LineMerge {
                    slot,
                    survivor: lead.id,
                    absorbed: next.id,
                    kind,
                });
                // Both tiles are consumed; the merged tile cannot merge again.
                i += 2;
            }
            _ => {
                outcome.tiles.push(lead);
                i += 1;
            }
        }
    }

    outcome
}

/// Slide and merge every line of `board` toward `direction`.
#[must_use]
pub fn move_board(board: &Board, direction: Direction) -> MoveResult {
    let size = board.size();
    let mut next = board.cleared();
    let mut merges = Vec::new();
    let mut score_delta = 0;
    let mut moved = false;

    for index in 0..size {
        let cells = direction.line(size, index);
        let tiles: LineTiles = cells.iter().filter_map(|&pos| board.get(pos).copied()).collect();
        if tiles.is_empty() {
            continue;
        }

        let outcome = collapse_line(&tiles);
        for (slot, tile) in outcome.tiles.into_iter().enumerate() {
            let target = cells[slot];
            moved |= tile.position != target;
            next.put(tile.at(target));
        }
        for merge in &outcome.merges {
            moved = true;
            merges.push(MergeEvent {
                position: cells[merge.slot],
                survivor: merge.survivor,
                absorbed: merge.absorbed,
                kind: merge.kind,
            });
        }
        if !outcome.merges.is_empty() {
            trace!(%direction, line = index, merges = outcome.merges.len(), score = outcome.score, "line merged");
        }
        score_delta += outcome.score;
    }

    if !moved {
        return MoveResult {
            board: board.clone(),
            score_delta: 0,
            moved: false,
            merges: Vec::new(),
        };
    }

    MoveResult {
        board: next,
        score_delta,
        moved,
        merges,
    }
}

/// Whether swiping in `direction` would change the board.
#[must_use]
pub fn can_move(board: &Board, direction: Direction) -> bool {
    move_board(board, direction).moved
}
