//! Powerup resolution - executing instant powerups on game state.
//!
//! The `PowerupResolver` applies one instant effect to a state and returns
//! the resulting state. Each resolver validates first and only then builds
//! the new state, so an `Err` always means nothing happened.
//!
//! Inventory bookkeeping (removing the type, marking it used) is the
//! orchestrator's job; resolvers only touch the board and the score.
//!
//! ## Score Rates
//!
//! | Powerup | Points per affected numeric tile |
//! |---------|----------------------------------|
//! | Tile destroyer | `round(value * 0.1)` |
//! | Row / column clear | `round(value * 0.05)` |
//! | Value upgrade | `round(original * 0.1)` |
//!
//! Blockers never score.

use crate::core::{Board, CommandError, GameRng, GameState, Position, Tile};
use crate::game::Snapshot;

use super::targeting::ResolvedTarget;
use super::PowerupType;

/// Score rate for destroying a single tile.
pub const DESTROY_RATE: f64 = 0.1;

/// Score rate for each tile removed by a row or column clear.
pub const CLEAR_RATE: f64 = 0.05;

/// Score rate for each upgraded tile, applied to its value before doubling.
pub const UPGRADE_RATE: f64 = 0.1;

/// Points for a tile at a rate. Blockers score nothing.
#[must_use]
pub fn tile_points(tile: &Tile, rate: f64) -> u64 {
    match tile.value() {
        Some(value) => (f64::from(value) * rate).round() as u64,
        None => 0,
    }
}

/// Resolves instant powerups on game state.
pub struct PowerupResolver;

impl PowerupResolver {
    /// Resolve a validated target for an interactive powerup.
    pub fn resolve_targeted(state: &GameState, kind: PowerupType, target: ResolvedTarget) -> Result<GameState, CommandError> {
        match (kind, target) {
            (PowerupType::TileDestroyer, ResolvedTarget::Cell(pos)) => Self::tile_destroyer(state, pos),
            (PowerupType::RowClear, ResolvedTarget::Row(row)) => Self::row_clear(state, row),
            (PowerupType::ColumnClear, ResolvedTarget::Column(col)) => Self::column_clear(state, col),
            (kind, target) => Err(CommandError::InvalidTarget {
                kind,
                reason: format!("{target:?} does not fit"),
            }),
        }
    }

    /// Remove the tile at `pos`.
    pub fn tile_destroyer(state: &GameState, pos: Position) -> Result<GameState, CommandError> {
        let Some(tile) = state.board.get(pos).copied() else {
            return Err(CommandError::InvalidTarget {
                kind: PowerupType::TileDestroyer,
                reason: format!("cell {pos} is empty"),
            });
        };

        let mut next = state.clone();
        next.board.remove(pos);
        next.add_score(tile_points(&tile, DESTROY_RATE));
        Ok(next)
    }

    /// Remove every tile in a row.
    pub fn row_clear(state: &GameState, row: usize) -> Result<GameState, CommandError> {
        let size = state.board.size();
        if row >= size {
            return Err(CommandError::InvalidTarget {
                kind: PowerupType::RowClear,
                reason: format!("row {row} is off the board"),
            });
        }
        Ok(Self::clear_cells(state, (0..size).map(|col| Position::new(row, col))))
    }

    /// Remove every tile in a column.
    pub fn column_clear(state: &GameState, col: usize) -> Result<GameState, CommandError> {
        let size = state.board.size();
        if col >= size {
            return Err(CommandError::InvalidTarget {
                kind: PowerupType::ColumnClear,
                reason: format!("column {col} is off the board"),
            });
        }
        Ok(Self::clear_cells(state, (0..size).map(|row| Position::new(row, col))))
    }

    fn clear_cells(state: &GameState, cells: impl Iterator<Item = Position>) -> GameState {
        let mut next = state.clone();
        let mut points = 0;
        for pos in cells {
            if let Some(tile) = next.board.remove(pos) {
                points += tile_points(&tile, CLEAR_RATE);
            }
        }
        next.add_score(points);
        next
    }

    /// Double every numeric tile. Blockers are untouched.
    pub fn value_upgrade(state: &GameState) -> Result<GameState, CommandError> {
        let mut next = state.clone();
        let mut points = 0;

        let upgraded: Vec<Tile> = state
            .board
            .tiles()
            .filter_map(|tile| {
                let upgraded = tile.doubled()?;
                points += tile_points(tile, UPGRADE_RATE);
                Some(upgraded)
            })
            .collect();

        for tile in upgraded {
            if let Some(value) = tile.value() {
                next.note_tile(value);
            }
            next.board.put(tile);
        }
        next.add_score(points);
        Ok(next)
    }

    /// Return to the board and score before the last accepted move.
    ///
    /// Inventory and one-shot history stay as they are now; continuous
    /// effects are cleared. `best_score` is not lowered, and ids handed out
    /// since the snapshot stay retired.
    pub fn undo_move(state: &GameState, snapshot: Option<&Snapshot>) -> Result<GameState, CommandError> {
        let Some(snapshot) = snapshot else {
            return Err(CommandError::UndoUnavailable);
        };

        let mut next = state.clone();
        next.board = snapshot.board.clone();
        next.board.reserve_ids(state.board.next_tile_id());
        next.score = snapshot.score;
        next.active_powerups.clear();
        Ok(next)
    }

    /// Scatter the tiles uniformly over all cells.
    ///
    /// Tile identity and value are preserved; only positions change.
    pub fn shuffle_board(state: &GameState) -> Result<GameState, CommandError> {
        let board = &state.board;
        if board.is_blank() {
            return Err(CommandError::NothingToShuffle);
        }

        let mut rng = GameRng::from_state(&state.rng);
        let size = board.size();
        let mut tiles: Vec<Tile> = board.tiles().copied().collect();
        rng.shuffle(&mut tiles);
        let cells = rng.sample_indices(size * size, tiles.len());

        let mut shuffled: Board = board.cleared();
        for (tile, index) in tiles.into_iter().zip(cells) {
            shuffled.put(tile.at(Position::from_index(index, size)));
        }

        let mut next = state.clone();
        next.board = shuffled;
        next.rng = rng.state();
        Ok(next)
    }
}
