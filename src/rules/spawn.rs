//! Tile spawning.
//!
//! After an accepted move one tile appears in a uniformly chosen empty
//! cell. Every spawned tile has the configured spawn value; there is no
//! chance of a larger tile.

use crate::core::{Board, GameRng, Position, TileKind};

/// Place a `value` tile in a random empty cell.
///
/// Returns the board unchanged and `None` when the board is full; the
/// caller evaluates game over separately.
pub fn spawn_tile(board: &Board, rng: &mut GameRng, value: u32) -> (Board, Option<Position>) {
    let empty = board.empty_cells();
    let Some(&pos) = rng.choose(&empty) else {
        return (board.clone(), None);
    };

    let mut next = board.clone();
    next.place(TileKind::Number(value), pos);
    (next, Some(pos))
}

/// Spawn up to `count` tiles, one after another.
pub fn spawn_tiles(board: &Board, rng: &mut GameRng, value: u32, count: usize) -> (Board, Vec<Position>) {
    let mut next = board.clone();
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        let (spawned, pos) = spawn_tile(&next, rng, value);
        next = spawned;
        match pos {
            Some(pos) => placed.push(pos),
            None => break,
        }
    }
    (next, placed)
}
