//! Core engine types: positions, tiles, board, state, RNG, configuration.
//!
//! This module contains the data model every other module builds on.
//! Nothing here knows how moves or powerups work.

pub mod position;
pub mod tile;
pub mod board;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use position::{Direction, Line, Position};
pub use tile::{Tile, TileId, TileKind, MAX_TILE_VALUE};
pub use board::Board;
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, GameMode, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use error::{CommandError, EngineError};
pub use state::GameState;
