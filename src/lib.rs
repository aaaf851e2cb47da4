//! # tile-forge
//!
//! A deterministic state engine for a 2048-style tile-merging puzzle with
//! blocker tiles and one-shot powerups.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: Every command takes a session by reference and
//!    returns a new one. Rejected commands return an error and change
//!    nothing.
//!
//! 2. **Deterministic**: The RNG position is part of the state, so the
//!    same session and command always produce the same result.
//!
//! 3. **No I/O**: Rendering, input decoding, persistence and clocks belong
//!    to the host.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` for undo
//!   snapshots and copy-on-write state.
//!
//! - **Move-Counted Durations**: Continuous powerups and time-attack limits
//!   count accepted moves, never wall-clock time.
//!
//! ## Modules
//!
//! - `core`: Positions, tiles, board, RNG, configuration, errors, state
//! - `rules`: Sliding and merging, blocker conversion, spawning, game over
//! - `powerups`: Awards, inventory, targeting, resolvers, continuous effects
//! - `game`: `GameEngine` orchestrating sessions and undo history
//!
//! ```
//! use tile_forge::{Direction, GameConfig, GameEngine};
//!
//! let engine = GameEngine::new(GameConfig::default()).unwrap();
//! let session = engine.new_game(42);
//!
//! let outcome = engine.apply_move(&session, Direction::Left);
//! assert!(outcome.session.state.score >= session.state.score);
//! ```

pub mod core;
pub mod rules;
pub mod powerups;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Position, Direction,
    Tile, TileId, TileKind, Board, MAX_TILE_VALUE,
    GameRng, GameRngState,
    GameConfig, GameMode,
    CommandError, EngineError,
    GameState,
};

pub use crate::rules::{MergeEvent, MergeKind, MoveResult, GameOutcome, GamePhase};

pub use crate::powerups::{
    PowerupType, ActivePowerup,
    PowerupTarget, AwardResolution,
};

pub use crate::game::{GameEngine, GameSummary, MoveOutcome, MoveReport, Session, Snapshot, UndoHistory};
