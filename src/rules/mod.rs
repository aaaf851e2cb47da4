//! Board rules: moving, merging, blockers, spawning, terminal detection.
//!
//! Each function takes a board (or state) by reference and returns a new
//! value; the orchestrator in `game` sequences them per command.

pub mod merge;
pub mod blocker;
pub mod spawn;
pub mod status;

pub use merge::{can_move, move_board, MergeEvent, MergeKind, MoveResult};
pub use blocker::{apply_conversion, conversion_sites, BlockerPolicy};
pub use spawn::{spawn_tile, spawn_tiles};
pub use status::{has_winning_tile, is_closed, is_finished, is_locked, refresh_flags, GameOutcome, GamePhase};
