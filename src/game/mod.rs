//! Game orchestration.
//!
//! - `GameEngine`: runs commands against sessions
//! - `Session`: game state plus undo history
//! - `UndoHistory`: bounded ring buffer of pre-move snapshots
//!
//! The engine holds only configuration, so one engine can serve any number
//! of sessions. Callers adopt the session a command returns, or drop it to
//! cancel.

mod engine;
mod history;
mod session;

pub use engine::{GameEngine, MoveOutcome, MoveReport};
pub use history::{Snapshot, UndoHistory};
pub use session::{GameSummary, Session};
