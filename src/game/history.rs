//! Undo history.
//!
//! A bounded ring buffer of pre-move snapshots. With the default depth of
//! one, only the most recent accepted move can be undone. Pushing onto a
//! full history drops the oldest entry.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Board, GameState};

/// Board and score before an accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub score: u64,
}

impl Snapshot {
    /// Capture the undoable part of a state.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        Self {
            board: state.board.clone(),
            score: state.score,
        }
    }
}

/// Bounded history of snapshots, newest last.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoHistory {
    capacity: usize,
    entries: Vector<Snapshot>,
}

impl UndoHistory {
    /// Create an empty history holding at most `capacity` snapshots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vector::new(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// History with `snapshot` appended, evicting the oldest if full.
    #[must_use]
    pub fn pushed(&self, snapshot: Snapshot) -> Self {
        let mut next = self.clone();
        while next.entries.len() >= next.capacity {
            next.entries.pop_front();
        }
        next.entries.push_back(snapshot);
        next
    }

    /// History without its most recent snapshot.
    #[must_use]
    pub fn popped(&self) -> Self {
        let mut next = self.clone();
        next.entries.pop_back();
        next
    }

    /// Empty history with the same capacity.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::new(self.capacity)
    }
}
