//! Blocker conversion.
//!
//! A numeric merge that produces a value at or above the configured
//! threshold turns the merged tile into a blocker, keeping its identity.
//! The merge engine only reports merges; the orchestrator decides whether
//! conversion applies for the move, because an active blocker shield
//! suppresses it.

use smallvec::SmallVec;

use super::merge::MergeEvent;
use crate::core::{Board, Position};

/// Conversion settings for one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockerPolicy {
    /// Minimum merged value that converts. `None` disables conversion.
    pub threshold: Option<u32>,
    /// A shield is active for this move.
    pub shielded: bool,
}

impl BlockerPolicy {
    #[must_use]
    pub const fn new(threshold: Option<u32>, shielded: bool) -> Self {
        Self { threshold, shielded }
    }
}

/// Cells whose merge reached `threshold`.
#[must_use]
pub fn conversion_sites(merges: &[MergeEvent], threshold: u32) -> SmallVec<[Position; 4]> {
    merges
        .iter()
        .filter(|merge| merge.value().is_some_and(|value| value >= threshold))
        .map(|merge| merge.position)
        .collect()
}

/// Replace qualifying merged tiles with blockers.
///
/// Returns the new board and the converted cells. A shielded move or a
/// disabled threshold converts nothing.
#[must_use]
pub fn apply_conversion(board: &Board, merges: &[MergeEvent], policy: BlockerPolicy) -> (Board, Vec<Position>) {
    let Some(threshold) = policy.threshold else {
        return (board.clone(), Vec::new());
    };
    if policy.shielded {
        return (board.clone(), Vec::new());
    }

    let sites = conversion_sites(merges, threshold);
    if sites.is_empty() {
        return (board.clone(), Vec::new());
    }

    let mut next = board.clone();
    let mut converted = Vec::with_capacity(sites.len());
    for pos in sites {
        if let Some(tile) = next.get(pos).copied() {
            next.put(tile.into_blocker());
            converted.push(pos);
        }
    }

    (next, converted)
}
