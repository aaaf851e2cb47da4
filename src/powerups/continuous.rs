//! Continuous powerup bookkeeping.
//!
//! An effect started with duration `d` covers the next `d` accepted moves.
//! The orchestrator samples [`is_active`] before calling
//! [`process_effects`], so the last covered move still sees the effect.

use super::PowerupType;
use crate::core::GameState;

/// Whether a continuous effect is in progress.
#[must_use]
pub fn is_active(state: &GameState, kind: PowerupType) -> bool {
    state
        .active_powerups
        .iter()
        .any(|active| active.kind == kind && active.moves_remaining > 0)
}

/// Count down every active effect by one move.
///
/// Returns the new state and the types whose effect ended.
pub fn process_effects(state: &GameState) -> (GameState, Vec<PowerupType>) {
    if state.active_powerups.is_empty() {
        return (state.clone(), Vec::new());
    }

    let mut next = state.clone();
    let mut expired = Vec::new();
    next.active_powerups = state
        .active_powerups
        .iter()
        .filter_map(|active| {
            let mut ticked = *active;
            ticked.moves_remaining = ticked.moves_remaining.saturating_sub(1);
            if ticked.moves_remaining == 0 {
                expired.push(ticked.kind);
                None
            } else {
                Some(ticked)
            }
        })
        .collect();

    (next, expired)
}
