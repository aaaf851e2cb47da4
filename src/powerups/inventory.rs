//! Powerup inventory and activation bookkeeping.
//!
//! The inventory holds up to `capacity` unique types. Adding to a full
//! inventory is never silently dropped: the caller gets `InventoryFull`
//! and decides whether to replace a held type or discard the new one.
//!
//! Every type can be activated at most once per game, regardless of how
//! often it passes through the inventory.

use serde::{Deserialize, Serialize};

use super::{ActivePowerup, PowerupType};
use crate::core::{CommandError, GameState};

/// What to do with an award that did not fit in the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AwardResolution {
    /// Drop a held type and take the award in its slot.
    Replace(PowerupType),
    /// Give up the award.
    Discard,
}

/// Add a type to the inventory.
///
/// Fails with `AlreadyHeld` for a duplicate and `InventoryFull` when
/// `capacity` types are held. The input state is never modified.
pub fn add_powerup(state: &GameState, kind: PowerupType, capacity: usize) -> Result<GameState, CommandError> {
    if state.holds(kind) {
        return Err(CommandError::AlreadyHeld(kind));
    }
    if state.available_powerups.len() >= capacity {
        return Err(CommandError::InventoryFull(kind));
    }

    let mut next = state.clone();
    next.available_powerups.push_back(kind);
    Ok(next)
}

/// Settle a pending award.
pub fn resolve_pending(state: &GameState, kind: PowerupType, resolution: AwardResolution) -> Result<GameState, CommandError> {
    let Some(pending_index) = state.pending_awards.index_of(&kind) else {
        return Err(CommandError::NotPending(kind));
    };

    let mut next = state.clone();
    match resolution {
        AwardResolution::Discard => {}
        AwardResolution::Replace(old) => {
            if state.holds(kind) {
                return Err(CommandError::AlreadyHeld(kind));
            }
            let Some(slot) = state.available_powerups.index_of(&old) else {
                return Err(CommandError::PowerupUnavailable(old));
            };
            next.available_powerups.set(slot, kind);
        }
    }
    next.pending_awards.remove(pending_index);
    Ok(next)
}

/// Check that a type can be activated.
pub fn check_activation(state: &GameState, kind: PowerupType) -> Result<(), CommandError> {
    if !state.holds(kind) || state.has_used(kind) {
        return Err(CommandError::PowerupUnavailable(kind));
    }
    Ok(())
}

/// Consume a held type: remove it from the inventory and mark it used.
///
/// Continuous types start their effect here. Instant types are resolved
/// by the caller on the returned state.
pub fn begin_activation(state: &GameState, kind: PowerupType) -> Result<GameState, CommandError> {
    check_activation(state, kind)?;

    let mut next = state.clone();
    next.available_powerups.retain(|held| *held != kind);
    next.used_powerup_types.insert(kind);
    if !kind.is_instant() {
        next.active_powerups.push_back(ActivePowerup::new(kind));
    }
    Ok(next)
}
