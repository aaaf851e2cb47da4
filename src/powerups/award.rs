//! Score-milestone awards.
//!
//! The first award comes at `first_award_score`, then one more every
//! `award_interval` points (1000, 3000, 5000, ... with the defaults). An
//! award is a primary type drawn uniformly, without replacement, from the
//! types not yet unlocked, held or used this game.

use tracing::debug;

use super::inventory::add_powerup;
use super::PowerupType;
use crate::core::{CommandError, GameConfig, GameRng, GameState};

/// Awards earned in total at `score`.
///
/// ```
/// use tile_forge::core::GameConfig;
/// use tile_forge::powerups::earned_count;
///
/// let config = GameConfig::default();
/// assert_eq!(earned_count(999, &config), 0);
/// assert_eq!(earned_count(1000, &config), 1);
/// assert_eq!(earned_count(2999, &config), 1);
/// assert_eq!(earned_count(3000, &config), 2);
/// ```
#[must_use]
pub fn earned_count(score: u64, config: &GameConfig) -> u32 {
    if score < config.first_award_score {
        return 0;
    }
    let extra = (score - config.first_award_score) / config.award_interval.max(1);
    u32::try_from(extra).map_or(u32::MAX, |extra| extra.saturating_add(1))
}

/// Types the next award may be drawn from.
#[must_use]
pub fn award_pool(state: &GameState) -> Vec<PowerupType> {
    PowerupType::primary()
        .filter(|kind| {
            !state.unlocked_powerup_types.contains(kind) && !state.holds(*kind) && !state.has_used(*kind)
        })
        .collect()
}

/// Draw the awards owed at the current score.
///
/// Returns at most `earned - total_powerups_unlocked` types, fewer when the
/// pool runs dry. Only consumes randomness when something is owed.
pub fn check_award(state: &GameState, config: &GameConfig, rng: &mut GameRng) -> Vec<PowerupType> {
    let earned = earned_count(state.score, config);
    let owed = earned.saturating_sub(state.total_powerups_unlocked) as usize;
    if owed == 0 {
        return Vec::new();
    }

    let pool = award_pool(state);
    if pool.is_empty() {
        return Vec::new();
    }

    rng.sample_indices(pool.len(), owed)
        .into_iter()
        .map(|index| pool[index])
        .collect()
}

/// Record awards and place them in the inventory.
///
/// Every award counts as unlocked. Awards that do not fit are parked in
/// `pending_awards` and reported back as `InventoryFull`.
pub fn grant_awards(state: &GameState, awards: &[PowerupType], capacity: usize) -> (GameState, Vec<CommandError>) {
    let mut next = state.clone();
    let mut rejected = Vec::new();

    for &kind in awards {
        next.unlocked_powerup_types.insert(kind);
        next.total_powerups_unlocked += 1;

        match add_powerup(&next, kind, capacity) {
            Ok(added) => {
                debug!(powerup = %kind, "powerup awarded");
                next = added;
            }
            Err(err) => {
                if matches!(err, CommandError::InventoryFull(_)) {
                    next.pending_awards.push_back(kind);
                }
                debug!(powerup = %kind, error = %err, "award not added to inventory");
                rejected.push(err);
            }
        }
    }

    (next, rejected)
}
