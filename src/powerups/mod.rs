//! Powerup system.
//!
//! Powerups are awarded by score milestones and used at most once per game:
//! - `PowerupType`: the closed set of powerups
//! - `award`: milestone schedule and random draws
//! - `inventory`: bounded inventory, pending awards, activation bookkeeping
//! - `PowerupTarget`: cell, row or column for interactive powerups
//! - `PowerupResolver`: executes instant powerups on game state
//! - `continuous`: per-move countdown of freeze and shield
//!
//! Every function here takes a state by reference and returns a new one.
//! The orchestrator in `game` decides when each piece runs.

mod kind;
mod award;
mod inventory;
mod targeting;
mod resolver;
mod continuous;

pub use kind::{ActivePowerup, PowerupType};
pub use award::{award_pool, check_award, earned_count, grant_awards};
pub use inventory::{add_powerup, begin_activation, check_activation, resolve_pending, AwardResolution};
pub use targeting::{resolve_target, PowerupTarget, ResolvedTarget};
pub use resolver::{tile_points, PowerupResolver, CLEAR_RATE, DESTROY_RATE, UPGRADE_RATE};
pub use continuous::{is_active, process_effects};
