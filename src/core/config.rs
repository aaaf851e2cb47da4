//! Game configuration types.
//!
//! Hosts configure the engine once at startup by providing a `GameConfig`:
//! - Board size (a single N for the whole game)
//! - Winning tile, spawn value, number of starting tiles
//! - Blocker conversion threshold
//! - Powerup inventory capacity and award schedule
//! - Undo depth
//!
//! `GameMode` is chosen per game and travels inside the game state.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Largest supported board edge.
pub const MAX_GRID_SIZE: usize = 8;

/// Smallest supported board edge.
pub const MIN_GRID_SIZE: usize = 2;

/// Per-game mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Play until the board locks up.
    #[default]
    Classic,
    /// The game also ends after `move_limit` accepted moves.
    ///
    /// Wall-clock countdowns belong to the host, which ends the game
    /// through `GameEngine::expire`.
    TimeAttack { move_limit: u32 },
}

impl GameMode {
    /// Move budget, if this mode has one.
    #[must_use]
    pub const fn move_limit(self) -> Option<u32> {
        match self {
            GameMode::Classic => None,
            GameMode::TimeAttack { move_limit } => Some(move_limit),
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Classic => f.write_str("classic"),
            GameMode::TimeAttack { move_limit } => write!(f, "time attack ({move_limit} moves)"),
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board edge length N (board is N×N).
    pub grid_size: usize,

    /// A tile of at least this value wins the game.
    pub winning_value: u32,

    /// Value of every spawned tile.
    pub spawn_value: u32,

    /// Tiles placed on a fresh board.
    pub initial_tiles: usize,

    /// Merges producing at least this value turn into blockers.
    /// `None` disables conversion.
    pub blocker_threshold: Option<u32>,

    /// Maximum number of distinct powerups held at once.
    pub inventory_capacity: usize,

    /// Score of the first powerup award.
    pub first_award_score: u64,

    /// Score distance between subsequent awards.
    pub award_interval: u64,

    /// Number of moves that can be undone (ring buffer size).
    pub undo_depth: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 4,
            winning_value: 2048,
            spawn_value: 2,
            initial_tiles: 2,
            blocker_threshold: Some(256),
            inventory_capacity: 3,
            first_award_score: 1000,
            award_interval: 2000,
            undo_depth: 1,
        }
    }
}

impl GameConfig {
    /// Set the board edge length.
    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    /// Set the winning tile value.
    #[must_use]
    pub fn with_winning_value(mut self, value: u32) -> Self {
        self.winning_value = value;
        self
    }

    /// Set the blocker threshold (`None` disables blockers).
    #[must_use]
    pub fn with_blocker_threshold(mut self, threshold: Option<u32>) -> Self {
        self.blocker_threshold = threshold;
        self
    }

    /// Set the number of starting tiles.
    #[must_use]
    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        self.initial_tiles = count;
        self
    }

    /// Set the inventory capacity.
    #[must_use]
    pub fn with_inventory_capacity(mut self, capacity: usize) -> Self {
        self.inventory_capacity = capacity;
        self
    }

    /// Set the award schedule.
    #[must_use]
    pub fn with_award_schedule(mut self, first: u64, interval: u64) -> Self {
        self.first_award_score = first;
        self.award_interval = interval;
        self
    }

    /// Set the undo depth.
    #[must_use]
    pub fn with_undo_depth(mut self, depth: usize) -> Self {
        self.undo_depth = depth;
        self
    }

    /// Number of cells on the board.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(EngineError::InvalidConfig(format!(
                "grid size {} outside {MIN_GRID_SIZE}..={MAX_GRID_SIZE}",
                self.grid_size
            )));
        }
        if !self.spawn_value.is_power_of_two() || self.spawn_value < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "spawn value {} is not a power of two >= 2",
                self.spawn_value
            )));
        }
        if !self.winning_value.is_power_of_two() || self.winning_value <= self.spawn_value {
            return Err(EngineError::InvalidConfig(format!(
                "winning value {} must be a power of two above the spawn value",
                self.winning_value
            )));
        }
        if let Some(threshold) = self.blocker_threshold {
            if !threshold.is_power_of_two() || threshold <= self.spawn_value {
                return Err(EngineError::InvalidConfig(format!(
                    "blocker threshold {threshold} must be a power of two above the spawn value"
                )));
            }
        }
        if self.initial_tiles == 0 || self.initial_tiles > self.cell_count() {
            return Err(EngineError::InvalidConfig(format!(
                "initial tile count {} does not fit the board",
                self.initial_tiles
            )));
        }
        if self.inventory_capacity == 0 {
            return Err(EngineError::InvalidConfig("inventory capacity must be at least 1".to_string()));
        }
        if self.award_interval == 0 {
            return Err(EngineError::InvalidConfig("award interval must be positive".to_string()));
        }
        if self.undo_depth == 0 {
            return Err(EngineError::InvalidConfig("undo depth must be at least 1".to_string()));
        }
        Ok(())
    }
}
