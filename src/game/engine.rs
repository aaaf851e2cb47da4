//! The game engine: sequences the rules and powerups for each command.
//!
//! ## Commands
//!
//! | Command | Result |
//! |---------|--------|
//! | `new_game`, `restart` | fresh `Session` |
//! | `apply_move` | `MoveOutcome` (always succeeds; a blocked swipe is a no-op) |
//! | `activate_powerup` and friends | `Result<Session, CommandError>` |
//! | `add_powerup`, `resolve_pending_award` | `Result<Session, CommandError>` |
//! | `expire` | `Session` forced into game over |
//!
//! Every command takes the current session by reference. A rejected command
//! logs a warning and returns `Err`; the caller keeps its session as is.
//!
//! ## Move Sequence
//!
//! 1. Slide and merge. If nothing moved, only the terminal flags are
//!    recomputed.
//! 2. Convert big merges to blockers unless a shield is active.
//! 3. Add the merge score.
//! 4. Count down continuous effects.
//! 5. Spawn a tile unless a freeze is active.
//! 6. Draw milestone awards and add them to the inventory.
//! 7. Recompute game over and win.
//! 8. Remember the pre-move board and score for undo.

use tracing::{debug, instrument, warn};

use super::history::Snapshot;
use super::session::Session;
use crate::core::{
    Board, CommandError, Direction, EngineError, GameConfig, GameMode, GameRng, GameRngState, GameState, Position,
};
use crate::powerups::{
    self, begin_activation, check_activation, check_award, grant_awards, is_active, process_effects, resolve_target,
    AwardResolution, PowerupResolver, PowerupTarget, PowerupType,
};
use crate::rules::{
    apply_conversion, is_closed, move_board, refresh_flags, spawn_tile, spawn_tiles, BlockerPolicy, MergeEvent,
};

/// What happened during one swipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub direction: Direction,
    /// False when the swipe changed nothing.
    pub moved: bool,
    pub score_delta: u64,
    pub merges: Vec<MergeEvent>,
    /// Cells whose merged tile became a blocker.
    pub converted: Vec<Position>,
    pub spawned: Option<Position>,
    /// Types awarded by this move, including those that did not fit.
    pub awarded: Vec<PowerupType>,
    /// Awards that could not be added to the inventory. An
    /// `InventoryFull` entry waits in `pending_awards` for a decision.
    pub rejected_awards: Vec<CommandError>,
    /// Continuous effects that ran out with this move.
    pub expired_effects: Vec<PowerupType>,
}

impl MoveReport {
    fn unmoved(direction: Direction) -> Self {
        Self {
            direction,
            moved: false,
            score_delta: 0,
            merges: Vec::new(),
            converted: Vec::new(),
            spawned: None,
            awarded: Vec::new(),
            rejected_awards: Vec::new(),
            expired_effects: Vec::new(),
        }
    }
}

/// Session after a swipe, plus what happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub session: Session,
    pub report: MoveReport,
}

/// Log a rejected command and hand the error back.
fn reject(command: &'static str) -> impl Fn(CommandError) -> CommandError {
    move |err| {
        warn!(command, error = %err, "command rejected");
        err
    }
}

/// Stateless game engine configured once per host.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
}

impl GameEngine {
    /// Create an engine after checking the configuration.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // === Lifecycle ===

    /// Placeholder session before the first game.
    #[must_use]
    pub fn idle(&self) -> Session {
        let state = GameState::idle(self.config.grid_size, 0, GameRngState::seeded(0));
        Session::new(state, self.config.undo_depth)
    }

    /// Start a classic game.
    #[must_use]
    pub fn new_game(&self, seed: u64) -> Session {
        self.new_game_with_mode(seed, GameMode::Classic, 0)
    }

    /// Start a game in a given mode, carrying over a best score.
    #[must_use]
    #[instrument(level = "debug", skip(self))]
    pub fn new_game_with_mode(&self, seed: u64, mode: GameMode, best_score: u64) -> Session {
        let mut rng = GameRng::new(seed);
        let (board, placed) = spawn_tiles(
            &Board::new(self.config.grid_size),
            &mut rng,
            self.config.spawn_value,
            self.config.initial_tiles,
        );

        let mut state = GameState::new(board, mode, best_score, rng.state());
        refresh_flags(&mut state, self.config.winning_value);
        debug!(?placed, "new game");
        Session::new(state, self.config.undo_depth)
    }

    /// Start a classic game from a host-provided board.
    pub fn session_from_board(&self, board: Board, seed: u64) -> Result<Session, EngineError> {
        board.validate()?;
        if board.size() != self.config.grid_size {
            return Err(EngineError::MalformedBoard(format!(
                "board is {0}x{0}, engine expects {1}x{1}",
                board.size(),
                self.config.grid_size
            )));
        }

        let mut state = GameState::new(board, GameMode::Classic, 0, GameRngState::seeded(seed));
        refresh_flags(&mut state, self.config.winning_value);
        Ok(Session::new(state, self.config.undo_depth))
    }

    /// New game in the same mode, seeded from the finished one, keeping
    /// the best score.
    #[must_use]
    #[instrument(level = "debug", skip_all)]
    pub fn restart(&self, session: &Session) -> Session {
        let state = &session.state;
        let seed = GameRng::from_state(&state.rng).fork().seed();
        let best_score = state.best_score.max(state.score);
        self.new_game_with_mode(seed, state.mode, best_score)
    }

    /// End the game on the host's behalf (time-attack clock ran out).
    #[must_use]
    pub fn expire(&self, session: &Session) -> Session {
        if !session.state.started || session.state.expired {
            return session.clone();
        }

        let mut next = session.clone();
        next.state.expired = true;
        refresh_flags(&mut next.state, self.config.winning_value);
        debug!(score = next.state.score, "game expired");
        next
    }

    // === Moves ===

    /// Swipe the board.
    #[instrument(level = "debug", skip(self, session))]
    pub fn apply_move(&self, session: &Session, direction: Direction) -> MoveOutcome {
        let state = &session.state;
        if !state.started || state.is_game_over {
            debug!(phase = ?state.phase(), "move ignored");
            return MoveOutcome {
                session: session.clone(),
                report: MoveReport::unmoved(direction),
            };
        }

        let result = move_board(&state.board, direction);
        if !result.moved {
            let mut next = session.clone();
            refresh_flags(&mut next.state, self.config.winning_value);
            debug!("board unchanged");
            return MoveOutcome {
                session: next,
                report: MoveReport::unmoved(direction),
            };
        }

        // Continuous effects apply to the move that uses up their last tick.
        let shielded = is_active(state, PowerupType::BlockerShield);
        let frozen = is_active(state, PowerupType::TileFreeze);

        let policy = BlockerPolicy::new(self.config.blocker_threshold, shielded);
        let (board, converted) = apply_conversion(&result.board, &result.merges, policy);

        let mut next = state.clone();
        next.board = board;
        next.add_score(result.score_delta);
        for value in result.merges.iter().filter_map(MergeEvent::value) {
            next.note_tile(value);
        }

        let (mut next, expired_effects) = process_effects(&next);

        let mut rng = GameRng::from_state(&next.rng);
        let spawned = if frozen {
            None
        } else {
            let (board, spawned) = spawn_tile(&next.board, &mut rng, self.config.spawn_value);
            next.board = board;
            spawned
        };
        next.moves_made += 1;

        let awarded = check_award(&next, &self.config, &mut rng);
        next.rng = rng.state();
        let (mut next, rejected_awards) = grant_awards(&next, &awarded, self.config.inventory_capacity);

        refresh_flags(&mut next, self.config.winning_value);
        next.best_score = next.best_score.max(next.score);

        let history = session.history.pushed(Snapshot::of(state));

        debug!(
            score_delta = result.score_delta,
            score = next.score,
            ?spawned,
            converted = converted.len(),
            ?awarded,
            game_over = next.is_game_over,
            "move applied"
        );

        MoveOutcome {
            session: Session { state: next, history },
            report: MoveReport {
                direction,
                moved: true,
                score_delta: result.score_delta,
                merges: result.merges,
                converted,
                spawned,
                awarded,
                rejected_awards,
                expired_effects,
            },
        }
    }

    // === Powerups ===

    /// Activate a held powerup.
    ///
    /// Interactive types need a `target`; other types ignore it. Nothing
    /// is consumed when the command is rejected.
    #[instrument(level = "debug", skip(self, session))]
    pub fn activate_powerup(
        &self,
        session: &Session,
        kind: PowerupType,
        target: Option<PowerupTarget>,
    ) -> Result<Session, CommandError> {
        self.activate(session, kind, target).map_err(reject("activate_powerup"))
    }

    /// Activate a powerup that takes no target.
    pub fn apply_instant_powerup(&self, session: &Session, kind: PowerupType) -> Result<Session, CommandError> {
        if kind.is_interactive() {
            return Err(reject("apply_instant_powerup")(CommandError::TargetRequired(kind)));
        }
        self.activate_powerup(session, kind, None)
    }

    /// Activate a powerup aimed at a cell, row or column.
    pub fn apply_interactive_powerup(
        &self,
        session: &Session,
        kind: PowerupType,
        target: PowerupTarget,
    ) -> Result<Session, CommandError> {
        if !kind.is_interactive() {
            return Err(reject("apply_interactive_powerup")(CommandError::InvalidTarget {
                kind,
                reason: "takes no target".to_string(),
            }));
        }
        self.activate_powerup(session, kind, Some(target))
    }

    fn activate(
        &self,
        session: &Session,
        kind: PowerupType,
        target: Option<PowerupTarget>,
    ) -> Result<Session, CommandError> {
        let state = &session.state;
        // A locked board may still be rescued by a powerup.
        if !state.started || is_closed(state) {
            return Err(CommandError::PowerupUnavailable(kind));
        }
        check_activation(state, kind)?;

        let mut history = session.history.clone();
        let resolved = match kind {
            PowerupType::TileDestroyer | PowerupType::RowClear | PowerupType::ColumnClear => {
                let target = resolve_target(kind, target, &state.board)?;
                PowerupResolver::resolve_targeted(state, kind, target)?
            }
            PowerupType::ValueUpgrade => PowerupResolver::value_upgrade(state)?,
            PowerupType::UndoMove => {
                let undone = PowerupResolver::undo_move(state, history.latest())?;
                history = history.popped();
                undone
            }
            PowerupType::ShuffleBoard => PowerupResolver::shuffle_board(state)?,
            PowerupType::TileFreeze | PowerupType::BlockerShield => state.clone(),
        };

        let mut next = begin_activation(&resolved, kind)?;
        if next.board.is_blank() {
            self.reseed(&mut next);
        }
        refresh_flags(&mut next, self.config.winning_value);
        next.best_score = next.best_score.max(next.score);

        debug!(powerup = %kind, score = next.score, "powerup activated");
        Ok(Session { state: next, history })
    }

    /// Refill a board that a powerup emptied, so the game can go on.
    fn reseed(&self, state: &mut GameState) {
        let mut rng = GameRng::from_state(&state.rng);
        let (board, placed) = spawn_tiles(&state.board, &mut rng, self.config.spawn_value, self.config.initial_tiles);
        state.board = board;
        state.rng = rng.state();
        debug!(?placed, "board emptied, reseeded");
    }

    /// Add a powerup to the inventory directly.
    pub fn add_powerup(&self, session: &Session, kind: PowerupType) -> Result<Session, CommandError> {
        let state = powerups::add_powerup(&session.state, kind, self.config.inventory_capacity)
            .map_err(reject("add_powerup"))?;
        Ok(Session {
            state,
            history: session.history.clone(),
        })
    }

    /// Replace a held type with a pending award, or discard the award.
    pub fn resolve_pending_award(
        &self,
        session: &Session,
        kind: PowerupType,
        resolution: AwardResolution,
    ) -> Result<Session, CommandError> {
        let state = powerups::resolve_pending(&session.state, kind, resolution).map_err(reject("resolve_pending_award"))?;
        debug!(powerup = %kind, ?resolution, "pending award resolved");
        Ok(Session {
            state,
            history: session.history.clone(),
        })
    }

    // === Persistence ===

    /// Serialize a session for the host's store.
    pub fn encode(&self, session: &Session) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(session)?)
    }

    /// Decode and validate a stored session.
    pub fn try_restore(&self, bytes: &[u8]) -> Result<Session, EngineError> {
        let session: Session = bincode::deserialize(bytes)?;
        self.validate_state(&session)?;
        Ok(session)
    }

    /// Decode a stored session, falling back to a fresh game when the data
    /// is unusable.
    #[must_use]
    pub fn restore(&self, bytes: &[u8], seed: u64) -> Session {
        match self.try_restore(bytes) {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "discarding stored session");
                self.new_game(seed)
            }
        }
    }

    /// Check the invariants of a session that came from outside the engine.
    pub fn validate_state(&self, session: &Session) -> Result<(), EngineError> {
        let state = &session.state;
        let corrupt = |msg: String| Err(EngineError::CorruptState(msg));

        state.board.validate()?;
        if state.board.size() != self.config.grid_size {
            return corrupt(format!(
                "board size {} does not match grid size {}",
                state.board.size(),
                self.config.grid_size
            ));
        }
        if state.best_score < state.score {
            return corrupt(format!("best score {} below score {}", state.best_score, state.score));
        }

        let held = &state.available_powerups;
        if held.len() > self.config.inventory_capacity {
            return corrupt(format!("{} powerups held", held.len()));
        }
        for (index, kind) in held.iter().enumerate() {
            if held.iter().skip(index + 1).any(|other| other == kind) {
                return corrupt(format!("{kind} held twice"));
            }
            if state.has_used(*kind) {
                return corrupt(format!("{kind} held after use"));
            }
        }

        for (index, active) in state.active_powerups.iter().enumerate() {
            let kind = active.kind;
            if kind.is_instant() || !state.has_used(kind) {
                return corrupt(format!("{kind} active without activation"));
            }
            if active.moves_remaining == 0 || active.moves_remaining > kind.default_duration() {
                return corrupt(format!("{kind} has {} moves remaining", active.moves_remaining));
            }
            if state.active_powerups.iter().skip(index + 1).any(|other| other.kind == kind) {
                return corrupt(format!("{kind} active twice"));
            }
        }

        if session.history.len() > session.history.capacity() {
            return corrupt("undo history over capacity".to_string());
        }
        if let Some(snapshot) = session.history.latest() {
            snapshot.board.validate()?;
            if snapshot.board.size() != state.board.size() {
                return corrupt("undo snapshot size differs from board".to_string());
            }
        }

        Ok(())
    }
}
