//! Game state module - the phase state machine
//!
//! This module ties together the board, the two piece slots, the shape
//! source and the score/level counters. A host calls [`Game::update`] once
//! per frame with the move pressed during that frame and the elapsed time;
//! every state transition happens inside that call.
//!
//! Moves are speculative: a candidate copy of the active piece is built and
//! validated, and the real piece only changes when the candidate fits.

use tracing::{debug, trace};

use crate::board::Board;
use crate::piece::PieceState;
use crate::rng::{ShapeSource, UniformShapes};
use crate::rotation::{RotationState, RotationTable};
use crate::scoring::{calculate_line_score, seconds_per_drop, should_level_up};
use crate::snapshot::{PieceSnapshot, ProgressSnapshot, RestoreError};
use crate::types::*;

/// Construction parameters of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Level preselected on the start screen
    pub start_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            start_level: 0,
        }
    }
}

/// Everything a game session needs besides its own mutable state: the
/// rotation arena and the piece selection
#[derive(Debug, Clone)]
pub struct EngineContext<S = UniformShapes> {
    rotations: RotationTable,
    shapes: S,
}

impl<S: ShapeSource> EngineContext<S> {
    pub fn new(shapes: S) -> Self {
        Self {
            rotations: RotationTable::new(),
            shapes,
        }
    }

    pub fn rotations(&self) -> &RotationTable {
        &self.rotations
    }

    pub fn shapes(&self) -> &S {
        &self.shapes
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<S = UniformShapes> {
    ctx: EngineContext<S>,
    board: Board,
    phase: GamePhase,
    active: Option<PieceState>,
    next: Option<PieceState>,
    points: u64,
    level: u32,
    start_level: u32,
    cleared_line_count: u64,
    /// Host time at which the current play session started
    play_started_at: f64,
    /// Seconds since the current play session started
    time_duration: f64,
    /// Play time at which gravity forces the next soft drop
    next_drop_time: f64,
    /// Play time at which pending lines are removed
    highlight_end_time: f64,
}

impl Game<UniformShapes> {
    /// Create a game whose pieces come from a seeded uniform generator
    pub fn with_seed(config: GameConfig, seed: u32) -> Self {
        Self::new(config, UniformShapes::new(seed))
    }
}

impl<S: ShapeSource> Game<S> {
    /// Create a game sitting on the start screen
    pub fn new(config: GameConfig, shapes: S) -> Self {
        Self {
            ctx: EngineContext::new(shapes),
            board: Board::new(config.width, config.height),
            phase: GamePhase::Start,
            active: None,
            next: None,
            points: 0,
            level: config.start_level,
            start_level: config.start_level,
            cleared_line_count: 0,
            play_started_at: 0.0,
            time_duration: 0.0,
            next_drop_time: 0.0,
            highlight_end_time: 0.0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rotations(&self) -> &RotationTable {
        self.ctx.rotations()
    }

    pub fn context(&self) -> &EngineContext<S> {
        &self.ctx
    }

    /// The piece under player control, once play has started
    pub fn active(&self) -> Option<&PieceState> {
        self.active.as_ref()
    }

    /// The look-ahead piece, once play has started
    pub fn next_piece(&self) -> Option<&PieceState> {
        self.next.as_ref()
    }

    pub fn piece_state(&self, slot: PieceSlot) -> Option<&PieceState> {
        match slot {
            PieceSlot::Active => self.active.as_ref(),
            PieceSlot::Next => self.next.as_ref(),
        }
    }

    /// Rotation matrix of the piece in a slot
    pub fn piece_matrix(&self, slot: PieceSlot) -> Option<&RotationState> {
        self.piece_state(slot)
            .map(|state| state.piece.state(self.ctx.rotations()))
    }

    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn cleared_line_count(&self) -> u64 {
        self.cleared_line_count
    }

    pub fn time_duration(&self) -> f64 {
        self.time_duration
    }

    pub fn next_drop_time(&self) -> f64 {
        self.next_drop_time
    }

    pub fn highlight_end_time(&self) -> f64 {
        self.highlight_end_time
    }

    pub fn is_line_clearing(&self, row: usize) -> bool {
        self.board.is_line_clearing(row)
    }

    /// Check a candidate placement against bounds and occupied cells
    pub fn is_valid_placement(&self, piece: &PieceState) -> bool {
        self.board.is_valid_placement(self.ctx.rotations(), piece)
    }

    /// Lowest row offset the active piece could reach in its current column
    pub fn shadow_row(&self) -> Option<i32> {
        let active = self.active?;
        if !self.is_valid_placement(&active) {
            return Some(active.offset_row);
        }

        let mut candidate = active;
        while self.is_valid_placement(&candidate.shifted(1, 0)) {
            candidate = candidate.shifted(1, 0);
        }
        Some(candidate.offset_row)
    }

    /// Advance the state machine by one frame
    ///
    /// `now` is the host's monotonic time in seconds. Moves that do not
    /// apply to the current phase are ignored.
    pub fn update(&mut self, input: MoveType, now: f64) {
        match self.phase {
            GamePhase::Start => self.update_start(input, now),
            GamePhase::Play => {
                self.advance_clock(now);
                self.update_play(input);
            }
            GamePhase::LineClear => {
                self.advance_clock(now);
                self.update_line_clear();
            }
            GamePhase::GameOver => {
                if input == MoveType::Confirm {
                    self.set_phase(GamePhase::Start);
                }
            }
        }
    }

    fn advance_clock(&mut self, now: f64) {
        self.time_duration = (now - self.play_started_at).max(0.0);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            debug!(
                from = self.phase.as_str(),
                to = phase.as_str(),
                time = self.time_duration,
                "phase change"
            );
            self.phase = phase;
        }
    }

    fn update_start(&mut self, input: MoveType, now: f64) {
        match input {
            MoveType::RotateCw => {
                self.start_level = self.start_level.saturating_add(1);
                self.level = self.start_level;
            }
            MoveType::SoftDrop => {
                self.start_level = self.start_level.saturating_sub(1);
                self.level = self.start_level;
            }
            MoveType::Confirm => self.start_play(now),
            _ => {}
        }
    }

    /// Reset everything except the start level and enter play
    fn start_play(&mut self, now: f64) {
        self.board.clear();
        self.points = 0;
        self.level = self.start_level;
        self.cleared_line_count = 0;
        self.play_started_at = now;
        self.time_duration = 0.0;
        self.next_drop_time = 0.0;
        self.highlight_end_time = 0.0;

        self.active = None;
        self.next = None;
        self.spawn_next();
        self.spawn_next();

        debug!(start_level = self.start_level, "new game");
        self.set_phase(GamePhase::Play);
    }

    fn update_play(&mut self, input: MoveType) {
        if self.is_topped_out() {
            debug!(points = self.points, level = self.level, "top out");
            self.set_phase(GamePhase::GameOver);
            return;
        }

        match input {
            MoveType::Left => {
                self.move_left();
            }
            MoveType::Right => {
                self.move_right();
            }
            MoveType::RotateCw => {
                self.rotate();
            }
            MoveType::SoftDrop => self.drop_and_reschedule(),
            MoveType::HardDrop => {
                self.hard_drop();
                self.next_drop_time = 0.0;
            }
            MoveType::Confirm | MoveType::None => {}
        }

        if self.time_duration >= self.next_drop_time {
            trace!(time = self.time_duration, "gravity");
            self.drop_and_reschedule();
        }

        let lines = self.board.find_lines_to_clear();
        if lines > 0 {
            self.highlight_end_time = self.time_duration + LINE_CLEAR_HIGHLIGHT_SECS;
            debug!(lines, until = self.highlight_end_time, "lines pending");
            self.set_phase(GamePhase::LineClear);
        }
    }

    fn update_line_clear(&mut self) {
        if self.time_duration < self.highlight_end_time {
            return;
        }

        let lines = self.board.clear_lines();
        let scored = calculate_line_score(lines, self.level);
        self.points = self.points.saturating_add(scored);
        self.cleared_line_count += lines as u64;

        if should_level_up(self.cleared_line_count, self.start_level, self.level) {
            self.level = self.level.saturating_add(1);
            debug!(level = self.level, lines = self.cleared_line_count, "level up");
        }

        debug!(lines, scored, points = self.points, "lines cleared");
        self.set_phase(GamePhase::Play);
    }

    /// The stack reached row 0, or the spawned piece does not fit
    fn is_topped_out(&self) -> bool {
        if self.board.is_row_occupied(0) {
            return true;
        }
        self.active
            .map_or(false, |active| !self.is_valid_placement(&active))
    }

    /// Promote the look-ahead piece and draw a fresh one
    fn spawn_next(&mut self) {
        let shape = self.ctx.shapes.next_shape();
        let fresh = PieceState::spawn(shape, self.board.width());
        self.active = self.next.replace(fresh);
    }

    /// Commit `candidate` as the active piece if it fits
    fn try_commit(&mut self, candidate: PieceState) -> bool {
        if self.is_valid_placement(&candidate) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Move the active piece one column left
    pub fn move_left(&mut self) -> bool {
        match self.active {
            Some(active) => self.try_commit(active.shifted(0, -1)),
            None => false,
        }
    }

    /// Move the active piece one column right
    pub fn move_right(&mut self) -> bool {
        match self.active {
            Some(active) => self.try_commit(active.shifted(0, 1)),
            None => false,
        }
    }

    /// Advance the active piece to its next rotation
    pub fn rotate(&mut self) -> bool {
        match self.active {
            Some(active) => {
                let candidate = active.rotated(self.ctx.rotations());
                self.try_commit(candidate)
            }
            None => false,
        }
    }

    /// Move the active piece down one row
    ///
    /// Returns true while the piece is still falling. When the row below is
    /// blocked the piece is merged into the board, the look-ahead piece
    /// becomes active, a new look-ahead piece is drawn and false is returned.
    pub fn soft_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        // A piece that spawned into the stack cannot lock; the next update
        // ends the game instead.
        if !self.is_valid_placement(&active) {
            return false;
        }

        if self.try_commit(active.shifted(1, 0)) {
            return true;
        }

        self.board.merge_piece(self.ctx.rotations(), &active);
        debug!(
            shape = active.piece.shape().as_str(),
            row = active.offset_row,
            col = active.offset_col,
            "piece locked"
        );
        self.spawn_next();
        false
    }

    /// Drop the active piece until it locks
    pub fn hard_drop(&mut self) {
        while self.soft_drop() {}
    }

    fn drop_and_reschedule(&mut self) {
        if self.soft_drop() {
            self.next_drop_time = self.time_duration + seconds_per_drop(self.level);
        } else {
            self.next_drop_time = 0.0;
        }
    }

    /// Progression counters, for a save service
    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            start_level: self.start_level,
            level: self.level,
            points: self.points,
            cleared_line_count: self.cleared_line_count,
        }
    }

    /// Replace the progression counters with saved ones
    pub fn restore_progress(&mut self, saved: &ProgressSnapshot) -> Result<(), RestoreError> {
        if self.phase == GamePhase::LineClear {
            return Err(RestoreError::LineClearPending);
        }
        if saved.level < saved.start_level {
            return Err(RestoreError::LevelBelowStart);
        }

        self.start_level = saved.start_level;
        self.level = saved.level;
        self.points = saved.points;
        self.cleared_line_count = saved.cleared_line_count;
        debug!(level = self.level, points = self.points, "progress restored");
        Ok(())
    }

    /// Fill a reusable snapshot for rendering
    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        let table = self.ctx.rotations();

        out.phase = self.phase;
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.clearing.clear();
        out.clearing
            .extend((0..self.board.height()).map(|row| self.board.is_line_clearing(row)));
        out.active = self.active.map(|s| PieceSnapshot::new(table, &s));
        out.next = self.next.map(|s| PieceSnapshot::new(table, &s));
        out.shadow_row = self.shadow_row();
        out.progress = self.progress();
        out.time_duration = self.time_duration;
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for Game<UniformShapes> {
    fn default() -> Self {
        Self::with_seed(GameConfig::default(), 1)
    }
}
