use std::fmt;

use crate::piece::PieceState;
use crate::rotation::RotationTable;
use crate::types::{Cell, GamePhase, Shape, MAX_PIECE_DIM};

/// A placed piece with its rotation matrix copied out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceSnapshot {
    pub shape: Shape,
    pub rotation: usize,
    pub dim: usize,
    /// Row-major `dim x dim` matrix; cells past `dim * dim` are empty
    pub cells: [Cell; MAX_PIECE_DIM * MAX_PIECE_DIM],
    pub offset_row: i32,
    pub offset_col: i32,
}

impl PieceSnapshot {
    pub fn new(table: &RotationTable, state: &PieceState) -> Self {
        let matrix = state.piece.state(table);
        let mut cells = [0; MAX_PIECE_DIM * MAX_PIECE_DIM];
        cells[..matrix.cells().len()].copy_from_slice(matrix.cells());
        Self {
            shape: state.piece.shape(),
            rotation: state.piece.rotation(),
            dim: matrix.dim(),
            cells,
            offset_row: state.offset_row,
            offset_col: state.offset_col,
        }
    }

    /// Matrix cell at `(row, col)`, `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.dim || col >= self.dim {
            return None;
        }
        Some(self.cells[row * self.dim + col])
    }
}

/// Progression counters that outlive a single frame
///
/// This is what a save service persists between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSnapshot {
    pub start_level: u32,
    pub level: u32,
    pub points: u64,
    pub cleared_line_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreError {
    LevelBelowStart,
    LineClearPending,
}

impl RestoreError {
    pub fn code(self) -> &'static str {
        match self {
            RestoreError::LevelBelowStart => "invalid_progress",
            RestoreError::LineClearPending => "not_restorable",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RestoreError::LevelBelowStart => "level is below the start level",
            RestoreError::LineClearPending => "cannot restore while lines are being cleared",
        }
    }
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for RestoreError {}

/// Everything a renderer needs for one frame
///
/// Meant to be reused: `Game::snapshot_into` only refills the buffers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub width: usize,
    pub height: usize,
    /// Row-major board cells
    pub board: Vec<Cell>,
    /// One flag per row, set while the row is highlighted for removal
    pub clearing: Vec<bool>,
    pub active: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub shadow_row: Option<i32>,
    pub progress: ProgressSnapshot,
    pub time_duration: f64,
}

impl GameSnapshot {
    /// Board cell at `(row, col)`
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.board.get(row * self.width + col).copied()
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Play
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: GamePhase::Start,
            width: 0,
            height: 0,
            board: Vec::new(),
            clearing: Vec::new(),
            active: None,
            next: None,
            shadow_row: None,
            progress: ProgressSnapshot::default(),
            time_duration: 0.0,
        }
    }
}
