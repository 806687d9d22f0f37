//! Read/drive interface for hosts
//!
//! A host (renderer, input loop, save service) talks to a game through
//! [`PlayField`] only. The trait is object safe, so several boards can be
//! driven side by side as `Box<dyn PlayField>`.

use crate::board::Board;
use crate::game_state::Game;
use crate::rng::ShapeSource;
use crate::rotation::RotationState;
use crate::types::{GamePhase, MoveType, PieceSlot};

/// A piece as a renderer sees it: its matrix and where it sits
#[derive(Debug, Clone, Copy)]
pub struct PieceView<'a> {
    pub matrix: &'a RotationState,
    pub offset_row: i32,
    pub offset_col: i32,
}

impl PieceView<'_> {
    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }
}

pub trait PlayField {
    /// Advance by one frame with the move pressed during it
    fn update(&mut self, input: MoveType, now: f64);

    fn phase(&self) -> GamePhase;

    fn board(&self) -> &Board;

    fn piece(&self, slot: PieceSlot) -> Option<PieceView<'_>>;

    /// Landing row offset of the active piece
    fn shadow_row(&self) -> Option<i32>;

    fn is_line_clearing(&self, row: usize) -> bool;

    fn start_level(&self) -> u32;

    fn level(&self) -> u32;

    fn points(&self) -> u64;

    fn cleared_line_count(&self) -> u64;
}

impl<S: ShapeSource> PlayField for Game<S> {
    fn update(&mut self, input: MoveType, now: f64) {
        Game::update(self, input, now)
    }

    fn phase(&self) -> GamePhase {
        Game::phase(self)
    }

    fn board(&self) -> &Board {
        Game::board(self)
    }

    fn piece(&self, slot: PieceSlot) -> Option<PieceView<'_>> {
        let state = self.piece_state(slot)?;
        Some(PieceView {
            matrix: state.piece.state(self.rotations()),
            offset_row: state.offset_row,
            offset_col: state.offset_col,
        })
    }

    fn shadow_row(&self) -> Option<i32> {
        Game::shadow_row(self)
    }

    fn is_line_clearing(&self, row: usize) -> bool {
        Game::is_line_clearing(self, row)
    }

    fn start_level(&self) -> u32 {
        Game::start_level(self)
    }

    fn level(&self) -> u32 {
        Game::level(self)
    }

    fn points(&self) -> u64 {
        Game::points(self)
    }

    fn cleared_line_count(&self) -> u64 {
        Game::cleared_line_count(self)
    }
}
