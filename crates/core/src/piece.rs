//! Piece module - falling piece handles and their board anchors
//!
//! A [`Piece`] is a `(shape, rotation)` index into the [`RotationTable`];
//! copying it never copies matrix data. A [`PieceState`] anchors a piece on
//! the board by the top-left corner of its rotation matrix.

use arrayvec::ArrayVec;

use crate::rotation::{RotationState, RotationTable};
use crate::types::{Cell, Shape};

/// Board cell covered by a piece: `(row, col, color)`
pub type PieceCell = (i32, i32, Cell);

/// Handle to one rotation state of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    rotation: usize,
}

impl Piece {
    /// Piece in its canonical orientation
    pub fn new(shape: Shape) -> Self {
        Self { shape, rotation: 0 }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Current rotation index (0..4)
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// The same piece advanced to its successor rotation
    pub fn fast_rotation(&self, table: &RotationTable) -> Self {
        Self {
            rotation: table.successor(self.shape, self.rotation),
            ..*self
        }
    }

    /// Matrix of the current rotation
    pub fn state<'t>(&self, table: &'t RotationTable) -> &'t RotationState {
        table.get(self.shape, self.rotation)
    }

    /// Side length of the current rotation matrix
    pub fn dim(&self) -> usize {
        self.shape.dim()
    }
}

/// A piece placed at a row/column offset on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceState {
    pub piece: Piece,
    pub offset_row: i32,
    pub offset_col: i32,
}

impl PieceState {
    pub fn new(piece: Piece, offset_row: i32, offset_col: i32) -> Self {
        Self {
            piece,
            offset_row,
            offset_col,
        }
    }

    /// New piece at the spawn point: top row, horizontally centered
    pub fn spawn(shape: Shape, board_width: usize) -> Self {
        let dim = shape.dim();
        let col = board_width.saturating_sub(dim) / 2;
        Self::new(Piece::new(shape), 0, col as i32)
    }

    /// Board coordinates and color of every occupied cell
    ///
    /// Coordinates may fall outside the board; callers validate them.
    pub fn cells(&self, table: &RotationTable) -> ArrayVec<PieceCell, 4> {
        self.piece
            .state(table)
            .occupied()
            .map(|(row, col, color)| {
                (
                    self.offset_row + row as i32,
                    self.offset_col + col as i32,
                    color,
                )
            })
            .collect()
    }

    /// Copy shifted by a row/column delta
    pub fn shifted(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            offset_row: self.offset_row + d_row,
            offset_col: self.offset_col + d_col,
            ..*self
        }
    }

    /// Copy advanced to the successor rotation
    pub fn rotated(&self, table: &RotationTable) -> Self {
        Self {
            piece: self.piece.fast_rotation(table),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_centers_piece() {
        assert_eq!(PieceState::spawn(Shape::Square, 10).offset_col, 4);
        assert_eq!(PieceState::spawn(Shape::Bar, 10).offset_col, 3);
        assert_eq!(PieceState::spawn(Shape::L, 10).offset_col, 3);
        assert_eq!(PieceState::spawn(Shape::L, 7).offset_col, 2);

        let spawned = PieceState::spawn(Shape::Pyramid, 10);
        assert_eq!(spawned.offset_row, 0);
        assert_eq!(spawned.piece.rotation(), 0);
    }

    #[test]
    fn test_cells_are_translated() {
        let table = RotationTable::new();
        let state = PieceState::new(Piece::new(Shape::Bar), 5, 2);
        let cells = state.cells(&table);
        assert_eq!(cells.as_slice(), &[(6, 2, 2), (6, 3, 2), (6, 4, 2), (6, 5, 2)]);
    }

    #[test]
    fn test_fast_rotation_wraps() {
        let table = RotationTable::new();
        let mut piece = Piece::new(Shape::S);
        for expected in [1, 2, 3, 0] {
            piece = piece.fast_rotation(&table);
            assert_eq!(piece.rotation(), expected);
        }
    }

    #[test]
    fn test_shifted_and_rotated_leave_original_untouched() {
        let table = RotationTable::new();
        let original = PieceState::spawn(Shape::Z, 10);

        let moved = original.shifted(1, -1);
        assert_eq!((moved.offset_row, moved.offset_col), (1, 2));

        let turned = original.rotated(&table);
        assert_eq!(turned.piece.rotation(), 1);

        assert_eq!(original, PieceState::spawn(Shape::Z, 10));
    }
}
