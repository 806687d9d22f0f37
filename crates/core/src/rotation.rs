//! Rotation module - precomputed rotation states for every shape
//!
//! Each shape has 4 rotation states stored as square matrices of color ids.
//! State 0 is the canonical pattern below; state `i` is state `i - 1` turned
//! 90° clockwise. The states of a shape form a ring: the successor of state 3
//! is state 0.
//!
//! The table is an arena indexed by `(shape, rotation)`. Pieces keep the index
//! pair, never a copy of the matrix.

use crate::types::{Cell, Shape, EMPTY, MAX_PIECE_DIM, ROTATION_COUNT, SHAPE_COUNT};

const SQUARE: [Cell; 4] = [
    1, 1, //
    1, 1,
];

const BAR: [Cell; 16] = [
    0, 0, 0, 0, //
    2, 2, 2, 2, //
    0, 0, 0, 0, //
    0, 0, 0, 0,
];

const PYRAMID: [Cell; 9] = [
    0, 0, 0, //
    3, 3, 3, //
    0, 3, 0,
];

const S_SHAPE: [Cell; 9] = [
    0, 4, 4, //
    4, 4, 0, //
    0, 0, 0,
];

const Z_SHAPE: [Cell; 9] = [
    5, 5, 0, //
    0, 5, 5, //
    0, 0, 0,
];

const L_SHAPE: [Cell; 9] = [
    0, 6, 0, //
    0, 6, 0, //
    0, 6, 6,
];

const J_SHAPE: [Cell; 9] = [
    0, 7, 0, //
    0, 7, 0, //
    7, 7, 0,
];

/// Canonical (rotation 0) pattern of a shape, row-major, `dim * dim` cells
pub fn canonical_pattern(shape: Shape) -> &'static [Cell] {
    match shape {
        Shape::Square => &SQUARE,
        Shape::Bar => &BAR,
        Shape::Pyramid => &PYRAMID,
        Shape::S => &S_SHAPE,
        Shape::Z => &Z_SHAPE,
        Shape::L => &L_SHAPE,
        Shape::J => &J_SHAPE,
    }
}

/// One orientation of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationState {
    /// Row-major `dim * dim` matrix stored at the front of a fixed buffer
    cells: [Cell; MAX_PIECE_DIM * MAX_PIECE_DIM],
    dim: usize,
    /// Rotation index of the successor state
    next: usize,
}

impl RotationState {
    fn from_pattern(pattern: &[Cell], dim: usize) -> Self {
        debug_assert_eq!(pattern.len(), dim * dim);
        let mut cells = [EMPTY; MAX_PIECE_DIM * MAX_PIECE_DIM];
        cells[..pattern.len()].copy_from_slice(pattern);
        Self {
            cells,
            dim,
            next: 0,
        }
    }

    /// Turn 90° clockwise: `rotated[row][col] = previous[dim - col - 1][row]`
    fn rotated(&self) -> Self {
        let dim = self.dim;
        let mut cells = [EMPTY; MAX_PIECE_DIM * MAX_PIECE_DIM];
        for row in 0..dim {
            for col in 0..dim {
                cells[row * dim + col] = self.cells[(dim - col - 1) * dim + row];
            }
        }
        Self {
            cells,
            dim,
            next: 0,
        }
    }

    /// Side length of the matrix
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Row-major matrix, `dim * dim` entries
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.dim * self.dim]
    }

    /// Value at local coordinates, `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.dim || col >= self.dim {
            return None;
        }
        Some(self.cells[row * self.dim + col])
    }

    /// Rotation index this state advances to
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Occupied cells as `(row, col, color)` in local coordinates
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let dim = self.dim;
        self.cells()
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != EMPTY)
            .map(move |(i, value)| (i / dim, i % dim, *value))
    }
}

/// All rotation states of all shapes, built once and read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationTable {
    states: [[RotationState; ROTATION_COUNT]; SHAPE_COUNT],
}

impl RotationTable {
    /// Build every rotation state and link each to its successor
    pub fn new() -> Self {
        let states = Shape::ALL.map(|shape| {
            let first = RotationState::from_pattern(canonical_pattern(shape), shape.dim());
            let mut ring = [first; ROTATION_COUNT];
            for i in 1..ROTATION_COUNT {
                ring[i] = ring[i - 1].rotated();
            }
            for (i, state) in ring.iter_mut().enumerate() {
                state.next = (i + 1) % ROTATION_COUNT;
            }
            ring
        });
        Self { states }
    }

    /// Rotation state `rotation` of `shape`
    ///
    /// `rotation` is taken modulo 4.
    pub fn get(&self, shape: Shape, rotation: usize) -> &RotationState {
        &self.states[shape.index()][rotation % ROTATION_COUNT]
    }

    /// Index of the state that follows `rotation`
    pub fn successor(&self, shape: Shape, rotation: usize) -> usize {
        self.get(shape, rotation).next
    }
}

impl Default for RotationTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_zero_matches_canonical_pattern() {
        let table = RotationTable::new();
        for shape in Shape::ALL {
            let state = table.get(shape, 0);
            assert_eq!(state.dim(), shape.dim());
            assert_eq!(state.cells(), canonical_pattern(shape));
        }
    }

    #[test]
    fn test_every_state_has_four_cells_of_its_color() {
        let table = RotationTable::new();
        for shape in Shape::ALL {
            for rotation in 0..ROTATION_COUNT {
                let state = table.get(shape, rotation);
                let occupied: Vec<_> = state.occupied().collect();
                assert_eq!(occupied.len(), 4, "{:?} rotation {}", shape, rotation);
                assert!(occupied.iter().all(|&(_, _, c)| c == shape.color()));
            }
        }
    }

    #[test]
    fn test_successor_links_form_ring() {
        let table = RotationTable::new();
        for shape in Shape::ALL {
            assert_eq!(table.successor(shape, 0), 1);
            assert_eq!(table.successor(shape, 1), 2);
            assert_eq!(table.successor(shape, 2), 3);
            assert_eq!(table.successor(shape, 3), 0);
        }
    }

    #[test]
    fn test_pyramid_turns_clockwise() {
        let table = RotationTable::new();
        #[rustfmt::skip]
        let expected: [Cell; 9] = [
            0, 3, 0,
            3, 3, 0,
            0, 3, 0,
        ];
        assert_eq!(table.get(Shape::Pyramid, 1).cells(), &expected);
    }

    #[test]
    fn test_bar_alternates_between_column_and_row() {
        let table = RotationTable::new();
        let vertical: Vec<_> = table.get(Shape::Bar, 1).occupied().collect();
        assert!(vertical.iter().all(|&(_, col, _)| col == 2));

        let horizontal: Vec<_> = table.get(Shape::Bar, 2).occupied().collect();
        assert!(horizontal.iter().all(|&(row, _, _)| row == 2));
    }

    #[test]
    fn test_get_out_of_matrix() {
        let table = RotationTable::new();
        let square = table.get(Shape::Square, 0);
        assert_eq!(square.get(1, 1), Some(1));
        assert_eq!(square.get(2, 0), None);
        assert_eq!(square.get(0, 2), None);
    }
}
