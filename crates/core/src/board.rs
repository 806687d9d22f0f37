//! Board module - manages the game grid
//!
//! The board is a `height x width` grid of color ids (0 = empty) plus one
//! "marked for clearing" flag per row. Cells live in a flat row-major vector.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 the left edge.
//!
//! Cells change only when a validated piece is merged or when marked rows
//! are compacted away.

use tracing::debug;

use crate::piece::PieceState;
use crate::rotation::RotationTable;
use crate::types::{Cell, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, EMPTY, MAX_COLOR};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
    /// One flag per row, set while the row waits to be removed
    lines_to_clear: Vec<bool>,
}

impl Board {
    /// Create an empty board of the given size
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "board must not be empty");
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
            lines_to_clear: vec![false; height],
        }
    }

    /// Flat index of `(row, col)`, `None` outside the grid
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at `(row, col)`
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, value: Cell) -> bool {
        debug_assert!(value <= MAX_COLOR, "invalid color id {}", value);
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the grid and empty
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(EMPTY)
    }

    /// Check whether a piece fits: every occupied cell of its matrix must be
    /// inside the grid and over an empty board cell
    ///
    /// Never mutates the board or the piece.
    pub fn is_valid_placement(&self, table: &RotationTable, piece: &PieceState) -> bool {
        piece
            .cells(table)
            .iter()
            .all(|&(row, col, _)| self.is_free(row, col))
    }

    /// Write the piece's color ids into the grid
    ///
    /// The placement must already be valid.
    pub fn merge_piece(&mut self, table: &RotationTable, piece: &PieceState) {
        debug_assert!(
            self.is_valid_placement(table, piece),
            "merging an invalid placement: {:?}",
            piece
        );
        for (row, col, color) in piece.cells(table) {
            if self.is_free(row, col) {
                self.set(row, col, color);
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .map_or(false, |cells| cells.iter().all(|&c| c != EMPTY))
    }

    /// Check if any cell of a row is filled
    pub fn is_row_occupied(&self, row: usize) -> bool {
        self.row(row)
            .map_or(false, |cells| cells.iter().any(|&c| c != EMPTY))
    }

    /// Mark every filled row for clearing
    /// Returns the number of marked rows
    pub fn find_lines_to_clear(&mut self) -> usize {
        let mut count = 0;
        for row in 0..self.height {
            let full = self.is_row_full(row);
            self.lines_to_clear[row] = full;
            if full {
                count += 1;
            }
        }
        count
    }

    /// Whether a row is currently marked for clearing
    pub fn is_line_clearing(&self, row: usize) -> bool {
        self.lines_to_clear.get(row).copied().unwrap_or(false)
    }

    /// Number of rows currently marked for clearing
    pub fn pending_line_count(&self) -> usize {
        self.lines_to_clear.iter().filter(|&&marked| marked).count()
    }

    /// Remove every marked row and let the rows above fall into place
    ///
    /// Walks destination rows bottom-up with a source cursor that skips
    /// marked rows. Once the cursor passes the top, remaining rows are
    /// zero-filled. Relative order of unmarked rows is preserved.
    /// Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut source = self.height as isize - 1;

        for dest in (0..self.height).rev() {
            while source >= 0 && self.lines_to_clear[source as usize] {
                source -= 1;
            }

            let dst_start = dest * width;
            if source < 0 {
                self.cells[dst_start..dst_start + width].fill(EMPTY);
            } else {
                let src_start = source as usize * width;
                if src_start != dst_start {
                    // copy_within handles overlapping ranges
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
                source -= 1;
            }
        }

        let removed = self.pending_line_count();
        self.lines_to_clear.fill(false);
        if removed > 0 {
            debug!(removed, "compacted board");
        }
        removed
    }

    /// Cells of one row, `None` past the bottom
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate over rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell and drop every clearing mark
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
        self.lines_to_clear.fill(false);
    }

    /// Build a board from rows of color ids, top row first
    ///
    /// Panics if the rows differ in length.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        assert!(
            rows.iter().all(|row| row.len() == width),
            "rows must have equal width"
        );

        let mut board = Self::new(width, height);
        for (r, row) in rows.iter().enumerate() {
            board.cells[r * width..(r + 1) * width].copy_from_slice(row);
        }
        board
    }

    /// Copy rows out as nested vectors
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}
