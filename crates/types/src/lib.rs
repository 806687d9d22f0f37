//! Core types module - shared data structures and constants
//!
//! This module defines the plain data types used by the rules engine and by
//! whatever host drives it (renderer, input poller, save service). Nothing in
//! here owns game-rules state.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (a game may be built with other sizes):
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, top to bottom)
//!
//! The top two rows act as the spawn area; hosts usually cover them when drawing.
//!
//! # Timing
//!
//! Time is measured in seconds since play started and is supplied by the host.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SECONDS_PER_FRAME` | 1/60 | Duration of one NES frame |
//! | `FRAMES_PER_DROP` | 48 .. 1 | Gravity per level, clamped at level 29 |
//! | `LINE_CLEAR_HIGHLIGHT_SECS` | 0.5 | Pause before filled rows are removed |
//!
//! # Examples
//!
//! ```
//! use tetrino_types::{MoveType, Shape, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! assert_eq!(Shape::Square.color(), 1);
//! assert_eq!(Shape::J.color(), 7);
//! assert_eq!(Shape::from_index(2), Some(Shape::Pyramid));
//!
//! assert_eq!(MoveType::from_str("hardDrop"), Some(MoveType::HardDrop));
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 22);
//! ```

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells (22 rows, the top 2 being the spawn area)
pub const DEFAULT_BOARD_HEIGHT: usize = 22;

/// Number of distinct tetromino shapes
pub const SHAPE_COUNT: usize = 7;

/// Number of rotation states per shape (90° steps)
pub const ROTATION_COUNT: usize = 4;

/// Largest rotation matrix side length (the bar)
pub const MAX_PIECE_DIM: usize = 4;

/// Duration of one frame in seconds (60 FPS)
pub const SECONDS_PER_FRAME: f64 = 1.0 / 60.0;

/// Frames per gravity drop, indexed by level (NES curve)
///
/// Levels past the end of the table use the last entry.
pub const FRAMES_PER_DROP: [u8; 30] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, //
    5, 5, 5, 4, 4, 4, 3, 3, 3, 2, //
    2, 2, 2, 2, 2, 2, 2, 2, 2, 1,
];

/// How long filled rows stay highlighted before they are removed
pub const LINE_CLEAR_HIGHLIGHT_SECS: f64 = 0.5;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at once at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lines per level once the first level-up threshold is passed
pub const LINES_PER_LEVEL: i64 = 10;

/// Lower bound of the first level-up threshold (before the upper clamp)
pub const LEVEL_UP_FLOOR_LINES: i64 = 100;

/// A cell on the board or in a rotation matrix
///
/// - `0`: empty
/// - `1..=7`: filled, holding the color id of the shape that left it there
pub type Cell = u8;

/// Value of an empty cell
pub const EMPTY: Cell = 0;

/// Highest valid color id
pub const MAX_COLOR: Cell = SHAPE_COUNT as Cell;

/// The seven tetromino shapes
///
/// The declaration order fixes the color id: `Square` is 1, `J` is 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Square,
    Bar,
    Pyramid,
    S,
    Z,
    L,
    J,
}

impl Shape {
    /// All shapes in color-id order
    pub const ALL: [Shape; SHAPE_COUNT] = [
        Shape::Square,
        Shape::Bar,
        Shape::Pyramid,
        Shape::S,
        Shape::Z,
        Shape::L,
        Shape::J,
    ];

    /// Zero-based position of the shape in [`Shape::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a shape by its zero-based index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Color id written into the board when this shape locks
    pub fn color(self) -> Cell {
        self as Cell + 1
    }

    /// Side length of the shape's rotation matrix
    pub fn dim(self) -> usize {
        match self {
            Shape::Square => 2,
            Shape::Bar => 4,
            _ => 3,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Square => "square",
            Shape::Bar => "bar",
            Shape::Pyramid => "pyramid",
            Shape::S => "s",
            Shape::Z => "z",
            Shape::L => "l",
            Shape::J => "j",
        }
    }
}

/// Discrete move event pushed into the engine once per frame
///
/// In the start screen `RotateCw` doubles as "level up" and `SoftDrop` as
/// "level down", matching the arrow keys most hosts bind them to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveType {
    /// Move piece one cell left
    Left,
    /// Move piece one cell right
    Right,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Drop piece one row, locking it if it cannot move
    SoftDrop,
    /// Drop piece until it locks
    HardDrop,
    /// Start a game / leave the game-over screen
    Confirm,
    /// Nothing pressed this frame
    #[default]
    None,
}

impl MoveType {
    /// Parse a move from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrino_types::MoveType;
    ///
    /// assert_eq!(MoveType::from_str("left"), Some(MoveType::Left));
    /// assert_eq!(MoveType::from_str("rotateCw"), Some(MoveType::RotateCw));
    /// assert_eq!(MoveType::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(MoveType::Left),
            "right" => Some(MoveType::Right),
            "rotatecw" => Some(MoveType::RotateCw),
            "softdrop" => Some(MoveType::SoftDrop),
            "harddrop" => Some(MoveType::HardDrop),
            "confirm" => Some(MoveType::Confirm),
            "none" => Some(MoveType::None),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(self) -> &'static str {
        match self {
            MoveType::Left => "left",
            MoveType::Right => "right",
            MoveType::RotateCw => "rotateCw",
            MoveType::SoftDrop => "softDrop",
            MoveType::HardDrop => "hardDrop",
            MoveType::Confirm => "confirm",
            MoveType::None => "none",
        }
    }
}

/// Phase of the game state machine
///
/// `Start -> Play -> LineClear -> Play ... -> GameOver -> Start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    /// Level selection screen
    #[default]
    Start,
    /// A piece is falling and accepts moves
    Play,
    /// Filled rows are highlighted and waiting to be removed
    LineClear,
    /// The stack reached the top
    GameOver,
}

impl GamePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Play => "play",
            GamePhase::LineClear => "line_clear",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Which of the two piece slots an accessor refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceSlot {
    /// The piece under player control
    Active,
    /// The look-ahead piece shown in the preview panel
    Next,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_colors_follow_declaration_order() {
        for (i, shape) in Shape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
            assert_eq!(shape.color() as usize, i + 1);
            assert_eq!(Shape::from_index(i), Some(*shape));
        }
        assert_eq!(Shape::from_index(SHAPE_COUNT), None);
        assert_eq!(Shape::J.color(), MAX_COLOR);
    }

    #[test]
    fn shape_dims() {
        assert_eq!(Shape::Square.dim(), 2);
        assert_eq!(Shape::Bar.dim(), 4);
        for shape in [Shape::Pyramid, Shape::S, Shape::Z, Shape::L, Shape::J] {
            assert_eq!(shape.dim(), 3);
        }
        assert!(Shape::ALL.iter().all(|s| s.dim() <= MAX_PIECE_DIM));
    }

    #[test]
    fn move_type_string_roundtrip() {
        for mv in [
            MoveType::Left,
            MoveType::Right,
            MoveType::RotateCw,
            MoveType::SoftDrop,
            MoveType::HardDrop,
            MoveType::Confirm,
            MoveType::None,
        ] {
            assert_eq!(MoveType::from_str(mv.as_str()), Some(mv));
        }
    }

    #[test]
    fn nes_timing_table() {
        assert_eq!(FRAMES_PER_DROP[0], 48);
        assert_eq!(FRAMES_PER_DROP[9], 6);
        assert_eq!(FRAMES_PER_DROP[29], 1);
        assert!(FRAMES_PER_DROP.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(LINE_CLEAR_HIGHLIGHT_SECS, 0.5);
    }
}
