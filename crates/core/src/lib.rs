//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game: the board, the piece rotation
//! arena, piece selection, scoring and the phase state machine. It has no
//! dependencies on rendering, input devices or persistence, which makes it:
//!
//! - **Deterministic**: same seed and input sequence give the same game
//! - **Testable**: the shape source is a trait, so tests can script pieces
//! - **Portable**: runs headless or behind any front end
//!
//! # Module Structure
//!
//! - [`rotation`]: canonical shape patterns and the precomputed rotation ring
//! - [`piece`]: piece handles and their board anchors
//! - [`board`]: grid storage, placement validation, line detection and removal
//! - [`rng`]: seedable uniform piece selection
//! - [`scoring`]: line scores, level thresholds and the gravity curve
//! - [`game_state`]: the Start / Play / LineClear / GameOver state machine
//! - [`view`]: the [`PlayField`] interface hosts talk to
//! - [`snapshot`]: owned copies of the state for renderers and save services
//!
//! # Game Rules
//!
//! - **Uniform selection**: every new piece is an independent draw
//! - **Plain rotation**: clockwise only, no wall kicks
//! - **Classic scoring**: 40/100/300/1200 times (level + 1)
//! - **Line clear delay**: full rows stay highlighted for half a second
//!
//! # Example
//!
//! ```
//! use tetrino_core::{Game, GameConfig};
//! use tetrino_types::{GamePhase, MoveType};
//!
//! let mut game = Game::with_seed(GameConfig::default(), 12345);
//! game.update(MoveType::Confirm, 0.0);
//! assert_eq!(game.phase(), GamePhase::Play);
//!
//! game.update(MoveType::Right, 0.016);
//! game.update(MoveType::HardDrop, 0.033);
//! assert!(game.board().cells().iter().any(|&c| c != 0));
//! ```
//!
//! # Timing
//!
//! Hosts pass their own monotonic clock in seconds to
//! [`Game::update`](game_state::Game::update). Gravity fires when the play
//! time reaches the scheduled drop time; the interval follows the NES
//! frames-per-drop table at 60 frames per second.

pub mod board;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;
pub mod view;

pub use tetrino_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{EngineContext, Game, GameConfig};
pub use piece::{Piece, PieceState};
pub use rng::{ScriptedShapes, ShapeSource, SimpleRng, UniformShapes};
pub use rotation::{RotationState, RotationTable};
pub use scoring::{calculate_line_score, level_up_threshold, seconds_per_drop};
pub use snapshot::{GameSnapshot, PieceSnapshot, ProgressSnapshot, RestoreError};
pub use view::{PieceView, PlayField};
