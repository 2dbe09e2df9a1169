//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules engine and nothing else: no terminal, no
//! timers, no I/O. A driver owns a [`GameState`], calls
//! [`GameState::tick`] on a fixed period and [`GameState::apply_action`] on key
//! presses, and renders from [`GameState::snapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 occupancy grid with bottom-up line clearing
//! - [`game_state`]: active piece, validity checks, lock/clear/spawn cycle
//! - [`pieces`]: the 7-entry bitmask shape catalog
//! - [`rng`]: shape sources (seeded LCG and scripted sequences)
//! - [`snapshot`]: copyable render view of the game
//!
//! # Rules
//!
//! - Pieces spawn at (4, 0) with rotation 0; a spawn that does not fit ends the game
//! - Moves, rotations and drops that do not fit are ignored
//! - A drop that does not fit locks the piece, clears full rows (+100 each) and spawns
//!
//! # Example
//!
//! ```
//! use tetrion_core::{GameState, Step};
//! use tetrion_core::types::{GameAction, INITIAL_SCORE};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.score(), INITIAL_SCORE);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! assert_eq!(game.tick(), Step::Moved);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use tetrion_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{EngineConfig, GameOver, GameState, Phase, Step, Tetromino};
pub use pieces::{get_shape, PieceShape, SHAPE_MASKS};
pub use rng::{ScriptedShapes, ShapeSource, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
