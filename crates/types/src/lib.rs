//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Grid
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: (4, 0), the top-left corner of a piece's 4x4 frame
//!
//! # Timing and scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 500 | Gravity step interval |
//! | `INITIAL_SCORE` | 785 | Score at the start of every game |
//! | `LINE_CLEAR_SCORE` | 100 | Points per cleared row |
//!
//! # Examples
//!
//! ```
//! use tetrion_types::{GameAction, Rotation, ShapeId, GRID_HEIGHT, GRID_WIDTH};
//!
//! let shape = ShapeId::new(6).unwrap();
//! assert_eq!(shape.index(), 6);
//! assert!(ShapeId::new(7).is_none());
//!
//! let rotation = Rotation::R0;
//! assert_eq!(rotation.next().next().next().next(), Rotation::R0);
//!
//! assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
//! assert_eq!((GRID_WIDTH, GRID_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Side length of a piece's bounding frame.
pub const FRAME_SIZE: u8 = 4;

/// Number of shapes in the piece catalog.
pub const SHAPE_COUNT: u8 = 7;

/// Anchor column for freshly spawned pieces (horizontally centered).
pub const SPAWN_X: i8 = GRID_WIDTH as i8 / 2 - 1;

/// Anchor row for freshly spawned pieces.
pub const SPAWN_Y: i8 = 0;

/// Gravity step interval in milliseconds.
pub const TICK_MS: u32 = 500;

/// Score every game starts with.
pub const INITIAL_SCORE: u32 = 785;

/// Points awarded per cleared row.
pub const LINE_CLEAR_SCORE: u32 = 100;

/// Rendered size of one board cell, in terminal columns.
pub const CELL_WIDTH: u16 = 2;

/// Rendered size of one board cell, in terminal rows.
pub const CELL_HEIGHT: u16 = 1;

/// Index into the piece catalog (0..7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u8);

impl ShapeId {
    /// Returns `None` for indices outside the catalog.
    pub const fn new(index: u8) -> Option<Self> {
        if index < SHAPE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All catalog entries in index order.
    pub fn all() -> impl Iterator<Item = ShapeId> {
        (0..SHAPE_COUNT).map(ShapeId)
    }
}

/// Rotation states, cycled clockwise from the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    /// `(rotation + 1) mod 4`
    pub fn next(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R1,
            Rotation::R1 => Rotation::R2,
            Rotation::R2 => Rotation::R3,
            Rotation::R3 => Rotation::R0,
        }
    }

    /// Number of quarter turns clockwise from spawn.
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }

    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::R0,
            1 => Rotation::R1,
            2 => Rotation::R2,
            _ => Rotation::R3,
        }
    }
}

/// Discrete player actions delivered by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    NewGame,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "softdrop" => Some(GameAction::SoftDrop),
            "newgame" => Some(GameAction::NewGame),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::NewGame => "newGame",
        }
    }
}

/// How the rotation index maps to occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationModel {
    /// Rotation is tracked but cells always come from the unrotated mask.
    #[default]
    Tracked,
    /// The 4x4 mask is turned 90 degrees clockwise per rotation step.
    Geometric,
}
