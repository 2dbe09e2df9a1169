//! Terminal rendering for the game.
//!
//! [`GameView`] turns a snapshot into a framebuffer (pure, testable) and
//! [`TerminalRenderer`] flushes framebuffers to the terminal with crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetrion_core as core;
pub use tetrion_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
