//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. One press
//! produces one action; timing is left to the driver.

pub mod map;

pub use tetrion_types as types;

pub use map::{handle_key_event, is_press, should_quit};
