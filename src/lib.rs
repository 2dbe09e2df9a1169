//! tetrion (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetrion::{core,input,term,types}` so the
//! binary, integration tests and benches share one import surface.

pub use tetrion_core as core;
pub use tetrion_input as input;
pub use tetrion_term as term;
pub use tetrion_types as types;
