//! RNG module - shape selection
//!
//! Spawns draw uniformly from the 7-entry catalog through the [`ShapeSource`]
//! trait. [`SimpleRng`] is the seeded generator used for play; [`ScriptedShapes`]
//! replays a fixed sequence so tests can predict every spawn.

use crate::types::{ShapeId, SHAPE_COUNT};

/// Supplies the next shape to spawn.
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeId;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (((self.next_u32() as u64) * (max as u64)) >> 32) as u32
    }

    /// Current generator state (feeding it back into `new` resumes the sequence).
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for SimpleRng {
    fn next_shape(&mut self) -> ShapeId {
        let index = self.next_range(SHAPE_COUNT as u32) as u8;
        ShapeId::new(index).unwrap_or_else(|| unreachable!("index below SHAPE_COUNT"))
    }
}

/// Replays a fixed list of shapes, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedShapes {
    shapes: Vec<ShapeId>,
    pos: usize,
}

impl ScriptedShapes {
    /// Build from catalog indices; out-of-range indices are skipped.
    ///
    /// An empty script always yields shape 0.
    pub fn new(indices: &[u8]) -> Self {
        Self {
            shapes: indices.iter().filter_map(|&i| ShapeId::new(i)).collect(),
            pos: 0,
        }
    }

    /// Number of shapes handed out so far.
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_shape(&mut self) -> ShapeId {
        let shape = if self.shapes.is_empty() {
            ShapeId::new(0)
        } else {
            self.shapes.get(self.pos % self.shapes.len()).copied()
        };
        self.pos += 1;
        shape.unwrap_or_else(|| unreachable!("shape 0 exists"))
    }
}
