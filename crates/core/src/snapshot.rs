//! Copyable view of the engine state for renderers and tests.

use crate::pieces::PieceShape;
use crate::types::{Rotation, ShapeId, GRID_HEIGHT, GRID_WIDTH};

/// Falling piece as seen by the renderer, with its cells already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: ShapeId,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub cells: PieceShape,
}

impl ActiveSnapshot {
    /// Absolute board positions of the piece cells.
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells
            .iter()
            .filter_map(|&(dx, dy)| Some((self.x.checked_add(dx)?, self.y.checked_add(dy)?)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            score: 0,
            lines: 0,
            game_over: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_at(x: i8, y: i8) -> ActiveSnapshot {
        ActiveSnapshot {
            shape: ShapeId::new(0).unwrap(),
            rotation: Rotation::R0,
            x,
            y,
            cells: [(0, 2), (1, 2), (2, 2), (3, 2)],
        }
    }

    #[test]
    fn board_cells_are_offset_by_anchor() {
        let cells: Vec<_> = active_at(3, 5).board_cells().collect();
        assert_eq!(cells, vec![(3, 7), (4, 7), (5, 7), (6, 7)]);
    }

    #[test]
    fn board_cells_skip_positions_past_anchor_range() {
        let cells: Vec<_> = active_at(i8::MAX - 1, 0).board_cells().collect();
        assert_eq!(cells, vec![(126, 2), (127, 2)]);
        assert_eq!(active_at(0, i8::MAX).board_cells().count(), 0);
    }
}
