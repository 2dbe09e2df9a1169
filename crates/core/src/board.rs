//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is an occupancy byte (0 = empty).
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Empty cell marker
pub const EMPTY: u8 = 0;

/// Marker written for locked piece cells
pub const FILLED: u8 = 1;

/// Row indices removed by one clearing pass, in the order they were cleared.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [u8; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<u8> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, value: u8) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(v) if v != EMPTY)
    }

    /// Check whether a single piece cell may sit at (x, y).
    ///
    /// Columns must be on the board and rows above the floor. Rows above the
    /// top edge (y < 0) are open; everything else must be empty.
    pub fn accepts(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|&c| c != EMPTY)
    }

    /// Fill every column of row `y` (test and bench helper).
    pub fn fill_row(&mut self, y: usize, value: u8) {
        if y < HEIGHT {
            let start = y * WIDTH;
            self.cells[start..start + WIDTH].fill(value);
        }
    }

    /// Remove row `y`: every row above shifts down by one and row 0 becomes empty.
    pub fn clear_row(&mut self, y: usize) {
        if y >= HEIGHT {
            return;
        }

        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells
                .copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }

        self.cells[..WIDTH].fill(EMPTY);
    }

    /// Clear all full rows, scanning from the bottom up.
    ///
    /// After a row is removed the same index is examined again, since the row
    /// that shifted into it may be full as well.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                // A full board clears at most HEIGHT times.
                let _ = cleared.try_push(row);
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Write the given piece cells into the board.
    ///
    /// Cells outside the grid (including rows above the top edge) are dropped.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], x: i8, y: i8, value: u8) {
        for &(dx, dy) in cells {
            if let (Some(cx), Some(cy)) = (x.checked_add(dx), y.checked_add(dy)) {
                self.set(cx, cy, value);
            }
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(WIDTH)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Copy occupancy into a fixed 2D grid (row-major, `grid[y][x]`).
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Build a board from text rows, top row first (`#` filled, anything else empty).
    ///
    /// Missing rows at the top are empty, so callers can describe only the bottom.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, row) in rows.iter().take(HEIGHT).enumerate() {
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                if ch == '#' {
                    board.cells[(offset + i) * WIDTH + x] = FILLED;
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
