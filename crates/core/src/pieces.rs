//! Pieces module - the shape catalog
//!
//! Each shape is a 16-bit mask over a 4x4 frame: bit `row * 4 + col` set means the
//! cell at (col, row) relative to the piece anchor is occupied.

use crate::types::{Rotation, RotationModel, ShapeId, FRAME_SIZE};

/// Offset of a single cell relative to the piece anchor, as (dx, dy)
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

/// The catalog, in index order.
pub const SHAPE_MASKS: [u16; 7] = [0x0F00, 0x2222, 0x44C0, 0x8E00, 0x6440, 0xE200, 0x4E00];

/// Raw mask for a catalog entry.
pub fn shape_mask(shape: ShapeId) -> u16 {
    SHAPE_MASKS[shape.index()]
}

/// Turn a mask 90 degrees clockwise inside its 4x4 frame: (row, col) -> (col, 3 - row).
pub const fn rotate_mask_cw(mask: u16) -> u16 {
    let n = FRAME_SIZE as u32;
    let mut out = 0u16;
    let mut bit = 0;
    while bit < 16 {
        if mask & (1 << bit) != 0 {
            let row = bit / n;
            let col = bit % n;
            let new_row = col;
            let new_col = n - 1 - row;
            out |= 1 << (new_row * n + new_col);
        }
        bit += 1;
    }
    out
}

/// Mask actually tested for `shape` at `rotation` under the given model.
pub fn oriented_mask(shape: ShapeId, rotation: Rotation, model: RotationModel) -> u16 {
    let mask = shape_mask(shape);
    match model {
        RotationModel::Tracked => mask,
        RotationModel::Geometric => {
            (0..rotation.quarter_turns()).fold(mask, |m, _| rotate_mask_cw(m))
        }
    }
}

/// Decode a mask into its occupied offsets, scanning row by row.
///
/// Every catalog mask (and every rotation of one) has exactly four bits set.
pub fn mask_cells(mask: u16) -> PieceShape {
    let mut cells = [(0, 0); 4];
    let mut n = 0;
    for bit in 0..16u16 {
        if mask & (1 << bit) != 0 && n < cells.len() {
            let row = (bit / FRAME_SIZE as u16) as i8;
            let col = (bit % FRAME_SIZE as u16) as i8;
            cells[n] = (col, row);
            n += 1;
        }
    }
    debug_assert_eq!(n, 4, "shape masks have exactly four cells");
    cells
}

/// Get the cell offsets for a shape and rotation.
pub fn get_shape(shape: ShapeId, rotation: Rotation, model: RotationModel) -> PieceShape {
    mask_cells(oriented_mask(shape, rotation, model))
}
