//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{CELL_HEIGHT, CELL_WIDTH, GRID_HEIGHT, GRID_WIDTH};

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const FIELD_BG: Rgb = Rgb::new(20, 20, 28);
const LOCKED_FG: Rgb = Rgb::new(70, 110, 230);
const ACTIVE_FG: Rgb = Rgb::new(230, 70, 70);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Lays out the play field, side panel and overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(CELL_WIDTH, CELL_HEIGHT)
    }
}

/// Top-left corner of the bordered play field.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of the bordered field in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w + 2,
            GRID_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(BACKGROUND, BACKGROUND).cell(' '));

        let (w, h) = self.frame_size();
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_border(fb, frame);

        let empty = CellStyle::new(Rgb::new(60, 60, 70), FIELD_BG).cell('·');
        let locked = CellStyle::new(LOCKED_FG, FIELD_BG).cell('█');
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                let cell = if value != 0 { locked } else { empty };
                self.fill_board_cell(fb, frame, x as i8, y as i8, cell);
            }
        }

        if let Some(active) = snap.active {
            let cell = CellStyle::new(ACTIVE_FG, FIELD_BG).bold().cell('█');
            for (x, y) in active.board_cells() {
                self.fill_board_cell(fb, frame, x, y, cell);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_game_over(fb, frame, snap.score);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND);
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

        fb.set(f.x, f.y, style.cell('┌'));
        fb.set(right, f.y, style.cell('┐'));
        fb.set(f.x, bottom, style.cell('└'));
        fb.set(right, bottom, style.cell('┘'));
        for x in f.x + 1..right {
            fb.set(x, f.y, style.cell('─'));
            fb.set(x, bottom, style.cell('─'));
        }
        for y in f.y + 1..bottom {
            fb.set(f.x, y, style.cell('│'));
            fb.set(right, y, style.cell('│'));
        }
    }

    /// Paint one board cell; cells outside the visible grid are skipped.
    fn fill_board_cell(&self, fb: &mut FrameBuffer, f: Frame, x: i8, y: i8, cell: Cell) {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return;
        }
        let px = f.x + 1 + x as u16 * self.cell_w;
        let py = f.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, cell);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND);
        let hint = CellStyle::new(Rgb::new(120, 120, 130), BACKGROUND);

        let mut y = f.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        for line in ["←→ move", "↑  rotate", "↓  drop", "r  new game", "q  quit"] {
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, f: Frame, score: u32) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), BACKGROUND).bold();
        let mid = f.y + f.h / 2;

        let title = "GAME OVER";
        fb.put_str(centered(f, title.len() as u16), mid.saturating_sub(1), title, style);

        // "Score: " plus up to 10 digits.
        let digits = score.checked_ilog10().unwrap_or(0) as u16 + 1;
        let x = centered(f, 7 + digits);
        fb.put_str(x, mid, "Score: ", style);
        fb.put_u32(x + 7, mid, score, style);
    }
}

fn centered(f: Frame, text_w: u16) -> u16 {
    f.x.saturating_add(f.w.saturating_sub(text_w) / 2)
}
