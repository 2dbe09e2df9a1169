//! Game state module - the engine
//!
//! Owns the board, the falling piece and the score. Every operation runs to
//! completion and either changes state or is rejected as a no-op; the only
//! terminal transition is a spawn that does not fit.

use tracing::{debug, info, trace};

use crate::board::{Board, FILLED};
use crate::pieces::{get_shape, PieceShape};
use crate::rng::{ShapeSource, SimpleRng};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub shape: ShapeId,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor
    pub fn new(shape: ShapeId) -> Self {
        Self {
            shape,
            rotation: Rotation::R0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Cell offsets for the current rotation
    pub fn cells(&self, model: RotationModel) -> PieceShape {
        get_shape(self.shape, self.rotation, model)
    }
}

/// Knobs fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub initial_score: u32,
    pub rotation_model: RotationModel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_score: INITIAL_SCORE,
            rotation_model: RotationModel::Tracked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Terminal notification carrying the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub final_score: u32,
}

/// Result of a single engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing changed: the move was blocked or the game is already over.
    Unchanged,
    /// The active piece moved or rotated.
    Moved,
    /// The piece locked, `lines` rows were cleared and a new piece spawned.
    Locked { lines: u32 },
    /// The piece locked and the next spawn did not fit. Reported once.
    GameOver(GameOver),
}

impl Step {
    pub fn changed(&self) -> bool {
        !matches!(self, Step::Unchanged)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = SimpleRng> {
    board: Board,
    active: Option<Tetromino>,
    score: u32,
    phase: Phase,
    config: EngineConfig,
    source: S,
    /// Pieces locked since the last new game.
    pieces_locked: u32,
    /// Rows cleared since the last new game.
    lines: u32,
}

impl GameState<SimpleRng> {
    /// Create and start a game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed), EngineConfig::default())
    }
}

impl<S: ShapeSource> GameState<S> {
    /// Create and start a game drawing shapes from `source`.
    pub fn with_source(source: S, config: EngineConfig) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: None,
            score: config.initial_score,
            phase: Phase::Playing,
            config,
            source,
            pieces_locked: 0,
            lines: 0,
        };
        state.new_game();
        state
    }

    /// Empty the board, reset the score and spawn the first piece.
    pub fn new_game(&mut self) {
        self.board.clear();
        self.score = self.config.initial_score;
        self.phase = Phase::Playing;
        self.active = None;
        self.pieces_locked = 0;
        self.lines = 0;
        info!(score = self.score, "new game");
        self.spawn_piece();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Cell offsets of the active piece, for rendering.
    pub fn active_cells(&self) -> Option<PieceShape> {
        self.active.map(|p| p.cells(self.config.rotation_model))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions in tests and benches.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(|p| ActiveSnapshot {
            shape: p.shape,
            rotation: p.rotation,
            x: p.x,
            y: p.y,
            cells: p.cells(self.config.rotation_model),
        });
        out.score = self.score;
        out.lines = self.lines;
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Draw a shape and place it at the spawn anchor.
    ///
    /// Returns false, and ends the game, if the new piece does not fit.
    pub fn spawn_piece(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        let piece = Tetromino::new(self.source.next_shape());
        if !self.is_valid(piece.shape, piece.rotation, piece.x, piece.y) {
            self.active = None;
            self.phase = Phase::GameOver;
            info!(shape = piece.shape.index(), final_score = self.score, "game over");
            return false;
        }

        trace!(shape = piece.shape.index(), x = piece.x, y = piece.y, "spawned piece");
        self.active = Some(piece);
        true
    }

    /// Check whether `shape` at `rotation` fits with its anchor at (x, y).
    pub fn is_valid(&self, shape: ShapeId, rotation: Rotation, x: i8, y: i8) -> bool {
        get_shape(shape, rotation, self.config.rotation_model)
            .iter()
            .all(|&(dx, dy)| match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(cx), Some(cy)) => self.board.accepts(cx, cy),
                _ => false,
            })
    }

    /// Shift the active piece horizontally by `dx` columns if it fits.
    pub fn try_move(&mut self, dx: i8) -> bool {
        if self.is_game_over() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let new_x = active.x.saturating_add(dx);
        if !self.is_valid(active.shape, active.rotation, new_x, active.y) {
            return false;
        }
        self.active = Some(Tetromino { x: new_x, ..active });
        true
    }

    /// Advance the rotation index by one if the piece still fits.
    pub fn rotate(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotation = active.rotation.next();
        if !self.is_valid(active.shape, rotation, active.x, active.y) {
            return false;
        }
        self.active = Some(Tetromino { rotation, ..active });
        true
    }

    /// Gravity step, called by the driver on every timer tick.
    pub fn tick(&mut self) -> Step {
        self.step_down()
    }

    /// Player-requested one-row drop; same rules as a gravity step.
    pub fn soft_drop(&mut self) -> Step {
        self.step_down()
    }

    fn step_down(&mut self) -> Step {
        if self.is_game_over() {
            return Step::Unchanged;
        }
        let Some(active) = self.active else {
            return Step::Unchanged;
        };

        let new_y = active.y.saturating_add(1);
        if self.is_valid(active.shape, active.rotation, active.x, new_y) {
            self.active = Some(Tetromino { y: new_y, ..active });
            return Step::Moved;
        }

        self.lock_piece()
    }

    /// Write the active piece into the board, clear rows and spawn the next piece.
    fn lock_piece(&mut self) -> Step {
        let Some(active) = self.active.take() else {
            return Step::Unchanged;
        };

        let cells = active.cells(self.config.rotation_model);
        self.board.lock_cells(&cells, active.x, active.y, FILLED);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let lines = self.clear_lines();
        debug!(
            shape = active.shape.index(),
            x = active.x,
            y = active.y,
            lines,
            score = self.score,
            "locked piece"
        );

        if self.spawn_piece() {
            Step::Locked { lines }
        } else {
            Step::GameOver(GameOver {
                final_score: self.score,
            })
        }
    }

    /// Remove every full row and award points for each.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows().len() as u32;
        if cleared > 0 {
            self.score = self
                .score
                .saturating_add(cleared.saturating_mul(LINE_CLEAR_SCORE));
            self.lines = self.lines.saturating_add(cleared);
            debug!(cleared, score = self.score, "cleared lines");
        }
        cleared
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> Step {
        let moved = match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => return self.soft_drop(),
            GameAction::NewGame => {
                self.new_game();
                true
            }
        };
        if moved {
            Step::Moved
        } else {
            Step::Unchanged
        }
    }

    /// Replace the active piece. Rejected if the game is over or `piece` does not fit.
    pub fn set_active(&mut self, piece: Tetromino) -> bool {
        if self.is_game_over() || !self.is_valid(piece.shape, piece.rotation, piece.x, piece.y) {
            return false;
        }
        self.active = Some(piece);
        true
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedShapes;

    fn shape(i: u8) -> ShapeId {
        ShapeId::new(i).unwrap()
    }

    fn scripted(indices: &[u8]) -> GameState<ScriptedShapes> {
        GameState::with_source(ScriptedShapes::new(indices), EngineConfig::default())
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, INITIAL_SCORE);
        assert_eq!(state.lines, 0);
        assert_eq!(state.board.filled_count(), 0);

        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(active.rotation, Rotation::R0);
    }

    #[test]
    fn test_spawn_uses_source_order() {
        let mut state = scripted(&[3, 6]);
        assert_eq!(state.active.unwrap().shape, shape(3));

        state.active = None;
        assert!(state.spawn_piece());
        assert_eq!(state.active.unwrap().shape, shape(6));
    }

    #[test]
    fn test_is_valid_walls_and_floor() {
        // Horizontal bar: cells at columns 0..4 of frame row 2.
        let state = scripted(&[0]);
        let bar = shape(0);

        assert!(state.is_valid(bar, Rotation::R0, 0, 0));
        assert!(state.is_valid(bar, Rotation::R0, 6, 0));
        assert!(!state.is_valid(bar, Rotation::R0, -1, 0));
        assert!(!state.is_valid(bar, Rotation::R0, 7, 0));
        // Row 2 of the frame lands on row 19 when y = 17.
        assert!(state.is_valid(bar, Rotation::R0, 0, 17));
        assert!(!state.is_valid(bar, Rotation::R0, 0, 18));
    }

    #[test]
    fn test_is_valid_ignores_rows_above_top() {
        let mut state = scripted(&[1]);
        state.board.fill_row(0, 1);
        // Vertical bar at y = -4 has every cell above the board.
        assert!(state.is_valid(shape(1), Rotation::R0, 4, -4));
        assert!(!state.is_valid(shape(1), Rotation::R0, 4, -3));
    }

    #[test]
    fn test_is_valid_rejects_extreme_anchors() {
        let state = scripted(&[1]);
        let bar = shape(1);

        assert!(!state.is_valid(bar, Rotation::R0, i8::MAX, 0));
        assert!(!state.is_valid(bar, Rotation::R0, 0, i8::MAX));
        assert!(!state.is_valid(bar, Rotation::R0, i8::MIN, 0));
        // Every cell sits far above the board, which is open.
        assert!(state.is_valid(bar, Rotation::R0, 0, i8::MIN));
    }

    #[test]
    fn test_set_active_rejects_invalid_placement() {
        let mut state = scripted(&[1]);
        let spawned = state.active.unwrap();
        state.board.set(5, 10, 1);

        // Vertical bar occupies frame column 1, rows 0..4.
        assert!(!state.set_active(Tetromino { x: 9, ..spawned }));
        assert!(!state.set_active(Tetromino { y: 17, ..spawned }));
        assert!(!state.set_active(Tetromino { x: 4, y: 8, ..spawned }));
        assert!(!state.set_active(Tetromino { x: i8::MAX, ..spawned }));
        assert_eq!(state.active, Some(spawned));

        let resting = Tetromino { y: 16, ..spawned };
        assert!(state.set_active(resting));
        assert_eq!(state.active, Some(resting));

        state.phase = Phase::GameOver;
        assert!(!state.set_active(spawned));
    }

    #[test]
    fn test_try_move() {
        let mut state = scripted(&[6]);
        let x = state.active.unwrap().x;

        assert!(state.try_move(1));
        assert_eq!(state.active.unwrap().x, x + 1);
        assert!(state.try_move(-1));
        assert_eq!(state.active.unwrap().x, x);
    }

    #[test]
    fn test_try_move_stops_at_wall() {
        let mut state = scripted(&[0]);
        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1) {
                moved += 1;
            }
        }
        // Bar starts at x = 4 and occupies frame columns 0..4.
        assert_eq!(moved, 4);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_rotate_tracked_keeps_cells() {
        let mut state = scripted(&[0]);
        let before = state.active_cells();

        assert!(state.rotate());
        assert_eq!(state.active.unwrap().rotation, Rotation::R1);
        assert_eq!(state.active_cells(), before);
    }

    #[test]
    fn test_rotate_geometric_changes_cells() {
        let config = EngineConfig {
            rotation_model: RotationModel::Geometric,
            ..EngineConfig::default()
        };
        let mut state = GameState::with_source(ScriptedShapes::new(&[0]), config);

        assert!(state.rotate());
        assert_eq!(
            state.active_cells(),
            Some([(1, 0), (1, 1), (1, 2), (1, 3)])
        );
    }

    #[test]
    fn test_rotate_geometric_blocked_is_noop() {
        let config = EngineConfig {
            rotation_model: RotationModel::Geometric,
            ..EngineConfig::default()
        };
        let mut state = GameState::with_source(ScriptedShapes::new(&[0]), config);
        // Vertical orientation would occupy column x + 1 on rows 0..4.
        state.board.set(5, 3, 1);

        assert!(!state.rotate());
        assert_eq!(state.active.unwrap().rotation, Rotation::R0);
    }

    #[test]
    fn test_tick_moves_down_without_touching_board() {
        let mut state = scripted(&[6]);
        let before = state.active.unwrap();

        assert_eq!(state.tick(), Step::Moved);
        let after = state.active.unwrap();
        assert_eq!(after.y, before.y + 1);
        assert_eq!((after.x, after.rotation, after.shape), (before.x, before.rotation, before.shape));
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_tick_locks_when_blocked() {
        let mut state = scripted(&[6, 2]);
        // T-like shape occupies frame rows 2..4; y = 16 rests on the floor.
        assert!(state.set_active(Tetromino { y: 16, ..state.active.unwrap() }));

        assert_eq!(state.tick(), Step::Locked { lines: 0 });
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.pieces_locked, 1);
        let next = state.active.unwrap();
        assert_eq!(next.shape, shape(2));
        assert_eq!(next.y, SPAWN_Y);
    }

    #[test]
    fn test_soft_drop_matches_tick() {
        let mut a = scripted(&[4]);
        let mut b = scripted(&[4]);
        for _ in 0..30 {
            assert_eq!(a.tick(), b.soft_drop());
        }
        assert_eq!(a.board, b.board);
        assert_eq!(a.active, b.active);
    }

    #[test]
    fn test_clear_lines_scores_each_row() {
        let mut state = scripted(&[0]);
        state.board.fill_row(19, 1);
        state.board.fill_row(18, 1);
        state.board.set(0, 17, 1);

        assert_eq!(state.clear_lines(), 2);
        assert_eq!(state.score, INITIAL_SCORE + 2 * LINE_CLEAR_SCORE);
        assert!(state.board.is_occupied(0, 19));
        assert_eq!(state.board.filled_count(), 1);
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut state = scripted(&[6]);
        state.board.fill_row(5, 1);
        state.board.set(0, 5, 0);

        // Shape 6 covers frame rows 2 and 3. It locks at y = 1 on top of row 5,
        // and the next spawn overlaps the locked cell at (6, 3).
        let mut outcome = Step::Unchanged;
        for _ in 0..5 {
            outcome = state.tick();
            if outcome != Step::Moved {
                break;
            }
        }
        assert_eq!(
            outcome,
            Step::GameOver(GameOver {
                final_score: INITIAL_SCORE
            })
        );
        assert!(state.is_game_over());
        assert!(state.active.is_none());

        assert_eq!(state.tick(), Step::Unchanged);
        assert_eq!(state.soft_drop(), Step::Unchanged);
        assert!(!state.try_move(1));
        assert!(!state.rotate());
    }

    #[test]
    fn test_new_game_after_game_over() {
        let mut state = scripted(&[6]);
        state.board.fill_row(3, 1);
        state.score = 42;
        state.phase = Phase::GameOver;

        assert_eq!(state.apply_action(GameAction::NewGame), Step::Moved);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, INITIAL_SCORE);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_custom_initial_score() {
        let config = EngineConfig {
            initial_score: 0,
            ..EngineConfig::default()
        };
        let state = GameState::with_source(ScriptedShapes::new(&[1]), config);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_apply_action_blocked_move_is_unchanged() {
        let mut state = scripted(&[0]);
        assert!(state.set_active(Tetromino { x: 0, ..state.active.unwrap() }));
        assert_eq!(state.apply_action(GameAction::MoveLeft), Step::Unchanged);
        assert_eq!(state.apply_action(GameAction::MoveRight), Step::Moved);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = scripted(&[5]);
        state.board.set(2, 19, 3);

        let snap = state.snapshot();
        assert_eq!(snap.board[19][2], 3);
        assert_eq!(snap.score, INITIAL_SCORE);
        assert!(!snap.game_over);
        let active = snap.active.unwrap();
        assert_eq!(active.shape, shape(5));
        assert_eq!(Some(active.cells), state.active_cells());
    }
}
