use tetrion::core::{GameSnapshot, GameState, ScriptedShapes, EngineConfig};
use tetrion::term::{GameView, Viewport};
use tetrion::types::INITIAL_SCORE;

fn screen_text(fb: &tetrion::term::FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With 2x1 cells: board = 20x20, plus border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board[19][0] = 1;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let y0 = 1 + 19;
    assert_eq!(fb.get(1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(2, y0).unwrap().ch, '█');
    assert_eq!(fb.get(3, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_distinct_from_board() {
    // Vertical bar spawns at x = 4, occupying board column 5 on rows 0..4.
    let game = GameState::with_source(ScriptedShapes::new(&[1]), EngineConfig::default());
    let mut snap = game.snapshot();
    snap.board[19][5] = 1;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let active = fb.get(1 + 5 * 2, 1).unwrap();
    let locked = fb.get(1 + 5 * 2, 1 + 19).unwrap();
    assert_eq!(active.ch, '█');
    assert_eq!(locked.ch, '█');
    assert_ne!(active.style, locked.style);
    // Nothing drawn below the bar's last cell on row 3.
    assert_eq!(fb.get(1 + 5 * 2, 1 + 4).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;

    let text = screen_text(&GameView::default().render(&snap, Viewport::new(60, 22)));
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));

    let narrow = screen_text(&GameView::default().render(&snap, Viewport::new(22, 22)));
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn term_view_shows_final_score_on_game_over() {
    let mut snap = GameState::new(3).snapshot();
    snap.game_over = true;
    snap.active = None;

    let text = screen_text(&GameView::default().render(&snap, Viewport::new(40, 24)));
    assert!(text.contains("GAME OVER"));
    assert!(text.contains(&format!("Score: {INITIAL_SCORE}")));
}

#[test]
fn term_view_survives_tiny_viewport() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}
