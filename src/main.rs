//! Terminal driver (default binary).
//!
//! Owns the engine, calls `tick` on a fixed period, forwards key presses as
//! actions and redraws after every change. The engine itself never sees time
//! or the terminal.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use tracing::{debug, info};

use tetrion::core::{EngineConfig, GameOver, GameState, Phase, SimpleRng, Step};
use tetrion::input::{handle_key_event, is_press, should_quit};
use tetrion::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetrion::types::{GameAction, RotationModel, INITIAL_SCORE, TICK_MS};

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "tetrion",
    version,
    about = "Falling-block puzzle on a 10x20 grid.",
    long_about = "Falling-block puzzle on a 10x20 grid.\n\n\
        CONTROLS:\n  Left/Right (h/l, a/d)  Move    Up (k/w)  Rotate    Down (j/s)  Drop one row\n  \
        r  New game    q / Esc  Quit"
)]
struct Args {
    /// Seed for shape selection. A random seed is used when omitted.
    #[arg(long, value_name = "N")]
    seed: Option<u32>,

    /// Gravity step interval in milliseconds.
    #[arg(long, default_value_t = TICK_MS as u64, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Score every game starts with.
    #[arg(long, default_value_t = INITIAL_SCORE, value_name = "N")]
    initial_score: u32,

    /// Whether rotating changes the occupied cells (geometric) or only the rotation index (tracked).
    #[arg(long, value_enum, default_value_t = RotationArg::Tracked)]
    rotation: RotationArg,

    /// Write logs to this file. Logging is off otherwise, since the game owns the terminal.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Maximum log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    log_level: tracing::Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RotationArg {
    Tracked,
    Geometric,
}

impl From<RotationArg> for RotationModel {
    fn from(value: RotationArg) -> Self {
        match value {
            RotationArg::Tracked => RotationModel::Tracked,
            RotationArg::Geometric => RotationModel::Geometric,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(over) = result? {
        println!("Game Over!\nScore: {}", over.final_score);
    }
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Play until the user quits. Returns the game-over report if the last game ended.
fn run(term: &mut TerminalRenderer, args: &Args) -> Result<Option<GameOver>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = EngineConfig {
        initial_score: args.initial_score,
        rotation_model: args.rotation.into(),
    };
    info!(seed, tick_ms = args.tick_ms, ?config, "starting");

    let mut game = GameState::with_source(SimpleRng::new(seed), config);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(args.tick_ms);
    let mut last_tick = Instant::now();
    let mut ended: Option<GameOver> = None;
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        return Ok(ended);
                    }
                    if let Some(action) = handle_key_event(key) {
                        if action == GameAction::NewGame {
                            ended = None;
                            last_tick = Instant::now();
                        }
                        let step = game.apply_action(action);
                        debug!(action = action.as_str(), ?step, "input");
                        dirty |= record(step, &mut ended);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            // The timer halts once the game is over; only a new game restarts it.
            if game.phase() == Phase::Playing {
                dirty |= record(game.tick(), &mut ended);
            }
        }
    }
}

/// Note a game-over step and report whether a redraw is needed.
fn record(step: Step, ended: &mut Option<GameOver>) -> bool {
    if let Step::GameOver(over) = step {
        *ended = Some(over);
    }
    step.changed()
}
