mod display;
mod keyboard;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use alien_invasion::assets::AssetLibrary;
use alien_invasion::compute::GameSession;
use alien_invasion::config::Config;
use alien_invasion::game_loop::{self, FramePacer};
use alien_invasion::high_score::{FileHighScore, HighScoreStore};

use display::TerminalRenderer;
use keyboard::KeyboardInput;

/// Logs go to a file because the terminal is busy drawing the game.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_logging(&config)?;

    let mut store = FileHighScore::new(config.high_score_path());
    let assets = AssetLibrary::load(config.assets_dir.as_deref());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    let (keyboard_enhanced, result) = match enter_game_screen(&mut out) {
        Ok(enhanced) => (enhanced, run(&config, &mut out, &mut store, assets)),
        Err(e) => (false, Err(e)),
    };

    // Always restore the terminal, even when setup only got half way
    restore_terminal(&mut out, keyboard_enhanced);

    result
}

/// Raw mode, alternate screen, hidden cursor. Returns whether the terminal
/// accepted the keyboard enhancement flags.
fn enter_game_screen<W: Write>(out: &mut W) -> Result<bool> {
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    Ok(out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok())
}

fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn run<W: Write>(
    config: &Config,
    out: &mut W,
    store: &mut FileHighScore,
    assets: AssetLibrary,
) -> Result<()> {
    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let mut session = GameSession::new(display::viewport_for(cols, rows), store.load());

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut input = KeyboardInput::new(keyboard::spawn_reader());
    let mut renderer = TerminalRenderer::new(out, assets);

    info!(
        high_score = session.high_score,
        path = %store.path().display(),
        fps = config.fps,
        "starting"
    );
    game_loop::run(
        &mut session,
        &mut input,
        &mut renderer,
        store,
        &mut rng,
        FramePacer::new(config.fps),
    )?;
    Ok(())
}
