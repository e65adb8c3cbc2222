/// Fixed-rate driver: input → update → collision → persist → draw, once per
/// tick, then sleep out the rest of the tick budget.

use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::compute::{self, Flow, GameSession};
use crate::error::GameError;
use crate::high_score::HighScoreStore;
use crate::input::InputSource;

pub const DEFAULT_FPS: u32 = 60;

pub trait Renderer {
    /// Draw the whole frame for the current session state.
    fn render(&mut self, session: &GameSession) -> Result<(), GameError>;
}

/// Sleeps away whatever is left of each tick's time budget.
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    budget: Option<Duration>,
}

impl FramePacer {
    /// `fps` is clamped to at least 1.
    pub fn new(fps: u32) -> Self {
        Self {
            budget: Some(Duration::from_secs(1) / fps.max(1)),
        }
    }

    /// Never sleeps. Used for headless runs.
    pub fn unpaced() -> Self {
        Self { budget: None }
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    pub fn wait(&self, tick_start: Instant) {
        if let Some(budget) = self.budget {
            let elapsed = tick_start.elapsed();
            if elapsed < budget {
                thread::sleep(budget - elapsed);
            }
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

/// Write a freshly achieved high score. On failure the score stays pending so
/// a later call can retry; only the first failure per score is a warning.
pub fn persist_high_score(session: &mut GameSession, store: &mut impl HighScoreStore) {
    let Some(score) = session.pending_high_score() else {
        return;
    };
    match store.save(score) {
        Ok(()) => session.mark_high_score_saved(),
        Err(e) if session.high_score_save_failed => debug!("{e}; retrying"),
        Err(e) => {
            warn!("{e}; will retry");
            session.high_score_save_failed = true;
        }
    }
}

/// Run until the player quits. The pending high score is flushed on the way
/// out, including when rendering or input fails.
pub fn run(
    session: &mut GameSession,
    input: &mut impl InputSource,
    renderer: &mut impl Renderer,
    store: &mut impl HighScoreStore,
    rng: &mut impl Rng,
    pacer: FramePacer,
) -> Result<u64, GameError> {
    let result = drive(session, input, renderer, store, rng, pacer);
    persist_high_score(session, store);
    if let Ok(ticks) = &result {
        info!(ticks, high_score = session.high_score, "game loop finished");
    }
    result
}

fn drive(
    session: &mut GameSession,
    input: &mut impl InputSource,
    renderer: &mut impl Renderer,
    store: &mut impl HighScoreStore,
    rng: &mut impl Rng,
    pacer: FramePacer,
) -> Result<u64, GameError> {
    let mut ticks: u64 = 0;
    loop {
        let tick_start = Instant::now();

        let frame = input.poll()?;
        for event in frame.events {
            if compute::handle_event(session, event, rng) == Flow::Exit {
                return Ok(ticks);
            }
        }

        compute::tick(session, frame.held, rng);
        persist_high_score(session, store);
        renderer.render(session)?;
        ticks += 1;

        pacer.wait(tick_start);
    }
}
