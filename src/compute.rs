/// Game-state machine and the per-tick simulation step.
///
/// All state lives in one [`GameSession`] that the loop owns and lends out
/// by `&mut`. Randomness is injected so callers control determinism (tests
/// use a seeded RNG). Nothing here touches the terminal or the filesystem.

use rand::Rng;
use tracing::{debug, info};

use crate::assets::SpriteId;
use crate::collision;
use crate::enemy::{self, Enemy};
use crate::entities::{GameStatus, MenuOption, PowerUpKind, Rect};
use crate::input::{HeldKeys, InputEvent};
use crate::player::Player;
use crate::projectiles::{self, Bullet, PowerUp};
use crate::viewport::ViewportConfig;

pub const MAX_LIVES: u32 = 3;
pub const TARGET_SCORE: u32 = 250;

/// Whether the loop should keep running after an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One sprite to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCommand {
    pub rect: Rect,
    pub sprite: SpriteId,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameSession {
    pub viewport: ViewportConfig,
    pub status: GameStatus,
    /// Index into [`MenuOption::ALL`].
    pub menu_cursor: usize,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub score: u32,
    pub lives: u32,
    pub max_lives: u32,
    pub target_score: u32,
    pub high_score: u32,
    /// Set when `high_score` changed and has not been written out yet.
    pub high_score_unsaved: bool,
    /// A failed write of the pending high score was already reported.
    pub high_score_save_failed: bool,
    /// The current game beat the best score it started with.
    pub new_best: bool,
    /// Playing ticks since the current game started.
    pub frame: u64,
}

impl GameSession {
    /// A fresh session sitting at the main menu.
    pub fn new(viewport: ViewportConfig, high_score: u32) -> Self {
        Self {
            viewport,
            status: GameStatus::Menu,
            menu_cursor: 0,
            player: Player::new(&viewport),
            enemies: Vec::new(),
            bullets: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            lives: MAX_LIVES,
            max_lives: MAX_LIVES,
            target_score: TARGET_SCORE,
            high_score,
            high_score_unsaved: false,
            high_score_save_failed: false,
            new_best: false,
            frame: 0,
        }
    }

    pub fn selected_option(&self) -> MenuOption {
        MenuOption::ALL[self.menu_cursor % MenuOption::ALL.len()]
    }

    /// The high score, if it still has to be persisted.
    pub fn pending_high_score(&self) -> Option<u32> {
        self.high_score_unsaved.then_some(self.high_score)
    }

    pub fn mark_high_score_saved(&mut self) {
        self.high_score_unsaved = false;
        self.high_score_save_failed = false;
    }

    fn record_high_score(&mut self) {
        if self.score > self.high_score {
            info!(score = self.score, previous = self.high_score, "new high score");
            self.high_score = self.score;
            self.high_score_unsaved = true;
            self.high_score_save_failed = false;
            self.new_best = true;
        }
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

/// MENU → PLAYING: reset score, lives, player and entity sets, then bring
/// in a full wave.
pub fn start_new_game(session: &mut GameSession, rng: &mut impl Rng) {
    session.score = 0;
    session.lives = session.max_lives;
    session.frame = 0;
    session.new_best = false;
    session.player.reset(&session.viewport);
    session.bullets.clear();
    session.power_ups.clear();
    enemy::spawn_wave(&mut session.enemies, rng, &session.viewport);
    session.status = GameStatus::Playing;
    info!("new game started");
}

/// Apply one discrete input event. Events that mean nothing in the current
/// state are ignored.
pub fn handle_event(session: &mut GameSession, event: InputEvent, rng: &mut impl Rng) -> Flow {
    match event {
        InputEvent::Quit => return Flow::Exit,
        InputEvent::Resize { width, height } => {
            session.viewport.resize(width, height);
            session.player.anchor(&session.viewport);
            debug!(width = session.viewport.width, height = session.viewport.height, "viewport resized");
            return Flow::Continue;
        }
        _ => {}
    }

    match (session.status, event) {
        (GameStatus::Menu, InputEvent::Up) => {
            let n = MenuOption::ALL.len();
            session.menu_cursor = (session.menu_cursor + n - 1) % n;
        }
        (GameStatus::Menu, InputEvent::Down) => {
            session.menu_cursor = (session.menu_cursor + 1) % MenuOption::ALL.len();
        }
        (GameStatus::Menu, InputEvent::Confirm) => match session.selected_option() {
            MenuOption::NewGame => start_new_game(session, rng),
            // The best score is always shown on the menu itself.
            MenuOption::HighScore => {}
            MenuOption::Exit => return Flow::Exit,
        },
        (GameStatus::Playing, InputEvent::Fire) => {
            session.player.shoot(&mut session.bullets, &session.viewport);
        }
        (GameStatus::GameOver | GameStatus::Victory, InputEvent::Confirm) => {
            session.status = GameStatus::Menu;
        }
        _ => {}
    }
    Flow::Continue
}

// ── Per-tick simulation ───────────────────────────────────────────────────────

/// Advance one tick while playing: move everything, maybe drop a power-up,
/// resolve collisions, then check for game over, victory and a cleared wave.
pub fn tick(session: &mut GameSession, held: HeldKeys, rng: &mut impl Rng) {
    if session.status != GameStatus::Playing {
        return;
    }
    session.frame += 1;
    let viewport = session.viewport;

    // ── 1. Move ───────────────────────────────────────────────────────────────
    session.player.update(held, &viewport);
    for bullet in &mut session.bullets {
        bullet.update();
    }
    for enemy in &mut session.enemies {
        enemy.update(rng, &viewport);
    }
    for power_up in &mut session.power_ups {
        power_up.update(&viewport);
    }
    if let Some(power_up) = projectiles::maybe_spawn_power_up(rng, &viewport) {
        debug!(frame = session.frame, kind = ?power_up.kind, x = power_up.rect().x, "power-up spawned");
        session.power_ups.push(power_up);
    }

    // ── 2. Collide ────────────────────────────────────────────────────────────
    let outcome = collision::resolve(
        &session.player,
        &mut session.bullets,
        &mut session.enemies,
        &mut session.power_ups,
    );
    session.score += outcome.points;

    if outcome.player_hit {
        session.lives = session.lives.saturating_sub(1);
        if session.lives == 0 {
            info!(score = session.score, frame = session.frame, "game over");
            session.status = GameStatus::GameOver;
            session.record_high_score();
        }
    }

    for kind in outcome.pickups {
        match kind {
            PowerUpKind::Speed => session.player.apply_speed_boost(),
            PowerUpKind::RapidFire => session.player.apply_rapid_fire(),
            PowerUpKind::Heart => {
                if session.lives < session.max_lives {
                    session.lives += 1;
                }
            }
        }
    }

    session.bullets.retain(Bullet::is_alive);
    session.enemies.retain(Enemy::is_alive);
    session.power_ups.retain(PowerUp::is_alive);

    // ── 3. Win / respawn ──────────────────────────────────────────────────────
    // Reaching the target wins even if the last life went on this same tick.
    if session.score >= session.target_score {
        info!(score = session.score, frame = session.frame, "victory");
        session.status = GameStatus::Victory;
        session.record_high_score();
        return;
    }
    if session.status == GameStatus::Playing && session.enemies.is_empty() {
        enemy::spawn_wave(&mut session.enemies, rng, &viewport);
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Every live entity paired with its sprite, back to front.
pub fn draw_list(session: &GameSession) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        1 + session.bullets.len() + session.enemies.len() + session.power_ups.len(),
    );
    commands.push(DrawCommand {
        rect: session.player.rect(),
        sprite: SpriteId::Spaceship,
    });
    commands.extend(session.bullets.iter().filter(|b| b.is_alive()).map(|b| DrawCommand {
        rect: b.rect(),
        sprite: SpriteId::Bullet,
    }));
    commands.extend(session.enemies.iter().filter(|e| e.is_alive()).map(|e| DrawCommand {
        rect: e.rect(),
        sprite: SpriteId::for_enemy(e.tier),
    }));
    commands.extend(session.power_ups.iter().filter(|p| p.is_alive()).map(|p| DrawCommand {
        rect: p.rect(),
        sprite: SpriteId::for_power_up(p.kind),
    }));
    commands
}
