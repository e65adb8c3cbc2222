/// Player bullets and falling power-ups.
///
/// Both move in a straight line at a fixed speed and flag themselves dead
/// once fully off-screen; the owning collection compacts them afterwards.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{Entity, PowerUpKind, Rect};
use crate::viewport::ViewportConfig;

/// Chance per playing tick that a power-up appears.
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.01;

const BULLET_WIDTH: i32 = 10;
const BULLET_HEIGHT: i32 = 20;
const BULLET_SPEED: i32 = 10;

const POWER_UP_SIZE: i32 = 30;
const POWER_UP_SPEED: i32 = 3;

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub entity: Entity,
}

impl Bullet {
    /// A bullet whose bottom-center sits at (`center_x`, `bottom`).
    pub fn new(center_x: i32, bottom: i32, viewport: &ViewportConfig) -> Self {
        let w = viewport.scale_x(BULLET_WIDTH);
        let h = viewport.scale_y(BULLET_HEIGHT);
        let rect = Rect::new(center_x - w / 2, bottom - h, w, h);
        Self {
            entity: Entity::new(rect, 0, -viewport.scale_y(BULLET_SPEED)),
        }
    }

    pub fn rect(&self) -> Rect {
        self.entity.rect
    }

    pub fn is_alive(&self) -> bool {
        self.entity.alive
    }

    /// Upward speed in logical units per tick.
    pub fn speed(&self) -> i32 {
        -self.entity.dy
    }

    pub fn update(&mut self) {
        if !self.entity.alive {
            return;
        }
        self.entity.advance();
        if self.entity.rect.bottom() < 0 {
            self.entity.kill();
        }
    }
}

// ── Power-up ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub entity: Entity,
    pub kind: PowerUpKind,
}

impl PowerUp {
    /// A power-up at horizontal position `x`, resting just above the top edge.
    pub fn new(kind: PowerUpKind, x: i32, viewport: &ViewportConfig) -> Self {
        let w = viewport.scale_x(POWER_UP_SIZE);
        let h = viewport.scale_y(POWER_UP_SIZE);
        Self {
            entity: Entity::new(Rect::new(x, -h, w, h), 0, viewport.scale_y(POWER_UP_SPEED)),
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        self.entity.rect
    }

    pub fn is_alive(&self) -> bool {
        self.entity.alive
    }

    pub fn update(&mut self, viewport: &ViewportConfig) {
        if !self.entity.alive {
            return;
        }
        self.entity.advance();
        if self.entity.rect.top() > viewport.height {
            self.entity.kill();
        }
    }
}

/// Roll the per-tick spawn chance; on success pick a kind uniformly and a
/// random x that keeps the power-up fully on screen.
pub fn maybe_spawn_power_up(rng: &mut impl Rng, viewport: &ViewportConfig) -> Option<PowerUp> {
    if !rng.gen_bool(POWER_UP_SPAWN_CHANCE) {
        return None;
    }
    let kind = *PowerUpKind::ALL.choose(rng)?;
    let max_x = (viewport.width - viewport.scale_x(POWER_UP_SIZE)).max(0);
    let x = rng.gen_range(0..=max_x);
    Some(PowerUp::new(kind, x, viewport))
}
