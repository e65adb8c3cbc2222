/// Descending aliens and the wave spawner that creates them.

use rand::Rng;
use tracing::info;

use crate::entities::{EnemyTier, Entity, Rect};
use crate::viewport::ViewportConfig;

const SIZE: i32 = 40;
/// Vertical band above the screen that enemies (re)enter from.
const ENTRY_MIN_Y: i32 = -100;
const ENTRY_MAX_Y: i32 = -40;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub entity: Entity,
    pub tier: EnemyTier,
}

impl Enemy {
    /// A new enemy placed at a random spot above the screen.
    pub fn spawn(tier: EnemyTier, rng: &mut impl Rng, viewport: &ViewportConfig) -> Self {
        let rect = Rect::new(0, 0, viewport.scale_x(SIZE), viewport.scale_y(SIZE));
        let mut enemy = Self {
            entity: Entity::new(rect, 0, viewport.scale_y(tier.base_speed())),
            tier,
        };
        enemy.reenter(rng, viewport);
        enemy
    }

    pub fn rect(&self) -> Rect {
        self.entity.rect
    }

    pub fn is_alive(&self) -> bool {
        self.entity.alive
    }

    pub fn points(&self) -> u32 {
        self.tier.points()
    }

    pub fn descent_speed(&self) -> i32 {
        self.entity.dy
    }

    /// Move down; once the top edge is past the bottom of the screen, come
    /// back in from above instead of being destroyed.
    pub fn update(&mut self, rng: &mut impl Rng, viewport: &ViewportConfig) {
        if !self.entity.alive {
            return;
        }
        self.entity.advance();
        if self.entity.rect.top() > viewport.height {
            self.reenter(rng, viewport);
        }
    }

    fn reenter(&mut self, rng: &mut impl Rng, viewport: &ViewportConfig) {
        let rect = &mut self.entity.rect;
        let max_x = (viewport.width - rect.w).max(0);
        rect.x = rng.gen_range(0..=max_x);
        rect.y = rng.gen_range(viewport.scale_y(ENTRY_MIN_Y)..=viewport.scale_y(ENTRY_MAX_Y));
    }
}

// ── Wave spawning ─────────────────────────────────────────────────────────────

/// Replace `enemies` with a fresh wave: 5 ten-pointers, 3 thirty-pointers
/// and 2 fifty-pointers, all above the screen.
pub fn spawn_wave(enemies: &mut Vec<Enemy>, rng: &mut impl Rng, viewport: &ViewportConfig) {
    enemies.clear();
    for tier in EnemyTier::ALL {
        for _ in 0..tier.wave_count() {
            enemies.push(Enemy::spawn(tier, rng, viewport));
        }
    }
    info!(count = enemies.len(), "spawned enemy wave");
}

/// Number of enemies in a full wave.
pub fn wave_size() -> usize {
    EnemyTier::ALL.iter().map(|t| t.wave_count()).sum()
}
