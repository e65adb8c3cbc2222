use tracing::debug;

use crate::entities::{Entity, Rect};
use crate::input::HeldKeys;
use crate::projectiles::Bullet;
use crate::viewport::ViewportConfig;

/// Ticks between shots without rapid fire.
pub const NORMAL_COOLDOWN: u32 = 20;
/// Ticks between shots while rapid fire is active.
pub const RAPID_FIRE_COOLDOWN: u32 = 5;
/// Length of the speed and rapid-fire effects (5 s at 60 ticks/s).
pub const POWER_UP_DURATION: u32 = 300;

const SIZE: i32 = 50;
const BASE_SPEED: i32 = 5;
const BOTTOM_MARGIN: i32 = 10;

/// The player's ship. One instance lives for the whole session and is reset,
/// not recreated, when a new game starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub entity: Entity,
    pub speed: i32,
    pub normal_speed: i32,
    pub shoot_cooldown: u32,
    pub normal_cooldown: u32,
    pub rapid_fire_timer: u32,
    pub speed_boost_timer: u32,
}

impl Player {
    pub fn new(viewport: &ViewportConfig) -> Self {
        let normal_speed = viewport.scale_x(BASE_SPEED);
        let rect = Rect::new(0, 0, viewport.scale_x(SIZE), viewport.scale_y(SIZE));
        let mut player = Self {
            entity: Entity::new(rect, 0, 0),
            speed: normal_speed,
            normal_speed,
            shoot_cooldown: 0,
            normal_cooldown: NORMAL_COOLDOWN,
            rapid_fire_timer: 0,
            speed_boost_timer: 0,
        };
        player.anchor(viewport);
        player
    }

    pub fn rect(&self) -> Rect {
        self.entity.rect
    }

    pub fn rapid_fire_active(&self) -> bool {
        self.rapid_fire_timer > 0
    }

    pub fn speed_boost_active(&self) -> bool {
        self.speed_boost_timer > 0
    }

    /// Center horizontally with the bottom edge just above the screen bottom.
    pub fn anchor(&mut self, viewport: &ViewportConfig) {
        let rect = &mut self.entity.rect;
        rect.x = viewport.width / 2 - rect.w / 2;
        rect.y = viewport.height - viewport.scale_y(BOTTOM_MARGIN) - rect.h;
    }

    /// Advance one tick: movement from held keys, then cooldown and effect timers.
    pub fn update(&mut self, held: HeldKeys, viewport: &ViewportConfig) {
        let rect = self.entity.rect;
        let mut dx = 0;
        if held.left && rect.left() > 0 {
            dx -= self.speed;
        }
        if held.right && rect.right() < viewport.width {
            dx += self.speed;
        }
        self.entity.dx = dx;
        self.entity.advance();

        let max_x = (viewport.width - self.entity.rect.w).max(0);
        self.entity.rect.x = self.entity.rect.x.clamp(0, max_x);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        if self.rapid_fire_timer > 0 {
            self.rapid_fire_timer -= 1;
            if self.rapid_fire_timer == 0 {
                debug!("rapid fire expired");
                self.shoot_cooldown = self.normal_cooldown;
            }
        }

        if self.speed_boost_timer > 0 {
            self.speed_boost_timer -= 1;
            if self.speed_boost_timer == 0 {
                debug!("speed boost expired");
                self.speed = self.normal_speed;
            }
        }
    }

    /// Fire one bullet from the top-center if the cooldown has elapsed.
    /// Returns whether a bullet was spawned.
    pub fn shoot(&mut self, bullets: &mut Vec<Bullet>, viewport: &ViewportConfig) -> bool {
        if self.shoot_cooldown != 0 {
            return false;
        }
        let rect = self.entity.rect;
        bullets.push(Bullet::new(rect.center_x(), rect.top(), viewport));
        self.shoot_cooldown = if self.rapid_fire_active() {
            RAPID_FIRE_COOLDOWN
        } else {
            self.normal_cooldown
        };
        true
    }

    pub fn apply_rapid_fire(&mut self) {
        self.rapid_fire_timer = POWER_UP_DURATION;
        self.shoot_cooldown = RAPID_FIRE_COOLDOWN;
    }

    pub fn apply_speed_boost(&mut self) {
        self.speed_boost_timer = POWER_UP_DURATION;
        self.speed = self.normal_speed * 2;
    }

    pub fn reset(&mut self, viewport: &ViewportConfig) {
        self.anchor(viewport);
        self.entity.dx = 0;
        self.entity.alive = true;
        self.speed = self.normal_speed;
        self.shoot_cooldown = 0;
        self.rapid_fire_timer = 0;
        self.speed_boost_timer = 0;
    }
}
