/// Collision resolution, run once per tick after every entity has moved.
///
/// The three passes run in a fixed order so simultaneous events score
/// deterministically. Each pass only flips `alive` flags; the caller
/// compacts the collections afterwards.

use tracing::debug;

use crate::enemy::Enemy;
use crate::entities::PowerUpKind;
use crate::player::Player;
use crate::projectiles::{Bullet, PowerUp};

/// What a collision pass changed, for the state machine to apply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Points earned by bullet hits this tick.
    pub points: u32,
    /// Enemies destroyed by bullets.
    pub enemies_shot: usize,
    /// Whether the player rammed at least one enemy.
    pub player_hit: bool,
    /// Power-ups picked up, in collection order.
    pub pickups: Vec<PowerUpKind>,
}

/// Each live bullet kills the first live enemy it overlaps. Returns
/// (points earned, enemies destroyed).
pub fn resolve_bullets(bullets: &mut [Bullet], enemies: &mut [Enemy]) -> (u32, usize) {
    let mut points = 0;
    let mut kills = 0;
    for bullet in bullets.iter_mut().filter(|b| b.is_alive()) {
        let rect = bullet.rect();
        let target = enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.rect().overlaps(&rect));
        if let Some(enemy) = target {
            enemy.entity.kill();
            bullet.entity.kill();
            points += enemy.points();
            kills += 1;
        }
    }
    (points, kills)
}

/// Every live enemy touching the player is destroyed. The return value is
/// true if any were, and the caller takes exactly one life regardless of
/// how many.
pub fn resolve_player_enemies(player: &Player, enemies: &mut [Enemy]) -> bool {
    let mut hit = false;
    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        if enemy.rect().overlaps(&player.rect()) {
            enemy.entity.kill();
            hit = true;
        }
    }
    hit
}

/// Collect every live power-up touching the player.
pub fn resolve_pickups(player: &Player, power_ups: &mut [PowerUp]) -> Vec<PowerUpKind> {
    let mut picked = Vec::new();
    for power_up in power_ups.iter_mut().filter(|p| p.is_alive()) {
        if power_up.rect().overlaps(&player.rect()) {
            power_up.entity.kill();
            picked.push(power_up.kind);
        }
    }
    picked
}

/// Run all three passes in order.
pub fn resolve(
    player: &Player,
    bullets: &mut [Bullet],
    enemies: &mut [Enemy],
    power_ups: &mut [PowerUp],
) -> CollisionOutcome {
    let (points, enemies_shot) = resolve_bullets(bullets, enemies);
    let player_hit = resolve_player_enemies(player, enemies);
    let pickups = resolve_pickups(player, power_ups);
    if enemies_shot > 0 || player_hit || !pickups.is_empty() {
        debug!(points, enemies_shot, player_hit, ?pickups, "collisions resolved");
    }
    CollisionOutcome {
        points,
        enemies_shot,
        player_hit,
        pickups,
    }
}
