use alien_invasion::assets::SpriteId;
use alien_invasion::compute::*;
use alien_invasion::enemy::Enemy;
use alien_invasion::entities::*;
use alien_invasion::input::{HeldKeys, InputEvent};
use alien_invasion::projectiles::{Bullet, PowerUp};
use alien_invasion::viewport::ViewportConfig;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const IDLE: HeldKeys = HeldKeys { left: false, right: false };

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_session() -> GameSession {
    GameSession::new(ViewportConfig::default(), 0)
}

/// A session already in PLAYING with no enemies, bullets or power-ups.
fn playing_session() -> GameSession {
    let mut s = make_session();
    s.status = GameStatus::Playing;
    s
}

fn enemy(tier: EnemyTier, rect: Rect) -> Enemy {
    Enemy {
        entity: Entity::new(rect, 0, tier.base_speed()),
        tier,
    }
}

/// An enemy sitting on the player; still overlapping after one tick of descent.
fn enemy_on_player(s: &GameSession) -> Enemy {
    let pr = s.player.rect();
    enemy(EnemyTier::Ten, Rect::new(pr.x, pr.y, 40, 40))
}

/// A far-away enemy that keeps the wave from being respawned.
fn bystander() -> Enemy {
    enemy(EnemyTier::Ten, Rect::new(0, -200, 40, 40))
}

// ── Session construction ──────────────────────────────────────────────────────

#[test]
fn new_session_starts_at_menu() {
    let s = GameSession::new(ViewportConfig::default(), 120);
    assert_eq!(s.status, GameStatus::Menu);
    assert_eq!(s.selected_option(), MenuOption::NewGame);
    assert_eq!(s.high_score, 120);
    assert_eq!(s.lives, MAX_LIVES);
    assert_eq!(s.target_score, TARGET_SCORE);
    assert_eq!(s.pending_high_score(), None);
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn menu_cursor_wraps_both_ways() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    handle_event(&mut s, InputEvent::Up, &mut rng);
    assert_eq!(s.selected_option(), MenuOption::Exit);
    handle_event(&mut s, InputEvent::Down, &mut rng);
    assert_eq!(s.selected_option(), MenuOption::NewGame);
    handle_event(&mut s, InputEvent::Down, &mut rng);
    assert_eq!(s.selected_option(), MenuOption::HighScore);
}

#[test]
fn confirm_new_game_starts_playing() {
    let mut s = make_session();
    s.score = 90;
    s.lives = 1;
    s.bullets.push(Bullet::new(10, 10, &s.viewport));
    s.power_ups.push(PowerUp::new(PowerUpKind::Heart, 10, &s.viewport));
    s.player.apply_speed_boost();

    let flow = handle_event(&mut s, InputEvent::Confirm, &mut seeded_rng());
    assert_eq!(flow, Flow::Continue);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.score, 0);
    assert_eq!(s.lives, 3);
    assert_eq!(s.enemies.len(), 10);
    assert!(s.bullets.is_empty());
    assert!(s.power_ups.is_empty());
    assert_eq!(s.player.speed, s.player.normal_speed);
    assert_eq!(s.player.rect().x, 375);
}

#[test]
fn confirm_high_score_is_a_no_op() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    handle_event(&mut s, InputEvent::Down, &mut rng);
    let flow = handle_event(&mut s, InputEvent::Confirm, &mut rng);
    assert_eq!(flow, Flow::Continue);
    assert_eq!(s.status, GameStatus::Menu);
}

#[test]
fn confirm_exit_terminates() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    handle_event(&mut s, InputEvent::Up, &mut rng);
    assert_eq!(handle_event(&mut s, InputEvent::Confirm, &mut rng), Flow::Exit);
}

#[test]
fn quit_terminates_from_any_state() {
    for status in [GameStatus::Menu, GameStatus::Playing, GameStatus::GameOver, GameStatus::Victory] {
        let mut s = make_session();
        s.status = status;
        assert_eq!(handle_event(&mut s, InputEvent::Quit, &mut seeded_rng()), Flow::Exit);
    }
}

#[test]
fn fire_in_menu_is_ignored() {
    let mut s = make_session();
    handle_event(&mut s, InputEvent::Fire, &mut seeded_rng());
    assert!(s.bullets.is_empty());
    assert_eq!(s.status, GameStatus::Menu);
}

// ── Playing input ─────────────────────────────────────────────────────────────

#[test]
fn fire_while_playing_shoots() {
    let mut s = playing_session();
    let mut rng = seeded_rng();
    handle_event(&mut s, InputEvent::Fire, &mut rng);
    handle_event(&mut s, InputEvent::Fire, &mut rng);
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn confirm_and_menu_keys_while_playing_are_ignored() {
    let mut s = playing_session();
    let mut rng = seeded_rng();
    for event in [InputEvent::Confirm, InputEvent::Up, InputEvent::Down] {
        assert_eq!(handle_event(&mut s, event, &mut rng), Flow::Continue);
    }
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.menu_cursor, 0);
}

// ── End screens ───────────────────────────────────────────────────────────────

#[test]
fn confirm_returns_to_menu_from_end_screens() {
    for status in [GameStatus::GameOver, GameStatus::Victory] {
        let mut s = make_session();
        s.status = status;
        let mut rng = seeded_rng();
        handle_event(&mut s, InputEvent::Fire, &mut rng);
        assert_eq!(s.status, status);
        handle_event(&mut s, InputEvent::Confirm, &mut rng);
        assert_eq!(s.status, GameStatus::Menu);
    }
}

// ── Resize ────────────────────────────────────────────────────────────────────

#[test]
fn resize_updates_viewport_and_recenters_player() {
    let mut s = playing_session();
    s.player.entity.rect.x = 0;
    handle_event(&mut s, InputEvent::Resize { width: 1600, height: 900 }, &mut seeded_rng());
    assert_eq!(s.viewport, ViewportConfig { width: 1600, height: 900 });
    assert_eq!(s.player.rect().center_x(), 800);
    assert_eq!(s.player.rect().bottom(), 900 - 15);
}

#[test]
fn resize_is_clamped_to_minimum() {
    let mut s = make_session();
    handle_event(&mut s, InputEvent::Resize { width: 100, height: 50 }, &mut seeded_rng());
    assert_eq!(s.viewport, ViewportConfig { width: 400, height: 300 });
    assert_eq!(s.player.rect().x, 175);
    assert_eq!(s.player.rect().bottom(), 295);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_outside_playing_does_nothing() {
    let mut s = make_session();
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.frame, 0);
    assert!(s.enemies.is_empty());
}

#[test]
fn tick_respawns_cleared_wave() {
    let mut s = playing_session();
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 10);
    assert_eq!(s.frame, 1);
}

#[test]
fn tick_moves_player_from_held_keys() {
    let mut s = playing_session();
    s.enemies.push(bystander());
    tick(&mut s, HeldKeys { left: true, right: false }, &mut seeded_rng());
    assert_eq!(s.player.rect().x, 370);
}

#[test]
fn tick_bullet_hit_scores_enemy_points() {
    let mut s = playing_session();
    s.enemies.push(bystander());
    // Bullet moves up 10, enemy moves down 4: both still overlap after moving
    s.bullets.push(Bullet::new(120, 340, &s.viewport));
    s.enemies.push(enemy(EnemyTier::Fifty, Rect::new(100, 300, 40, 40)));
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.score, 50);
    assert!(s.bullets.is_empty());
    assert_eq!(s.enemies.len(), 1, "only the bystander remains");
}

#[test]
fn tick_removes_off_screen_bullets() {
    let mut s = playing_session();
    s.enemies.push(bystander());
    s.bullets.push(Bullet::new(400, 5, &s.viewport));
    tick(&mut s, IDLE, &mut seeded_rng());
    assert!(s.bullets.is_empty());
}

#[test]
fn tick_player_hit_costs_one_life() {
    let mut s = playing_session();
    s.enemies.push(bystander());
    let rammer = enemy_on_player(&s);
    s.enemies.push(rammer);
    let rammer = enemy_on_player(&s);
    s.enemies.push(rammer);
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.lives, 2, "simultaneous hits cost a single life");
    assert_eq!(s.enemies.len(), 1, "both rammed enemies are destroyed");
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn tick_last_life_lost_is_game_over_and_records_high_score() {
    let mut s = playing_session();
    s.lives = 1;
    s.score = 120;
    s.high_score = 100;
    let rammer = enemy_on_player(&s);
    s.enemies.push(rammer);
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.lives, 0);
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.high_score, 120);
    assert_eq!(s.pending_high_score(), Some(120));
}

#[test]
fn tick_game_over_without_beating_high_score_keeps_it() {
    let mut s = playing_session();
    s.lives = 1;
    s.score = 40;
    s.high_score = 100;
    let rammer = enemy_on_player(&s);
    s.enemies.push(rammer);
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.high_score, 100);
    assert_eq!(s.pending_high_score(), None);
}

#[test]
fn tick_reaching_target_is_victory_same_tick() {
    let mut s = playing_session();
    s.score = 240;
    s.enemies.push(bystander());
    s.bullets.push(Bullet::new(120, 340, &s.viewport));
    s.enemies.push(enemy(EnemyTier::Ten, Rect::new(100, 300, 40, 40)));
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.score, TARGET_SCORE);
    assert_eq!(s.status, GameStatus::Victory);
    assert_eq!(s.pending_high_score(), Some(TARGET_SCORE));
}

#[test]
fn tick_just_short_of_target_keeps_playing() {
    let mut s = playing_session();
    s.score = 230;
    s.enemies.push(bystander());
    s.bullets.push(Bullet::new(120, 340, &s.viewport));
    s.enemies.push(enemy(EnemyTier::Ten, Rect::new(100, 300, 40, 40)));
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.score, 240);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn reaching_target_on_last_life_is_still_victory() {
    let mut s = playing_session();
    s.lives = 1;
    s.score = 240;
    s.high_score = 100;
    s.bullets.push(Bullet::new(120, 340, &s.viewport));
    s.enemies.push(enemy(EnemyTier::Ten, Rect::new(100, 300, 40, 40)));
    let rammer = enemy_on_player(&s);
    s.enemies.push(rammer);
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.score, TARGET_SCORE);
    assert_eq!(s.lives, 0);
    assert_eq!(s.status, GameStatus::Victory);
    assert_eq!(s.pending_high_score(), Some(TARGET_SCORE));
    assert!(s.enemies.is_empty(), "no wave after the game ends");
}

#[test]
fn new_best_is_set_only_by_beating_the_record() {
    let mut s = playing_session();
    s.lives = 1;
    s.score = 100;
    s.high_score = 100;
    let rammer = enemy_on_player(&s);
    s.enemies.push(rammer);
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.status, GameStatus::GameOver);
    assert!(!s.new_best, "tying the record is not a new best");

    let mut s = playing_session();
    s.lives = 1;
    s.score = 101;
    s.high_score = 100;
    let rammer = enemy_on_player(&s);
    s.enemies.push(rammer);
    tick(&mut s, IDLE, &mut seeded_rng());
    assert!(s.new_best);

    s.status = GameStatus::Menu;
    s.menu_cursor = 0;
    handle_event(&mut s, InputEvent::Confirm, &mut seeded_rng());
    assert!(!s.new_best, "cleared when the next game starts");
}

#[test]
fn victory_does_not_respawn_wave() {
    let mut s = playing_session();
    s.score = 240;
    s.bullets.push(Bullet::new(120, 340, &s.viewport));
    s.enemies.push(enemy(EnemyTier::Ten, Rect::new(100, 300, 40, 40)));
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.status, GameStatus::Victory);
    assert!(s.enemies.is_empty());
}

// ── tick: power-up pickups ────────────────────────────────────────────────────

fn power_up_on_player(s: &GameSession, kind: PowerUpKind) -> PowerUp {
    let mut p = PowerUp::new(kind, s.player.rect().x, &s.viewport);
    p.entity.rect.y = s.player.rect().y;
    p
}

#[test]
fn heart_at_max_lives_is_consumed_without_effect() {
    let mut s = playing_session();
    s.enemies.push(bystander());
    let power_up = power_up_on_player(&s, PowerUpKind::Heart);
    s.power_ups.push(power_up);
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.lives, MAX_LIVES);
    assert!(s.power_ups.iter().all(|p| p.kind != PowerUpKind::Heart || p.rect().y < 0));
}

#[test]
fn heart_below_max_adds_a_life() {
    let mut s = playing_session();
    s.lives = 1;
    s.enemies.push(bystander());
    let power_up = power_up_on_player(&s, PowerUpKind::Heart);
    s.power_ups.push(power_up);
    tick(&mut s, IDLE, &mut seeded_rng());
    assert_eq!(s.lives, 2);
}

#[test]
fn speed_and_rapid_fire_pickups_apply_to_player() {
    let mut s = playing_session();
    s.enemies.push(bystander());
    let power_up = power_up_on_player(&s, PowerUpKind::Speed);
    s.power_ups.push(power_up);
    let power_up = power_up_on_player(&s, PowerUpKind::RapidFire);
    s.power_ups.push(power_up);
    tick(&mut s, IDLE, &mut seeded_rng());
    assert!(s.player.speed_boost_active());
    assert!(s.player.rapid_fire_active());
    assert_eq!(s.player.speed, 2 * s.player.normal_speed);
}

// ── Invariants over a long random game ────────────────────────────────────────

#[test]
fn lives_and_score_stay_in_range() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    let mut input_rng = StdRng::seed_from_u64(7);
    let mut games = 0;

    for _ in 0..20_000 {
        if s.status != GameStatus::Playing {
            s.status = GameStatus::Menu;
            s.menu_cursor = 0;
            handle_event(&mut s, InputEvent::Confirm, &mut rng);
            games += 1;
        }
        if input_rng.gen_bool(0.5) {
            handle_event(&mut s, InputEvent::Fire, &mut rng);
        }
        let held = HeldKeys {
            left: input_rng.gen_bool(0.3),
            right: input_rng.gen_bool(0.3),
        };
        let before = s.score;
        tick(&mut s, held, &mut rng);
        assert!(s.lives <= s.max_lives);
        assert!(s.score >= before);
        if s.status == GameStatus::Playing {
            assert!(s.lives > 0);
            assert!(s.score < s.target_score);
            assert!(!s.enemies.is_empty());
        }
        assert!(s.bullets.iter().all(Bullet::is_alive));
        assert!(s.enemies.iter().all(Enemy::is_alive));
        assert!(s.power_ups.iter().all(PowerUp::is_alive));
    }
    assert!(games >= 1);
}

// ── Draw list ─────────────────────────────────────────────────────────────────

#[test]
fn draw_list_covers_every_entity() {
    let mut s = playing_session();
    s.bullets.push(Bullet::new(100, 100, &s.viewport));
    s.enemies.push(enemy(EnemyTier::Thirty, Rect::new(0, 0, 40, 40)));
    s.power_ups.push(PowerUp::new(PowerUpKind::Heart, 50, &s.viewport));
    s.power_ups.push(PowerUp::new(PowerUpKind::Speed, 90, &s.viewport));

    let sprites: Vec<SpriteId> = draw_list(&s).iter().map(|c| c.sprite).collect();
    assert_eq!(
        sprites,
        vec![
            SpriteId::Spaceship,
            SpriteId::Bullet,
            SpriteId::Alien30,
            SpriteId::HeartPowerUp,
            SpriteId::PowerUp,
        ]
    );
    assert_eq!(draw_list(&s)[0].rect, s.player.rect());
}
