//! Combat Tests - Weapon, Player, Enemy AI and Bullets
//!
//! Drives the combat pieces directly, without the controller, using a
//! seeded RNG and the headless frontend as scene/audio collaborator.

use glam::{Vec2, Vec3};
use manor_arena_engine::game::config::{EnemyKind, GameConfig};
use manor_arena_engine::game::enemy::{EnemyContext, Neighbors};
use manor_arena_engine::game::{
    AiState, AudioCue, BulletOwner, BulletPool, Enemy, GameRng, HeadlessFrontend, Player, Weapon,
};
use manor_arena_engine::input::InputFrame;
use manor_arena_engine::physics::Collider;

const DT: f32 = 1.0 / 60.0;

// ============================================================================
// Weapon
// ============================================================================

#[test]
fn test_full_magazine_then_auto_reload() {
    let config = GameConfig::default();
    let mut weapon = Weapon::new(&config.weapon);
    assert_eq!(weapon.mag_size, 30);

    for shot in 0..30 {
        assert!(weapon.can_fire(), "shot {shot} should be allowed");
        assert!(weapon.fire());
        if shot < 29 {
            weapon.update(1.0 / weapon.fire_rate);
        }
    }
    assert_eq!(weapon.ammo(), 0);
    assert!(weapon.is_reloading());
    assert!(!weapon.can_fire());

    // 1.5 s in quarter-second steps
    for _ in 0..5 {
        weapon.update(0.25);
        assert!(weapon.is_reloading());
    }
    weapon.update(0.25);
    assert!(!weapon.is_reloading());
    assert_eq!(weapon.ammo(), 30);
}

#[test]
fn test_ammo_stays_within_magazine() {
    let config = GameConfig::default();
    let mut weapon = Weapon::new(&config.weapon);
    let mut rng = GameRng::from_seed(11);

    for _ in 0..2000 {
        let roll = rng.random_f32();
        if roll < 0.6 {
            let was_reloading = weapon.is_reloading();
            let before = weapon.ammo();
            if weapon.fire() {
                assert!(!was_reloading);
                assert_eq!(weapon.ammo(), before - 1);
            }
        } else if roll < 0.7 {
            weapon.start_reload();
        } else {
            weapon.update(rng.random_range(0.0, 0.2));
        }
        assert!(weapon.ammo() <= weapon.mag_size);
    }
}

// ============================================================================
// Player
// ============================================================================

#[test]
fn test_regen_after_delay() {
    let config = GameConfig::default();
    let mut player = Player::new(&config);
    let mut camera = HeadlessFrontend::new();
    let idle = InputFrame::default();

    player.take_damage(40.0);
    assert_eq!(player.health, 60.0);
    assert_eq!(player.time_since_hit, 0.0);

    // 3 s of delay plus 2 s of regeneration
    for _ in 0..20 {
        player.update(0.25, &idle, &mut camera, &[]);
    }
    assert!((player.health - 70.0).abs() < 1e-3, "health {}", player.health);

    // Capped at max
    for _ in 0..40 {
        player.update(0.25, &idle, &mut camera, &[]);
    }
    assert_eq!(player.health, player.max_health);
}

#[test]
fn test_regen_independent_of_tick_size() {
    let config = GameConfig::default();
    let mut camera = HeadlessFrontend::new();
    let idle = InputFrame::default();

    let mut coarse = Player::new(&config);
    let mut fine = Player::new(&config);
    coarse.take_damage(50.0);
    fine.take_damage(50.0);

    // 4 s either way; 0.4 straddles the 3 s delay boundary
    for _ in 0..10 {
        coarse.update(0.4, &idle, &mut camera, &[]);
    }
    for _ in 0..400 {
        fine.update(0.01, &idle, &mut camera, &[]);
    }
    assert!((coarse.health - 55.0).abs() < 1e-2, "coarse {}", coarse.health);
    assert!((fine.health - 55.0).abs() < 1e-2, "fine {}", fine.health);
}

#[test]
fn test_player_slides_along_wall() {
    let config = GameConfig::default();
    let mut player = Player::new(&config);
    let mut camera = HeadlessFrontend::new();
    // Wall across +Z just ahead of the player
    let wall = Collider::new(0.0, 1.0, 10.0, 0.2, 3.0);

    // Forward-right diagonal: Z is blocked, X keeps going
    let input = InputFrame {
        movement: Vec2::new(1.0, 1.0),
        ..Default::default()
    };
    for _ in 0..30 {
        player.update(DT, &input, &mut camera, &[wall]);
    }
    assert!(player.position.z + player.footprint.half_depth <= 0.8 + 1e-4);
    assert!(player.position.x.abs() > 1.0);
}

// ============================================================================
// Enemy AI
// ============================================================================

fn tick_enemy(
    enemy: &mut Enemy,
    player_position: Vec3,
    bullets: &mut BulletPool,
    rng: &mut GameRng,
    io: &mut HeadlessFrontend,
) {
    let mut ctx = EnemyContext {
        player_position,
        colliders: &[],
        bullets,
        rng,
        enemy_bullet_speed: 30.0,
    };
    enemy.update(DT, &mut ctx, io, Neighbors::none());
}

#[test]
fn test_enemy_idle_chase_attack_and_fire_cadence() {
    let mut rng = GameRng::from_seed(21);
    let mut io = HeadlessFrontend::new();
    let mut bullets = BulletPool::new(64, 10.0);
    let mut enemy = Enemy::new(EnemyKind::Grunt, Vec3::ZERO, &mut rng);
    let stats = enemy.stats;

    // Far away: stays idle
    let far = Vec3::new(0.0, 0.0, stats.detection_range * 3.0);
    tick_enemy(&mut enemy, far, &mut bullets, &mut rng, &mut io);
    assert!(matches!(enemy.state(), AiState::Idle { .. }));

    // Inside detection, outside attack range: chase on the next update
    let near = Vec3::new(0.0, 0.0, (stats.detection_range + stats.attack_range) / 2.0);
    tick_enemy(&mut enemy, near, &mut bullets, &mut rng, &mut io);
    assert_eq!(enemy.state(), AiState::Chase);

    // Well inside attack range: attack, without moving any closer
    let close = enemy.position + Vec3::new(0.0, 0.0, stats.attack_range * 0.5);
    tick_enemy(&mut enemy, close, &mut bullets, &mut rng, &mut io);
    assert_eq!(enemy.state(), AiState::Attack);

    // Collect the ticks on which shots were fired
    let mut shot_ticks = Vec::new();
    for tick in 0..(60 * 8) {
        let before = io.cue_count(AudioCue::EnemyShoot);
        tick_enemy(&mut enemy, close, &mut bullets, &mut rng, &mut io);
        if io.cue_count(AudioCue::EnemyShoot) > before {
            shot_ticks.push(tick);
        }
        assert_eq!(enemy.state(), AiState::Attack);
    }

    // First shot within the 1-3 s opening cooldown, then one per 1/fire_rate
    assert!(shot_ticks.len() >= 5, "shots at {shot_ticks:?}");
    assert!(shot_ticks[0] <= 3 * 60);
    let period = (60.0 / stats.fire_rate) as i64;
    for pair in shot_ticks.windows(2) {
        let gap = pair[1] as i64 - pair[0] as i64;
        assert!((gap - period).abs() <= 1, "gap {gap}, expected {period}");
    }
    assert_eq!(bullets.enemy_bullets().len(), shot_ticks.len());
}

#[test]
fn test_attack_only_entered_within_range() {
    for kind in EnemyKind::ALL {
        let stats = kind.stats();
        let mut d = 0.0;
        while d < stats.detection_range * 2.0 {
            if AiState::Chase.next(d, &stats) == AiState::Attack {
                assert!(d < stats.attack_range, "{kind:?} attacked at {d}");
            }
            // Attack holds until 1.3x the range
            let held = AiState::Attack.next(d, &stats) == AiState::Attack;
            assert_eq!(held, d <= stats.attack_range * 1.3, "{kind:?} at {d}");
            d += 0.25;
        }
    }
}

#[test]
fn test_attacking_pair_stays_within_exit_range() {
    let mut rng = GameRng::from_seed(8);
    let mut io = HeadlessFrontend::new();
    let mut bullets = BulletPool::new(64, 10.0);
    // Close enough for separation to push them apart every step
    let mut pair = vec![
        Enemy::new(EnemyKind::Grunt, Vec3::ZERO, &mut rng),
        Enemy::new(EnemyKind::Grunt, Vec3::new(0.6, 0.0, 0.3), &mut rng),
    ];
    let stats = pair[0].stats;
    let exit_range = stats.attack_range * 1.3;

    // Player starts inside attack range and backs off faster than the
    // enemies close in while attacking
    let mut player = Vec3::new(0.0, 0.0, stats.attack_range * 0.9);
    let retreat = Vec3::new(0.0, 0.0, stats.chase_speed * 0.75);

    let mut attack_ticks = 0;
    let mut exits = 0;
    for _ in 0..(60 * 20) {
        player += retreat * DT;
        for i in 0..pair.len() {
            let (before, rest) = pair.split_at_mut(i);
            let (enemy, after) = rest.split_first_mut().expect("enemy at index");
            let was_attacking = enemy.state() == AiState::Attack;
            let mut ctx = EnemyContext {
                player_position: player,
                colliders: &[],
                bullets: &mut bullets,
                rng: &mut rng,
                enemy_bullet_speed: 30.0,
            };
            let others = Neighbors {
                before: &*before,
                after: &*after,
            };
            enemy.update(DT, &mut ctx, &mut io, others);

            let distance = enemy.position.distance(player);
            if enemy.state() == AiState::Attack {
                attack_ticks += 1;
                assert!(
                    distance <= exit_range,
                    "attacking at {distance}, exit range {exit_range}"
                );
            } else if was_attacking {
                assert_eq!(enemy.state(), AiState::Chase);
                exits += 1;
            }
        }
    }

    assert!(attack_ticks > 0);
    assert!(exits > 0, "the retreat never outran the attack range");
}

#[test]
fn test_damage_aggros_passive_enemy() {
    let mut rng = GameRng::from_seed(4);
    let mut enemy = Enemy::new(EnemyKind::Brute, Vec3::ZERO, &mut rng);
    assert!(enemy.state().is_passive());

    assert!(!enemy.take_damage(1.0));
    assert_eq!(enemy.state(), AiState::Chase);
    assert!(enemy.is_flashing());

    assert!(enemy.take_damage(10_000.0));
    assert!(!enemy.is_alive());
    // Only the killing blow reports a kill
    assert!(!enemy.take_damage(10.0));
}

#[test]
fn test_dead_enemy_becomes_removable() {
    let mut rng = GameRng::from_seed(4);
    let mut io = HeadlessFrontend::new();
    let mut bullets = BulletPool::new(8, 2.0);
    let mut enemy = Enemy::new(EnemyKind::Rusher, Vec3::ZERO, &mut rng);
    enemy.attach_visual(&mut io);
    enemy.take_damage(10_000.0);

    for _ in 0..29 {
        tick_enemy(&mut enemy, Vec3::ONE, &mut bullets, &mut rng, &mut io);
    }
    assert!(!enemy.is_removable());
    for _ in 0..2 {
        tick_enemy(&mut enemy, Vec3::ONE, &mut bullets, &mut rng, &mut io);
    }
    assert!(enemy.is_removable());
    assert_eq!(io.cue_count(AudioCue::EnemyShoot), 0);

    enemy.dispose(&mut io);
    assert_eq!(io.live_visuals(), 0);
}

// ============================================================================
// Bullets
// ============================================================================

#[test]
fn test_bullet_stops_on_first_overlapping_tick() {
    // Box centered 5 units down +X, near face at 4.5
    let wall = Collider::new(5.0, 0.0, 0.5, 0.5, 3.0);
    let mut pool = BulletPool::new(4, 2.0);
    pool.fire(Vec3::new(0.0, 1.5, 0.0), Vec3::X, 50.0, 12.0, BulletOwner::Player);

    // 50 * 5/60 = 4.17, short of the face
    for _ in 0..5 {
        pool.update(DT, &[wall]);
    }
    assert_eq!(pool.active_count(), 1);

    // 50 * 6/60 = 5.0, inside the box
    pool.update(DT, &[wall]);
    assert_eq!(pool.active_count(), 0);
}

#[test]
fn test_pool_capacity_bounds_live_bullets() {
    let mut pool = BulletPool::new(5, 2.0);
    let mut accepted = 0;
    for _ in 0..12 {
        if pool.fire(Vec3::ZERO, Vec3::Z, 10.0, 1.0, BulletOwner::Enemy) {
            accepted += 1;
        }
        assert!(pool.active_count() <= pool.capacity());
    }
    assert_eq!(accepted, 5);

    // Expired slots are reusable
    pool.update(2.5, &[]);
    assert_eq!(pool.active_count(), 0);
    assert!(pool.fire(Vec3::ZERO, Vec3::Z, 10.0, 1.0, BulletOwner::Player));
}
