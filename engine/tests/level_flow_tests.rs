//! Level Flow Tests - Waves, Kill Counting and Level Tables
//!
//! Exercises the wave director on small hand-built levels and checks that
//! the built-in and JSON level tables load into the same shape.

use glam::{Vec2, Vec3};
use manor_arena_engine::game::config::{
    ArenaSize, EnemyGroup, EnemyKind, LevelColors, LevelDataError, LevelDescriptor, SpawnZone,
    WaveDescriptor, builtin_levels, parse_levels,
};
use manor_arena_engine::game::enemy::EnemyContext;
use manor_arena_engine::game::{BulletPool, GameRng, HeadlessFrontend, LevelDirector, VisualKind};

const DT: f32 = 0.25;

fn wave(kind: EnemyKind, count: u32, delay: f32) -> WaveDescriptor {
    WaveDescriptor {
        enemies: vec![EnemyGroup { kind, count }],
        spawn_zone: SpawnZone::new(-4.0, 4.0, 10.0, 14.0),
        delay,
    }
}

fn level(name: &str, waves: Vec<WaveDescriptor>) -> LevelDescriptor {
    LevelDescriptor {
        name: name.to_string(),
        arena: ArenaSize {
            width: 30.0,
            depth: 40.0,
        },
        wall_height: 6.0,
        colors: LevelColors::default(),
        obstacles: Vec::new(),
        decorations: Vec::new(),
        player_spawn: Vec2::new(0.0, -15.0),
        waves,
    }
}

/// Director plus the collaborators its update needs.
struct Harness {
    director: LevelDirector,
    io: HeadlessFrontend,
    rng: GameRng,
    bullets: BulletPool,
}

impl Harness {
    fn new(levels: Vec<LevelDescriptor>) -> Self {
        let mut h = Self {
            director: LevelDirector::new(levels),
            io: HeadlessFrontend::new(),
            rng: GameRng::from_seed(99),
            bullets: BulletPool::new(60, 2.0),
        };
        h.director.start_level(0, &mut h.rng, &mut h.io);
        h
    }

    fn update(&mut self) {
        let mut ctx = EnemyContext {
            // Far beyond every detection range
            player_position: Vec3::new(0.0, 0.0, -500.0),
            colliders: &[],
            bullets: &mut self.bullets,
            rng: &mut self.rng,
            enemy_bullet_speed: 30.0,
        };
        self.director.update(DT, &mut ctx, &mut self.io);
    }

    /// Kill every live enemy, reporting each kill to the director.
    fn kill_all(&mut self) -> u32 {
        let kills = self
            .director
            .enemies_mut()
            .iter_mut()
            .filter_map(|e| e.take_damage(10_000.0).then_some(()))
            .count() as u32;
        for _ in 0..kills {
            self.director.on_enemy_killed();
        }
        kills
    }
}

#[test]
fn test_next_wave_spawns_after_delay() {
    let mut h = Harness::new(vec![level(
        "Two Waves",
        vec![wave(EnemyKind::Grunt, 3, 0.0), wave(EnemyKind::Rusher, 2, 2.0)],
    )]);

    assert_eq!(h.director.alive_count(), 3);
    assert_eq!(h.director.total_enemies(), 5);
    assert!(!h.director.all_waves_spawned());

    assert_eq!(h.kill_all(), 3);
    // Counted as soon as the kills are reported
    assert_eq!(h.director.killed(), 3);
    assert_eq!(h.director.stats().killed, 3);

    // 2 s of delay at 0.25 s per update
    for _ in 0..7 {
        h.update();
        assert_eq!(h.director.alive_count(), 0);
    }
    h.update();
    assert_eq!(h.director.alive_count(), 2);
    assert!(h.director.enemies().iter().all(|e| e.kind == EnemyKind::Rusher));
    assert!(h.director.all_waves_spawned());
    assert!(!h.director.is_level_complete());
}

#[test]
fn test_wave_timer_only_runs_when_field_is_clear() {
    let mut h = Harness::new(vec![level(
        "Slow",
        vec![wave(EnemyKind::Grunt, 1, 0.0), wave(EnemyKind::Grunt, 1, 1.0)],
    )]);

    // Plenty of time passes with the first enemy alive
    for _ in 0..40 {
        h.update();
    }
    assert_eq!(h.director.enemies().len(), 1);

    h.kill_all();
    // The full delay still has to run
    for _ in 0..3 {
        h.update();
    }
    assert_eq!(h.director.alive_count(), 0);
    h.update();
    assert_eq!(h.director.alive_count(), 1);
}

#[test]
fn test_level_complete_iff_all_waves_spawned_and_field_clear() {
    let mut h = Harness::new(vec![level(
        "Three Waves",
        vec![
            wave(EnemyKind::Grunt, 2, 0.0),
            wave(EnemyKind::Marksman, 1, 0.5),
            wave(EnemyKind::Brute, 1, 0.5),
        ],
    )]);

    for _ in 0..200 {
        if h.director.is_level_complete() {
            break;
        }
        h.update();

        let complete = h.director.is_level_complete();
        assert_eq!(
            complete,
            h.director.all_waves_spawned() && h.director.alive_count() == 0
        );
        assert!(h.director.killed() <= h.director.total_enemies());

        if h.director.alive_count() > 0 {
            h.kill_all();
        }
    }

    assert!(h.director.is_level_complete());
    assert_eq!(h.director.killed(), 4);
    assert_eq!(h.director.killed(), h.director.total_enemies());
}

#[test]
fn test_corpses_are_disposed_after_death_animation() {
    let mut h = Harness::new(vec![level("Corpses", vec![wave(EnemyKind::Grunt, 2, 0.0)])]);
    let is_enemy = |v: &manor_arena_engine::game::headless::HeadlessVisual| {
        matches!(v.kind, VisualKind::Enemy { .. })
    };
    assert_eq!(h.io.count_visuals(is_enemy), 2);

    h.kill_all();
    // 0.5 s of death animation at 0.25 s per update
    h.update();
    assert_eq!(h.director.enemies().len(), 2);
    h.update();
    h.update();
    assert!(h.director.enemies().is_empty());
    assert_eq!(h.io.count_visuals(is_enemy), 0);
}

#[test]
fn test_spawns_land_inside_zone() {
    let h = Harness::new(vec![level("Crowd", vec![wave(EnemyKind::Grunt, 25, 0.0)])]);
    let zone = SpawnZone::new(-4.0, 4.0, 10.0, 14.0);
    assert!(h.director.enemies().iter().all(|e| zone.contains(e.position)));
}

#[test]
fn test_start_level_clamps_and_resets() {
    let mut h = Harness::new(builtin_levels());
    let total_levels = h.director.total_levels();
    h.kill_all();

    h.director.start_level(total_levels + 5, &mut h.rng, &mut h.io);
    assert_eq!(h.director.current_index(), total_levels - 1);
    assert!(h.director.is_last_level());
    assert_eq!(h.director.killed(), 0);
    assert_eq!(h.director.stats().level, total_levels);
}

#[test]
fn test_empty_table_falls_back_to_builtin() {
    let director = LevelDirector::new(Vec::new());
    assert_eq!(director.total_levels(), builtin_levels().len());
}

#[test]
fn test_builtin_campaign_is_well_formed() {
    let levels = builtin_levels();
    assert_eq!(levels.len(), 3);
    for level in &levels {
        assert!(!level.waves.is_empty(), "{}", level.name);
        assert!(level.total_enemies() > 0);
        for w in &level.waves {
            assert!(w.spawn_zone.is_valid());
            assert!(w.spawn_zone.min_x.abs() < level.arena.width / 2.0);
            assert!(w.spawn_zone.max_z.abs() < level.arena.depth / 2.0);
        }
    }
}

#[test]
fn test_json_level_table() {
    let json = r#"[
        {
            "name": "Cellar",
            "arena": { "width": 20, "depth": 20 },
            "player_spawn": [0, -8],
            "obstacles": [
                { "type": "pillar", "pos": [3, 3], "radius": 0.5 },
                { "type": "furniture", "pos": [-3, 0], "size": [2, 1, 1] }
            ],
            "waves": [
                {
                    "enemies": [{ "type": "grunt", "count": 2 }, { "type": "rusher", "count": 1 }],
                    "spawn_zone": { "min_x": -5, "max_x": 5, "min_z": 4, "max_z": 8 }
                }
            ]
        }
    ]"#;

    let levels = parse_levels(json).unwrap();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].total_enemies(), 3);
    assert_eq!(levels[0].wall_height, 6.0);
    assert_eq!(levels[0].obstacles.len(), 2);

    let mut h = Harness::new(levels);
    assert_eq!(h.director.alive_count(), 3);
    h.kill_all();
    h.update();
    assert!(h.director.is_level_complete());
}

#[test]
fn test_malformed_tables_are_rejected() {
    assert!(matches!(parse_levels("[]"), Err(LevelDataError::NoLevels)));
    assert!(matches!(parse_levels("{ nope"), Err(LevelDataError::Json(_))));

    let no_waves = r#"[{ "name": "Empty", "arena": { "width": 20, "depth": 20 },
        "player_spawn": [0, 0], "waves": [] }]"#;
    assert!(parse_levels(no_waves).is_err());
}
