//! Level Data
//!
//! Declarative level table: arena geometry, furniture, decorations and the
//! ordered wave list for each level. Tables are either built in
//! ([`builtin_levels`]) or loaded from JSON ([`load_levels`]), and are
//! validated before the simulation ever sees them.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::enemy_types::EnemyKind;
use crate::game::rng::GameRng;

const DEFAULT_WALL_HEIGHT: f32 = 6.0;

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Floor extent, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaSize {
    pub width: f32,
    pub depth: f32,
}

/// Colors handed to the presentation layer on level load (0xRRGGBB).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelColors {
    pub sky: u32,
    pub floor: u32,
    pub wall: u32,
    /// Fallback tint for boxes and cylinders without their own color
    pub obstacle: u32,
}

impl Default for LevelColors {
    fn default() -> Self {
        Self {
            sky: 0x1a1420,
            floor: 0x5c4033,
            wall: 0x4a3a2e,
            obstacle: 0x6b4f3a,
        }
    }
}

/// Static furniture. Every obstacle gets exactly one collider.
///
/// `pos` is the XZ center on the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Obstacle {
    /// Axis-aligned crate/cabinet with explicit size (width, height, depth)
    #[serde(alias = "furniture")]
    Box {
        pos: Vec2,
        size: Vec3,
        #[serde(default)]
        color: Option<u32>,
    },
    /// Column; collides as a square of 1.5x its radius. Height defaults to
    /// the wall height.
    Pillar {
        pos: Vec2,
        #[serde(default = "default_pillar_radius")]
        radius: f32,
        #[serde(default)]
        height: Option<f32>,
    },
    /// Waist-high table
    Table {
        pos: Vec2,
        #[serde(default = "default_table_width")]
        width: f32,
        #[serde(default = "default_table_depth")]
        depth: f32,
    },
    /// Tall, thin shelf. `rotation` is visual only.
    Bookshelf {
        pos: Vec2,
        #[serde(default = "default_shelf_width")]
        width: f32,
        #[serde(default = "default_shelf_height")]
        height: f32,
        #[serde(default)]
        rotation: f32,
    },
    Cylinder {
        pos: Vec2,
        radius: f32,
        height: f32,
        #[serde(default)]
        color: Option<u32>,
    },
}

fn default_pillar_radius() -> f32 {
    0.4
}
fn default_table_width() -> f32 {
    2.0
}
fn default_table_depth() -> f32 {
    1.0
}
fn default_shelf_width() -> f32 {
    2.0
}
fn default_shelf_height() -> f32 {
    3.5
}

/// Visual-only dressing, never collides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decoration {
    /// Hangs just under the ceiling
    Chandelier {
        pos: Vec2,
        #[serde(default = "default_chandelier_radius")]
        radius: f32,
    },
    /// Flat rug on the floor, `size` is (width, depth)
    Carpet { pos: Vec2, size: Vec2 },
    /// Wall-mounted frame, `pos` includes the hanging height
    Painting {
        pos: Vec3,
        #[serde(default = "default_painting_size")]
        size: Vec2,
        #[serde(default)]
        rotation: f32,
    },
    Sconce {
        pos: Vec3,
        #[serde(default)]
        rotation: f32,
    },
}

fn default_chandelier_radius() -> f32 {
    1.5
}
fn default_painting_size() -> Vec2 {
    Vec2::new(1.5, 1.2)
}

/// Rectangular XZ region enemies spawn in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnZone {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl SpawnZone {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_z <= self.max_z
    }

    /// Uniform random point on the floor inside the zone.
    pub fn sample(&self, rng: &mut GameRng) -> Vec3 {
        Vec3::new(
            rng.random_range(self.min_x, self.max_x),
            0.0,
            rng.random_range(self.min_z, self.max_z),
        )
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.z >= self.min_z
            && point.z <= self.max_z
    }
}

/// `count` enemies of one preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyGroup {
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    pub count: u32,
}

/// One timed batch of spawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDescriptor {
    pub enemies: Vec<EnemyGroup>,
    pub spawn_zone: SpawnZone,
    /// Seconds after the previous wave is cleared before this one spawns.
    /// Ignored for the first wave.
    #[serde(default)]
    pub delay: f32,
}

impl WaveDescriptor {
    pub fn enemy_count(&self) -> u32 {
        self.enemies.iter().map(|g| g.count).sum()
    }
}

/// One level of the campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub name: String,
    pub arena: ArenaSize,
    #[serde(default = "default_wall_height")]
    pub wall_height: f32,
    #[serde(default)]
    pub colors: LevelColors,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    /// Player start on the floor (x, z)
    pub player_spawn: Vec2,
    pub waves: Vec<WaveDescriptor>,
}

fn default_wall_height() -> f32 {
    DEFAULT_WALL_HEIGHT
}

impl LevelDescriptor {
    /// Enemies across all waves; fixed for the lifetime of the level.
    pub fn total_enemies(&self) -> u32 {
        self.waves.iter().map(WaveDescriptor::enemy_count).sum()
    }

    pub fn spawn_position(&self) -> Vec3 {
        Vec3::new(self.player_spawn.x, 0.0, self.player_spawn.y)
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors raised while loading or validating a level table.
#[derive(Debug)]
pub enum LevelDataError {
    /// Reading the level file failed.
    Io(std::io::Error),
    /// The file is not a valid level table (includes unknown enemy types).
    Json(serde_json::Error),
    /// The table is empty.
    NoLevels,
    /// A level has no waves.
    NoWaves { level: usize },
    /// A wave spawns no enemies.
    EmptyWave { level: usize, wave: usize },
    /// A spawn zone has min greater than max on some axis.
    InvalidSpawnZone { level: usize, wave: usize },
    /// Arena width or depth is not positive.
    InvalidArena { level: usize },
}

impl std::fmt::Display for LevelDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelDataError::Io(e) => write!(f, "IO error: {e}"),
            LevelDataError::Json(e) => write!(f, "JSON error: {e}"),
            LevelDataError::NoLevels => write!(f, "level table is empty"),
            LevelDataError::NoWaves { level } => write!(f, "level {level} has no waves"),
            LevelDataError::EmptyWave { level, wave } => {
                write!(f, "level {level} wave {wave} spawns no enemies")
            }
            LevelDataError::InvalidSpawnZone { level, wave } => {
                write!(f, "level {level} wave {wave} has an inverted spawn zone")
            }
            LevelDataError::InvalidArena { level } => {
                write!(f, "level {level} has a non-positive arena size")
            }
        }
    }
}

impl std::error::Error for LevelDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelDataError::Io(e) => Some(e),
            LevelDataError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LevelDataError {
    fn from(e: std::io::Error) -> Self {
        LevelDataError::Io(e)
    }
}

impl From<serde_json::Error> for LevelDataError {
    fn from(e: serde_json::Error) -> Self {
        LevelDataError::Json(e)
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Parse a JSON array of levels and validate it.
pub fn parse_levels(json: &str) -> Result<Vec<LevelDescriptor>, LevelDataError> {
    let levels: Vec<LevelDescriptor> = serde_json::from_str(json)?;
    validate_levels(&levels)?;
    Ok(levels)
}

/// Read and parse a level file.
pub fn load_levels(path: impl AsRef<Path>) -> Result<Vec<LevelDescriptor>, LevelDataError> {
    let json = std::fs::read_to_string(path)?;
    parse_levels(&json)
}

/// Structural checks the simulation relies on. Indices in errors are 0-based.
pub fn validate_levels(levels: &[LevelDescriptor]) -> Result<(), LevelDataError> {
    if levels.is_empty() {
        return Err(LevelDataError::NoLevels);
    }
    for (level, desc) in levels.iter().enumerate() {
        if desc.arena.width <= 0.0 || desc.arena.depth <= 0.0 {
            return Err(LevelDataError::InvalidArena { level });
        }
        if desc.waves.is_empty() {
            return Err(LevelDataError::NoWaves { level });
        }
        for (wave, w) in desc.waves.iter().enumerate() {
            if w.enemy_count() == 0 {
                return Err(LevelDataError::EmptyWave { level, wave });
            }
            if !w.spawn_zone.is_valid() {
                return Err(LevelDataError::InvalidSpawnZone { level, wave });
            }
        }
    }
    Ok(())
}

// ============================================================================
// BUILT-IN CAMPAIGN
// ============================================================================

fn group(kind: EnemyKind, count: u32) -> EnemyGroup {
    EnemyGroup { kind, count }
}

fn wave(enemies: Vec<EnemyGroup>, spawn_zone: SpawnZone, delay: f32) -> WaveDescriptor {
    WaveDescriptor {
        enemies,
        spawn_zone,
        delay,
    }
}

/// The three-room manor campaign shipped with the game.
pub fn builtin_levels() -> Vec<LevelDescriptor> {
    use EnemyKind::{Brute, Grunt, Marksman, Rusher};

    let foyer = LevelDescriptor {
        name: "The Foyer".to_string(),
        arena: ArenaSize {
            width: 30.0,
            depth: 30.0,
        },
        wall_height: 6.0,
        colors: LevelColors {
            sky: 0x1a1420,
            floor: 0x6b4a32,
            wall: 0x4a3a2e,
            obstacle: 0x5a3e2b,
        },
        obstacles: vec![
            Obstacle::Table {
                pos: Vec2::new(-6.0, 0.0),
                width: 2.0,
                depth: 1.0,
            },
            Obstacle::Table {
                pos: Vec2::new(6.0, 0.0),
                width: 2.0,
                depth: 1.0,
            },
            Obstacle::Pillar {
                pos: Vec2::new(-4.0, 6.0),
                radius: 0.4,
                height: None,
            },
            Obstacle::Pillar {
                pos: Vec2::new(4.0, 6.0),
                radius: 0.4,
                height: None,
            },
            Obstacle::Box {
                pos: Vec2::new(0.0, 3.0),
                size: Vec3::new(3.0, 1.2, 1.0),
                color: None,
            },
        ],
        decorations: vec![
            Decoration::Chandelier {
                pos: Vec2::ZERO,
                radius: 1.5,
            },
            Decoration::Carpet {
                pos: Vec2::new(0.0, -6.0),
                size: Vec2::new(4.0, 8.0),
            },
        ],
        player_spawn: Vec2::new(0.0, -11.0),
        waves: vec![
            wave(
                vec![group(Grunt, 3)],
                SpawnZone::new(-10.0, 10.0, 6.0, 12.0),
                0.0,
            ),
            wave(
                vec![group(Grunt, 3), group(Rusher, 1)],
                SpawnZone::new(-12.0, 12.0, 4.0, 12.0),
                3.0,
            ),
        ],
    };

    let library = LevelDescriptor {
        name: "The Library".to_string(),
        arena: ArenaSize {
            width: 36.0,
            depth: 32.0,
        },
        wall_height: 7.0,
        colors: LevelColors {
            sky: 0x120e18,
            floor: 0x4e3626,
            wall: 0x3b2f25,
            obstacle: 0x4a3020,
        },
        obstacles: vec![
            Obstacle::Bookshelf {
                pos: Vec2::new(-10.0, 2.0),
                width: 4.0,
                height: 3.5,
                rotation: 0.0,
            },
            Obstacle::Bookshelf {
                pos: Vec2::new(10.0, 2.0),
                width: 4.0,
                height: 3.5,
                rotation: 0.0,
            },
            Obstacle::Bookshelf {
                pos: Vec2::new(-4.0, 8.0),
                width: 3.0,
                height: 3.5,
                rotation: 0.0,
            },
            Obstacle::Bookshelf {
                pos: Vec2::new(4.0, 8.0),
                width: 3.0,
                height: 3.5,
                rotation: 0.0,
            },
            Obstacle::Table {
                pos: Vec2::new(0.0, -2.0),
                width: 3.0,
                depth: 1.5,
            },
            Obstacle::Box {
                pos: Vec2::new(-12.0, -8.0),
                size: Vec3::new(1.5, 1.0, 1.5),
                color: Some(0x3e2a1c),
            },
        ],
        decorations: vec![
            Decoration::Painting {
                pos: Vec3::new(0.0, 3.5, 15.9),
                size: Vec2::new(2.0, 1.4),
                rotation: std::f32::consts::PI,
            },
            Decoration::Sconce {
                pos: Vec3::new(-17.9, 3.0, 0.0),
                rotation: std::f32::consts::FRAC_PI_2,
            },
            Decoration::Sconce {
                pos: Vec3::new(17.9, 3.0, 0.0),
                rotation: -std::f32::consts::FRAC_PI_2,
            },
        ],
        player_spawn: Vec2::new(0.0, -12.0),
        waves: vec![
            wave(
                vec![group(Grunt, 3), group(Marksman, 1)],
                SpawnZone::new(-14.0, 14.0, 6.0, 14.0),
                0.0,
            ),
            wave(
                vec![group(Rusher, 2), group(Grunt, 2)],
                SpawnZone::new(-14.0, 14.0, 4.0, 14.0),
                3.0,
            ),
            wave(
                vec![group(Marksman, 2), group(Rusher, 2)],
                SpawnZone::new(-15.0, 15.0, 8.0, 14.0),
                4.0,
            ),
        ],
    };

    let ballroom = LevelDescriptor {
        name: "The Grand Ballroom".to_string(),
        arena: ArenaSize {
            width: 44.0,
            depth: 40.0,
        },
        wall_height: 9.0,
        colors: LevelColors {
            sky: 0x0e0a14,
            floor: 0x7a5a3c,
            wall: 0x55402f,
            obstacle: 0x6e5038,
        },
        obstacles: vec![
            Obstacle::Pillar {
                pos: Vec2::new(-12.0, -6.0),
                radius: 0.6,
                height: None,
            },
            Obstacle::Pillar {
                pos: Vec2::new(12.0, -6.0),
                radius: 0.6,
                height: None,
            },
            Obstacle::Pillar {
                pos: Vec2::new(-12.0, 8.0),
                radius: 0.6,
                height: None,
            },
            Obstacle::Pillar {
                pos: Vec2::new(12.0, 8.0),
                radius: 0.6,
                height: None,
            },
            Obstacle::Cylinder {
                pos: Vec2::new(0.0, 2.0),
                radius: 1.5,
                height: 1.2,
                color: Some(0x8a6a48),
            },
            Obstacle::Table {
                pos: Vec2::new(-6.0, 12.0),
                width: 2.5,
                depth: 1.2,
            },
            Obstacle::Table {
                pos: Vec2::new(6.0, 12.0),
                width: 2.5,
                depth: 1.2,
            },
        ],
        decorations: vec![
            Decoration::Chandelier {
                pos: Vec2::new(-8.0, 0.0),
                radius: 2.0,
            },
            Decoration::Chandelier {
                pos: Vec2::new(8.0, 0.0),
                radius: 2.0,
            },
            Decoration::Carpet {
                pos: Vec2::new(0.0, 0.0),
                size: Vec2::new(10.0, 20.0),
            },
        ],
        player_spawn: Vec2::new(0.0, -16.0),
        waves: vec![
            wave(
                vec![group(Grunt, 4), group(Rusher, 2)],
                SpawnZone::new(-18.0, 18.0, 6.0, 18.0),
                0.0,
            ),
            wave(
                vec![group(Brute, 2), group(Marksman, 2)],
                SpawnZone::new(-18.0, 18.0, 10.0, 18.0),
                3.0,
            ),
            wave(
                vec![group(Rusher, 3), group(Grunt, 2), group(Brute, 1)],
                SpawnZone::new(-20.0, 20.0, 0.0, 18.0),
                4.0,
            ),
            wave(
                vec![group(Brute, 2), group(Marksman, 2), group(Rusher, 2)],
                SpawnZone::new(-20.0, 20.0, 4.0, 18.0),
                5.0,
            ),
        ],
    };

    vec![foyer, library, ballroom]
}
