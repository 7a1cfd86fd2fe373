//! Config Module
//!
//! Static, read-only configuration: gameplay tunables, the enemy type
//! presets and the level table.

pub mod enemy_types;
pub mod game_config;
pub mod level_data;

pub use enemy_types::{EnemyKind, EnemyType};
pub use game_config::{GameConfig, PlayerConfig, WeaponConfig};
pub use level_data::{
    ArenaSize, Decoration, EnemyGroup, LevelColors, LevelDataError, LevelDescriptor, Obstacle,
    SpawnZone, WaveDescriptor, builtin_levels, load_levels, parse_levels,
};
