//! Game Module
//!
//! Gameplay simulation built on top of the engine modules: entities
//! (player, weapon, enemies), self-contained systems (bullets, waves, hit
//! resolution, particles, timers) and the mode controller that runs them in
//! a fixed order once per frame.

pub mod arena;
pub mod arena_player;
pub mod config;
pub mod enemy;
pub mod frontend;
pub mod headless;
pub mod rng;
pub mod state;
pub mod systems;
pub mod types;
pub mod weapon;

pub use arena::Arena;
pub use arena_player::Player;
pub use config::{EnemyKind, EnemyType, GameConfig, LevelDescriptor, LevelDataError};
pub use enemy::{AiState, Enemy};
pub use frontend::{
    Anchor, AudioCue, AudioSink, Frontend, HudSink, HudSnapshot, LevelSummary, MenuSink,
    SceneSink, VictorySummary, VisualHandle, VisualKind, VisualPose, VisualStyle, WorldIo,
};
pub use headless::{HeadlessFrontend, MenuScreen};
pub use rng::GameRng;
pub use state::{GameController, GameMode};
pub use systems::{BulletOwner, BulletPool, LevelDirector, LevelStats, ParticleSystem, Scheduler, TimerId};
pub use weapon::Weapon;
