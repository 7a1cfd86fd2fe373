//! Game systems - self-contained modules that own state and logic.

pub mod bullet_system;
pub mod collision_system;
pub mod particle_system;
pub mod scheduler;
pub mod wave_system;

pub use bullet_system::{BulletId, BulletOwner, BulletPool, BulletSnapshot};
pub use collision_system::{CollisionSystem, EnemyHit, PlayerHits};
pub use particle_system::ParticleSystem;
pub use scheduler::{Scheduler, TimerId};
pub use wave_system::{LevelDirector, LevelStats};
