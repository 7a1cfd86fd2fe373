//! Manor Arena Engine Library
//!
//! Simulation core for a third-person arena shooter: weapon, projectile pool,
//! player movement, enemy AI, wave director and the game-mode controller that
//! ties them together. Rendering, audio synthesis and UI live outside this
//! crate and plug in through the collaborator traits in [`game::frontend`].
//!
//! # Modules
//!
//! - [`physics`] - Static colliders and axis-aligned overlap / slide tests
//! - [`input`] - Per-frame input snapshot and the input collaborator trait
//! - [`camera`] - Camera collaborator trait and a headless orbit camera
//! - [`game`] - Gameplay entities, systems and the mode controller
//!
//! # Example
//!
//! ```ignore
//! use manor_arena_engine::game::{GameController, GameConfig, GameRng, HeadlessFrontend};
//! use manor_arena_engine::game::config::builtin_levels;
//!
//! let mut game = GameController::new(
//!     GameConfig::default(),
//!     builtin_levels(),
//!     HeadlessFrontend::new(),
//!     GameRng::from_seed(7),
//! );
//! game.start();
//! game.frame(1.0 / 60.0);
//! ```

pub mod camera;
pub mod input;
pub mod physics;

// Gameplay modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types at crate level
pub use camera::{CameraRig, OrbitCamera};
pub use input::{InputFrame, InputSource};
pub use physics::{Collider, Footprint};
