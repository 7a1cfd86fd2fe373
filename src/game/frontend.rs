//! Presentation collaborators
//!
//! The simulation never touches a renderer, an audio device or a DOM. It
//! talks to the host through the traits in this module:
//!
//! - [`SceneSink`]: create, move, hide and dispose opaque visuals
//! - [`AudioSink`]: fire-and-forget sound cues
//! - [`HudSink`] / [`MenuSink`]: plain data snapshots and screen switches
//! - [`InputSource`] and [`CameraRig`] from the engine layer
//!
//! A host implements all six and gets [`Frontend`] for free. Entity updates
//! that only need to be seen and heard take a `&mut dyn WorldIo`.

use glam::Vec3;

use crate::camera::CameraRig;
use crate::game::config::{Decoration, EnemyKind, LevelColors, Obstacle};
use crate::game::systems::wave_system::LevelStats;
use crate::input::InputSource;

// ============================================================================
// VISUALS
// ============================================================================

/// Opaque handle to a host-side renderable. The core stores and returns it
/// but never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(u32);

impl VisualHandle {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// What the host should build for a new visual.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualKind {
    Player,
    Enemy {
        kind: EnemyKind,
        color: u32,
        scale: f32,
    },
    /// One pooled projectile; its [`VisualStyle`] selects the player or
    /// enemy look.
    Bullet,
    /// Death-burst fragment
    Particle { color: u32 },
    Floor { width: f32, depth: f32, color: u32 },
    /// Perimeter wall, `size` is (width, height, depth)
    Wall { size: Vec3, color: u32 },
    Obstacle { obstacle: Obstacle, color: u32 },
    Decoration { decoration: Decoration, wall_height: f32 },
}

/// Variant of a visual's appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualStyle {
    #[default]
    Normal,
    /// Brief emissive flash after taking damage
    HitFlash,
    PlayerShot,
    EnemyShot,
}

/// Full transform and style pushed to the host each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualPose {
    pub position: Vec3,
    /// Yaw around +Y, radians
    pub facing: f32,
    pub scale: f32,
    pub style: VisualStyle,
}

impl VisualPose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            facing: 0.0,
            scale: 1.0,
            style: VisualStyle::Normal,
        }
    }

    pub fn with_facing(mut self, facing: f32) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_style(mut self, style: VisualStyle) -> Self {
        self.style = style;
        self
    }
}

/// Named attachment points a model may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    GunTip,
}

/// Scene graph collaborator.
pub trait SceneSink {
    fn spawn(&mut self, kind: VisualKind, position: Vec3) -> VisualHandle;
    fn place(&mut self, handle: VisualHandle, pose: VisualPose);
    fn set_visible(&mut self, handle: VisualHandle, visible: bool);
    fn dispose(&mut self, handle: VisualHandle);
    fn set_scene_colors(&mut self, colors: &LevelColors);
    fn render(&mut self);

    /// World position of a named anchor on the visual, if the model has one.
    /// Callers fall back to a fixed offset from the body on `None`.
    fn anchor_position(&self, _handle: VisualHandle, _anchor: Anchor) -> Option<Vec3> {
        None
    }
}

// ============================================================================
// AUDIO
// ============================================================================

/// Discrete sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Shoot,
    EnemyShoot,
    Hit,
    EnemyDeath,
    PlayerHit,
    Reload,
    LevelComplete,
    GameOver,
}

pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

// ============================================================================
// HUD & MENUS
// ============================================================================

/// Everything the HUD shows, rebuilt every playing tick.
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub health: f32,
    pub max_health: f32,
    pub ammo: u32,
    pub mag_size: u32,
    pub reloading: bool,
    pub stats: LevelStats,
    pub crosshair_hit: bool,
    pub damage_flash: bool,
    pub muzzle_flash: bool,
}

pub trait HudSink {
    fn update_hud(&mut self, snapshot: &HudSnapshot);
}

/// Data for the level-complete screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub stats: LevelStats,
    pub shots_fired: u32,
    pub shots_hit: u32,
}

impl LevelSummary {
    /// Hit percentage rounded to a whole number, 0 when nothing was fired.
    pub fn accuracy(&self) -> u32 {
        if self.shots_fired == 0 {
            0
        } else {
            (self.shots_hit as f32 / self.shots_fired as f32 * 100.0).round() as u32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VictorySummary {
    pub total_levels: usize,
    pub total_killed: u32,
}

/// Screen collaborator. Buttons on these screens call back into the
/// controller's transition methods.
pub trait MenuSink {
    fn show_menu(&mut self);
    fn show_pause(&mut self);
    fn hide_pause(&mut self);
    fn show_level_complete(&mut self, summary: &LevelSummary);
    fn show_game_over(&mut self, stats: &LevelStats);
    fn show_victory(&mut self, summary: &VictorySummary);
    fn hide_all(&mut self);
    fn set_hud_visible(&mut self, visible: bool);
}

// ============================================================================
// BUNDLES
// ============================================================================

/// The collaborators entity updates need: something to draw on and
/// something to make noise with.
pub trait WorldIo: AudioSink + SceneSink {}

impl<T: AudioSink + SceneSink + ?Sized> WorldIo for T {}

/// A complete host for [`GameController`](crate::game::GameController).
pub trait Frontend: InputSource + CameraRig + AudioSink + SceneSink + HudSink + MenuSink {}

impl<T> Frontend for T where T: InputSource + CameraRig + AudioSink + SceneSink + HudSink + MenuSink {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_rounds_and_handles_zero() {
        let stats = LevelStats::default();
        let none = LevelSummary {
            stats: stats.clone(),
            shots_fired: 0,
            shots_hit: 0,
        };
        assert_eq!(none.accuracy(), 0);

        let some = LevelSummary {
            stats,
            shots_fired: 3,
            shots_hit: 2,
        };
        assert_eq!(some.accuracy(), 67);
    }

    #[test]
    fn test_pose_builder() {
        let pose = VisualPose::at(Vec3::ONE)
            .with_facing(1.0)
            .with_scale(0.5)
            .with_style(VisualStyle::HitFlash);
        assert_eq!(pose.position, Vec3::ONE);
        assert_eq!(pose.facing, 1.0);
        assert_eq!(pose.scale, 0.5);
        assert_eq!(pose.style, VisualStyle::HitFlash);
    }
}
