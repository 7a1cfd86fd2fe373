//! Arena Player Module
//!
//! Third-person player controller: camera-relative movement with per-axis
//! wall sliding, facing that follows movement (or the camera while
//! shooting), health with delayed regeneration, and shot accounting.

use glam::Vec3;

use super::config::GameConfig;
use super::frontend::{Anchor, SceneSink, VisualHandle, VisualKind, VisualPose};
use super::types::{heading, lerp_angle};
use crate::camera::CameraRig;
use crate::input::InputFrame;
use crate::physics::{Collider, Footprint, slide_move};

/// Turn rate toward the movement heading (fraction per tick)
pub const MOVE_TURN_RATE: f32 = 0.15;
/// Turn rate toward the camera heading while shooting
pub const AIM_TURN_RATE: f32 = 0.3;
/// Gun tip relative to the feet when the model has no muzzle anchor
pub const GUN_TIP_FALLBACK: Vec3 = Vec3::new(0.0, 1.5, 0.8);

/// "Not hit this life" value for `time_since_hit`; regen is active at once.
const NEVER_HIT: f32 = 999.0;

/// The player-controlled soldier.
pub struct Player {
    /// Feet position in world space
    pub position: Vec3,
    /// Body yaw, radians
    pub facing: f32,
    /// Camera heading captured on the last shooting tick
    pub aim_angle: f32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub sprint_speed: f32,
    pub regen_rate: f32,
    pub regen_delay: f32,
    /// Seconds since the last damage
    pub time_since_hit: f32,
    pub footprint: Footprint,
    pub shots_fired: u32,
    pub shots_hit: u32,
    look_sensitivity: f32,
    pitch_min: f32,
    pitch_max: f32,
    alive: bool,
    visual: Option<VisualHandle>,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let p = &config.player;
        Self {
            position: Vec3::ZERO,
            facing: 0.0,
            aim_angle: 0.0,
            health: p.max_health,
            max_health: p.max_health,
            speed: p.speed,
            sprint_speed: p.sprint_speed,
            regen_rate: p.regen_rate,
            regen_delay: p.regen_delay,
            time_since_hit: NEVER_HIT,
            footprint: p.footprint,
            shots_fired: 0,
            shots_hit: 0,
            look_sensitivity: config.look_sensitivity,
            pitch_min: config.pitch_min,
            pitch_max: config.pitch_max,
            alive: true,
            visual: None,
        }
    }

    /// Advance one tick. Does nothing once dead.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputFrame,
        camera: &mut dyn CameraRig,
        colliders: &[Collider],
    ) {
        if !self.alive {
            return;
        }

        // Look: yaw is free, pitch is clamped
        camera.set_yaw(camera.yaw() + input.aim_delta.x * self.look_sensitivity);
        camera.set_pitch(
            (camera.pitch() + input.aim_delta.y * self.look_sensitivity)
                .clamp(self.pitch_min, self.pitch_max),
        );

        if input.is_moving() {
            let forward = camera.forward();
            let right = camera.right();
            let speed = if input.sprinting {
                self.sprint_speed
            } else {
                self.speed
            };
            let mv = input.movement;

            let move_x = (forward.x * mv.y + right.x * mv.x) * speed * dt;
            let move_z = (forward.z * mv.y + right.z * mv.x) * speed * dt;

            self.position = slide_move(
                self.position,
                glam::Vec2::new(move_x, move_z),
                &self.footprint,
                colliders,
            );
            self.facing = lerp_angle(self.facing, heading(move_x, move_z), MOVE_TURN_RATE);
        }

        if input.shooting {
            let forward = camera.forward();
            self.aim_angle = heading(forward.x, forward.z);
            self.facing = lerp_angle(self.facing, self.aim_angle, AIM_TURN_RATE);
        }

        self.regenerate(dt);
    }

    /// Only the part of `dt` past the regen delay counts, so the amount
    /// healed does not depend on how ticks straddle the delay boundary.
    fn regenerate(&mut self, dt: f32) {
        self.time_since_hit += dt;
        if self.time_since_hit >= self.regen_delay && self.health < self.max_health {
            let active = (self.time_since_hit - self.regen_delay).min(dt);
            self.health = (self.health + self.regen_rate * active).min(self.max_health);
        }
    }

    /// Apply damage. No-op once dead.
    pub fn take_damage(&mut self, amount: f32) {
        if !self.alive {
            return;
        }
        self.health -= amount;
        self.time_since_hit = 0.0;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Back to full health at `position`, counters cleared.
    pub fn reset(&mut self, position: Vec3) {
        self.position = position;
        self.facing = 0.0;
        self.aim_angle = 0.0;
        self.health = self.max_health;
        self.alive = true;
        self.time_since_hit = NEVER_HIT;
        self.shots_fired = 0;
        self.shots_hit = 0;
    }

    /// Muzzle position for new bullets.
    pub fn gun_tip(&self, scene: &dyn SceneSink) -> Vec3 {
        self.visual
            .and_then(|h| scene.anchor_position(h, Anchor::GunTip))
            .unwrap_or(self.position + GUN_TIP_FALLBACK)
    }

    /// Bullets travel along the flattened camera forward.
    pub fn aim_direction(&self, camera: &dyn CameraRig) -> Vec3 {
        camera.forward()
    }

    /// Hits over shots, 0 when nothing was fired.
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.shots_hit as f32 / self.shots_fired as f32
        }
    }

    pub fn attach_visual(&mut self, scene: &mut dyn SceneSink) {
        if self.visual.is_none() {
            self.visual = Some(scene.spawn(VisualKind::Player, self.position));
        }
    }

    pub fn sync_visual(&self, scene: &mut dyn SceneSink) {
        if let Some(handle) = self.visual {
            scene.place(handle, VisualPose::at(self.position).with_facing(self.facing));
        }
    }

    pub fn detach_visual(&mut self, scene: &mut dyn SceneSink) {
        if let Some(handle) = self.visual.take() {
            scene.dispose(handle);
        }
    }
}
