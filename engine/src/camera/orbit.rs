//! Third-person orbit camera
//!
//! The camera sits on a sphere of radius [`ORBIT_DISTANCE`] around the
//! player, lifted by [`ORBIT_LIFT`], and looks at a point slightly above the
//! player's head. Yaw 0 places the camera on -Z looking toward +Z.

use glam::Vec3;

use super::CameraRig;

/// Orbit radius in meters
pub const ORBIT_DISTANCE: f32 = 14.0;
/// Extra height of the camera above the orbit sphere
pub const ORBIT_LIFT: f32 = 5.0;
/// Height of the look-at point above the player's feet
pub const LOOK_HEIGHT: f32 = 2.0;
/// Fraction of the remaining distance left after one second of follow
const FOLLOW_RESIDUAL_PER_SECOND: f32 = 0.001;

/// Headless orbit camera.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal orbit angle (radians), unbounded
    pub yaw: f32,
    /// Vertical orbit angle (radians), clamped by the caller
    pub pitch: f32,
    /// Smoothed camera position
    pub position: Vec3,
    /// Point the camera looks at
    pub look_target: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.3,
            position: Vec3::new(0.0, ORBIT_LIFT, -ORBIT_DISTANCE),
            look_target: Vec3::new(0.0, LOOK_HEIGHT, 0.0),
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ideal camera offset from the player for the current yaw/pitch.
    pub fn orbit_offset(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * ORBIT_DISTANCE * self.pitch.cos(),
            ORBIT_LIFT + ORBIT_DISTANCE * self.pitch.sin(),
            -self.yaw.cos() * ORBIT_DISTANCE * self.pitch.cos(),
        )
    }

    /// Snap to the ideal pose around `target` without smoothing.
    pub fn snap_to(&mut self, target: Vec3) {
        self.position = target + self.orbit_offset();
        self.look_target = target + Vec3::Y * LOOK_HEIGHT;
    }
}

impl CameraRig for OrbitCamera {
    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn pitch(&self) -> f32 {
        self.pitch
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    /// Flattened view direction of the ideal orbit pose.
    fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos())
    }

    fn right(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(-f.z, 0.0, f.x)
    }

    fn update_camera(&mut self, target: Vec3, dt: f32) {
        let ideal = target + self.orbit_offset();
        let t = 1.0 - FOLLOW_RESIDUAL_PER_SECOND.powf(dt.max(0.0));
        self.position = self.position.lerp(ideal, t);
        self.look_target = target + Vec3::Y * LOOK_HEIGHT;
    }
}
