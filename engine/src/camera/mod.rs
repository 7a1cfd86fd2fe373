//! Camera Module
//!
//! The simulation core drives the camera only through [`CameraRig`]: it
//! writes yaw and pitch from look input, reads the flattened forward/right
//! basis for camera-relative movement, and asks the rig to follow the player
//! once per tick. [`OrbitCamera`] is a window-system agnostic implementation
//! of the third-person orbit used by the game.

pub mod orbit;

pub use orbit::{ORBIT_DISTANCE, OrbitCamera};

use glam::Vec3;

/// Camera collaborator contract.
///
/// `forward` and `right` are unit vectors with Y = 0.
pub trait CameraRig {
    fn yaw(&self) -> f32;
    fn pitch(&self) -> f32;
    fn set_yaw(&mut self, yaw: f32);
    fn set_pitch(&mut self, pitch: f32);
    fn forward(&self) -> Vec3;
    fn right(&self) -> Vec3;
    /// Follow `target` (the player's feet), smoothing over `dt` seconds.
    fn update_camera(&mut self, target: Vec3, dt: f32);
}
