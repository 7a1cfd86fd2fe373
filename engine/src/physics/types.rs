//! Physics type re-exports from glam
//!
//! `Vec2` carries planar quantities (movement input, XZ deltas) and `Vec3`
//! carries world positions and directions.

pub use glam::{Vec2, Vec3};
