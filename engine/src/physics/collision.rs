//! Collision detection module
//!
//! Axis-aligned overlap tests between moving entities, projectiles and the
//! static colliders that make up a level. Everything stands on the ground
//! plane, so a collider is a rectangle in XZ extruded from Y = 0 to its
//! height.
//!
//! # Example
//!
//! ```ignore
//! use manor_arena_engine::physics::collision::{Collider, Footprint, slide_move};
//! use glam::{Vec2, Vec3};
//!
//! let wall = Collider::new(2.0, 0.0, 0.5, 5.0, 3.0);
//! let body = Footprint::new(0.5, 0.3, 3.0);
//!
//! // Moving +X into the wall is rejected, the Z part still applies
//! let next = slide_move(Vec3::ZERO, Vec2::new(1.5, 1.0), &body, &[wall]);
//! assert_eq!(next.x, 0.0);
//! assert_eq!(next.z, 1.0);
//! ```

use glam::{Vec2, Vec3};

/// A static, immutable obstacle column.
///
/// `x`/`z` is the footprint center on the ground plane. The column spans
/// `[0, height)` vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub x: f32,
    pub z: f32,
    pub half_width: f32,
    pub half_depth: f32,
    pub height: f32,
}

impl Collider {
    pub fn new(x: f32, z: f32, half_width: f32, half_depth: f32, height: f32) -> Self {
        Self {
            x,
            z,
            half_width,
            half_depth,
            height,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.x - self.half_width
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.half_width
    }

    pub fn min_z(&self) -> f32 {
        self.z - self.half_depth
    }

    pub fn max_z(&self) -> f32 {
        self.z + self.half_depth
    }
}

/// Collision extents of a moving entity, centered on its feet position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub half_width: f32,
    pub half_depth: f32,
    pub height: f32,
}

impl Footprint {
    pub fn new(half_width: f32, half_depth: f32, height: f32) -> Self {
        Self {
            half_width,
            half_depth,
            height,
        }
    }

    /// Footprint scaled uniformly (enemy visual scale drives its hitbox).
    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(
            self.half_width * scale,
            self.half_depth * scale,
            self.height * scale,
        )
    }
}

/// Strict overlap between a footprint centered at `(x, z)` and a collider.
///
/// Touching edges do not count, which lets entities stand flush against walls.
/// Both columns start on the ground, so they share height whenever both have
/// a positive height.
#[inline]
pub fn footprint_overlaps(x: f32, z: f32, footprint: &Footprint, collider: &Collider) -> bool {
    let vertical = footprint.height > 0.0 && collider.height > 0.0;
    vertical
        && x + footprint.half_width > collider.min_x()
        && x - footprint.half_width < collider.max_x()
        && z + footprint.half_depth > collider.min_z()
        && z - footprint.half_depth < collider.max_z()
}

/// True if the footprint at `(x, z)` overlaps any collider.
pub fn blocked(x: f32, z: f32, footprint: &Footprint, colliders: &[Collider]) -> bool {
    colliders
        .iter()
        .any(|c| footprint_overlaps(x, z, footprint, c))
}

/// Resolve a planar move one axis at a time, X first, then Z.
///
/// `delta` is `(dx, dz)`. An axis step is discarded entirely if the moved
/// footprint would overlap any collider; the other axis is still tried, which
/// produces sliding along walls. Diagonal corner catching against L-shaped
/// obstacle pairs is a known property of this scheme.
pub fn slide_move(position: Vec3, delta: Vec2, footprint: &Footprint, colliders: &[Collider]) -> Vec3 {
    let mut next = position;

    let try_x = next.x + delta.x;
    if !blocked(try_x, next.z, footprint, colliders) {
        next.x = try_x;
    }

    let try_z = next.z + delta.y;
    if !blocked(next.x, try_z, footprint, colliders) {
        next.z = try_z;
    }

    next
}

/// Point-in-collider test used by projectiles.
#[inline]
pub fn collider_contains_point(collider: &Collider, point: Vec3) -> bool {
    (point.x - collider.x).abs() < collider.half_width
        && (point.z - collider.z).abs() < collider.half_depth
        && point.y >= 0.0
        && point.y < collider.height
}

/// Point-in-column test against an entity standing at `feet`.
///
/// `padding` widens the XZ extents (hit tests are a little generous).
#[inline]
pub fn point_in_column(point: Vec3, feet: Vec3, footprint: &Footprint, padding: f32) -> bool {
    (point.x - feet.x).abs() < footprint.half_width + padding
        && (point.z - feet.z).abs() < footprint.half_depth + padding
        && point.y >= 0.0
        && point.y < footprint.height
}
