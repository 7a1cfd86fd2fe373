//! Physics module for Manor Arena
//!
//! There is no rigid-body solver here. All blocking is axis-aligned:
//! entities and static geometry are full-height columns tested in XZ with a
//! separate height range check, and movement is resolved one axis at a time.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, Y is up, the ground plane is Y = 0.
//!
//! # Submodules
//!
//! - [`types`] - Math types re-exported from glam
//! - [`collision`] - Colliders, footprints, overlap and slide tests

pub mod collision;
pub mod types;

pub use collision::{
    Collider, Footprint, blocked, collider_contains_point, footprint_overlaps, point_in_column,
    slide_move,
};
pub use types::{Vec2, Vec3};
