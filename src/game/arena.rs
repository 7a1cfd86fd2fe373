//! Arena geometry
//!
//! Turns a [`LevelDescriptor`] into the static collider list used by the
//! player, the enemies and the bullet pool, and asks the presentation layer
//! for the matching floor, wall, furniture and decoration visuals.

use glam::Vec3;

use super::config::{Decoration, LevelDescriptor, Obstacle};
use super::frontend::{SceneSink, VisualHandle, VisualKind, VisualPose};
use crate::physics::Collider;

/// Perimeter wall thickness (meters)
pub const WALL_THICKNESS: f32 = 1.2;
/// Tables are waist high whatever their footprint
pub const TABLE_HEIGHT: f32 = 1.0;
/// Bookshelves collide as a thin slab
pub const BOOKSHELF_HALF_DEPTH: f32 = 0.3;
/// Pillars collide as a square slightly wider than their shaft
pub const PILLAR_FOOTPRINT_FACTOR: f32 = 1.5;

/// Static level geometry. Colliders are immutable between builds.
#[derive(Debug, Default)]
pub struct Arena {
    colliders: Vec<Collider>,
    visuals: Vec<VisualHandle>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current geometry with `level`'s.
    pub fn build(&mut self, level: &LevelDescriptor, scene: &mut dyn SceneSink) {
        self.clear(scene);

        let colors = level.colors;
        let floor = scene.spawn(
            VisualKind::Floor {
                width: level.arena.width,
                depth: level.arena.depth,
                color: colors.floor,
            },
            Vec3::ZERO,
        );
        self.visuals.push(floor);

        for wall in perimeter_walls(level) {
            let handle = scene.spawn(
                VisualKind::Wall {
                    size: Vec3::new(wall.half_width * 2.0, wall.height, wall.half_depth * 2.0),
                    color: colors.wall,
                },
                Vec3::new(wall.x, wall.height / 2.0, wall.z),
            );
            self.visuals.push(handle);
            self.colliders.push(wall);
        }

        for obstacle in &level.obstacles {
            let collider = obstacle_collider(obstacle, level.wall_height);
            let color = obstacle_color(obstacle).unwrap_or(colors.obstacle);
            let handle = scene.spawn(
                VisualKind::Obstacle {
                    obstacle: obstacle.clone(),
                    color,
                },
                Vec3::new(collider.x, 0.0, collider.z),
            );
            if let Obstacle::Bookshelf { rotation, .. } = obstacle {
                scene.place(
                    handle,
                    VisualPose::at(Vec3::new(collider.x, 0.0, collider.z)).with_facing(*rotation),
                );
            }
            self.visuals.push(handle);
            self.colliders.push(collider);
        }

        for decoration in &level.decorations {
            let handle = scene.spawn(
                VisualKind::Decoration {
                    decoration: decoration.clone(),
                    wall_height: level.wall_height,
                },
                decoration_position(decoration, level.wall_height),
            );
            self.visuals.push(handle);
        }

        log::debug!(
            "arena '{}' built: {} colliders, {} visuals",
            level.name,
            self.colliders.len(),
            self.visuals.len()
        );
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Dispose every visual and drop the colliders.
    pub fn clear(&mut self, scene: &mut dyn SceneSink) {
        for handle in self.visuals.drain(..) {
            scene.dispose(handle);
        }
        self.colliders.clear();
    }
}

/// Colliders for `level` without touching a scene.
pub fn level_colliders(level: &LevelDescriptor) -> Vec<Collider> {
    perimeter_walls(level)
        .into_iter()
        .chain(
            level
                .obstacles
                .iter()
                .map(|o| obstacle_collider(o, level.wall_height)),
        )
        .collect()
}

/// North, south, east and west walls just outside the floor. The north and
/// south walls span the corners.
fn perimeter_walls(level: &LevelDescriptor) -> [Collider; 4] {
    let width = level.arena.width;
    let depth = level.arena.depth;
    let height = level.wall_height;
    let half_w = width / 2.0;
    let half_d = depth / 2.0;
    let half_t = WALL_THICKNESS / 2.0;
    let long = (width + WALL_THICKNESS * 2.0) / 2.0;

    [
        Collider::new(0.0, half_d + half_t, long, half_t, height),
        Collider::new(0.0, -half_d - half_t, long, half_t, height),
        Collider::new(half_w + half_t, 0.0, half_t, half_d, height),
        Collider::new(-half_w - half_t, 0.0, half_t, half_d, height),
    ]
}

/// Collision column for one piece of furniture.
pub fn obstacle_collider(obstacle: &Obstacle, wall_height: f32) -> Collider {
    match *obstacle {
        Obstacle::Box { pos, size, .. } => {
            Collider::new(pos.x, pos.y, size.x / 2.0, size.z / 2.0, size.y)
        }
        Obstacle::Pillar {
            pos,
            radius,
            height,
        } => {
            let half = radius * PILLAR_FOOTPRINT_FACTOR;
            Collider::new(pos.x, pos.y, half, half, height.unwrap_or(wall_height))
        }
        Obstacle::Table { pos, width, depth } => {
            Collider::new(pos.x, pos.y, width / 2.0, depth / 2.0, TABLE_HEIGHT)
        }
        Obstacle::Bookshelf {
            pos, width, height, ..
        } => Collider::new(pos.x, pos.y, width / 2.0, BOOKSHELF_HALF_DEPTH, height),
        Obstacle::Cylinder {
            pos,
            radius,
            height,
            ..
        } => Collider::new(pos.x, pos.y, radius, radius, height),
    }
}

fn obstacle_color(obstacle: &Obstacle) -> Option<u32> {
    match obstacle {
        Obstacle::Box { color, .. } | Obstacle::Cylinder { color, .. } => *color,
        _ => None,
    }
}

fn decoration_position(decoration: &Decoration, wall_height: f32) -> Vec3 {
    match decoration {
        Decoration::Chandelier { pos, .. } => Vec3::new(pos.x, wall_height - 0.1, pos.y),
        Decoration::Carpet { pos, .. } => Vec3::new(pos.x, 0.0, pos.y),
        Decoration::Painting { pos, .. } | Decoration::Sconce { pos, .. } => *pos,
    }
}
