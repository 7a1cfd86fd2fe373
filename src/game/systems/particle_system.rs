//! Death-burst particles.
//!
//! Purely cosmetic: a killed enemy throws a handful of fragments that arc
//! under gravity, shrink, and are disposed when their life runs out.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::game::frontend::{SceneSink, VisualHandle, VisualKind, VisualPose};
use crate::game::rng::GameRng;

pub const BURST_COUNT: usize = 10;
const GRAVITY: f32 = 15.0;
/// Life at which a fragment is drawn at unit scale
const FULL_SCALE_LIFE: f32 = 0.5;
const FRAGMENT_COLOR: u32 = 0xffaa44;

#[derive(Debug, Clone)]
struct Particle {
    position: Vec3,
    velocity: Vec3,
    life: f32,
    visual: VisualHandle,
}

#[derive(Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Throw [`BURST_COUNT`] fragments from around `origin` (an entity's feet).
    pub fn spawn_burst(&mut self, origin: Vec3, rng: &mut GameRng, scene: &mut dyn SceneSink) {
        for _ in 0..BURST_COUNT {
            let speed = rng.random_range(3.0, 8.0);
            let angle = rng.random_range(0.0, TAU);
            let up = rng.random_range(2.0, 6.0);

            let position = Vec3::new(
                origin.x + rng.symmetric(0.5),
                origin.y + 1.0 + rng.random_f32(),
                origin.z + rng.symmetric(0.5),
            );
            let visual = scene.spawn(
                VisualKind::Particle {
                    color: FRAGMENT_COLOR,
                },
                position,
            );

            self.particles.push(Particle {
                position,
                velocity: Vec3::new(angle.cos() * speed, up, angle.sin() * speed),
                life: rng.random_range(0.5, 0.8),
                visual,
            });
        }
    }

    pub fn update(&mut self, dt: f32, scene: &mut dyn SceneSink) {
        self.particles.retain_mut(|p| {
            p.position += p.velocity * dt;
            p.velocity.y -= GRAVITY * dt;
            p.life -= dt;

            if p.life <= 0.0 {
                scene.dispose(p.visual);
                return false;
            }

            let scale = (p.life / FULL_SCALE_LIFE).max(0.0);
            scene.place(p.visual, VisualPose::at(p.position).with_scale(scale));
            true
        });
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Dispose every live fragment.
    pub fn clear(&mut self, scene: &mut dyn SceneSink) {
        for p in self.particles.drain(..) {
            scene.dispose(p.visual);
        }
    }
}
