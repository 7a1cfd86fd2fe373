//! Enemy AI
//!
//! Each enemy runs a small state machine:
//!
//! ```text
//! Idle --timer--> Patrol
//! Idle/Patrol --player within detection--> Chase
//! Chase --within attack range--> Attack
//! Chase --beyond 1.5x detection--> Patrol (patrol re-centers here)
//! Attack --beyond 1.3x attack range--> Chase
//! any --health <= 0--> Dead
//! ```
//!
//! Transitions are computed by [`AiState::next`], a pure function of the
//! current state, the distance to the player and the enemy's stats. Each
//! tick the enemy first acts on its current state, then applies the
//! transition, using the distance measured before it moved.

use glam::{Vec2, Vec3};

use super::config::{EnemyKind, EnemyType};
use super::frontend::{
    Anchor, AudioCue, SceneSink, VisualHandle, VisualKind, VisualPose, VisualStyle, WorldIo,
};
use super::rng::GameRng;
use super::systems::bullet_system::{BulletOwner, BulletPool};
use super::types::{flatten, heading, lerp_angle};
use crate::physics::{Collider, Footprint, slide_move};

/// Unscaled enemy hitbox; multiplied by the type's visual scale
pub const BASE_FOOTPRINT: Footprint = Footprint {
    half_width: 0.45,
    half_depth: 0.25,
    height: 2.8,
};
/// Patrol points are drawn from origin +/- this on each axis
pub const PATROL_RANGE: f32 = 8.0;
const PATROL_ARRIVE_DISTANCE: f32 = 1.5;
const LOSE_INTEREST_FACTOR: f32 = 1.5;
const ATTACK_EXIT_FACTOR: f32 = 1.3;
const ATTACK_CLOSE_IN_FACTOR: f32 = 0.8;
const SEPARATION_RADIUS: f32 = 2.0;
const SEPARATION_WEIGHT: f32 = 0.5;
const TURN_RATE: f32 = 0.1;
/// Muzzle relative to the feet when the model has no anchor
pub const MUZZLE_FALLBACK: Vec3 = Vec3::new(0.0, 1.4, 0.5);
pub const HIT_FLASH_SECS: f32 = 0.1;
/// Shrink/sink duration
pub const DEATH_ANIM_SECS: f32 = 0.4;
/// Dead enemies are hidden and disposable after this long
pub const REMOVE_AFTER_SECS: f32 = 0.5;

/// AI state of one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiState {
    /// Standing still until `remaining` runs out
    Idle { remaining: f32 },
    Patrol,
    Chase,
    Attack,
    /// Terminal. `timer` counts seconds since death.
    Dead { timer: f32 },
}

impl AiState {
    /// Next state for a tick in which the player was `distance` away.
    pub fn next(self, distance: f32, stats: &EnemyType) -> AiState {
        match self {
            AiState::Idle { remaining } => {
                if distance < stats.detection_range {
                    AiState::Chase
                } else if remaining <= 0.0 {
                    AiState::Patrol
                } else {
                    self
                }
            }
            AiState::Patrol => {
                if distance < stats.detection_range {
                    AiState::Chase
                } else {
                    AiState::Patrol
                }
            }
            AiState::Chase => {
                if distance > stats.detection_range * LOSE_INTEREST_FACTOR {
                    AiState::Patrol
                } else if distance < stats.attack_range {
                    AiState::Attack
                } else {
                    AiState::Chase
                }
            }
            AiState::Attack => {
                if distance > stats.attack_range * ATTACK_EXIT_FACTOR {
                    AiState::Chase
                } else {
                    AiState::Attack
                }
            }
            AiState::Dead { .. } => self,
        }
    }

    /// State after taking non-lethal damage.
    pub fn aggro(self) -> AiState {
        match self {
            AiState::Idle { .. } | AiState::Patrol => AiState::Chase,
            other => other,
        }
    }

    pub fn is_passive(self) -> bool {
        matches!(self, AiState::Idle { .. } | AiState::Patrol)
    }

    pub fn is_dead(self) -> bool {
        matches!(self, AiState::Dead { .. })
    }

    pub fn name(self) -> &'static str {
        match self {
            AiState::Idle { .. } => "idle",
            AiState::Patrol => "patrol",
            AiState::Chase => "chase",
            AiState::Attack => "attack",
            AiState::Dead { .. } => "dead",
        }
    }
}

/// Shared world state an enemy reads and writes during its update.
pub struct EnemyContext<'a> {
    pub player_position: Vec3,
    pub colliders: &'a [Collider],
    pub bullets: &'a mut BulletPool,
    pub rng: &'a mut GameRng,
    pub enemy_bullet_speed: f32,
}

/// The other enemies of the level, split around the one being updated.
#[derive(Clone, Copy)]
pub struct Neighbors<'a> {
    pub before: &'a [Enemy],
    pub after: &'a [Enemy],
}

impl<'a> Neighbors<'a> {
    pub fn none() -> Self {
        Self {
            before: &[],
            after: &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Enemy> {
        self.before.iter().chain(self.after.iter())
    }
}

/// One hostile gunman.
pub struct Enemy {
    pub kind: EnemyKind,
    pub stats: EnemyType,
    /// Feet position
    pub position: Vec3,
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub footprint: Footprint,
    state: AiState,
    fire_cooldown: f32,
    patrol_origin: Vec3,
    patrol_target: Vec3,
    flash_timer: f32,
    alive: bool,
    visual: Option<VisualHandle>,
    hidden: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Vec3, rng: &mut GameRng) -> Self {
        let stats = kind.stats();
        let idle = rng.random_range(0.5, 1.5);
        let fire_cooldown = rng.random_range(1.0, 3.0);
        let patrol_target = random_patrol_point(position, rng);
        Self {
            kind,
            stats,
            position,
            facing: 0.0,
            health: stats.health,
            max_health: stats.health,
            footprint: BASE_FOOTPRINT.scaled(stats.scale),
            state: AiState::Idle { remaining: idle },
            fire_cooldown,
            patrol_origin: position,
            patrol_target,
            flash_timer: 0.0,
            alive: true,
            visual: None,
            hidden: false,
        }
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn patrol_origin(&self) -> Vec3 {
        self.patrol_origin
    }

    pub fn patrol_target(&self) -> Vec3 {
        self.patrol_target
    }

    pub fn fire_cooldown(&self) -> f32 {
        self.fire_cooldown
    }

    /// False from the killing blow on, even while the death animation plays.
    pub fn is_alive(&self) -> bool {
        self.alive && !self.state.is_dead()
    }

    /// Death animation finished; the owner should dispose this enemy.
    pub fn is_removable(&self) -> bool {
        matches!(self.state, AiState::Dead { timer } if timer >= REMOVE_AFTER_SECS)
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    pub fn update(
        &mut self,
        dt: f32,
        ctx: &mut EnemyContext<'_>,
        io: &mut dyn WorldIo,
        others: Neighbors<'_>,
    ) {
        if self.flash_timer > 0.0 {
            self.flash_timer -= dt;
        }

        if let AiState::Dead { timer } = self.state {
            self.state = AiState::Dead { timer: timer + dt };
            return;
        }

        let target = ctx.player_position;
        let distance = self.position.distance(target);

        if let AiState::Idle { remaining } = self.state {
            self.state = AiState::Idle {
                remaining: remaining - dt,
            };
        }

        match self.state {
            AiState::Patrol => {
                let goal = self.patrol_target;
                self.move_toward(goal, self.stats.speed, dt, ctx.colliders, others);
                if self.position.distance(goal) < PATROL_ARRIVE_DISTANCE {
                    self.patrol_target = random_patrol_point(self.patrol_origin, ctx.rng);
                }
            }
            AiState::Chase => {
                self.move_toward(target, self.stats.chase_speed, dt, ctx.colliders, others);
            }
            AiState::Attack => {
                self.face(target);
                if distance > self.stats.attack_range * ATTACK_CLOSE_IN_FACTOR {
                    self.move_toward(
                        target,
                        self.stats.chase_speed * 0.5,
                        dt,
                        ctx.colliders,
                        others,
                    );
                }
                self.fire_cooldown -= dt;
                if self.fire_cooldown <= 0.0 {
                    self.shoot(ctx, io);
                    self.fire_cooldown = 1.0 / self.stats.fire_rate;
                }
            }
            AiState::Idle { .. } | AiState::Dead { .. } => {}
        }

        let next = self.state.next(distance, &self.stats);
        if self.state == AiState::Chase && next == AiState::Patrol {
            self.patrol_origin = self.position;
            self.patrol_target = random_patrol_point(self.patrol_origin, ctx.rng);
        }
        self.state = next;
    }

    /// Apply damage. Returns `true` only for the killing blow.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health -= amount;
        self.flash_timer = HIT_FLASH_SECS;
        self.state = self.state.aggro();

        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            self.state = AiState::Dead { timer: 0.0 };
            return true;
        }
        false
    }

    /// Step toward `target` on the floor, pushed apart from close neighbors,
    /// resolved per axis against the colliders.
    fn move_toward(
        &mut self,
        target: Vec3,
        speed: f32,
        dt: f32,
        colliders: &[Collider],
        others: Neighbors<'_>,
    ) {
        let to_target = flatten(target - self.position);
        if to_target.length() < 0.1 {
            return;
        }
        let mut dir = to_target.normalize();

        let mut separation = Vec3::ZERO;
        for other in others.iter().filter(|e| e.is_alive()) {
            let diff = flatten(self.position - other.position);
            let d = diff.length();
            if d > 0.0 && d < SEPARATION_RADIUS {
                separation += diff / d * ((SEPARATION_RADIUS - d) / SEPARATION_RADIUS);
            }
        }
        dir = (dir + separation * SEPARATION_WEIGHT).normalize_or_zero();

        let step = Vec2::new(dir.x, dir.z) * speed * dt;
        self.position = slide_move(self.position, step, &self.footprint, colliders);
        self.face(target);
    }

    fn face(&mut self, target: Vec3) {
        let angle = heading(target.x - self.position.x, target.z - self.position.z);
        self.facing = lerp_angle(self.facing, angle, TURN_RATE);
    }

    fn muzzle<S: SceneSink + ?Sized>(&self, scene: &S) -> Vec3 {
        self.visual
            .and_then(|h| scene.anchor_position(h, Anchor::GunTip))
            .unwrap_or(self.position + MUZZLE_FALLBACK)
    }

    fn shoot(&mut self, ctx: &mut EnemyContext<'_>, io: &mut dyn WorldIo) {
        let origin = self.muzzle(&*io);
        let mut dir = flatten(ctx.player_position - origin).normalize_or_zero();

        let spread = (1.0 - self.stats.accuracy) * 0.5;
        dir.x += (ctx.rng.random_f32() - 0.5) * spread;
        dir.z += (ctx.rng.random_f32() - 0.5) * spread;

        ctx.bullets.fire(
            origin,
            dir.normalize_or_zero(),
            ctx.enemy_bullet_speed,
            self.stats.damage,
            BulletOwner::Enemy,
        );
        io.play(AudioCue::EnemyShoot);
    }

    /// Transform for the current tick, including the death shrink/sink.
    pub fn pose(&self) -> VisualPose {
        let style = if self.is_flashing() {
            VisualStyle::HitFlash
        } else {
            VisualStyle::Normal
        };
        let mut pose = VisualPose::at(self.position)
            .with_facing(self.facing)
            .with_style(style);

        if let AiState::Dead { timer } = self.state {
            let t = (timer / DEATH_ANIM_SECS).min(1.0);
            pose.scale = 1.0 - t;
            pose.position.y = -t * 0.5;
        }
        pose
    }

    pub fn attach_visual<S: SceneSink + ?Sized>(&mut self, scene: &mut S) {
        if self.visual.is_none() {
            let kind = VisualKind::Enemy {
                kind: self.kind,
                color: self.stats.color,
                scale: self.stats.scale,
            };
            self.visual = Some(scene.spawn(kind, self.position));
        }
    }

    pub fn sync_visual<S: SceneSink + ?Sized>(&mut self, scene: &mut S) {
        let Some(handle) = self.visual else {
            return;
        };
        scene.place(handle, self.pose());
        if !self.hidden && self.is_removable() {
            scene.set_visible(handle, false);
            self.hidden = true;
        }
    }

    pub fn dispose<S: SceneSink + ?Sized>(&mut self, scene: &mut S) {
        if let Some(handle) = self.visual.take() {
            scene.dispose(handle);
        }
    }
}

fn random_patrol_point(origin: Vec3, rng: &mut GameRng) -> Vec3 {
    Vec3::new(
        origin.x + rng.symmetric(PATROL_RANGE),
        0.0,
        origin.z + rng.symmetric(PATROL_RANGE),
    )
}
