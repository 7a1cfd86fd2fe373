//! Pooled bullet simulation.
//!
//! A fixed set of slots shared by player and enemy shots. Slots are claimed
//! on fire and released on expiry, on hitting level geometry, or when the
//! controller consumes a hit. The pool is allocated once and never grows;
//! a shot fired while every slot is busy is dropped.

use glam::Vec3;
use static_assertions::const_assert;

use crate::game::frontend::{SceneSink, VisualHandle, VisualKind, VisualPose, VisualStyle};
use crate::physics::{Collider, collider_contains_point};

/// Slot count used by the default game config.
pub const DEFAULT_CAPACITY: usize = 60;
const_assert!(DEFAULT_CAPACITY > 0);

/// Who fired a bullet. Decides what it can hit and how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

impl BulletOwner {
    fn style(self) -> VisualStyle {
        match self {
            BulletOwner::Player => VisualStyle::PlayerShot,
            BulletOwner::Enemy => VisualStyle::EnemyShot,
        }
    }
}

/// Stable slot index, valid for the life of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BulletId(pub usize);

/// One pool slot.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub active: bool,
    pub owner: BulletOwner,
    pub position: Vec3,
    pub velocity: Vec3,
    pub damage: f32,
    /// Seconds left before the bullet expires
    pub lifetime: f32,
    visual: Option<VisualHandle>,
    shown: bool,
}

impl Bullet {
    fn inactive() -> Self {
        Self {
            active: false,
            owner: BulletOwner::Player,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            damage: 0.0,
            lifetime: 0.0,
            visual: None,
            shown: false,
        }
    }
}

/// Read-only view of an active bullet handed to hit resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSnapshot {
    pub id: BulletId,
    pub position: Vec3,
    pub damage: f32,
}

/// Fixed-capacity projectile pool.
pub struct BulletPool {
    slots: Vec<Bullet>,
    lifetime: f32,
}

impl BulletPool {
    pub fn new(capacity: usize, lifetime: f32) -> Self {
        Self {
            slots: (0..capacity).map(|_| Bullet::inactive()).collect(),
            lifetime,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Create one hidden renderable per slot. Call once after construction.
    pub fn attach_visuals(&mut self, scene: &mut dyn SceneSink) {
        for slot in &mut self.slots {
            if slot.visual.is_none() {
                let handle = scene.spawn(VisualKind::Bullet, Vec3::ZERO);
                scene.set_visible(handle, false);
                slot.visual = Some(handle);
                slot.shown = false;
            }
        }
    }

    /// Claim the first free slot. `direction` need not be normalized.
    ///
    /// Returns `false` if the pool is saturated and the shot was dropped.
    pub fn fire(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        speed: f32,
        damage: f32,
        owner: BulletOwner,
    ) -> bool {
        let lifetime = self.lifetime;
        let Some(slot) = self.slots.iter_mut().find(|b| !b.active) else {
            log::debug!("bullet pool saturated, dropping {owner:?} shot");
            return false;
        };

        slot.active = true;
        slot.owner = owner;
        slot.position = origin;
        slot.velocity = direction.normalize_or_zero() * speed;
        slot.damage = damage;
        slot.lifetime = lifetime;
        true
    }

    /// Move every active bullet, expire old ones and stop those that entered
    /// level geometry.
    pub fn update(&mut self, dt: f32, colliders: &[Collider]) {
        for bullet in self.slots.iter_mut().filter(|b| b.active) {
            bullet.position += bullet.velocity * dt;

            bullet.lifetime -= dt;
            if bullet.lifetime <= 0.0 {
                bullet.active = false;
                continue;
            }

            if colliders
                .iter()
                .any(|c| collider_contains_point(c, bullet.position))
            {
                bullet.active = false;
            }
        }
    }

    pub fn active(&self, owner: BulletOwner) -> impl Iterator<Item = BulletSnapshot> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.active && b.owner == owner)
            .map(|(i, b)| BulletSnapshot {
                id: BulletId(i),
                position: b.position,
                damage: b.damage,
            })
    }

    pub fn player_bullets(&self) -> Vec<BulletSnapshot> {
        self.active(BulletOwner::Player).collect()
    }

    pub fn enemy_bullets(&self) -> Vec<BulletSnapshot> {
        self.active(BulletOwner::Enemy).collect()
    }

    /// Consume a bullet that hit something.
    pub fn deactivate(&mut self, id: BulletId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.active = false;
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.active).count()
    }

    pub fn get(&self, id: BulletId) -> Option<&Bullet> {
        self.slots.get(id.0)
    }

    /// Release every slot (level load, retry, quit).
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    /// Push positions of active bullets and hide released ones.
    pub fn sync_visuals(&mut self, scene: &mut dyn SceneSink) {
        for slot in &mut self.slots {
            let Some(handle) = slot.visual else {
                continue;
            };
            if slot.active {
                scene.place(
                    handle,
                    VisualPose::at(slot.position).with_style(slot.owner.style()),
                );
                if !slot.shown {
                    scene.set_visible(handle, true);
                    slot.shown = true;
                }
            } else if slot.shown {
                scene.set_visible(handle, false);
                slot.shown = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(capacity: usize) -> BulletPool {
        BulletPool::new(capacity, 2.0)
    }

    #[test]
    fn test_saturated_pool_drops_shots() {
        let mut p = pool(3);
        for _ in 0..3 {
            assert!(p.fire(Vec3::ZERO, Vec3::X, 10.0, 1.0, BulletOwner::Player));
        }
        assert!(!p.fire(Vec3::ZERO, Vec3::X, 10.0, 1.0, BulletOwner::Enemy));
        assert_eq!(p.active_count(), 3);
        assert!(p.enemy_bullets().is_empty());
    }

    #[test]
    fn test_velocity_is_normalized_direction_times_speed() {
        let mut p = pool(1);
        p.fire(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), 50.0, 12.0, BulletOwner::Player);
        let b = p.get(BulletId(0)).unwrap();
        assert_eq!(b.velocity, Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(b.lifetime, 2.0);
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut p = pool(1);
        p.fire(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 1.0, 1.0, BulletOwner::Enemy);
        let mut last = p.get(BulletId(0)).unwrap().lifetime;
        for _ in 0..7 {
            p.update(0.25, &[]);
            let now = p.get(BulletId(0)).unwrap().lifetime;
            assert!(now < last);
            last = now;
        }
        assert_eq!(p.active_count(), 1);
        p.update(0.25, &[]);
        assert_eq!(p.active_count(), 0);
    }

    #[test]
    fn test_deactivated_bullet_never_moves() {
        let mut p = pool(2);
        p.fire(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 10.0, 1.0, BulletOwner::Player);
        let id = p.player_bullets()[0].id;
        p.deactivate(id);
        let before = p.get(id).unwrap().position;
        p.update(0.1, &[]);
        assert_eq!(p.get(id).unwrap().position, before);
        assert!(p.player_bullets().is_empty());
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut p = pool(4);
        for _ in 0..4 {
            p.fire(Vec3::ZERO, Vec3::X, 1.0, 1.0, BulletOwner::Enemy);
        }
        p.reset();
        assert_eq!(p.active_count(), 0);
        p.reset();
        assert_eq!(p.active_count(), 0);
    }

    #[test]
    fn test_bullet_under_collider_height_passes_over() {
        // Low table: 1 unit high, bullet at y = 1.5 flies over it
        let table = Collider::new(2.0, 0.0, 1.0, 0.5, 1.0);
        let mut p = pool(1);
        p.fire(Vec3::new(0.0, 1.5, 0.0), Vec3::X, 10.0, 1.0, BulletOwner::Player);
        for _ in 0..5 {
            p.update(0.05, &[table]);
        }
        assert_eq!(p.active_count(), 1);
    }
}
