//! Collision system - bullet-vs-entity hit resolution.
//!
//! Static geometry is handled by the bullet pool and the movement code.
//! This module settles the cross-entity part of a tick: player bullets
//! against live enemies, enemy bullets against the player. It mutates
//! health and consumes bullets, and reports what happened so the controller
//! can play cues, count kills and spawn effects.

use glam::Vec3;

use super::bullet_system::BulletPool;
use crate::game::arena_player::Player;
use crate::game::enemy::Enemy;
use crate::physics::point_in_column;

/// One player bullet that connected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyHit {
    /// Feet position of the enemy that was hit
    pub position: Vec3,
    /// This hit was the killing blow
    pub killed: bool,
}

/// Outcome of enemy fire for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerHits {
    pub hits: u32,
    pub player_died: bool,
}

/// Stateless resolver.
pub struct CollisionSystem;

impl CollisionSystem {
    /// Test every active player bullet against every live enemy.
    ///
    /// A bullet damages at most one enemy and is consumed by the hit.
    pub fn resolve_player_bullets(
        bullets: &mut BulletPool,
        enemies: &mut [Enemy],
        padding: f32,
    ) -> Vec<EnemyHit> {
        let mut hits = Vec::new();

        for bullet in bullets.player_bullets() {
            let target = enemies.iter_mut().find(|e| {
                e.is_alive() && point_in_column(bullet.position, e.position, &e.footprint, padding)
            });
            if let Some(enemy) = target {
                let killed = enemy.take_damage(bullet.damage);
                bullets.deactivate(bullet.id);
                hits.push(EnemyHit {
                    position: enemy.position,
                    killed,
                });
            }
        }

        hits
    }

    /// Test every active enemy bullet against the player. Stops at the
    /// bullet that kills.
    pub fn resolve_enemy_bullets(
        bullets: &mut BulletPool,
        player: &mut Player,
        padding: f32,
    ) -> PlayerHits {
        let mut result = PlayerHits::default();
        if !player.is_alive() {
            return result;
        }

        for bullet in bullets.enemy_bullets() {
            if point_in_column(bullet.position, player.position, &player.footprint, padding) {
                player.take_damage(bullet.damage);
                bullets.deactivate(bullet.id);
                result.hits += 1;

                if !player.is_alive() {
                    result.player_died = true;
                    break;
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{EnemyKind, GameConfig};
    use crate::game::rng::GameRng;
    use crate::game::systems::bullet_system::BulletOwner;

    #[test]
    fn test_bullet_hits_only_first_enemy() {
        let mut rng = GameRng::from_seed(5);
        let mut enemies = vec![
            Enemy::new(EnemyKind::Grunt, Vec3::new(0.0, 0.0, 5.0), &mut rng),
            Enemy::new(EnemyKind::Grunt, Vec3::new(0.0, 0.0, 5.0), &mut rng),
        ];
        let mut bullets = BulletPool::new(4, 2.0);
        bullets.fire(Vec3::new(0.0, 1.5, 5.0), Vec3::Z, 50.0, 12.0, BulletOwner::Player);

        let hits = CollisionSystem::resolve_player_bullets(&mut bullets, &mut enemies, 0.1);
        assert_eq!(hits.len(), 1);
        assert!(!hits[0].killed);
        assert_eq!(enemies[0].health, 28.0);
        assert_eq!(enemies[1].health, 40.0);
        assert_eq!(bullets.active_count(), 0);
    }

    #[test]
    fn test_dead_enemies_are_not_targets() {
        let mut rng = GameRng::from_seed(5);
        let mut enemies = vec![Enemy::new(EnemyKind::Rusher, Vec3::ZERO, &mut rng)];
        enemies[0].take_damage(1000.0);
        let mut bullets = BulletPool::new(4, 2.0);
        bullets.fire(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 50.0, 12.0, BulletOwner::Player);

        let hits = CollisionSystem::resolve_player_bullets(&mut bullets, &mut enemies, 0.1);
        assert!(hits.is_empty());
        assert_eq!(bullets.active_count(), 1);
    }

    #[test]
    fn test_padding_widens_hitbox() {
        let mut rng = GameRng::from_seed(5);
        let mut enemies = vec![Enemy::new(EnemyKind::Grunt, Vec3::ZERO, &mut rng)];
        let mut bullets = BulletPool::new(4, 2.0);
        // 0.5 off center: outside the 0.45 half width, inside 0.55 padded
        bullets.fire(Vec3::new(0.5, 1.0, 0.0), Vec3::Z, 50.0, 12.0, BulletOwner::Player);
        let hits = CollisionSystem::resolve_player_bullets(&mut bullets, &mut enemies, 0.1);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_enemy_fire_stops_at_death() {
        let mut player = Player::new(&GameConfig::default());
        player.health = 10.0;
        let mut bullets = BulletPool::new(4, 2.0);
        for _ in 0..3 {
            bullets.fire(Vec3::new(0.0, 1.4, 0.0), Vec3::X, 30.0, 8.0, BulletOwner::Enemy);
        }

        let result = CollisionSystem::resolve_enemy_bullets(&mut bullets, &mut player, 0.1);
        assert_eq!(result.hits, 2);
        assert!(result.player_died);
        assert!(!player.is_alive());
        // The third bullet is still in flight
        assert_eq!(bullets.active_count(), 1);
    }
}
