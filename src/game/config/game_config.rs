//! Gameplay Configuration
//!
//! Centralized tunables for the player, the weapon and the frame loop.
//! `Default` returns the values the game ships with.

use static_assertions::const_assert;

use crate::physics::Footprint;

/// Longest step the simulation takes, however long the frame was
pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;
const_assert!(MAX_FRAME_DT > 0.0);

/// Player body and regeneration tunables.
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Walk speed (m/s)
    pub speed: f32,
    /// Sprint speed (m/s)
    pub sprint_speed: f32,
    pub max_health: f32,
    /// Health regenerated per second once regeneration is active
    pub regen_rate: f32,
    /// Seconds without damage before regeneration starts
    pub regen_delay: f32,
    /// Collision extents around the feet position
    pub footprint: Footprint,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            sprint_speed: 12.0,
            max_health: 100.0,
            regen_rate: 5.0,
            regen_delay: 3.0,
            footprint: Footprint::new(0.5, 0.3, 3.0),
        }
    }
}

/// Player rifle tunables.
#[derive(Clone, Debug)]
pub struct WeaponConfig {
    /// Shots per second
    pub fire_rate: f32,
    pub mag_size: u32,
    /// Seconds to refill the magazine
    pub reload_time: f32,
    pub damage: f32,
    /// Muzzle speed (m/s)
    pub bullet_speed: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_rate: 6.0,
            mag_size: 30,
            reload_time: 1.5,
            damage: 12.0,
            bullet_speed: 50.0,
        }
    }
}

/// Top-level configuration for a game session.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub weapon: WeaponConfig,
    /// Number of projectile slots (player and enemy shots share the pool)
    pub bullet_capacity: usize,
    /// Seconds a projectile stays alive without hitting anything
    pub bullet_lifetime: f32,
    /// Speed of enemy projectiles (m/s)
    pub enemy_bullet_speed: f32,
    /// Frame delta cap (seconds), bounds the step after a stall
    pub max_frame_dt: f32,
    /// Radians of camera rotation per unit of look delta
    pub look_sensitivity: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    /// Camera orientation applied on every level load
    pub start_yaw: f32,
    pub start_pitch: f32,
    /// Extra XZ margin on bullet-vs-entity hit tests
    pub hit_padding: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            weapon: WeaponConfig::default(),
            bullet_capacity: crate::game::systems::bullet_system::DEFAULT_CAPACITY,
            bullet_lifetime: 2.0,
            enemy_bullet_speed: 30.0,
            max_frame_dt: MAX_FRAME_DT,
            look_sensitivity: 0.003,
            pitch_min: -0.2,
            pitch_max: 1.0,
            start_yaw: 0.0,
            start_pitch: 0.3,
            hit_padding: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = GameConfig::default();
        assert!(config.player.sprint_speed > config.player.speed);
        assert!(config.pitch_min < config.start_pitch && config.start_pitch < config.pitch_max);
        assert!(config.bullet_capacity > 0);
        assert_eq!(config.max_frame_dt, MAX_FRAME_DT);
        // A full magazine outlasts a single reload
        assert!(config.weapon.mag_size as f32 / config.weapon.fire_rate > config.weapon.reload_time);
    }
}
