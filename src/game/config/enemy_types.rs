//! Enemy type presets
//!
//! Enemy configuration is a closed set of named presets. Instances copy the
//! stat record by value and never mutate it.

use serde::{Deserialize, Serialize};

/// Named enemy preset. Level tables refer to enemies by this key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Baseline gunman
    Grunt,
    /// Fast, fragile, fires often at close range
    Rusher,
    /// Slow, long range, accurate
    Marksman,
    /// Large, durable, heavy hitter
    Brute,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Grunt,
        EnemyKind::Rusher,
        EnemyKind::Marksman,
        EnemyKind::Brute,
    ];

    pub fn stats(self) -> EnemyType {
        EnemyType::preset(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Grunt => "Grunt",
            EnemyKind::Rusher => "Rusher",
            EnemyKind::Marksman => "Marksman",
            EnemyKind::Brute => "Brute",
        }
    }
}

/// Immutable combat and presentation stats for one enemy preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyType {
    /// Body tint (0xRRGGBB)
    pub color: u32,
    /// Uniform visual scale; also scales the hitbox
    pub scale: f32,
    pub health: f32,
    /// Patrol speed (m/s)
    pub speed: f32,
    /// Pursuit speed (m/s)
    pub chase_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    /// Shots per second while attacking
    pub fire_rate: f32,
    /// 1.0 fires dead on target, lower values widen the spread
    pub accuracy: f32,
    pub damage: f32,
}

impl EnemyType {
    pub fn preset(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Grunt => Self {
                color: 0x8b4513,
                scale: 1.0,
                health: 40.0,
                speed: 2.5,
                chase_speed: 4.0,
                detection_range: 18.0,
                attack_range: 12.0,
                fire_rate: 1.0,
                accuracy: 0.7,
                damage: 8.0,
            },
            EnemyKind::Rusher => Self {
                color: 0xb22222,
                scale: 0.9,
                health: 25.0,
                speed: 3.5,
                chase_speed: 6.5,
                detection_range: 22.0,
                attack_range: 6.0,
                fire_rate: 2.0,
                accuracy: 0.5,
                damage: 5.0,
            },
            EnemyKind::Marksman => Self {
                color: 0x2f4f4f,
                scale: 1.0,
                health: 30.0,
                speed: 2.0,
                chase_speed: 3.0,
                detection_range: 28.0,
                attack_range: 20.0,
                fire_rate: 0.6,
                accuracy: 0.92,
                damage: 14.0,
            },
            EnemyKind::Brute => Self {
                color: 0x4b0082,
                scale: 1.35,
                health: 120.0,
                speed: 1.8,
                chase_speed: 2.8,
                detection_range: 16.0,
                attack_range: 9.0,
                fire_rate: 1.5,
                accuracy: 0.6,
                damage: 12.0,
            },
        }
    }
}
