//! Frame-driven timers.
//!
//! All transient presentation timers live here and advance only when the
//! controller ticks, so nothing keeps counting while the game is paused or
//! after the run ends.

/// Named one-shot timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Muzzle light after the player fires
    MuzzleFlash,
    /// Crosshair highlight after a confirmed hit
    CrosshairHit,
    /// Red screen edge after the player takes damage
    DamageFlash,
}

impl TimerId {
    const COUNT: usize = 3;

    /// Default duration in seconds.
    pub fn duration(self) -> f32 {
        match self {
            TimerId::MuzzleFlash => 0.05,
            TimerId::CrosshairHit => 0.15,
            TimerId::DamageFlash => 0.3,
        }
    }

    fn index(self) -> usize {
        match self {
            TimerId::MuzzleFlash => 0,
            TimerId::CrosshairHit => 1,
            TimerId::DamageFlash => 2,
        }
    }
}

/// Owns every timer; ticked once per playing frame.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    remaining: [f32; TimerId::COUNT],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start a timer with its default duration.
    pub fn arm(&mut self, id: TimerId) {
        self.arm_for(id, id.duration());
    }

    pub fn arm_for(&mut self, id: TimerId, seconds: f32) {
        self.remaining[id.index()] = seconds.max(0.0);
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.remaining[id.index()] > 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        for t in &mut self.remaining {
            if *t > 0.0 {
                *t = (*t - dt).max(0.0);
            }
        }
    }

    pub fn clear(&mut self) {
        self.remaining = [0.0; TimerId::COUNT];
    }
}
