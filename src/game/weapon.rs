//! Player Weapon
//!
//! Magazine, fire-rate and reload state machine. Every operation reports
//! failure with a `bool` instead of an error; the caller simply tries again
//! on a later tick.

use super::config::WeaponConfig;

/// Player rifle.
///
/// Invariants: `ammo` stays within `[0, mag_size]`, firing is refused while
/// reloading, and emptying the magazine starts a reload automatically.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub fire_rate: f32,
    pub mag_size: u32,
    pub reload_time: f32,
    pub damage: f32,
    pub bullet_speed: f32,
    ammo: u32,
    fire_cooldown: f32,
    reloading: bool,
    reload_timer: f32,
}

impl Weapon {
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            fire_rate: config.fire_rate,
            mag_size: config.mag_size,
            reload_time: config.reload_time,
            damage: config.damage,
            bullet_speed: config.bullet_speed,
            ammo: config.mag_size,
            fire_cooldown: 0.0,
            reloading: false,
            reload_timer: 0.0,
        }
    }

    /// Advance cooldown and reload timers.
    pub fn update(&mut self, dt: f32) {
        if self.fire_cooldown > 0.0 {
            self.fire_cooldown -= dt;
        }
        if self.reloading {
            self.reload_timer -= dt;
            if self.reload_timer <= 0.0 {
                self.ammo = self.mag_size;
                self.reloading = false;
            }
        }
    }

    pub fn can_fire(&self) -> bool {
        !self.reloading && self.fire_cooldown <= 0.0 && self.ammo > 0
    }

    /// Spend one round. Returns `false` (and changes nothing) if the weapon
    /// cannot fire right now.
    pub fn fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.ammo -= 1;
        self.fire_cooldown = 1.0 / self.fire_rate;
        if self.ammo == 0 {
            self.start_reload();
        }
        true
    }

    /// Begin a reload. Refused while already reloading or with a full
    /// magazine.
    pub fn start_reload(&mut self) -> bool {
        if self.reloading || self.ammo == self.mag_size {
            return false;
        }
        self.reloading = true;
        self.reload_timer = self.reload_time;
        true
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    /// Full magazine, no cooldown, no reload in progress.
    pub fn reset(&mut self) {
        self.ammo = self.mag_size;
        self.fire_cooldown = 0.0;
        self.reloading = false;
        self.reload_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon() -> Weapon {
        Weapon::new(&WeaponConfig::default())
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut w = weapon();
        assert!(w.fire());
        assert!(!w.can_fire());
        assert!(!w.fire());
        assert_eq!(w.ammo(), 29);

        // 1/6 s later the next shot is allowed
        w.update(0.2);
        assert!(w.fire());
        assert_eq!(w.ammo(), 28);
    }

    #[test]
    fn test_reload_refused_when_full_or_busy() {
        let mut w = weapon();
        assert!(!w.start_reload());
        assert!(w.fire());
        assert!(w.start_reload());
        assert!(!w.start_reload());
        assert!(!w.fire());
    }

    #[test]
    fn test_manual_reload_refills() {
        let mut w = weapon();
        for _ in 0..5 {
            assert!(w.fire());
            w.update(0.5);
        }
        assert_eq!(w.ammo(), 25);
        assert!(w.start_reload());
        w.update(1.0);
        assert!(w.is_reloading());
        w.update(0.5);
        assert!(!w.is_reloading());
        assert_eq!(w.ammo(), 30);
    }

    #[test]
    fn test_reset_is_canonical() {
        let mut w = weapon();
        w.fire();
        w.start_reload();
        w.update(0.1);
        w.reset();
        assert_eq!(w.ammo(), w.mag_size);
        assert!(!w.is_reloading());
        assert!(w.can_fire());
    }
}
