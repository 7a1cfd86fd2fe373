//! Shared Types Module
//!
//! Small angle and vector helpers shared by the player and enemy controllers.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Wrap an angle into `[-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}

/// Move `from` toward `to` by fraction `t` along the shortest arc.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    from + wrap_angle(to - from) * t
}

/// Yaw that faces along `(dx, dz)`; 0 faces +Z, PI/2 faces +X.
#[inline]
pub fn heading(dx: f32, dz: f32) -> f32 {
    dx.atan2(dz)
}

/// Drop the vertical component.
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle_range() {
        for a in [-10.0_f32, -PI, -1.0, 0.0, 1.0, PI + 0.1, 7.0, 20.0] {
            let w = wrap_angle(a);
            assert!((-PI..=PI).contains(&w), "{a} wrapped to {w}");
            assert!(((a - w) / TAU - ((a - w) / TAU).round()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_lerp_angle_takes_short_way() {
        // From just below +PI to just above -PI is a small step across the seam
        let from = PI - 0.1;
        let to = -PI + 0.1;
        let mid = lerp_angle(from, to, 0.5);
        assert!((mid - PI).abs() < 1e-4);
    }

    #[test]
    fn test_heading_axes() {
        assert!(heading(0.0, 1.0).abs() < 1e-6);
        assert!((heading(1.0, 0.0) - PI / 2.0).abs() < 1e-6);
    }
}
