//! Input Module
//!
//! Platform-agnostic input for the arena simulation. The host (browser,
//! window, touch widgets, a test script) implements [`InputSource`]; the
//! controller samples it exactly once per tick into an [`InputFrame`] so that
//! every system in the tick sees the same values.
//!
//! # Example
//!
//! ```rust,ignore
//! use manor_arena_engine::input::{InputState, InputSource, InputFrame};
//!
//! let mut input = InputState::new();
//! input.keys.forward = true;
//! input.aim.accumulate_delta(12.0, -3.0);
//! input.press_reload();
//!
//! let frame = InputFrame::sample(&mut input);
//! assert!(frame.reload);
//! assert!(!input.consume_reload()); // edge-triggered, cleared on read
//! ```

pub mod keyboard;
pub mod mouse_state;

pub use keyboard::MovementKeys;
pub use mouse_state::AimState;

use glam::Vec2;

/// Input collaborator contract.
///
/// `movement` lies in the unit disk (x = strafe right, y = forward).
/// `aim_delta` is the raw, unscaled look delta accumulated since the last
/// read. `consume_*` are edge-triggered and clear on read.
pub trait InputSource {
    fn movement(&self) -> Vec2;
    fn aim_delta(&mut self) -> Vec2;
    fn is_shooting(&self) -> bool;
    fn is_sprinting(&self) -> bool;
    fn consume_reload(&mut self) -> bool;
    fn consume_pause(&mut self) -> bool;

    /// Capture or release the pointer. Called by the controller when play
    /// starts, pauses or ends. Sources without a pointer ignore it.
    fn set_pointer_locked(&mut self, _locked: bool) {}
}

/// Snapshot of one tick's input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub movement: Vec2,
    pub aim_delta: Vec2,
    pub shooting: bool,
    pub sprinting: bool,
    pub reload: bool,
    pub pause: bool,
}

impl InputFrame {
    /// Read every channel of `source` once. Consumes the edge-triggered flags.
    ///
    /// Pause is read first. A pausing frame leaves the look delta and the
    /// reload press pending for the first tick after resume.
    pub fn sample<S: InputSource + ?Sized>(source: &mut S) -> Self {
        if source.consume_pause() {
            return Self {
                pause: true,
                ..Default::default()
            };
        }
        Self {
            movement: clamp_to_unit_disk(source.movement()),
            aim_delta: source.aim_delta(),
            shooting: source.is_shooting(),
            sprinting: source.is_sprinting(),
            reload: source.consume_reload(),
            pause: false,
        }
    }

    /// True when any movement is requested.
    pub fn is_moving(&self) -> bool {
        self.movement.x != 0.0 || self.movement.y != 0.0
    }
}

/// Longer-than-unit inputs (keyboard diagonals, overdriven sticks) are
/// scaled back onto the disk; shorter ones pass through for analog control.
pub fn clamp_to_unit_disk(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 1.0 { v / len } else { v }
}

/// Host-fed input state implementing [`InputSource`].
///
/// Window or touch event handlers write into it between frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: MovementKeys,
    pub aim: AimState,
    /// Analog stick movement, overrides keys when non-zero
    pub stick: Vec2,
    pub shooting: bool,
    reload_pressed: bool,
    pause_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_reload(&mut self) {
        self.reload_pressed = true;
    }

    pub fn press_pause(&mut self) {
        self.pause_pressed = true;
    }

    /// Release everything (used when focus is lost or a menu opens).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl InputSource for InputState {
    fn movement(&self) -> Vec2 {
        if self.stick != Vec2::ZERO {
            clamp_to_unit_disk(self.stick)
        } else {
            self.keys.movement_vector()
        }
    }

    fn aim_delta(&mut self) -> Vec2 {
        let (dx, dy) = self.aim.consume_delta();
        Vec2::new(dx, dy)
    }

    fn is_shooting(&self) -> bool {
        self.shooting
    }

    fn is_sprinting(&self) -> bool {
        self.keys.sprint
    }

    fn consume_reload(&mut self) -> bool {
        std::mem::take(&mut self.reload_pressed)
    }

    fn consume_pause(&mut self) -> bool {
        std::mem::take(&mut self.pause_pressed)
    }

    fn set_pointer_locked(&mut self, locked: bool) {
        self.aim.set_pointer_locked(locked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_flags_clear_on_read() {
        let mut input = InputState::new();
        input.press_reload();
        input.press_pause();

        // The pausing frame reports only the pause
        let frame = InputFrame::sample(&mut input);
        assert!(frame.pause);
        assert!(!frame.reload);

        let frame = InputFrame::sample(&mut input);
        assert!(frame.reload);
        assert!(!frame.pause);

        let frame = InputFrame::sample(&mut input);
        assert!(!frame.reload);
        assert!(!frame.pause);
    }

    #[test]
    fn test_pausing_frame_keeps_look_delta() {
        let mut input = InputState::new();
        input.aim.accumulate_delta(2.0, 0.0);
        input.press_pause();

        assert_eq!(InputFrame::sample(&mut input).aim_delta, Vec2::ZERO);
        assert_eq!(InputFrame::sample(&mut input).aim_delta, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_stick_overrides_keys() {
        let mut input = InputState::new();
        input.keys.forward = true;
        input.stick = Vec2::new(3.0, 4.0);

        let frame = InputFrame::sample(&mut input);
        assert!((frame.movement.length() - 1.0).abs() < 1e-5);
        assert!((frame.movement.x - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_aim_delta_consumed_once() {
        let mut input = InputState::new();
        input.aim.accumulate_delta(5.0, 1.0);
        assert_eq!(InputFrame::sample(&mut input).aim_delta, Vec2::new(5.0, 1.0));
        assert_eq!(InputFrame::sample(&mut input).aim_delta, Vec2::ZERO);
    }
}
