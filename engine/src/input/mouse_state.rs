//! Look-delta accumulator
//!
//! Raw pointer motion (or a scaled right-stick deflection) arrives between
//! frames; it accumulates here and is consumed atomically once per tick.
//!
//! # Example
//!
//! ```rust,ignore
//! use manor_arena_engine::input::AimState;
//!
//! let mut aim = AimState::new();
//! aim.accumulate_delta(10.0, -5.0);
//! aim.accumulate_delta(3.0, 2.0);
//! assert_eq!(aim.consume_delta(), (13.0, -3.0));
//! ```

/// Touch sticks report deflection in [-1, 1]; this scales them to the same
/// order of magnitude as pointer deltas.
pub const STICK_AIM_SCALE: f32 = 3.0;

/// Accumulated look delta with pointer-capture tracking.
#[derive(Debug, Clone, Default)]
pub struct AimState {
    /// Accumulated horizontal delta since last consume.
    delta_x: f32,
    /// Accumulated vertical delta since last consume.
    delta_y: f32,
    /// Whether the pointer is currently locked to the canvas.
    pointer_locked: bool,
}

impl AimState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate raw pointer motion.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        self.delta_x += dx;
        self.delta_y += dy;
    }

    /// Accumulate a right-stick deflection for one frame.
    #[inline]
    pub fn accumulate_stick(&mut self, x: f32, y: f32) {
        self.accumulate_delta(x * STICK_AIM_SCALE, y * STICK_AIM_SCALE);
    }

    /// Return the accumulated delta and reset it to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> (f32, f32) {
        let delta = (self.delta_x, self.delta_y);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        delta
    }

    /// Losing the pointer lock drops pending motion so the camera does not jump.
    #[inline]
    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
        if !locked {
            self.delta_x = 0.0;
            self.delta_y = 0.0;
        }
    }

    #[inline]
    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    #[inline]
    pub fn peek_delta(&self) -> (f32, f32) {
        (self.delta_x, self.delta_y)
    }
}
