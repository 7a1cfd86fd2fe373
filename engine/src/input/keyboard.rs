//! Keyboard movement state
//!
//! Tracks which movement keys are held and turns them into a planar
//! movement vector in the unit disk.

use glam::Vec2;

/// Tracks the current state of movement keys.
///
/// This struct maintains which movement keys are currently pressed,
/// allowing smooth continuous movement when keys are held down.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementKeys {
    /// W / ArrowUp - move forward
    pub forward: bool,
    /// S / ArrowDown - move backward
    pub backward: bool,
    /// A / ArrowLeft - strafe left
    pub left: bool,
    /// D / ArrowRight - strafe right
    pub right: bool,
    /// Shift - sprint
    pub sprint: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Movement vector: x = strafe (right positive), y = forward.
    ///
    /// Diagonals are normalized so holding two keys is not faster.
    pub fn movement_vector(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.forward {
            v.y += 1.0;
        }
        if self.backward {
            v.y -= 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if v.length_squared() > 1.0 {
            v.normalize()
        } else {
            v
        }
    }

    /// Check if any movement key is currently pressed.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}
