//! Per-tick player intent

use paddock_math::Vec2;

/// What the player asked for this tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Desired walk direction; longer than unit length is clamped
    pub movement: Vec2,
    /// True only on the tick the interact key went down
    pub interact: bool,
}

impl InputFrame {
    /// No movement, no interaction
    pub fn idle() -> Self {
        Self::default()
    }

    /// Walk along `movement`
    pub fn moving(movement: Vec2) -> Self {
        Self { movement, interact: false }
    }

    /// Add the interact edge (builder style)
    pub fn with_interact(mut self) -> Self {
        self.interact = true;
        self
    }
}
