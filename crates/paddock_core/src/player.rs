//! The player avatar
//!
//! Moves on the input axis and carries a bounded stack of resources to the
//! workbench.

use paddock_math::Vec2;
use crate::config::PlayerConfig;

/// Player position and cargo
#[derive(Clone, Debug)]
pub struct Player {
    /// World position
    pub position: Vec2,
    /// Walk speed (units per second)
    pub speed: f32,
    /// Resources the player can carry at once
    pub capacity: u32,
    held_count: u32,
    held_value: u64,
}

impl Player {
    /// Create an empty-handed player
    pub fn new(position: Vec2, config: &PlayerConfig) -> Self {
        Self {
            position,
            speed: config.speed,
            capacity: config.capacity,
            held_count: 0,
            held_value: 0,
        }
    }

    /// Number of resources carried
    #[inline]
    pub fn held_count(&self) -> u32 {
        self.held_count
    }

    /// Total coin value of the resources carried
    #[inline]
    pub fn held_value(&self) -> u64 {
        self.held_value
    }

    /// Check if another resource would exceed the capacity
    #[inline]
    pub fn is_full(&self) -> bool {
        self.held_count >= self.capacity
    }

    /// Take a resource if there is room
    pub fn pick_up(&mut self, value: u64) -> bool {
        if self.is_full() {
            return false;
        }
        self.held_count += 1;
        self.held_value = self.held_value.saturating_add(value);
        true
    }

    /// Empty the player's hands, returning (count, value)
    pub fn take_cargo(&mut self) -> (u32, u64) {
        let cargo = (self.held_count, self.held_value);
        self.held_count = 0;
        self.held_value = 0;
        cargo
    }

    /// Walk along `axis` for `dt` seconds
    ///
    /// The axis is clamped to unit length so diagonals are not faster.
    pub fn step(&mut self, axis: Vec2, dt: f32) {
        self.position += axis.clamp_length(1.0) * (self.speed * dt);
    }
}
