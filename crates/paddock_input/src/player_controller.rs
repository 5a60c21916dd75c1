//! Player controller for top-down ranch movement
//!
//! Controls:
//! - W/S or Up/Down: move north/south (-Y/+Y)
//! - A/D or Left/Right: move west/east (-X/+X)
//! - Space: interact with levers (edge-triggered)

use paddock_core::InputFrame;
use paddock_math::Vec2;

/// Keys the controller understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKey {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
}

/// Whether a key went down or up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Player controller for handling input
#[derive(Debug, Default)]
pub struct PlayerController {
    // Movement state
    north: bool,
    south: bool,
    west: bool,
    east: bool,

    // Interact state: held, and latched on the press edge
    interact_held: bool,
    interact_pressed: bool,

    // Joystick override (touch devices)
    stick: Option<Vec2>,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is one the controller uses.
    pub fn process_keyboard(&mut self, key: ControlKey, state: KeyState) -> bool {
        let pressed = state == KeyState::Pressed;

        match key {
            ControlKey::W | ControlKey::Up => self.north = pressed,
            ControlKey::S | ControlKey::Down => self.south = pressed,
            ControlKey::A | ControlKey::Left => self.west = pressed,
            ControlKey::D | ControlKey::Right => self.east = pressed,
            ControlKey::Space => {
                // Key repeat delivers Pressed again without a Released in between
                if pressed && !self.interact_held {
                    self.interact_pressed = true;
                }
                self.interact_held = pressed;
            }
        }
        true
    }

    /// Set or clear an analog joystick direction
    ///
    /// While set, it replaces the keyboard axis.
    pub fn set_stick(&mut self, direction: Option<Vec2>) {
        self.stick = direction;
    }

    /// Movement axis, clamped to unit length
    pub fn movement_axis(&self) -> Vec2 {
        if let Some(stick) = self.stick {
            return stick.clamp_length(1.0);
        }
        let x = (self.east as i32 - self.west as i32) as f32;
        let y = (self.south as i32 - self.north as i32) as f32;
        Vec2::new(x, y).normalized()
    }

    /// Consume the interact flag
    ///
    /// Returns true if interact was pressed since last consume, then clears the flag.
    pub fn consume_interact(&mut self) -> bool {
        let was_pressed = self.interact_pressed;
        self.interact_pressed = false;
        was_pressed
    }

    /// Build this tick's input and consume the interact edge
    pub fn frame(&mut self) -> InputFrame {
        InputFrame {
            movement: self.movement_axis(),
            interact: self.consume_interact(),
        }
    }
}
