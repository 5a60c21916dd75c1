//! Input handling for Paddock
//!
//! This crate turns key press/release events into the per-tick
//! [`InputFrame`](paddock_core::InputFrame) the simulation consumes.

mod player_controller;

pub use player_controller::{ControlKey, KeyState, PlayerController};
