//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod autopilot;
mod simulation;

pub use autopilot::{Autopilot, Goal};
pub use simulation::{clamp_frame_dt, SimulationSystem};
