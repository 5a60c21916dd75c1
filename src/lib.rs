//! Paddock - headless ranch idle game
//!
//! The binary wires the simulation core to configuration, logging and an
//! autopilot player. These modules are exposed for integration tests.

pub mod config;
pub mod systems;
pub mod visuals;
