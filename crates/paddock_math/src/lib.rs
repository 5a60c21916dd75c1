//! Planar math for the Paddock simulation
//!
//! The ranch is simulated on a flat ground plane. Everything here is 2D:
//! `x` runs east and `y` runs south (it maps to the renderer's `z` axis).
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//! - [`Rect`] - Axis-aligned rectangle used for zones, footprints and pads
//!
//! ## Hashing
//!
//! - [`hash_unit`] - Deterministic pseudo-random value in `[0, 1)` from an integer seed

mod vec2;
mod rect;
pub mod hash;

pub use vec2::Vec2;
pub use rect::Rect;
pub use hash::hash_unit;
