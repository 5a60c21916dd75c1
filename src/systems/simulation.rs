//! Game simulation system
//!
//! Manages the frame loop around the ranch simulation:
//! - Delta time calculation (wall clock or fixed step)
//! - Delta time capping
//! - Input controller → tick input

use std::time::Instant;
use paddock_core::{RanchWorld, TickReport, VisualSink};
use paddock_input::PlayerController;
use crate::config::ClockConfig;

/// Cap a raw frame time to `[0, max_dt]`
///
/// Prevents a spiral of death after a stall (first frame, debugger, focus loss).
pub fn clamp_frame_dt(raw_dt: f32, max_dt: f32) -> f32 {
    raw_dt.max(0.0).min(max_dt)
}

/// Manages the game simulation loop
pub struct SimulationSystem {
    last_frame: Instant,
    max_frame_dt: f32,
    fixed_dt: Option<f32>,
}

impl SimulationSystem {
    /// Create a simulation system with the given timing
    pub fn new(clock: &ClockConfig) -> Self {
        Self {
            last_frame: Instant::now(),
            max_frame_dt: clock.max_frame_dt,
            fixed_dt: clock.fixed_dt,
        }
    }

    /// Time to simulate for the frame starting now
    pub fn next_dt(&mut self) -> f32 {
        let now = Instant::now();
        let raw_dt = match self.fixed_dt {
            Some(dt) => dt,
            None => (now - self.last_frame).as_secs_f32(),
        };
        self.last_frame = now;
        clamp_frame_dt(raw_dt, self.max_frame_dt)
    }

    /// Run one simulation frame
    ///
    /// # Arguments
    /// * `world` - The ranch to advance
    /// * `controller` - Input controller; its interact edge is consumed
    /// * `visuals` - Presentation sink
    pub fn update(
        &mut self,
        world: &mut RanchWorld,
        controller: &mut PlayerController,
        visuals: &mut dyn VisualSink,
    ) -> TickReport {
        let dt = self.next_dt();
        let input = controller.frame();
        world.tick(&input, dt, visuals)
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}
