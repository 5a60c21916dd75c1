//! Stations the player interacts with
//!
//! - [`UpgradePad`]: buys an upgrade when stood on, price grows each time
//! - [`ToggleLever`]: edge-triggered switch running a [`LeverAction`]
//! - [`SellWorkbench`]: turns carried resources into coins

use paddock_math::{Rect, Vec2};
use serde::{Serialize, Deserialize};
use crate::economy::UpgradeKind;
use crate::obstacle::HasWorldPosition;
use crate::visual::{VisualHandle, VisualKind, VisualSink};

/// Purchase pad for one upgrade track
#[derive(Clone, Debug)]
pub struct UpgradePad {
    /// Display label
    pub label: String,
    /// Track bought by this pad
    pub kind: UpgradeKind,
    /// Centre of the footprint
    pub position: Vec2,
    /// Footprint size
    pub size: Vec2,
    cost: u64,
    cooldown: f32,
    visual: Option<VisualHandle>,
}

impl UpgradePad {
    /// Create a pad with a square footprint of edge `size`
    pub fn new(label: impl Into<String>, kind: UpgradeKind, position: Vec2, cost: u64, size: f32) -> Self {
        Self {
            label: label.into(),
            kind,
            position,
            size: Vec2::new(size, size),
            cost,
            cooldown: 0.0,
            visual: None,
        }
    }

    /// Show the pad
    pub fn spawn_visual(&mut self, visuals: &mut dyn VisualSink) {
        if self.visual.is_none() {
            self.visual = Some(visuals.spawn_visual(VisualKind::UpgradePad { size: self.size }, self.position));
        }
    }

    /// Current price
    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Seconds until the pad accepts another purchase
    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Footprint rectangle
    pub fn footprint(&self) -> Rect {
        Rect::from_center_half_extents(self.position, self.size * 0.5)
    }

    /// Check if a point is strictly inside the footprint
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size * 0.5;
        let d = (point - self.position).abs();
        d.x < half.x && d.y < half.y
    }

    /// Count the cooldown down, never below zero
    pub fn tick_cooldown(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Check if the cooldown has elapsed
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Record a successful purchase: scale (and floor) the price, start the cooldown
    pub fn complete_purchase(&mut self, cost_multiplier: f64, cooldown: f32) {
        self.cost = (self.cost as f64 * cost_multiplier).floor() as u64;
        self.cooldown = cooldown;
    }
}

impl HasWorldPosition for UpgradePad {
    fn world_position(&self) -> Option<Vec2> {
        Some(self.position)
    }
}

/// What a lever does when switched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeverAction {
    /// Buy an upgrade at a fixed price
    Purchase { kind: UpgradeKind, cost: u64 },
    /// Switch every hazard zone on or off
    ToggleHazards,
}

/// Frame of the lever sheet shown while cooling down
const LEVER_FRAME_COOLING: u32 = 1;
/// Frame of the lever sheet shown when ready
const LEVER_FRAME_READY: u32 = 0;

/// Edge-triggered switch
#[derive(Clone, Debug)]
pub struct ToggleLever {
    /// World position
    pub position: Vec2,
    /// Action run on each successful toggle
    pub action: LeverAction,
    active: bool,
    cooldown: f32,
    frame: u32,
    visual: Option<VisualHandle>,
}

impl ToggleLever {
    /// Create an inactive lever
    pub fn new(position: Vec2, action: LeverAction) -> Self {
        Self {
            position,
            action,
            active: false,
            cooldown: 0.0,
            frame: LEVER_FRAME_READY,
            visual: None,
        }
    }

    /// Show the lever
    pub fn spawn_visual(&mut self, visuals: &mut dyn VisualSink) {
        if self.visual.is_none() {
            self.visual = Some(visuals.spawn_visual(VisualKind::Lever, self.position));
        }
    }

    /// Current switch state
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds until the lever responds again
    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Visual handle
    #[inline]
    pub fn visual(&self) -> Option<VisualHandle> {
        self.visual
    }

    /// Flip the switch if the cooldown has elapsed
    ///
    /// Returns true if the lever toggled; the caller then runs the action.
    pub fn interact(&mut self, cooldown: f32) -> bool {
        if self.cooldown > 0.0 {
            return false;
        }
        self.active = !self.active;
        self.cooldown = cooldown;
        true
    }

    /// Undo a toggle whose action failed: inactive and immediately ready
    pub fn reset(&mut self) {
        self.active = false;
        self.cooldown = 0.0;
    }

    /// Count the cooldown down and keep the sheet frame in step
    pub fn update(&mut self, dt: f32, visuals: &mut dyn VisualSink) {
        let frame = if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
            LEVER_FRAME_COOLING
        } else {
            LEVER_FRAME_READY
        };
        if frame != self.frame {
            self.frame = frame;
            if let Some(visual) = self.visual {
                visuals.set_visual_frame(visual, frame);
            }
        }
    }
}

impl HasWorldPosition for ToggleLever {
    fn world_position(&self) -> Option<Vec2> {
        Some(self.position)
    }
}

/// Where carried resources are sold
#[derive(Clone, Debug)]
pub struct SellWorkbench {
    /// World position
    pub position: Vec2,
    visual: Option<VisualHandle>,
}

impl SellWorkbench {
    /// Create a workbench
    pub fn new(position: Vec2) -> Self {
        Self { position, visual: None }
    }

    /// Show the workbench
    pub fn spawn_visual(&mut self, visuals: &mut dyn VisualSink) {
        if self.visual.is_none() {
            self.visual = Some(visuals.spawn_visual(VisualKind::Workbench, self.position));
        }
    }

    /// Check if a point is within `radius` of the workbench
    pub fn in_reach(&self, point: Vec2, radius: f32) -> bool {
        self.position.distance(point) < radius
    }
}

impl HasWorldPosition for SellWorkbench {
    fn world_position(&self) -> Option<Vec2> {
        Some(self.position)
    }
}
