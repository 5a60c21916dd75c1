//! Headless autopilot
//!
//! Plays the ranch without a human by steering the [`PlayerController`]:
//! collect drops until full, sell at the workbench, then walk onto any pad
//! the ledger can afford. It drives the same controller a keyboard would,
//! so runs exercise the full input path.

use paddock_core::{RanchWorld, Vec2};
use paddock_input::PlayerController;

/// Within this distance of a target the autopilot stops steering
const ARRIVE_RADIUS: f32 = 5.0;

/// What the autopilot is walking towards
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Goal {
    /// Nothing worth doing
    Idle,
    /// Pick up the drop at this position
    Collect(Vec2),
    /// Sell at the workbench
    Sell(Vec2),
    /// Stand on the pad at this position
    Buy(Vec2),
}

/// Automatic player
#[derive(Debug, Default)]
pub struct Autopilot {
    goal: Option<Goal>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The goal chosen on the last call to [`Autopilot::steer`]
    pub fn goal(&self) -> Option<Goal> {
        self.goal
    }

    /// Pick the next goal for the current world state
    pub fn choose_goal(world: &RanchWorld) -> Goal {
        let player = world.player();
        let nearest_drop = world
            .resources()
            .values()
            .filter(|r| !r.is_collected())
            .map(|r| r.position)
            .min_by(|a, b| {
                a.distance(player.position)
                    .total_cmp(&b.distance(player.position))
            });

        if player.held_count() > 0 && (player.is_full() || nearest_drop.is_none()) {
            return Goal::Sell(world.workbench().position);
        }
        if let Some(position) = nearest_drop {
            return Goal::Collect(position);
        }

        let coins = world.ledger().coins();
        world
            .pads()
            .iter()
            .filter(|pad| pad.is_ready() && pad.cost() <= coins)
            .min_by_key(|pad| pad.cost())
            .map(|pad| Goal::Buy(pad.position))
            .unwrap_or(Goal::Idle)
    }

    /// Point the controller's stick at the current goal
    pub fn steer(&mut self, world: &RanchWorld, controller: &mut PlayerController) {
        let goal = Self::choose_goal(world);
        if self.goal != Some(goal) {
            log::debug!("Autopilot goal: {:?}", goal);
        }
        self.goal = Some(goal);

        let target = match goal {
            Goal::Idle => None,
            Goal::Collect(p) | Goal::Sell(p) | Goal::Buy(p) => Some(p),
        };
        let direction = target
            .map(|t| t - world.player().position)
            .filter(|d| d.length() > ARRIVE_RADIUS)
            .map(|d| d.normalized());
        controller.set_stick(Some(direction.unwrap_or(Vec2::ZERO)));
    }
}
