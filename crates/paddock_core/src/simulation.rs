//! The per-tick simulation loop
//!
//! A tick runs these steps in order:
//! 1. clamp dt and advance the clock
//! 2. stream chunks around the player, avoiding the static entities
//! 3. count the spawn timer down and spawn creatures if it elapsed
//! 4. move the player, wander the creatures, bob the resources
//! 5. update lever cooldown cues
//! 6. run the interaction passes
//! 7. drop dead creatures and collected resources

use bitflags::bitflags;
use crate::economy::UpgradeKind;
use crate::input::InputFrame;
use crate::interaction::{self, InteractionReport};
use crate::visual::VisualSink;
use crate::world::{collect_obstacles, RanchWorld};

bitflags! {
    /// Which kinds of events happened during a tick
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TickEvents: u8 {
        const CHUNK_LOADED = 1 << 0;
        const CREATURE_SPAWNED = 1 << 1;
        const CREATURE_DIED = 1 << 2;
        const RESOURCE_COLLECTED = 1 << 3;
        const SOLD = 1 << 4;
        const PURCHASED = 1 << 5;
        const LEVER_TOGGLED = 1 << 6;
    }
}

/// Summary of one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The dt actually simulated (after clamping)
    pub dt: f32,
    pub chunks_loaded: usize,
    pub creatures_spawned: usize,
    pub interactions: InteractionReport,
    pub creatures_removed: usize,
    pub resources_removed: usize,
    pub events: TickEvents,
}

impl TickReport {
    fn collect_events(&mut self) {
        let i = &self.interactions;
        self.events.set(TickEvents::CHUNK_LOADED, self.chunks_loaded > 0);
        self.events.set(TickEvents::CREATURE_SPAWNED, self.creatures_spawned > 0);
        self.events.set(TickEvents::CREATURE_DIED, i.creatures_killed > 0);
        self.events.set(TickEvents::RESOURCE_COLLECTED, i.resources_collected > 0);
        self.events.set(TickEvents::SOLD, i.coins_from_sales > 0);
        self.events.set(TickEvents::PURCHASED, i.purchases > 0);
        self.events.set(TickEvents::LEVER_TOGGLED, i.lever_toggles > 0);
    }
}

impl RanchWorld {
    /// Advance the whole ranch by `dt` seconds
    pub fn tick(&mut self, input: &InputFrame, dt: f32, visuals: &mut dyn VisualSink) -> TickReport {
        let dt = self.clock.advance(dt);
        let clock = self.clock.elapsed();
        let mut report = TickReport { dt, ..TickReport::default() };

        let obstacles = collect_obstacles(&self.pads, &self.zones, &self.workbench, &self.levers);
        report.chunks_loaded = self.streamer.refresh(self.player.position, &obstacles, visuals);

        if self.herd.tick_spawn_timer(dt) {
            let level = self.ledger.upgrade_level(UpgradeKind::SpawnRate);
            let unlocked = self.zones.unlocked_count();
            report.creatures_spawned =
                self.herd.spawn_if_room_available(&self.zones, level, unlocked, &mut self.rng, visuals);
        }

        self.player.step(input.movement, dt);
        visuals.set_visual_position(self.player_visual, self.player.position, 0.0);
        self.herd.update_all(&self.zones, dt, clock, &mut self.rng, visuals);
        for (_, resource) in &self.resources {
            resource.bob(clock, visuals);
        }

        for lever in &mut self.levers {
            lever.update(dt, visuals);
        }

        report.interactions = self.run_interactions(input.interact, dt, visuals);

        report.creatures_removed = self.herd.remove_dead();
        let before = self.resources.len();
        self.resources.retain(|_, resource| !resource.is_collected());
        report.resources_removed = before - self.resources.len();

        report.collect_events();
        report
    }

    /// Run the five interaction passes in order
    pub fn run_interactions(
        &mut self,
        interact: bool,
        dt: f32,
        visuals: &mut dyn VisualSink,
    ) -> InteractionReport {
        let clock = self.clock.elapsed();
        let tuning = &self.config.economy;
        let mut report = InteractionReport::default();

        report.creatures_killed =
            interaction::hazard_pass(&self.zones, &mut self.herd, &mut self.resources, dt, clock, visuals);
        report.resources_collected = interaction::pickup_pass(
            &mut self.player,
            &mut self.resources,
            &mut self.ledger,
            tuning.pickup_radius,
            visuals,
        );
        report.coins_from_sales =
            interaction::sell_pass(&mut self.player, &self.workbench, &mut self.ledger, tuning.sell_radius);
        report.purchases = interaction::pad_pass(
            &mut self.pads,
            self.player.position,
            dt,
            tuning,
            &mut self.ledger,
            &mut self.zones,
            &mut self.herd,
            visuals,
        );
        let (toggles, failures) = interaction::lever_pass(
            &mut self.levers,
            self.player.position,
            interact,
            tuning,
            &mut self.ledger,
            &mut self.zones,
            &mut self.herd,
            visuals,
        );
        report.lever_toggles = toggles;
        report.lever_failures = failures;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::layout::RanchLayout;
    use crate::visual::{NullVisuals, RecordingVisuals};
    use paddock_math::Vec2;

    fn world(visuals: &mut dyn VisualSink) -> RanchWorld {
        let config = SimConfig { seed: Some(7), ..SimConfig::default() };
        RanchWorld::from_layout(&RanchLayout::classic(), config, visuals)
    }

    #[test]
    fn test_first_tick_streams_and_spawns() {
        let mut visuals = RecordingVisuals::new();
        let mut world = world(&mut visuals);
        let report = world.tick(&InputFrame::idle(), 0.016, &mut visuals);

        assert_eq!(report.chunks_loaded, 9);
        assert_eq!(report.creatures_spawned, 1);
        assert!(report.events.contains(TickEvents::CHUNK_LOADED | TickEvents::CREATURE_SPAWNED));
        assert!(!report.events.contains(TickEvents::SOLD));
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut visuals = NullVisuals::new();
        let mut world = world(&mut visuals);
        let report = world.tick(&InputFrame::moving(Vec2::X), -1.0, &mut visuals);
        assert_eq!(report.dt, 0.0);
        assert_eq!(world.player().position, Vec2::new(100.0, 100.0));
        assert_eq!(world.clock().elapsed(), 0.0);
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut visuals = NullVisuals::new();
        let mut world = world(&mut visuals);
        world.tick(&InputFrame::moving(Vec2::X), 0.5, &mut visuals);
        assert_eq!(world.player().position, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_spawn_timer_gates_spawns() {
        let mut visuals = NullVisuals::new();
        let mut world = world(&mut visuals);
        world.tick(&InputFrame::idle(), 0.1, &mut visuals);
        for _ in 0..10 {
            let report = world.tick(&InputFrame::idle(), 0.1, &mut visuals);
            assert_eq!(report.creatures_spawned, 0);
        }
        assert_eq!(world.herd().live_count(), 1);
    }

    #[test]
    fn test_hazard_lever_switch_via_tick() {
        let mut visuals = NullVisuals::new();
        let mut world = world(&mut visuals);
        world.player_mut().position = Vec2::new(250.0, 440.0);

        let report = world.tick(&InputFrame::idle().with_interact(), 0.016, &mut visuals);
        assert_eq!(report.interactions.lever_toggles, 1);
        assert!(report.events.contains(TickEvents::LEVER_TOGGLED));
        assert!(world.zones().iter().all(|(_, z)| !z.active));
    }
}
