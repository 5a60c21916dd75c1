//! The ranch world
//!
//! [`RanchWorld`] owns every piece of simulation state. It is built from a
//! [`RanchLayout`] and advanced by [`RanchWorld::tick`]; nothing else keeps
//! references into it between ticks.

use paddock_math::Vec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use crate::config::SimConfig;
use crate::economy::{CounterMirror, EconomyLedger};
use crate::herd::Herd;
use crate::interaction::ResourceMap;
use crate::layout::RanchLayout;
use crate::obstacle::HasWorldPosition;
use crate::player::Player;
use crate::resource::{Resource, ResourceKey};
use crate::station::{LeverAction, SellWorkbench, ToggleLever, UpgradePad};
use crate::streaming::WorldStreamer;
use crate::visual::{VisualHandle, VisualKind, VisualSink};
use crate::zone::ZoneSet;

/// Simulation time, advanced only by ticks
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimClock {
    elapsed: f32,
    ticks: u64,
}

impl SimClock {
    /// Advance by `dt` seconds (negative values count as zero)
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        self.ticks += 1;
        dt
    }

    /// Seconds simulated so far
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ticks run so far
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// All state of one ranch
#[derive(Debug)]
pub struct RanchWorld {
    pub(crate) config: SimConfig,
    pub(crate) clock: SimClock,
    pub(crate) rng: Xoshiro256StarStar,
    pub(crate) streamer: WorldStreamer,
    pub(crate) ledger: EconomyLedger,
    pub(crate) player: Player,
    pub(crate) player_visual: VisualHandle,
    pub(crate) herd: Herd,
    pub(crate) zones: ZoneSet,
    pub(crate) resources: ResourceMap,
    pub(crate) pads: Vec<UpgradePad>,
    pub(crate) levers: Vec<ToggleLever>,
    pub(crate) workbench: SellWorkbench,
}

impl RanchWorld {
    /// Instantiate a layout, spawning the visuals of every static piece
    ///
    /// No chunk is loaded until the first tick.
    pub fn from_layout(layout: &RanchLayout, config: SimConfig, visuals: &mut dyn VisualSink) -> Self {
        let rng = match config.seed {
            Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
            None => Xoshiro256StarStar::from_entropy(),
        };

        let mut zones = ZoneSet::new();
        for template in &layout.zones {
            zones.push_unlocked(template.to_zone(), visuals);
        }
        for template in &layout.locked_zones {
            zones.push_locked(template.to_zone());
        }

        let mut pads = Vec::with_capacity(layout.stations.len());
        let mut levers = Vec::with_capacity(layout.stations.len() + 1);
        for station in &layout.stations {
            let mut pad = UpgradePad::new(
                station.label.clone(),
                station.kind,
                station.pad_position(),
                station.cost,
                config.economy.pad_size,
            );
            pad.spawn_visual(visuals);
            pads.push(pad);

            let action = LeverAction::Purchase { kind: station.kind, cost: station.cost };
            let mut lever = ToggleLever::new(station.lever_position(), action);
            lever.spawn_visual(visuals);
            levers.push(lever);
        }
        if let Some(position) = layout.hazard_lever {
            let mut lever = ToggleLever::new(Vec2::from(position), LeverAction::ToggleHazards);
            lever.spawn_visual(visuals);
            levers.push(lever);
        }

        let mut workbench = SellWorkbench::new(Vec2::from(layout.workbench));
        workbench.spawn_visual(visuals);

        let spawn = Vec2::from(layout.player_spawn);
        let player = Player::new(spawn, &config.player);
        let player_visual = visuals.spawn_visual(VisualKind::Player, spawn);

        log::info!(
            "Built ranch '{}': {} zone(s) ({} locked), {} pad(s), {} lever(s)",
            layout.name,
            zones.unlocked_count(),
            zones.locked_count(),
            pads.len(),
            levers.len()
        );

        Self {
            streamer: WorldStreamer::new(config.world.clone()),
            herd: Herd::new(config.creatures.clone()),
            ledger: EconomyLedger::new(),
            clock: SimClock::default(),
            resources: ResourceMap::with_key(),
            config,
            rng,
            player,
            player_visual,
            zones,
            pads,
            levers,
            workbench,
        }
    }

    /// Attach a mirror to the ledger (builder style)
    pub fn with_ledger_mirror(mut self, mirror: Box<dyn CounterMirror>) -> Self {
        self.ledger.set_mirror(mirror);
        self
    }

    /// Simulation tuning
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulation clock
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Chunk streamer
    pub fn streamer(&self) -> &WorldStreamer {
        &self.streamer
    }

    /// Economy ledger
    pub fn ledger(&self) -> &EconomyLedger {
        &self.ledger
    }

    /// Mutable economy ledger
    pub fn ledger_mut(&mut self) -> &mut EconomyLedger {
        &mut self.ledger
    }

    /// The player
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player (teleporting is allowed)
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Every creature
    pub fn herd(&self) -> &Herd {
        &self.herd
    }

    /// Mutable herd
    pub fn herd_mut(&mut self) -> &mut Herd {
        &mut self.herd
    }

    /// Hazard zones
    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    /// Mutable hazard zones
    pub fn zones_mut(&mut self) -> &mut ZoneSet {
        &mut self.zones
    }

    /// Resources lying in the world
    pub fn resources(&self) -> &ResourceMap {
        &self.resources
    }

    /// Upgrade pads
    pub fn pads(&self) -> &[UpgradePad] {
        &self.pads
    }

    /// Levers (station levers first, then the hazard switch)
    pub fn levers(&self) -> &[ToggleLever] {
        &self.levers
    }

    /// Sell workbench
    pub fn workbench(&self) -> &SellWorkbench {
        &self.workbench
    }

    /// Drop a resource into the world
    pub fn spawn_resource(&mut self, position: Vec2, value: u64, visuals: &mut dyn VisualSink) -> ResourceKey {
        self.resources.insert(Resource::spawn(position, value, visuals))
    }

    /// Every static entity that blocks decoration placement
    pub fn obstacles(&self) -> Vec<&dyn HasWorldPosition> {
        collect_obstacles(&self.pads, &self.zones, &self.workbench, &self.levers)
    }
}

/// Snapshot of obstacle positions for the streamer
///
/// Takes the containers rather than the world so the caller can keep
/// mutable access to the streamer.
pub(crate) fn collect_obstacles<'a>(
    pads: &'a [UpgradePad],
    zones: &'a ZoneSet,
    workbench: &'a SellWorkbench,
    levers: &'a [ToggleLever],
) -> Vec<&'a dyn HasWorldPosition> {
    let mut obstacles: Vec<&dyn HasWorldPosition> =
        Vec::with_capacity(pads.len() + zones.unlocked_count() + levers.len() + 1);
    obstacles.extend(pads.iter().map(|p| p as &dyn HasWorldPosition));
    obstacles.extend(zones.iter().map(|(_, z)| z as &dyn HasWorldPosition));
    obstacles.push(workbench);
    obstacles.extend(levers.iter().map(|l| l as &dyn HasWorldPosition));
    obstacles
}
