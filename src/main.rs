//! Paddock - ranch idle game
//!
//! Runs the ranch simulation headless: creatures wander into hazard zones,
//! drops get carried to the workbench, coins buy upgrades.

use env_logger::{Builder, Env};
use paddock::config::AppConfig;
use paddock::systems::{Autopilot, SimulationSystem};
use paddock::visuals::{LogMirror, LogVisuals};
use paddock_core::{RanchLayout, RanchWorld, TickEvents, UpgradeKind};
use paddock_input::PlayerController;

fn main() {
    // Load configuration before the logger so its level applies
    let config_result = AppConfig::load();
    let log_level = config_result
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = config_result.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let layout = RanchLayout::load(&config.layout.path).unwrap_or_else(|e| {
        log::warn!(
            "Failed to load layout '{}': {}. Using the classic ranch.",
            config.layout.path,
            e
        );
        RanchLayout::classic()
    });
    log::info!("Loaded ranch '{}'", layout.name);

    let mut visuals = LogVisuals::new();
    let mut world = RanchWorld::from_layout(&layout, config.simulation.clone(), &mut visuals)
        .with_ledger_mirror(Box::new(LogMirror));

    let mut simulation = SimulationSystem::new(&config.clock);
    let mut controller = PlayerController::new();
    let mut autopilot = Autopilot::new();

    for tick in 1..=config.run.ticks {
        if config.run.autopilot {
            autopilot.steer(&world, &mut controller);
        }

        let report = simulation.update(&mut world, &mut controller, &mut visuals);
        if report.events.contains(TickEvents::PURCHASED) {
            log::info!("Purchase at {:.1}s, coins left: {}", world.clock().elapsed(), world.ledger().coins());
        }

        if config.run.report_every > 0 && tick % config.run.report_every == 0 {
            log_status(&world, &visuals);
        }

        if config.clock.fixed_dt.is_none() {
            // Pace wall-clock runs at roughly 60 Hz
            std::thread::sleep(std::time::Duration::from_millis(16));
        }
    }

    log::info!("Run finished after {} ticks", world.clock().ticks());
    log_status(&world, &visuals);
}

fn log_status(world: &RanchWorld, visuals: &LogVisuals) {
    let ledger = world.ledger();
    let levels: Vec<String> = UpgradeKind::ALL
        .iter()
        .map(|kind| format!("{}={}", kind.name(), ledger.upgrade_level(*kind)))
        .collect();
    log::info!(
        "t={:.1}s coins={} meat={} creatures={} zones={} chunks={} visuals={} [{}]",
        world.clock().elapsed(),
        ledger.coins(),
        ledger.meat(),
        world.herd().live_count(),
        world.zones().unlocked_count(),
        world.streamer().chunk_count(),
        visuals.live_count(),
        levels.join(" ")
    );
}
