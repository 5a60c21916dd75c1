//! Upgrade effects
//!
//! Pads and purchase levers both end up here. An effect first charges the
//! ledger through `buy_upgrade`; only when that succeeds does it touch the
//! world. The return value tells the trigger whether to count the purchase.

use crate::config::EconomyConfig;
use crate::economy::{EconomyLedger, UpgradeKind};
use crate::herd::Herd;
use crate::station::LeverAction;
use crate::visual::VisualSink;
use crate::zone::ZoneSet;

/// Everything an upgrade may change
pub struct UpgradeTargets<'a> {
    pub ledger: &'a mut EconomyLedger,
    pub zones: &'a mut ZoneSet,
    pub herd: &'a mut Herd,
}

/// Charge `cost` for `kind` and apply its effect
///
/// Returns false when the ledger could not afford it; nothing changes then.
pub fn apply_upgrade(
    kind: UpgradeKind,
    cost: u64,
    tuning: &EconomyConfig,
    mut targets: UpgradeTargets<'_>,
    visuals: &mut dyn VisualSink,
) -> bool {
    if !targets.ledger.buy_upgrade(kind, cost) {
        return false;
    }

    match kind {
        UpgradeKind::HazardDamage => {
            targets.zones.scale_damage(tuning.damage_multiplier);
        }
        UpgradeKind::SpawnRate => {
            let interval = (targets.herd.spawn_interval() * tuning.spawn_interval_factor)
                .max(tuning.min_spawn_interval);
            targets.herd.set_spawn_interval(interval);
            log::debug!("Spawn interval now {:.2}s", interval);
        }
        UpgradeKind::ZoneArea => {
            if targets.zones.unlock_next(visuals).is_none() {
                log::debug!("Area upgrade bought with no locked zone left");
            }
        }
    }
    true
}

/// Run a lever's action, returning whether it succeeded
pub fn apply_lever_action(
    action: LeverAction,
    tuning: &EconomyConfig,
    mut targets: UpgradeTargets<'_>,
    visuals: &mut dyn VisualSink,
) -> bool {
    match action {
        LeverAction::Purchase { kind, cost } => apply_upgrade(kind, cost, tuning, targets, visuals),
        LeverAction::ToggleHazards => {
            let enabled = targets.zones.toggle_active();
            log::info!("Hazard zones switched {}", if enabled { "on" } else { "off" });
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::RecordingVisuals;
    use crate::zone::HazardZone;
    use paddock_math::Rect;

    struct Fixture {
        ledger: EconomyLedger,
        zones: ZoneSet,
        herd: Herd,
        visuals: RecordingVisuals,
    }

    impl Fixture {
        fn new(coins: u64) -> Self {
            let mut visuals = RecordingVisuals::new();
            let mut zones = ZoneSet::new();
            zones.push_unlocked(HazardZone::new(Rect::from_corner_size(300.0, 200.0, 200.0, 200.0), 40.0, 10), &mut visuals);
            zones.push_locked(HazardZone::new(Rect::from_corner_size(700.0, 200.0, 200.0, 200.0), 40.0, 10));
            let mut ledger = EconomyLedger::new();
            ledger.add_currency(coins);
            Self { ledger, zones, herd: Herd::default(), visuals }
        }

        fn upgrade(&mut self, kind: UpgradeKind, cost: u64) -> bool {
            let targets = UpgradeTargets {
                ledger: &mut self.ledger,
                zones: &mut self.zones,
                herd: &mut self.herd,
            };
            apply_upgrade(kind, cost, &EconomyConfig::default(), targets, &mut self.visuals)
        }

        fn lever(&mut self, action: LeverAction) -> bool {
            let targets = UpgradeTargets {
                ledger: &mut self.ledger,
                zones: &mut self.zones,
                herd: &mut self.herd,
            };
            apply_lever_action(action, &EconomyConfig::default(), targets, &mut self.visuals)
        }
    }

    #[test]
    fn test_hazard_damage() {
        let mut fx = Fixture::new(10);
        assert!(fx.upgrade(UpgradeKind::HazardDamage, 10));
        assert_eq!(fx.ledger.coins(), 0);
        assert_eq!(fx.ledger.upgrade_level(UpgradeKind::HazardDamage), 2);
        let (_, zone) = fx.zones.iter().next().unwrap();
        assert_eq!(zone.damage_per_second, 60.0);
    }

    #[test]
    fn test_spawn_rate_floor() {
        let mut fx = Fixture::new(1000);
        assert!(fx.upgrade(UpgradeKind::SpawnRate, 1));
        assert!((fx.herd.spawn_interval() - 2.4).abs() < 1e-5);
        for _ in 0..20 {
            fx.upgrade(UpgradeKind::SpawnRate, 1);
        }
        assert_eq!(fx.herd.spawn_interval(), 0.5);
    }

    #[test]
    fn test_zone_area_unlocks_then_still_succeeds() {
        let mut fx = Fixture::new(2000);
        assert!(fx.upgrade(UpgradeKind::ZoneArea, 1000));
        assert_eq!(fx.zones.unlocked_count(), 2);
        assert_eq!(fx.visuals.live_count(), 2);

        assert!(fx.upgrade(UpgradeKind::ZoneArea, 1000));
        assert_eq!(fx.zones.unlocked_count(), 2);
        assert_eq!(fx.ledger.coins(), 0);
        assert_eq!(fx.ledger.upgrade_level(UpgradeKind::ZoneArea), 3);
    }

    #[test]
    fn test_unaffordable_changes_nothing() {
        let mut fx = Fixture::new(5);
        assert!(!fx.upgrade(UpgradeKind::HazardDamage, 10));
        assert!(!fx.upgrade(UpgradeKind::ZoneArea, 10));
        assert_eq!(fx.ledger.coins(), 5);
        assert_eq!(fx.zones.unlocked_count(), 1);
        let (_, zone) = fx.zones.iter().next().unwrap();
        assert_eq!(zone.damage_per_second, 40.0);
    }

    #[test]
    fn test_lever_actions() {
        let mut fx = Fixture::new(0);
        assert!(fx.lever(LeverAction::ToggleHazards));
        let (_, zone) = fx.zones.iter().next().unwrap();
        assert!(!zone.active);

        let purchase = LeverAction::Purchase { kind: UpgradeKind::SpawnRate, cost: 50 };
        assert!(!fx.lever(purchase));
        fx.ledger.add_currency(50);
        assert!(fx.lever(purchase));
        assert_eq!(fx.ledger.upgrade_level(UpgradeKind::SpawnRate), 2);
    }
}
