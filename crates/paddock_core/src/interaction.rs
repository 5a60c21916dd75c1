//! Interaction passes
//!
//! One tick runs these in a fixed order:
//! 1. hazard zones damage overlapping creatures, deaths drop resources
//! 2. the player picks up nearby resources while there is room
//! 3. the player sells everything at the workbench
//! 4. upgrade pads under the player sell an upgrade
//! 5. levers in reach toggle on the interact edge
//!
//! Each pass takes only the state it touches, so they can be exercised one
//! at a time.

use paddock_math::Vec2;
use slotmap::SlotMap;
use crate::config::EconomyConfig;
use crate::creature::DamageOutcome;
use crate::economy::EconomyLedger;
use crate::herd::Herd;
use crate::player::Player;
use crate::resource::{Resource, ResourceKey};
use crate::station::{SellWorkbench, ToggleLever, UpgradePad};
use crate::upgrade::{apply_lever_action, apply_upgrade, UpgradeTargets};
use crate::visual::VisualSink;
use crate::zone::ZoneSet;

/// Resources lying in the world
pub type ResourceMap = SlotMap<ResourceKey, Resource>;

/// What the interaction passes did this tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionReport {
    pub creatures_killed: u32,
    pub resources_collected: u32,
    pub coins_from_sales: u64,
    pub purchases: u32,
    pub lever_toggles: u32,
    /// Toggles rolled back because their action failed
    pub lever_failures: u32,
}

/// Pass 1: damage creatures overlapping active zones
///
/// Every creature killed drops one resource at its position. Returns the
/// number killed.
pub fn hazard_pass(
    zones: &ZoneSet,
    herd: &mut Herd,
    resources: &mut ResourceMap,
    dt: f32,
    clock: f32,
    visuals: &mut dyn VisualSink,
) -> u32 {
    let flash = herd.config().flash_duration;
    let mut killed = 0;
    for (_, zone) in zones.iter() {
        let amount = zone.damage_per_second * dt;
        if !zone.active || amount <= 0.0 {
            continue;
        }
        for (_, creature) in herd.iter_mut() {
            if !creature.is_alive() || !creature.footprint().overlaps(&zone.rect) {
                continue;
            }
            if creature.apply_damage(amount, clock, flash, visuals) == DamageOutcome::Died {
                log::debug!(
                    "{:?} died at ({:.1}, {:.1})",
                    creature.kind,
                    creature.position.x,
                    creature.position.y
                );
                resources.insert(Resource::spawn(creature.position, creature.drop_value, visuals));
                killed += 1;
            }
        }
    }
    killed
}

/// Pass 2: collect resources within `radius` of the player
///
/// Stops once the player is full. Returns the number collected.
pub fn pickup_pass(
    player: &mut Player,
    resources: &mut ResourceMap,
    ledger: &mut EconomyLedger,
    radius: f32,
    visuals: &mut dyn VisualSink,
) -> u32 {
    let mut collected = 0;
    for (_, resource) in resources.iter_mut() {
        if resource.is_collected() || resource.position.distance(player.position) >= radius {
            continue;
        }
        if player.is_full() {
            log::trace!("Player full, leaving resource on the ground");
            break;
        }
        if let Some(value) = resource.collect(visuals) {
            player.pick_up(value);
            ledger.set_meat(player.held_count());
            collected += 1;
        }
    }
    collected
}

/// Pass 3: sell everything the player carries when next to the workbench
///
/// Returns the coins earned.
pub fn sell_pass(
    player: &mut Player,
    workbench: &SellWorkbench,
    ledger: &mut EconomyLedger,
    radius: f32,
) -> u64 {
    if player.held_count() == 0 || !workbench.in_reach(player.position, radius) {
        return 0;
    }
    let (_, value) = player.take_cargo();
    let earned = ledger.sell(value);
    if earned == 0 {
        // Worthless cargo still empties the player's hands
        ledger.set_meat(0);
    }
    earned
}

/// Pass 4: sell upgrades on pads the player stands on
///
/// Every pad's cooldown counts down first, whether or not the player is on
/// it. Returns the number of purchases.
#[allow(clippy::too_many_arguments)]
pub fn pad_pass(
    pads: &mut [UpgradePad],
    player_position: Vec2,
    dt: f32,
    tuning: &EconomyConfig,
    ledger: &mut EconomyLedger,
    zones: &mut ZoneSet,
    herd: &mut Herd,
    visuals: &mut dyn VisualSink,
) -> u32 {
    let mut purchases = 0;
    for pad in pads.iter_mut() {
        pad.tick_cooldown(dt);
        if !pad.contains(player_position) || !pad.is_ready() || ledger.coins() < pad.cost() {
            continue;
        }
        let targets = UpgradeTargets { ledger: &mut *ledger, zones: &mut *zones, herd: &mut *herd };
        if apply_upgrade(pad.kind, pad.cost(), tuning, targets, visuals) {
            pad.complete_purchase(tuning.pad_cost_multiplier, tuning.pad_cooldown);
            log::info!("{} pad sold, next price {}", pad.label, pad.cost());
            purchases += 1;
        }
    }
    purchases
}

/// Pass 5: toggle levers within reach on the interact edge
///
/// A lever whose action fails is reset to inactive and ready. Returns
/// (successful toggles, rolled back toggles).
#[allow(clippy::too_many_arguments)]
pub fn lever_pass(
    levers: &mut [ToggleLever],
    player_position: Vec2,
    interact: bool,
    tuning: &EconomyConfig,
    ledger: &mut EconomyLedger,
    zones: &mut ZoneSet,
    herd: &mut Herd,
    visuals: &mut dyn VisualSink,
) -> (u32, u32) {
    if !interact {
        return (0, 0);
    }
    let mut toggles = 0;
    let mut failures = 0;
    for lever in levers.iter_mut() {
        if lever.position.distance(player_position) >= tuning.lever_radius {
            continue;
        }
        if !lever.interact(tuning.lever_cooldown) {
            continue;
        }
        let targets = UpgradeTargets { ledger: &mut *ledger, zones: &mut *zones, herd: &mut *herd };
        if apply_lever_action(lever.action, tuning, targets, visuals) {
            toggles += 1;
        } else {
            log::debug!("Lever action {:?} failed, resetting lever", lever.action);
            lever.reset();
            failures += 1;
        }
    }
    (toggles, failures)
}
