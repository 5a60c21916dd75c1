//! Property tests for the simulation invariants
//!
//! - Decoration placement is a pure function of chunk key and obstacles
//! - Refreshing twice at the same spot loads nothing new
//! - A loaded chunk keeps its trees whatever obstacles appear later
//! - Creatures never leave their padded home zone
//! - Hazard damage is exactly rate * dt per overlapping tick
//! - The coin balance matches a signed model and never goes below zero

use paddock_core::interaction::{hazard_pass, ResourceMap};
use paddock_core::{
    ChunkKey, CreatureKind, EconomyLedger, HasWorldPosition, HazardZone, Herd, InputFrame,
    NullVisuals, RanchLayout, RanchWorld, Rect, SimConfig, StreamingConfig, UpgradeKind, Vec2,
    WorldStreamer, ZoneSet,
};
use proptest::prelude::*;

fn obstacle_strategy() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((-3000.0f32..3000.0, -3000.0f32..3000.0), 0..6)
}

#[derive(Debug, Clone)]
enum LedgerOp {
    Add(u64),
    Spend(u64),
    Buy(u64),
    Sell(u64),
}

fn ledger_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (0u64..500).prop_map(LedgerOp::Add),
        (0u64..500).prop_map(LedgerOp::Spend),
        (0u64..500).prop_map(LedgerOp::Buy),
        (0u64..500).prop_map(LedgerOp::Sell),
    ]
}

proptest! {
    #[test]
    fn prop_decorations_are_deterministic(
        cx in -200i32..200,
        cy in -200i32..200,
        points in obstacle_strategy(),
    ) {
        let obstacles: Vec<Vec2> = points.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        let refs: Vec<&dyn HasWorldPosition> = obstacles.iter().map(|o| o as &dyn HasWorldPosition).collect();
        let key = ChunkKey::new(cx, cy);

        let mut first = WorldStreamer::new(StreamingConfig::default());
        let mut second = WorldStreamer::new(StreamingConfig::default());
        let mut visuals = NullVisuals::new();
        first.load_chunk(key, &refs, &mut visuals);
        second.load_chunk(key, &refs, &mut visuals);

        let a: Vec<(Vec2, f32)> = first.chunk(key).unwrap().decorations().iter().map(|d| (d.position, d.size)).collect();
        let b: Vec<(Vec2, f32)> = second.chunk(key).unwrap().decorations().iter().map(|d| (d.position, d.size)).collect();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a, first.plan_decorations(key, &refs));
    }

    #[test]
    fn prop_refresh_is_idempotent(x in -50_000.0f32..50_000.0, y in -50_000.0f32..50_000.0) {
        let mut streamer = WorldStreamer::new(StreamingConfig::default());
        let mut visuals = NullVisuals::new();
        let observer = Vec2::new(x, y);

        prop_assert_eq!(streamer.refresh(observer, &[], &mut visuals), 9);
        let decorations = streamer.decoration_count();
        prop_assert_eq!(streamer.refresh(observer, &[], &mut visuals), 0);
        prop_assert_eq!(streamer.chunk_count(), 9);
        prop_assert_eq!(streamer.decoration_count(), decorations);
        prop_assert!(streamer.active_keys().contains(&streamer.chunk_key_for(observer)));
    }

    #[test]
    fn prop_loaded_chunks_ignore_later_obstacles(
        cx in -200i32..200,
        cy in -200i32..200,
        points in obstacle_strategy(),
    ) {
        let obstacles: Vec<Vec2> = points.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        let refs: Vec<&dyn HasWorldPosition> = obstacles.iter().map(|o| o as &dyn HasWorldPosition).collect();
        let key = ChunkKey::new(cx, cy);

        let mut streamer = WorldStreamer::new(StreamingConfig::default());
        let mut visuals = NullVisuals::new();
        streamer.load_chunk(key, &[], &mut visuals);
        let before = streamer.chunk(key).unwrap().decorations().to_vec();

        prop_assert!(!streamer.load_chunk(key, &refs, &mut visuals));
        prop_assert_eq!(streamer.chunk(key).unwrap().decorations(), before.as_slice());
    }

    #[test]
    fn prop_creatures_stay_in_padded_zone(
        seed in any::<u64>(),
        steps in prop::collection::vec(0.0f32..0.25, 1..200),
    ) {
        let config = SimConfig { seed: Some(seed), ..SimConfig::default() };
        let padding = config.creatures.padding;
        let mut visuals = NullVisuals::new();
        let mut world = RanchWorld::from_layout(&RanchLayout::classic(), config, &mut visuals);
        world.zones_mut().unlock_next(&mut visuals);

        for dt in steps {
            world.tick(&InputFrame::idle(), dt, &mut visuals);
            for (_, creature) in world.herd().iter() {
                let zone = world.zones().get(creature.home).unwrap();
                let bounds = creature.wander_bounds(&zone.rect, padding);
                prop_assert!(bounds.contains(creature.position));
            }
        }
    }

    #[test]
    fn prop_damage_is_rate_times_dt(
        rate in 0.0f32..80.0,
        steps in prop::collection::vec(0.001f32..0.25, 1..20),
    ) {
        let mut visuals = NullVisuals::new();
        let mut zones = ZoneSet::new();
        zones.push_unlocked(HazardZone::new(Rect::from_corner_size(0.0, 0.0, 200.0, 200.0), rate, 10), &mut visuals);
        let mut herd = Herd::default();
        let mut resources = ResourceMap::with_key();
        let key = herd.spawn_at(CreatureKind::Large, Vec2::new(100.0, 100.0), zones.id_at(0).unwrap(), &mut visuals);

        // 20 * 0.25 * 80 = 400 > 200 health, so stop at death
        for dt in steps {
            let before = herd.get(key).unwrap().health;
            hazard_pass(&zones, &mut herd, &mut resources, dt, 0.0, &mut visuals);
            let creature = herd.get(key).unwrap();
            if !creature.is_alive() {
                prop_assert_eq!(resources.len(), 1);
                break;
            }
            prop_assert_eq!(creature.health, before - rate * dt);
            prop_assert!(creature.health <= before);
        }
    }

    #[test]
    fn prop_balance_never_negative(ops in prop::collection::vec(ledger_op(), 0..64)) {
        let mut ledger = EconomyLedger::new();
        let mut model: i128 = 0;

        for op in ops {
            match op {
                LedgerOp::Add(n) => {
                    ledger.add_currency(n);
                    model += n as i128;
                }
                LedgerOp::Spend(n) => {
                    let ok = ledger.spend_if_affordable(n);
                    prop_assert_eq!(ok, model >= n as i128);
                    if ok {
                        model -= n as i128;
                    }
                }
                LedgerOp::Buy(n) => {
                    if ledger.buy_upgrade(UpgradeKind::HazardDamage, n) {
                        model -= n as i128;
                    }
                }
                LedgerOp::Sell(n) => {
                    model += ledger.sell(n) as i128;
                }
            }
            prop_assert!(model >= 0);
            prop_assert_eq!(ledger.coins() as i128, model);
        }
    }
}
