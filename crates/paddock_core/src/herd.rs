//! The herd: every creature in the world, plus the spawn timer
//!
//! Creatures live in a generational slot map so keys held across a removal
//! never alias a newer creature.

use paddock_math::Vec2;
use rand::Rng;
use slotmap::SlotMap;
use crate::config::CreatureConfig;
use crate::creature::{Creature, CreatureKey, CreatureKind, DamageOutcome};
use crate::visual::{VisualKind, VisualSink};
use crate::zone::{ZoneId, ZoneSet};

/// All creatures and the spawn schedule
#[derive(Debug)]
pub struct Herd {
    creatures: SlotMap<CreatureKey, Creature>,
    config: CreatureConfig,
    spawn_timer: f32,
    spawn_interval: f32,
}

impl Default for Herd {
    fn default() -> Self {
        Self::new(CreatureConfig::default())
    }
}

impl Herd {
    /// Create an empty herd; the first spawn attempt is due immediately
    pub fn new(config: CreatureConfig) -> Self {
        Self {
            creatures: SlotMap::with_key(),
            spawn_interval: config.spawn_interval,
            spawn_timer: 0.0,
            config,
        }
    }

    /// Creature tuning
    pub fn config(&self) -> &CreatureConfig {
        &self.config
    }

    /// Seconds between spawn attempts
    #[inline]
    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    /// Change the spawn interval (takes effect at the next reset)
    pub fn set_spawn_interval(&mut self, interval: f32) {
        self.spawn_interval = interval;
    }

    /// Seconds until the next spawn attempt
    #[inline]
    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Count the timer down; returns true when a spawn attempt is due
    pub fn tick_spawn_timer(&mut self, dt: f32) -> bool {
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_timer = self.spawn_interval;
            true
        } else {
            false
        }
    }

    /// Spawn at most one creature per zone while the herd is under the cap
    ///
    /// Each zone's ceiling is `base_cap * upgrade_level * unlocked_zones`,
    /// compared against the size of the whole herd. Returns the number
    /// spawned.
    pub fn spawn_if_room_available<R: Rng + ?Sized>(
        &mut self,
        zones: &ZoneSet,
        upgrade_level: u32,
        unlocked_zones: usize,
        rng: &mut R,
        visuals: &mut dyn VisualSink,
    ) -> usize {
        let mut spawned = 0;
        for (id, zone) in zones.iter() {
            let ceiling = zone.spawn_ceiling(upgrade_level, unlocked_zones);
            if self.live_count() >= ceiling {
                continue;
            }

            let kind = CreatureKind::for_zone_index(id.index());
            let probe = Creature::new(kind, &self.config, zone.rect.center(), id);
            let area = probe.wander_bounds(&zone.rect, self.config.padding);
            let position = area.point_at(rng.gen::<f32>(), rng.gen::<f32>());
            self.spawn_at(kind, position, id, visuals);
            spawned += 1;
        }
        spawned
    }

    /// Spawn a creature of `kind` at an exact position
    pub fn spawn_at(
        &mut self,
        kind: CreatureKind,
        position: Vec2,
        home: ZoneId,
        visuals: &mut dyn VisualSink,
    ) -> CreatureKey {
        let visual = visuals.spawn_visual(VisualKind::Creature(kind), position);
        let creature = Creature::new(kind, &self.config, position, home).with_visual(visual);
        log::debug!("Spawned {:?} at ({:.1}, {:.1}) in zone {}", kind, position.x, position.y, home.index());
        self.creatures.insert(creature)
    }

    /// Advance one creature's wandering inside its home zone
    ///
    /// Returns false if the key or its home zone is unknown.
    pub fn update_one<R: Rng + ?Sized>(
        &mut self,
        key: CreatureKey,
        zones: &ZoneSet,
        dt: f32,
        clock: f32,
        rng: &mut R,
        visuals: &mut dyn VisualSink,
    ) -> bool {
        let Some(creature) = self.creatures.get_mut(key) else {
            return false;
        };
        let Some(zone) = zones.get(creature.home) else {
            return false;
        };
        creature.update(&zone.rect, dt, clock, &self.config, rng, visuals);
        true
    }

    /// Advance every creature
    pub fn update_all<R: Rng + ?Sized>(
        &mut self,
        zones: &ZoneSet,
        dt: f32,
        clock: f32,
        rng: &mut R,
        visuals: &mut dyn VisualSink,
    ) {
        for (_key, creature) in &mut self.creatures {
            if let Some(zone) = zones.get(creature.home) {
                creature.update(&zone.rect, dt, clock, &self.config, rng, visuals);
            }
        }
    }

    /// Damage one creature
    pub fn apply_damage(
        &mut self,
        key: CreatureKey,
        amount: f32,
        clock: f32,
        visuals: &mut dyn VisualSink,
    ) -> Option<DamageOutcome> {
        let flash = self.config.flash_duration;
        self.creatures
            .get_mut(key)
            .map(|creature| creature.apply_damage(amount, clock, flash, visuals))
    }

    /// Drop dead creatures, returning how many were removed
    pub fn remove_dead(&mut self) -> usize {
        let before = self.creatures.len();
        self.creatures.retain(|_, creature| creature.is_alive());
        before - self.creatures.len()
    }

    /// Get a creature by key
    pub fn get(&self, key: CreatureKey) -> Option<&Creature> {
        self.creatures.get(key)
    }

    /// Get a mutable creature by key
    pub fn get_mut(&mut self, key: CreatureKey) -> Option<&mut Creature> {
        self.creatures.get_mut(key)
    }

    /// Iterate over all creatures
    pub fn iter(&self) -> impl Iterator<Item = (CreatureKey, &Creature)> {
        self.creatures.iter()
    }

    /// Iterate mutably over all creatures
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CreatureKey, &mut Creature)> {
        self.creatures.iter_mut()
    }

    /// Number of creatures still alive
    pub fn live_count(&self) -> usize {
        self.creatures.values().filter(|c| c.is_alive()).count()
    }

    /// Number of creatures held, dead ones not yet removed included
    #[inline]
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    /// Check if the herd is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}
