//! Hazard zones
//!
//! Zones are the pens creatures spawn and wander in, and they damage every
//! creature overlapping them while active. Zones beyond the first few start
//! locked and are unlocked in order by the area upgrade.

use std::collections::VecDeque;
use paddock_math::{Rect, Vec2};
use crate::obstacle::HasWorldPosition;
use crate::visual::{VisualHandle, VisualKind, VisualSink};

/// Index of an unlocked zone
///
/// Ids are stable: zones are only ever appended when unlocked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(usize);

impl ZoneId {
    /// Get the raw index of this id
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A damaging rectangle that also bounds its creatures
#[derive(Clone, Debug)]
pub struct HazardZone {
    /// Area covered by the zone
    pub rect: Rect,
    /// Damage dealt per second to overlapping creatures
    pub damage_per_second: f32,
    /// Whether the zone currently deals damage
    pub active: bool,
    /// Per-zone spawn cap before upgrades and unlock scaling
    pub base_cap: u32,
    visual: Option<VisualHandle>,
}

impl HazardZone {
    /// Create an active zone
    pub fn new(rect: Rect, damage_per_second: f32, base_cap: u32) -> Self {
        Self {
            rect,
            damage_per_second,
            active: true,
            base_cap,
            visual: None,
        }
    }

    /// Spawn ceiling for this zone given the spawn upgrade level and the
    /// number of unlocked zones
    pub fn spawn_ceiling(&self, upgrade_level: u32, unlocked_zones: usize) -> usize {
        (self.base_cap as usize)
            .saturating_mul(upgrade_level as usize)
            .saturating_mul(unlocked_zones)
    }

    /// Visual handle, once the zone has been shown
    pub fn visual(&self) -> Option<VisualHandle> {
        self.visual
    }

    fn show(&mut self, visuals: &mut dyn VisualSink) {
        if self.visual.is_none() {
            let kind = VisualKind::HazardZone { size: self.rect.size() };
            self.visual = Some(visuals.spawn_visual(kind, self.rect.center()));
        }
    }
}

/// A zone blocks decoration placement around its centre, not its top-left
/// corner, so large zones keep trees off their whole footprint.
impl HasWorldPosition for HazardZone {
    fn world_position(&self) -> Option<Vec2> {
        Some(self.rect.center())
    }
}

/// Unlocked zones in id order plus the queue of zones still locked
///
/// One switch drives every zone: unlocked zones always share its state.
#[derive(Clone, Debug)]
pub struct ZoneSet {
    unlocked: Vec<HazardZone>,
    locked: VecDeque<HazardZone>,
    hazards_enabled: bool,
}

impl Default for ZoneSet {
    fn default() -> Self {
        Self {
            unlocked: Vec::new(),
            locked: VecDeque::new(),
            hazards_enabled: true,
        }
    }
}

impl ZoneSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unlocked zone, showing it, and return its id
    ///
    /// The zone takes the current state of the hazard switch.
    pub fn push_unlocked(&mut self, mut zone: HazardZone, visuals: &mut dyn VisualSink) -> ZoneId {
        zone.active = self.hazards_enabled;
        zone.show(visuals);
        let id = ZoneId(self.unlocked.len());
        self.unlocked.push(zone);
        id
    }

    /// Queue a zone to be unlocked later
    pub fn push_locked(&mut self, zone: HazardZone) {
        self.locked.push_back(zone);
    }

    /// Unlock the next queued zone, if any
    pub fn unlock_next(&mut self, visuals: &mut dyn VisualSink) -> Option<ZoneId> {
        let zone = self.locked.pop_front()?;
        let id = self.push_unlocked(zone, visuals);
        log::info!("Unlocked hazard zone {} ({} still locked)", id.index(), self.locked.len());
        Some(id)
    }

    /// Get an unlocked zone by id
    pub fn get(&self, id: ZoneId) -> Option<&HazardZone> {
        self.unlocked.get(id.0)
    }

    /// Get a mutable unlocked zone by id
    pub fn get_mut(&mut self, id: ZoneId) -> Option<&mut HazardZone> {
        self.unlocked.get_mut(id.0)
    }

    /// Id of the unlocked zone at `index`
    pub fn id_at(&self, index: usize) -> Option<ZoneId> {
        (index < self.unlocked.len()).then_some(ZoneId(index))
    }

    /// Iterate over unlocked zones with their ids
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, &HazardZone)> {
        self.unlocked.iter().enumerate().map(|(i, z)| (ZoneId(i), z))
    }

    /// Iterate mutably over unlocked zones
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut HazardZone> {
        self.unlocked.iter_mut()
    }

    /// Number of unlocked zones
    #[inline]
    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Number of zones still locked
    #[inline]
    pub fn locked_count(&self) -> usize {
        self.locked.len()
    }

    /// Multiply the damage of every zone, locked ones included
    pub fn scale_damage(&mut self, factor: f32) {
        for zone in self.unlocked.iter_mut().chain(self.locked.iter_mut()) {
            zone.damage_per_second *= factor;
        }
    }

    /// Whether the hazard switch is on
    #[inline]
    pub fn hazards_enabled(&self) -> bool {
        self.hazards_enabled
    }

    /// Flip the hazard switch and return its new state
    pub fn toggle_active(&mut self) -> bool {
        self.hazards_enabled = !self.hazards_enabled;
        for zone in &mut self.unlocked {
            zone.active = self.hazards_enabled;
        }
        self.hazards_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::RecordingVisuals;

    fn zone_at(x: f32) -> HazardZone {
        HazardZone::new(Rect::from_corner_size(x, 0.0, 200.0, 200.0), 50.0, 10)
    }

    #[test]
    fn test_spawn_ceiling() {
        let zone = zone_at(0.0);
        assert_eq!(zone.spawn_ceiling(1, 1), 10);
        assert_eq!(zone.spawn_ceiling(2, 3), 60);
    }

    #[test]
    fn test_unlock_in_order() {
        let mut visuals = RecordingVisuals::new();
        let mut zones = ZoneSet::new();
        zones.push_unlocked(zone_at(0.0), &mut visuals);
        zones.push_locked(zone_at(400.0));
        zones.push_locked(zone_at(800.0));
        assert_eq!(visuals.live_count(), 1);

        let id = zones.unlock_next(&mut visuals).unwrap();
        assert_eq!(id.index(), 1);
        assert_eq!(zones.get(id).unwrap().rect.min.x, 400.0);
        assert!(zones.get(id).unwrap().visual().is_some());
        assert_eq!(visuals.live_count(), 2);

        zones.unlock_next(&mut visuals);
        assert!(zones.unlock_next(&mut visuals).is_none());
        assert_eq!(zones.unlocked_count(), 3);
        assert_eq!(zones.locked_count(), 0);
    }

    #[test]
    fn test_scale_damage_includes_locked() {
        let mut visuals = RecordingVisuals::new();
        let mut zones = ZoneSet::new();
        zones.push_unlocked(zone_at(0.0), &mut visuals);
        zones.push_locked(zone_at(400.0));

        zones.scale_damage(1.5);
        zones.unlock_next(&mut visuals);
        for (_, zone) in zones.iter() {
            assert_eq!(zone.damage_per_second, 75.0);
        }
    }

    #[test]
    fn test_toggle_active() {
        let mut visuals = RecordingVisuals::new();
        let mut zones = ZoneSet::new();
        zones.push_unlocked(zone_at(0.0), &mut visuals);
        assert!(!zones.toggle_active());
        assert!(!zones.get(ZoneId(0)).unwrap().active);
        assert!(zones.toggle_active());
        assert!(zones.get(ZoneId(0)).unwrap().active);
    }

    #[test]
    fn test_unlock_follows_hazard_switch() {
        let mut visuals = RecordingVisuals::new();
        let mut zones = ZoneSet::new();
        zones.push_unlocked(zone_at(0.0), &mut visuals);
        zones.push_locked(zone_at(400.0));

        zones.toggle_active();
        let id = zones.unlock_next(&mut visuals).unwrap();
        assert!(!zones.get(id).unwrap().active);

        zones.toggle_active();
        assert!(zones.hazards_enabled());
        assert!(zones.iter().all(|(_, z)| z.active));

        zones.toggle_active();
        assert!(zones.iter().all(|(_, z)| !z.active));
    }

    #[test]
    fn test_obstacle_position_is_center() {
        let zone = zone_at(300.0);
        assert_eq!(zone.world_position(), Some(Vec2::new(400.0, 100.0)));
    }
}
