//! Dropped resources
//!
//! A resource appears where a creature died and waits on the ground, bobbing
//! gently, until the player walks over it.

use paddock_math::Vec2;
use slotmap::new_key_type;
use crate::visual::{VisualHandle, VisualKind, VisualSink};

new_key_type! {
    /// Key to a resource lying in the world
    pub struct ResourceKey;
}

/// Resting height of the bob animation
const BOB_BASE: f32 = 5.0;
/// Bob amplitude
const BOB_HEIGHT: f32 = 2.0;
/// Bob frequency (radians per second)
const BOB_RATE: f32 = 5.0;

/// A collectible drop
#[derive(Clone, Debug)]
pub struct Resource {
    /// Where it lies
    pub position: Vec2,
    /// Coins it sells for
    pub value: u64,
    collected: bool,
    visual: Option<VisualHandle>,
}

impl Resource {
    /// Create a resource without a visual
    pub fn new(position: Vec2, value: u64) -> Self {
        Self {
            position,
            value,
            collected: false,
            visual: None,
        }
    }

    /// Create a resource and show it
    pub fn spawn(position: Vec2, value: u64, visuals: &mut dyn VisualSink) -> Self {
        Self {
            visual: Some(visuals.spawn_visual(VisualKind::Resource, position)),
            ..Self::new(position, value)
        }
    }

    /// Check if the player already picked this up
    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Visual handle, until collected
    #[inline]
    pub fn visual(&self) -> Option<VisualHandle> {
        self.visual
    }

    /// Mark collected and hide it, returning its value
    ///
    /// Collecting twice yields nothing the second time.
    pub fn collect(&mut self, visuals: &mut dyn VisualSink) -> Option<u64> {
        if self.collected {
            return None;
        }
        self.collected = true;
        if let Some(visual) = self.visual.take() {
            visuals.despawn_visual(visual);
        }
        Some(self.value)
    }

    /// Push the bobbing position for the current clock
    pub fn bob(&self, clock: f32, visuals: &mut dyn VisualSink) {
        if let Some(visual) = self.visual {
            let elevation = BOB_BASE + (clock * BOB_RATE).sin() * BOB_HEIGHT;
            visuals.set_visual_position(visual, self.position, elevation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::RecordingVisuals;

    #[test]
    fn test_collect_once() {
        let mut visuals = RecordingVisuals::new();
        let mut resource = Resource::spawn(Vec2::new(10.0, 10.0), 5, &mut visuals);
        let handle = resource.visual().unwrap();

        assert_eq!(resource.collect(&mut visuals), Some(5));
        assert!(resource.is_collected());
        assert!(!visuals.is_live(handle));
        assert_eq!(resource.collect(&mut visuals), None);
    }

    #[test]
    fn test_bob_range() {
        let mut visuals = RecordingVisuals::new();
        let resource = Resource::spawn(Vec2::ZERO, 5, &mut visuals);
        let handle = resource.visual().unwrap();
        for i in 0..100 {
            resource.bob(i as f32 * 0.05, &mut visuals);
            let (position, elevation) = visuals.last_position(handle).unwrap();
            assert_eq!(position, Vec2::ZERO);
            assert!((3.0..=7.0).contains(&elevation));
        }
    }
}
