//! Log-backed presentation
//!
//! Headless runs have no renderer, so visual calls go to the `log` crate
//! at trace level and ledger counters at debug level.

use paddock_core::{CounterMirror, MirrorError, Tint, Vec2, VisualHandle, VisualKind, VisualSink};

/// Visual sink that logs every call
#[derive(Debug, Default)]
pub struct LogVisuals {
    next: u64,
    live: usize,
}

impl LogVisuals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of visuals spawned and not yet despawned
    pub fn live_count(&self) -> usize {
        self.live
    }
}

impl VisualSink for LogVisuals {
    fn spawn_visual(&mut self, kind: VisualKind, position: Vec2) -> VisualHandle {
        self.next += 1;
        self.live += 1;
        log::trace!("spawn #{} {:?} at ({:.1}, {:.1})", self.next, kind, position.x, position.y);
        VisualHandle::from_raw(self.next)
    }

    fn despawn_visual(&mut self, handle: VisualHandle) {
        self.live = self.live.saturating_sub(1);
        log::trace!("despawn #{}", handle.raw());
    }

    fn set_visual_position(&mut self, _handle: VisualHandle, _position: Vec2, _elevation: f32) {
        // Too chatty even for trace
    }

    fn set_visual_tint(&mut self, handle: VisualHandle, tint: Tint) {
        log::trace!("tint #{} {:?}", handle.raw(), tint.rgba);
    }

    fn flip_visual_facing(&mut self, _handle: VisualHandle, _flipped: bool) {}

    fn set_visual_frame(&mut self, handle: VisualHandle, frame: u32) {
        log::trace!("frame #{} -> {}", handle.raw(), frame);
    }
}

/// Counter mirror that logs the HUD counters
#[derive(Debug, Default)]
pub struct LogMirror;

impl CounterMirror for LogMirror {
    fn counters_changed(&mut self, meat: u32, coins: u64) -> Result<(), MirrorError> {
        log::debug!("HUD: meat={} coins={}", meat, coins);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_unique() {
        let mut visuals = LogVisuals::new();
        let a = visuals.spawn_visual(VisualKind::Player, Vec2::ZERO);
        let b = visuals.spawn_visual(VisualKind::Resource, Vec2::X);
        assert_ne!(a, b);
        assert_eq!(visuals.live_count(), 2);

        visuals.despawn_visual(a);
        assert_eq!(visuals.live_count(), 1);
    }

    #[test]
    fn test_mirror_never_fails() {
        let mut mirror = LogMirror;
        assert!(mirror.counters_changed(3, 40).is_ok());
    }
}
