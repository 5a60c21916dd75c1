//! Presentation collaborator
//!
//! The simulation never draws anything itself. Every on-screen effect goes
//! through a [`VisualSink`], which a renderer, a logger or a test recorder
//! implements. Calls are fire-and-forget: the sink owns the handle space and
//! the simulation only stores the handles it was given.

use std::collections::HashSet;
use paddock_math::Vec2;
use serde::{Serialize, Deserialize};
use crate::creature::CreatureKind;

/// Opaque reference to something a [`VisualSink`] spawned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(u64);

impl VisualHandle {
    /// Wrap a raw sink-side identifier
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw sink-side identifier
    #[inline]
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// What a visual depicts, with the dimensions a renderer needs
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VisualKind {
    /// Ground plane of a streamed chunk
    Ground { size: f32 },
    /// Tree decoration
    Tree { size: f32 },
    /// A wandering creature
    Creature(CreatureKind),
    /// A drop lying on the ground
    Resource,
    /// Hazard zone rectangle
    HazardZone { size: Vec2 },
    /// Purchase pad
    UpgradePad { size: Vec2 },
    /// Lever with a two-frame sheet
    Lever,
    /// Sell workbench
    Workbench,
    /// The player avatar
    Player,
}

/// A colour multiplier applied to a visual
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    /// RGBA multiplier (each component 0.0-1.0)
    pub rgba: [f32; 4],
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Tint {
    /// Create a tint from RGBA components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { rgba: [r, g, b, a] }
    }

    /// No tint
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Damage flash
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
}

/// Receiver of every presentation side effect
pub trait VisualSink {
    /// Create a visual at a world position and return its handle
    fn spawn_visual(&mut self, kind: VisualKind, position: Vec2) -> VisualHandle;

    /// Remove a visual; unknown handles are ignored
    fn despawn_visual(&mut self, handle: VisualHandle);

    /// Move a visual; `elevation` lifts it off the ground (hop, bob)
    fn set_visual_position(&mut self, handle: VisualHandle, position: Vec2, elevation: f32);

    /// Recolour a visual
    fn set_visual_tint(&mut self, handle: VisualHandle, tint: Tint);

    /// Mirror a side-facing sprite horizontally
    fn flip_visual_facing(&mut self, handle: VisualHandle, flipped: bool);

    /// Select a frame of a sprite sheet
    fn set_visual_frame(&mut self, handle: VisualHandle, frame: u32);
}

/// Sink that hands out handles and discards everything else
#[derive(Debug, Default)]
pub struct NullVisuals {
    next: u64,
}

impl NullVisuals {
    /// Create a new null sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl VisualSink for NullVisuals {
    fn spawn_visual(&mut self, _kind: VisualKind, _position: Vec2) -> VisualHandle {
        self.next += 1;
        VisualHandle(self.next)
    }

    fn despawn_visual(&mut self, _handle: VisualHandle) {}

    fn set_visual_position(&mut self, _handle: VisualHandle, _position: Vec2, _elevation: f32) {}

    fn set_visual_tint(&mut self, _handle: VisualHandle, _tint: Tint) {}

    fn flip_visual_facing(&mut self, _handle: VisualHandle, _flipped: bool) {}

    fn set_visual_frame(&mut self, _handle: VisualHandle, _frame: u32) {}
}

/// One call received by a [`RecordingVisuals`]
#[derive(Clone, Debug, PartialEq)]
pub enum VisualCall {
    Spawn { handle: VisualHandle, kind: VisualKind, position: Vec2 },
    Despawn(VisualHandle),
    Position { handle: VisualHandle, position: Vec2, elevation: f32 },
    Tint { handle: VisualHandle, tint: Tint },
    Facing { handle: VisualHandle, flipped: bool },
    Frame { handle: VisualHandle, frame: u32 },
}

/// Sink that records every call, for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingVisuals {
    next: u64,
    live: HashSet<VisualHandle>,
    calls: Vec<VisualCall>,
}

impl RecordingVisuals {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> &[VisualCall] {
        &self.calls
    }

    /// Forget recorded calls (live handles are kept)
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of spawned visuals not yet despawned
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Check if a handle was spawned and not yet despawned
    pub fn is_live(&self, handle: VisualHandle) -> bool {
        self.live.contains(&handle)
    }

    /// Count recorded spawns matching a predicate on the kind
    pub fn spawn_count(&self, mut pred: impl FnMut(&VisualKind) -> bool) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, VisualCall::Spawn { kind, .. } if pred(kind)))
            .count()
    }

    /// The most recent tint applied to a handle
    pub fn last_tint(&self, handle: VisualHandle) -> Option<Tint> {
        self.calls.iter().rev().find_map(|call| match call {
            VisualCall::Tint { handle: h, tint } if *h == handle => Some(*tint),
            _ => None,
        })
    }

    /// The most recent frame selected for a handle
    pub fn last_frame(&self, handle: VisualHandle) -> Option<u32> {
        self.calls.iter().rev().find_map(|call| match call {
            VisualCall::Frame { handle: h, frame } if *h == handle => Some(*frame),
            _ => None,
        })
    }

    /// The most recent position (and elevation) given to a handle
    pub fn last_position(&self, handle: VisualHandle) -> Option<(Vec2, f32)> {
        self.calls.iter().rev().find_map(|call| match call {
            VisualCall::Position { handle: h, position, elevation } if *h == handle => {
                Some((*position, *elevation))
            }
            VisualCall::Spawn { handle: h, position, .. } if *h == handle => Some((*position, 0.0)),
            _ => None,
        })
    }
}

impl VisualSink for RecordingVisuals {
    fn spawn_visual(&mut self, kind: VisualKind, position: Vec2) -> VisualHandle {
        self.next += 1;
        let handle = VisualHandle(self.next);
        self.live.insert(handle);
        self.calls.push(VisualCall::Spawn { handle, kind, position });
        handle
    }

    fn despawn_visual(&mut self, handle: VisualHandle) {
        self.live.remove(&handle);
        self.calls.push(VisualCall::Despawn(handle));
    }

    fn set_visual_position(&mut self, handle: VisualHandle, position: Vec2, elevation: f32) {
        self.calls.push(VisualCall::Position { handle, position, elevation });
    }

    fn set_visual_tint(&mut self, handle: VisualHandle, tint: Tint) {
        self.calls.push(VisualCall::Tint { handle, tint });
    }

    fn flip_visual_facing(&mut self, handle: VisualHandle, flipped: bool) {
        self.calls.push(VisualCall::Facing { handle, flipped });
    }

    fn set_visual_frame(&mut self, handle: VisualHandle, frame: u32) {
        self.calls.push(VisualCall::Frame { handle, frame });
    }
}
