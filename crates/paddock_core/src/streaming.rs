//! Chunk streaming
//!
//! The ground is an unbounded grid of square chunks. Each tick the streamer
//! makes sure the 3x3 block of chunks around the observer exists, generating
//! missing ones with a deterministic scatter of tree decorations.
//!
//! Generation is a pure function of the chunk key and the obstacle snapshot
//! of the tick that first loaded the chunk:
//! - slot seeds come from an integer mix of the chunk coordinates
//! - candidates near the origin (the ranch) are rejected
//! - candidates near any obstacle are rejected
//!
//! Chunks are never unloaded.

use std::collections::HashMap;
use paddock_math::{hash_unit, Vec2};
use crate::config::StreamingConfig;
use crate::obstacle::HasWorldPosition;
use crate::visual::{VisualHandle, VisualKind, VisualSink};

/// Integer chunk coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkKey {
    /// Create a key from chunk coordinates
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    /// Key of the chunk containing a world position
    ///
    /// Chunks are centred on multiples of `chunk_size`.
    pub fn containing(position: Vec2, chunk_size: f32) -> Self {
        let half = chunk_size * 0.5;
        Self {
            cx: ((position.x + half) / chunk_size).floor() as i32,
            cy: ((position.y + half) / chunk_size).floor() as i32,
        }
    }

    /// World-space centre of the chunk
    pub fn center(&self, chunk_size: f32) -> Vec2 {
        Vec2::new(self.cx as f32 * chunk_size, self.cy as f32 * chunk_size)
    }

    /// Generation seed of the chunk
    pub fn seed(&self) -> i64 {
        (self.cx as i64).wrapping_mul(73_856_093) ^ (self.cy as i64).wrapping_mul(19_349_663)
    }

    /// The chunk and its eight neighbours
    pub fn neighborhood(self) -> impl Iterator<Item = ChunkKey> {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).map(move |dy| ChunkKey::new(self.cx + dx, self.cy + dy))
        })
    }
}

/// A placed tree
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    pub position: Vec2,
    pub size: f32,
    pub visual: VisualHandle,
}

/// A generated chunk
#[derive(Clone, Debug)]
pub struct Chunk {
    key: ChunkKey,
    ground: VisualHandle,
    decorations: Vec<Decoration>,
}

impl Chunk {
    /// The chunk's key
    #[inline]
    pub fn key(&self) -> ChunkKey {
        self.key
    }

    /// Visual handle of the ground plane
    #[inline]
    pub fn ground(&self) -> VisualHandle {
        self.ground
    }

    /// Decorations in slot order
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }
}

/// Loads chunks around an observer
#[derive(Debug, Default)]
pub struct WorldStreamer {
    config: StreamingConfig,
    chunks: HashMap<ChunkKey, Chunk>,
    active: Vec<ChunkKey>,
}

impl WorldStreamer {
    /// Create a streamer with no chunks loaded
    pub fn new(config: StreamingConfig) -> Self {
        Self {
            config,
            chunks: HashMap::new(),
            active: Vec::new(),
        }
    }

    /// Streaming configuration
    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// Ensure the 3x3 neighbourhood around `observer` is loaded
    ///
    /// The neighbourhood becomes the active set. Returns the number of
    /// chunks loaded by this call; chunks that already exist are untouched.
    pub fn refresh(
        &mut self,
        observer: Vec2,
        obstacles: &[&dyn HasWorldPosition],
        visuals: &mut dyn VisualSink,
    ) -> usize {
        let center = self.chunk_key_for(observer);
        self.active.clear();
        let mut loaded = 0;
        for key in center.neighborhood() {
            if self.load_chunk(key, obstacles, visuals) {
                loaded += 1;
            }
            self.active.push(key);
        }
        loaded
    }

    /// Generate a chunk if it does not exist yet
    ///
    /// Returns true if the chunk was created by this call.
    pub fn load_chunk(
        &mut self,
        key: ChunkKey,
        obstacles: &[&dyn HasWorldPosition],
        visuals: &mut dyn VisualSink,
    ) -> bool {
        if self.chunks.contains_key(&key) {
            return false;
        }

        let size = self.config.chunk_size;
        let ground = visuals.spawn_visual(VisualKind::Ground { size }, key.center(size));
        let decorations: Vec<Decoration> = self
            .plan_decorations(key, obstacles)
            .into_iter()
            .map(|(position, size)| Decoration {
                position,
                size,
                visual: visuals.spawn_visual(VisualKind::Tree { size }, position),
            })
            .collect();

        log::debug!(
            "Loaded chunk ({}, {}) with {} decorations",
            key.cx,
            key.cy,
            decorations.len()
        );
        self.chunks.insert(key, Chunk { key, ground, decorations });
        true
    }

    /// Decoration positions and sizes a chunk would get, without spawning
    pub fn plan_decorations(
        &self,
        key: ChunkKey,
        obstacles: &[&dyn HasWorldPosition],
    ) -> Vec<(Vec2, f32)> {
        let cfg = &self.config;
        let center = key.center(cfg.chunk_size);
        let chunk_seed = key.seed();

        (0..cfg.decorations_per_chunk)
            .filter_map(|slot| {
                let slot_seed = chunk_seed.wrapping_add(i64::from(slot) * 1123);
                let offset = Vec2::new(
                    hash_unit(slot_seed, 1) - 0.5,
                    hash_unit(slot_seed, 2) - 0.5,
                ) * cfg.chunk_size;
                let position = center + offset;

                if position.length() < cfg.safe_radius {
                    return None;
                }
                let blocked = obstacles.iter().any(|obstacle| {
                    obstacle
                        .world_position()
                        .is_some_and(|p| p.distance(position) < cfg.obstacle_clearance)
                });
                if blocked {
                    return None;
                }

                let size = cfg.decoration_min_size + hash_unit(slot_seed, 3) * cfg.decoration_size_jitter;
                Some((position, size))
            })
            .collect()
    }

    /// Key of the chunk containing a world position
    pub fn chunk_key_for(&self, position: Vec2) -> ChunkKey {
        ChunkKey::containing(position, self.config.chunk_size)
    }

    /// Get a loaded chunk
    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    /// Check if a chunk has been loaded
    pub fn is_loaded(&self, key: ChunkKey) -> bool {
        self.chunks.contains_key(&key)
    }

    /// Number of chunks ever loaded
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Keys of the current 3x3 neighbourhood
    pub fn active_keys(&self) -> &[ChunkKey] {
        &self.active
    }

    /// Total decorations across all loaded chunks
    pub fn decoration_count(&self) -> usize {
        self.chunks.values().map(|c| c.decorations.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::{NullVisuals, RecordingVisuals};

    struct Unplaced;

    impl HasWorldPosition for Unplaced {
        fn world_position(&self) -> Option<Vec2> {
            None
        }
    }

    #[test]
    fn test_chunk_key_containing() {
        assert_eq!(ChunkKey::containing(Vec2::ZERO, 1000.0), ChunkKey::new(0, 0));
        assert_eq!(ChunkKey::containing(Vec2::new(499.0, -499.0), 1000.0), ChunkKey::new(0, 0));
        assert_eq!(ChunkKey::containing(Vec2::new(500.0, 0.0), 1000.0), ChunkKey::new(1, 0));
        assert_eq!(ChunkKey::containing(Vec2::new(-501.0, 0.0), 1000.0), ChunkKey::new(-1, 0));
        assert_eq!(ChunkKey::containing(Vec2::new(0.0, 1600.0), 1000.0), ChunkKey::new(0, 2));
    }

    #[test]
    fn test_seed_mixes_both_axes() {
        assert_eq!(ChunkKey::new(0, 0).seed(), 0);
        assert_eq!(ChunkKey::new(1, 0).seed(), 73_856_093);
        assert_eq!(ChunkKey::new(0, 1).seed(), 19_349_663);
        assert_ne!(ChunkKey::new(1, 2).seed(), ChunkKey::new(2, 1).seed());
    }

    #[test]
    fn test_neighborhood() {
        let keys: Vec<_> = ChunkKey::new(5, -2).neighborhood().collect();
        assert_eq!(keys.len(), 9);
        assert!(keys.contains(&ChunkKey::new(4, -3)));
        assert!(keys.contains(&ChunkKey::new(6, -1)));
        assert!(keys.contains(&ChunkKey::new(5, -2)));
    }

    #[test]
    fn test_refresh_loads_neighbourhood_once() {
        let mut visuals = RecordingVisuals::new();
        let mut streamer = WorldStreamer::new(StreamingConfig::default());

        assert_eq!(streamer.refresh(Vec2::ZERO, &[], &mut visuals), 9);
        assert_eq!(streamer.chunk_count(), 9);
        assert_eq!(streamer.active_keys().len(), 9);
        let decorations = streamer.decoration_count();
        let spawned = visuals.live_count();
        assert_eq!(spawned, 9 + decorations);

        assert_eq!(streamer.refresh(Vec2::new(10.0, 10.0), &[], &mut visuals), 0);
        assert_eq!(streamer.decoration_count(), decorations);
        assert_eq!(visuals.live_count(), spawned);
    }

    #[test]
    fn test_moving_loads_new_column() {
        let mut visuals = NullVisuals::new();
        let mut streamer = WorldStreamer::new(StreamingConfig::default());
        streamer.refresh(Vec2::ZERO, &[], &mut visuals);
        assert_eq!(streamer.refresh(Vec2::new(1000.0, 0.0), &[], &mut visuals), 3);
        assert_eq!(streamer.chunk_count(), 12);
        assert!(streamer.active_keys().contains(&ChunkKey::new(2, 0)));
        assert!(!streamer.active_keys().contains(&ChunkKey::new(-1, 0)));
        // Nothing is evicted
        assert!(streamer.is_loaded(ChunkKey::new(-1, 0)));
    }

    #[test]
    fn test_safe_radius_respected() {
        let mut visuals = NullVisuals::new();
        let mut streamer = WorldStreamer::new(StreamingConfig::default());
        streamer.refresh(Vec2::ZERO, &[], &mut visuals);
        for key in streamer.active_keys() {
            for deco in streamer.chunk(*key).unwrap().decorations() {
                assert!(deco.position.length() >= 500.0);
                assert!(deco.size >= 80.0 && deco.size <= 120.0);
            }
        }
    }

    #[test]
    fn test_obstacle_clearance() {
        let streamer = WorldStreamer::new(StreamingConfig::default());
        let key = ChunkKey::new(3, 3);
        let free = streamer.plan_decorations(key, &[]);
        assert!(!free.is_empty());

        // An obstacle on top of the first decoration removes it
        let blocker = free[0].0;
        let blocked = streamer.plan_decorations(key, &[&blocker]);
        assert!(blocked.len() < free.len());
        for (position, _) in &blocked {
            assert!(position.distance(blocker) >= 200.0);
        }
    }

    #[test]
    fn test_unplaced_obstacle_is_skipped() {
        let streamer = WorldStreamer::new(StreamingConfig::default());
        let key = ChunkKey::new(-2, 4);
        let free = streamer.plan_decorations(key, &[]);
        let with_unplaced = streamer.plan_decorations(key, &[&Unplaced]);
        assert_eq!(free, with_unplaced);
    }

    #[test]
    fn test_placement_fixed_on_first_load() {
        let mut visuals = RecordingVisuals::new();
        let mut streamer = WorldStreamer::new(StreamingConfig::default());
        let observer = Vec2::new(3000.0, 3000.0);
        let key = streamer.chunk_key_for(observer);

        streamer.refresh(observer, &[], &mut visuals);
        let placed = streamer.chunk(key).unwrap().decorations().to_vec();
        assert!(!placed.is_empty());
        let total = streamer.decoration_count();
        let live = visuals.live_count();

        // An obstacle that arrives later, right on top of a tree
        let blocker = placed[0].position;
        assert_eq!(streamer.refresh(observer, &[&blocker], &mut visuals), 0);
        assert!(!streamer.load_chunk(key, &[&blocker], &mut visuals));

        assert_eq!(streamer.chunk(key).unwrap().decorations(), placed.as_slice());
        assert_eq!(streamer.decoration_count(), total);
        assert_eq!(visuals.live_count(), live);
    }

    #[test]
    fn test_load_chunk_is_idempotent() {
        let mut visuals = NullVisuals::new();
        let mut streamer = WorldStreamer::new(StreamingConfig::default());
        let key = ChunkKey::new(7, 7);
        assert!(streamer.load_chunk(key, &[], &mut visuals));
        assert!(!streamer.load_chunk(key, &[], &mut visuals));
        assert_eq!(streamer.chunk(key).unwrap().key(), key);
    }
}
