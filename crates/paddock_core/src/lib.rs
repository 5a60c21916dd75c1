//! Simulation core for the Paddock ranch game
//!
//! This crate owns every rule of the game and none of its presentation:
//!
//! - [`WorldStreamer`] - Deterministic chunk streaming with tree decorations
//! - [`Herd`] / [`Creature`] - Spawning, wandering and damage of creatures
//! - [`interaction`] - The per-tick passes between player, creatures and stations
//! - [`EconomyLedger`] - Coins, carried-meat mirror and upgrade levels
//! - [`RanchWorld`] - The aggregate that owns all state and runs [`RanchWorld::tick`]
//! - [`RanchLayout`] - Loadable/saveable static description of a ranch
//! - [`VisualSink`] - The presentation collaborator every side effect goes through

mod config;
mod creature;
mod economy;
mod herd;
mod input;
mod layout;
mod obstacle;
mod player;
mod resource;
mod simulation;
mod station;
mod streaming;
mod visual;
mod world;
mod zone;

pub mod interaction;
pub mod upgrade;

pub use config::{SimConfig, StreamingConfig, CreatureConfig, KindStats, EconomyConfig, PlayerConfig};
pub use creature::{Creature, CreatureKey, CreatureKind, DamageOutcome};
pub use economy::{EconomyLedger, UpgradeKind, CounterMirror, MirrorError, LedgerSnapshot};
pub use herd::Herd;
pub use input::InputFrame;
pub use interaction::{InteractionReport, ResourceMap};
pub use layout::{RanchLayout, ZoneTemplate, StationTemplate, LayoutLoadError, LayoutSaveError};
pub use obstacle::HasWorldPosition;
pub use player::Player;
pub use resource::{Resource, ResourceKey};
pub use simulation::{TickEvents, TickReport};
pub use station::{UpgradePad, ToggleLever, LeverAction, SellWorkbench};
pub use streaming::{ChunkKey, Chunk, Decoration, WorldStreamer};
pub use visual::{VisualSink, VisualHandle, VisualKind, Tint, NullVisuals, RecordingVisuals, VisualCall};
pub use world::{RanchWorld, SimClock};
pub use zone::{HazardZone, ZoneId, ZoneSet};

// Re-export math types for convenience
pub use paddock_math::{Vec2, Rect};
