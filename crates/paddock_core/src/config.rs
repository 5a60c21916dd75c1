//! Simulation tuning
//!
//! Every constant the simulation depends on lives here so it can be
//! overridden from the application's layered configuration. All structs
//! default field-by-field, so a partial override only touches the named keys.

use serde::{Serialize, Deserialize};

/// Top-level tuning for a ranch simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for spawning and wandering (None = seed from OS entropy)
    pub seed: Option<u64>,
    /// Chunk streaming and decoration placement
    pub world: StreamingConfig,
    /// Creature stats and behaviour
    pub creatures: CreatureConfig,
    /// Prices, cooldowns and interaction radii
    pub economy: EconomyConfig,
    /// Player movement and carrying
    pub player: PlayerConfig,
}

/// Chunk streaming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Edge length of a square chunk in world units
    pub chunk_size: f32,
    /// Candidate decoration slots evaluated per chunk
    pub decorations_per_chunk: u32,
    /// No decoration closer than this to the world origin
    pub safe_radius: f32,
    /// No decoration closer than this to any obstacle
    pub obstacle_clearance: f32,
    /// Smallest decoration size
    pub decoration_min_size: f32,
    /// Extra size added on top of the minimum, scaled by a hash value
    pub decoration_size_jitter: f32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000.0,
            decorations_per_chunk: 10,
            safe_radius: 500.0,
            obstacle_clearance: 200.0,
            decoration_min_size: 80.0,
            decoration_size_jitter: 40.0,
        }
    }
}

/// Per-kind creature stats
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KindStats {
    /// Wander speed (units per second)
    pub speed: f32,
    /// Starting health
    pub health: f32,
    /// Currency value of the resource dropped on death
    pub drop_value: u64,
    /// Resting height of the hop animation
    pub hop_base: f32,
}

/// Creature configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    /// Stats for the kind spawned in the first zone
    pub small: KindStats,
    /// Stats for the kind spawned in every later zone
    pub large: KindStats,
    /// Half of the creature footprint [x, y]
    pub half_extent: [f32; 2],
    /// Distance creatures keep from their zone's edges
    pub padding: f32,
    /// Shortest time between wander direction changes
    pub reroll_min: f32,
    /// Longest time between wander direction changes
    pub reroll_max: f32,
    /// How long the damage tint stays on
    pub flash_duration: f32,
    /// Peak height of the hop animation above its base
    pub hop_height: f32,
    /// Hop frequency (radians per second)
    pub hop_rate: f32,
    /// Seconds between spawn attempts before any upgrade
    pub spawn_interval: f32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            small: KindStats {
                speed: 50.0,
                health: 100.0,
                drop_value: 5,
                hop_base: 15.0,
            },
            large: KindStats {
                speed: 30.0,
                health: 200.0,
                drop_value: 10,
                hop_base: 10.0,
            },
            half_extent: [10.0, 10.0],
            padding: 10.0,
            reroll_min: 1.0,
            reroll_max: 3.0,
            flash_duration: 0.1,
            hop_height: 5.0,
            hop_rate: 10.0,
            spawn_interval: 3.0,
        }
    }
}

/// Economy and interaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Pad cost multiplier applied after each purchase (result is floored)
    pub pad_cost_multiplier: f64,
    /// Seconds a pad refuses purchases after a sale
    pub pad_cooldown: f32,
    /// Edge length of the square pad footprint
    pub pad_size: f32,
    /// Seconds a lever ignores interaction after a toggle
    pub lever_cooldown: f32,
    /// Player reach for levers
    pub lever_radius: f32,
    /// Player reach for resources on the ground
    pub pickup_radius: f32,
    /// Player reach for the sell workbench
    pub sell_radius: f32,
    /// Hazard damage multiplier per damage upgrade
    pub damage_multiplier: f32,
    /// Spawn interval multiplier per spawn-rate upgrade
    pub spawn_interval_factor: f32,
    /// Spawn interval never drops below this
    pub min_spawn_interval: f32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            pad_cost_multiplier: 1.5,
            pad_cooldown: 1.0,
            pad_size: 120.0,
            lever_cooldown: 0.5,
            lever_radius: 50.0,
            pickup_radius: 30.0,
            sell_radius: 50.0,
            damage_multiplier: 1.5,
            spawn_interval_factor: 0.8,
            min_spawn_interval: 0.5,
        }
    }
}

/// Player configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walk speed (units per second)
    pub speed: f32,
    /// Resources the player can carry at once
    pub capacity: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 200.0,
            capacity: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert!(config.seed.is_none());
        assert_eq!(config.world.chunk_size, 1000.0);
        assert_eq!(config.world.decorations_per_chunk, 10);
        assert_eq!(config.creatures.small.health, 100.0);
        assert_eq!(config.creatures.large.speed, 30.0);
        assert_eq!(config.economy.pad_cost_multiplier, 1.5);
        assert_eq!(config.player.capacity, 10);
    }

    #[test]
    fn test_partial_ron_override() {
        let config: SimConfig = ron::from_str("(seed: Some(7), player: (capacity: 3))").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.player.capacity, 3);
        // Untouched keys keep their defaults
        assert_eq!(config.player.speed, 200.0);
        assert_eq!(config.economy.pad_cooldown, 1.0);
    }
}
