//! Creatures
//!
//! A creature wanders inside its home zone, picking a new random heading
//! every few seconds, and hops while it moves. Damage tints it red for a
//! short deadline; once health reaches zero it is dead for good and its
//! visual is gone.

use std::f32::consts::TAU;
use paddock_math::{Rect, Vec2};
use rand::Rng;
use serde::{Serialize, Deserialize};
use slotmap::new_key_type;
use crate::config::{CreatureConfig, KindStats};
use crate::visual::{Tint, VisualHandle, VisualSink};
use crate::zone::ZoneId;

new_key_type! {
    /// Key to a creature in the herd
    pub struct CreatureKey;
}

/// Creature species
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    /// Fast, fragile, side-facing sprite (the first zone's kind)
    Small,
    /// Slow and sturdy (every later zone's kind)
    Large,
}

impl CreatureKind {
    /// Kind spawned in the zone at `index`
    pub fn for_zone_index(index: usize) -> Self {
        if index == 0 {
            CreatureKind::Small
        } else {
            CreatureKind::Large
        }
    }

    /// Whether the sprite is mirrored to face its heading
    pub fn faces_sideways(&self) -> bool {
        matches!(self, CreatureKind::Small)
    }

    /// Stats for this kind
    pub fn stats<'a>(&self, config: &'a CreatureConfig) -> &'a KindStats {
        match self {
            CreatureKind::Small => &config.small,
            CreatureKind::Large => &config.large,
        }
    }
}

/// Result of applying damage to a creature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Still alive (possibly flashing)
    Survived,
    /// Health reached zero on this hit
    Died,
    /// Was already dead, nothing changed
    AlreadyDead,
}

/// A wandering creature
#[derive(Clone, Debug)]
pub struct Creature {
    /// Species
    pub kind: CreatureKind,
    /// Centre of the footprint
    pub position: Vec2,
    /// Half of the footprint size
    pub half_extent: Vec2,
    /// Wander speed (units per second)
    pub speed: f32,
    /// Remaining health
    pub health: f32,
    /// Value of the resource dropped on death
    pub drop_value: u64,
    /// Zone this creature was spawned in and is confined to
    pub home: ZoneId,
    hop_base: f32,
    alive: bool,
    direction: Vec2,
    reroll_timer: f32,
    flash_until: Option<f32>,
    visual: Option<VisualHandle>,
}

impl Creature {
    /// Create a live creature of `kind` with the configured stats
    pub fn new(kind: CreatureKind, config: &CreatureConfig, position: Vec2, home: ZoneId) -> Self {
        let stats = kind.stats(config);
        Self {
            kind,
            position,
            half_extent: Vec2::from(config.half_extent),
            speed: stats.speed,
            health: stats.health,
            drop_value: stats.drop_value,
            home,
            hop_base: stats.hop_base,
            alive: true,
            direction: Vec2::ZERO,
            reroll_timer: 0.0,
            flash_until: None,
            visual: None,
        }
    }

    /// Attach the visual representing this creature
    pub fn with_visual(mut self, visual: VisualHandle) -> Self {
        self.visual = Some(visual);
        self
    }

    /// Check if the creature is alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Current wander heading (unit length once the first re-roll happened)
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Seconds until the next heading change
    #[inline]
    pub fn reroll_timer(&self) -> f32 {
        self.reroll_timer
    }

    /// Check if the damage tint is showing
    #[inline]
    pub fn is_flashing(&self) -> bool {
        self.flash_until.is_some()
    }

    /// Visual handle, while alive
    #[inline]
    pub fn visual(&self) -> Option<VisualHandle> {
        self.visual
    }

    /// Axis-aligned footprint
    pub fn footprint(&self) -> Rect {
        Rect::from_center_half_extents(self.position, self.half_extent)
    }

    /// Area the centre may occupy inside `zone`
    pub fn wander_bounds(&self, zone: &Rect, padding: f32) -> Rect {
        zone.inset(self.half_extent + Vec2::new(padding, padding))
    }

    /// Advance wandering by `dt`
    ///
    /// Re-rolls the heading when the timer runs out, integrates movement,
    /// clamps to the home zone and pushes the hopping position to the sink.
    /// An expired damage flash is cleared here.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        zone: &Rect,
        dt: f32,
        clock: f32,
        config: &CreatureConfig,
        rng: &mut R,
        visuals: &mut dyn VisualSink,
    ) {
        if !self.alive {
            return;
        }

        self.reroll_timer -= dt;
        if self.reroll_timer <= 0.0 {
            self.reroll_timer = if config.reroll_max > config.reroll_min {
                rng.gen_range(config.reroll_min..config.reroll_max)
            } else {
                config.reroll_min
            };
            self.direction = Vec2::from_angle(rng.gen::<f32>() * TAU);
            if self.kind.faces_sideways() {
                if let Some(visual) = self.visual {
                    visuals.flip_visual_facing(visual, self.direction.x < 0.0);
                }
            }
        }

        let moved = self.position + self.direction * (self.speed * dt);
        self.position = self.wander_bounds(zone, config.padding).clamp_point(moved);

        if let Some(visual) = self.visual {
            let hop = (clock * config.hop_rate).sin().abs() * config.hop_height;
            visuals.set_visual_position(visual, self.position, self.hop_base + hop);
        }

        if let Some(deadline) = self.flash_until {
            if clock >= deadline {
                self.flash_until = None;
                if let Some(visual) = self.visual {
                    visuals.set_visual_tint(visual, Tint::WHITE);
                }
            }
        }
    }

    /// Subtract `amount` health
    ///
    /// On death the visual is despawned. A surviving creature flashes red
    /// until `clock + flash_duration` unless it is already flashing.
    pub fn apply_damage(
        &mut self,
        amount: f32,
        clock: f32,
        flash_duration: f32,
        visuals: &mut dyn VisualSink,
    ) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::AlreadyDead;
        }

        self.health -= amount;
        if self.health <= 0.0 {
            self.alive = false;
            self.flash_until = None;
            if let Some(visual) = self.visual.take() {
                visuals.despawn_visual(visual);
            }
            return DamageOutcome::Died;
        }

        if self.flash_until.is_none() {
            self.flash_until = Some(clock + flash_duration);
            if let Some(visual) = self.visual {
                visuals.set_visual_tint(visual, Tint::RED);
            }
        }
        DamageOutcome::Survived
    }
}
