//! Ranch layouts
//!
//! A layout is the static part of a ranch: where the player starts, the
//! hazard zones (unlocked and locked), the upgrade stations with their
//! levers, the hazard switch and the sell workbench. Layouts are stored as
//! RON and instantiated into a [`RanchWorld`](crate::RanchWorld).

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use std::io;

use paddock_math::{Rect, Vec2};
use crate::economy::UpgradeKind;
use crate::zone::HazardZone;

fn default_base_cap() -> u32 {
    10
}

fn default_lever_offset() -> [f32; 2] {
    [40.0, 0.0]
}

/// A hazard zone as stored in a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneTemplate {
    /// Top-left corner [x, y]
    pub corner: [f32; 2],
    /// Size [width, height]
    pub size: [f32; 2],
    /// Damage per second before upgrades
    pub damage_per_second: f32,
    /// Per-zone spawn cap before scaling
    #[serde(default = "default_base_cap")]
    pub base_cap: u32,
}

impl ZoneTemplate {
    /// Build the runtime zone
    pub fn to_zone(&self) -> HazardZone {
        let rect = Rect::from_corner_size(self.corner[0], self.corner[1], self.size[0], self.size[1]);
        HazardZone::new(rect, self.damage_per_second, self.base_cap)
    }
}

/// An upgrade station: a pad plus a purchase lever next to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationTemplate {
    /// Display label
    pub label: String,
    /// Upgrade track sold here
    pub kind: UpgradeKind,
    /// Pad centre [x, y]
    pub position: [f32; 2],
    /// Starting price (the pad's price grows, the lever's does not)
    pub cost: u64,
    /// Lever position relative to the pad
    #[serde(default = "default_lever_offset")]
    pub lever_offset: [f32; 2],
}

impl StationTemplate {
    /// Pad centre
    pub fn pad_position(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    /// Lever position
    pub fn lever_position(&self) -> Vec2 {
        self.pad_position() + Vec2::from(self.lever_offset)
    }
}

/// Static description of a ranch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RanchLayout {
    /// Layout name (for display/debugging)
    pub name: String,
    /// Player start [x, y]
    #[serde(default)]
    pub player_spawn: [f32; 2],
    /// Zones unlocked from the start, in id order
    pub zones: Vec<ZoneTemplate>,
    /// Zones unlocked one at a time by the area upgrade
    #[serde(default)]
    pub locked_zones: Vec<ZoneTemplate>,
    /// Upgrade stations
    #[serde(default)]
    pub stations: Vec<StationTemplate>,
    /// Position of the lever that switches hazards on and off
    #[serde(default)]
    pub hazard_lever: Option<[f32; 2]>,
    /// Sell workbench position [x, y]
    pub workbench: [f32; 2],
}

impl RanchLayout {
    /// The default ranch: one chicken pen, one locked cow pen, three stations
    pub fn classic() -> Self {
        Self {
            name: "Classic Ranch".to_string(),
            player_spawn: [100.0, 100.0],
            zones: vec![ZoneTemplate {
                corner: [300.0, 200.0],
                size: [200.0, 200.0],
                damage_per_second: 50.0,
                base_cap: 10,
            }],
            locked_zones: vec![ZoneTemplate {
                corner: [700.0, 200.0],
                size: [200.0, 200.0],
                damage_per_second: 50.0,
                base_cap: 10,
            }],
            stations: vec![
                StationTemplate {
                    label: "Spikes".to_string(),
                    kind: UpgradeKind::HazardDamage,
                    position: [200.0, 600.0],
                    cost: 10,
                    lever_offset: default_lever_offset(),
                },
                StationTemplate {
                    label: "Chickens".to_string(),
                    kind: UpgradeKind::SpawnRate,
                    position: [400.0, 600.0],
                    cost: 25,
                    lever_offset: default_lever_offset(),
                },
                StationTemplate {
                    label: "Expand".to_string(),
                    kind: UpgradeKind::ZoneArea,
                    position: [600.0, 600.0],
                    cost: 1000,
                    lever_offset: default_lever_offset(),
                },
            ],
            hazard_lever: Some([250.0, 450.0]),
            workbench: [850.0, 150.0],
        }
    }

    /// Load a layout from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LayoutLoadError> {
        let contents = fs::read_to_string(path)?;
        let layout = ron::from_str(&contents)?;
        Ok(layout)
    }

    /// Save a layout to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LayoutSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for RanchLayout {
    fn default() -> Self {
        Self::classic()
    }
}

/// Error loading a layout
#[derive(Debug)]
pub enum LayoutLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax or shape)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for LayoutLoadError {
    fn from(e: io::Error) -> Self {
        LayoutLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LayoutLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        LayoutLoadError::Parse(e)
    }
}

impl std::fmt::Display for LayoutLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutLoadError::Io(e) => write!(f, "Layout IO error: {}", e),
            LayoutLoadError::Parse(e) => write!(f, "Layout parse error: {}", e),
        }
    }
}

impl std::error::Error for LayoutLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutLoadError::Io(e) => Some(e),
            LayoutLoadError::Parse(e) => Some(e),
        }
    }
}

/// Error saving a layout
#[derive(Debug)]
pub enum LayoutSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for LayoutSaveError {
    fn from(e: io::Error) -> Self {
        LayoutSaveError::Io(e)
    }
}

impl From<ron::Error> for LayoutSaveError {
    fn from(e: ron::Error) -> Self {
        LayoutSaveError::Serialize(e)
    }
}

impl std::fmt::Display for LayoutSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutSaveError::Io(e) => write!(f, "Layout IO error: {}", e),
            LayoutSaveError::Serialize(e) => write!(f, "Layout serialize error: {}", e),
        }
    }
}

impl std::error::Error for LayoutSaveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_layout() {
        let layout = RanchLayout::classic();
        assert_eq!(layout.zones.len(), 1);
        assert_eq!(layout.locked_zones.len(), 1);
        assert_eq!(layout.stations.len(), 3);
        assert_eq!(layout.stations[2].cost, 1000);
        assert_eq!(layout.stations[0].lever_position(), Vec2::new(240.0, 600.0));
    }

    #[test]
    fn test_zone_template() {
        let zone = RanchLayout::classic().zones[0].to_zone();
        assert_eq!(zone.rect, Rect::from_corner_size(300.0, 200.0, 200.0, 200.0));
        assert!(zone.active);
        assert_eq!(zone.base_cap, 10);
    }

    #[test]
    fn test_parse_layout_file_format() {
        let ron_str = r#"
            RanchLayout(
                name: "Tiny",
                zones: [
                    ZoneTemplate(corner: (0.0, 0.0), size: (100.0, 100.0), damage_per_second: 20.0),
                ],
                stations: [
                    StationTemplate(label: "Spikes", kind: HazardDamage, position: (0.0, 300.0), cost: 5),
                ],
                workbench: (400.0, 0.0),
            )
        "#;
        let layout: RanchLayout = ron::from_str(ron_str).unwrap();
        assert_eq!(layout.name, "Tiny");
        assert_eq!(layout.zones[0].base_cap, 10);
        assert_eq!(layout.stations[0].lever_offset, [40.0, 0.0]);
        assert!(layout.locked_zones.is_empty());
        assert!(layout.hazard_lever.is_none());
        assert_eq!(layout.player_spawn, [0.0, 0.0]);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("paddock_layout_{}.ron", std::process::id()));
        let layout = RanchLayout::classic();
        layout.save(&path).unwrap();
        let loaded = RanchLayout::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, layout);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RanchLayout::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, LayoutLoadError::Io(_)));
        assert!(format!("{}", err).contains("IO error"));
    }

    #[test]
    fn test_load_error_display() {
        let err = ron::from_str::<RanchLayout>("RanchLayout(").unwrap_err();
        let msg = format!("{}", LayoutLoadError::from(err));
        assert!(msg.contains("parse error"));
    }
}
