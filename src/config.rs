//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PADDOCK_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use paddock_core::SimConfig;
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulation tuning handed to the core
    #[serde(default)]
    pub simulation: SimConfig,
    /// Ranch layout to load
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Frame timing
    #[serde(default)]
    pub clock: ClockConfig,
    /// Headless run settings
    #[serde(default)]
    pub run: RunConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`PADDOCK_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional local overrides
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // PADDOCK_SIMULATION__PLAYER__SPEED=250 -> simulation.player.speed = 250
        figment = figment.merge(Env::prefixed("PADDOCK_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Path to the RON layout file
    pub path: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            path: "layouts/ranch.ron".to_string(),
        }
    }
}

/// Frame timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Longest frame simulated in one tick (seconds)
    pub max_frame_dt: f32,
    /// Fixed tick length; when unset the wall clock is measured
    pub fixed_dt: Option<f32>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: 0.25,
            fixed_dt: None,
        }
    }
}

/// Headless run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of ticks to simulate
    pub ticks: u64,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Log a status line every this many ticks (0 = never)
    pub report_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 3600,
            autopilot: true,
            report_every: 600,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
