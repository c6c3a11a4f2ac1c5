//! Settings loading
//!
//! Settings are read from `~/.config/delve/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use delve_core::TimeConfig;
use delve_game::LookConfig;
use delve_world::{MovementConfig, RoomConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub room: RoomConfig,
    pub movement: MovementConfig,
    pub look: LookConfig,
    pub time: TimeConfig,
    pub demo: DemoSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("delve"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load settings from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }
}

/// Headless auto-walk run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// How many portals to walk through before exiting
    pub rooms_to_traverse: u32,
    /// Seed for repeatable layouts; unseeded when absent
    pub seed: Option<u64>,
    /// Give up on a room after this many frames
    pub max_frames_per_room: u32,
    /// Simulated frame delta in seconds
    pub frame_dt: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            rooms_to_traverse: 5,
            seed: None,
            max_frames_per_room: 5_000,
            frame_dt: 1.0 / 60.0,
        }
    }
}
