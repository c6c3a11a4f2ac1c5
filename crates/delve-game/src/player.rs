//! Player state and look accumulation

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Look sensitivity and pitch limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians of yaw per pixel of horizontal drag
    pub yaw_sensitivity: f32,
    /// Radians of pitch per pixel of vertical drag
    pub pitch_sensitivity: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`
    pub pitch_limit: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            yaw_sensitivity: 0.0042,
            pitch_sensitivity: 0.0035,
            pitch_limit: 1.2,
        }
    }
}

/// Session-owned player state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Eye position in room space
    pub position: Vec3,
    /// Horizontal look angle in radians
    pub yaw: f32,
    /// Vertical look angle in radians
    pub pitch: f32,
    /// Counts up by one on every portal traversal, starting at 1
    pub room_index: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 4.0),
            yaw: 0.0,
            pitch: 0.0,
            room_index: 1,
        }
    }
}

impl PlayerState {
    /// HUD label for the current room
    pub fn room_label(&self) -> String {
        format!("Room {}", self.room_index)
    }

    /// Place the player at a spawn point looking straight ahead
    pub fn respawn(&mut self, spawn: Vec3) {
        self.position = spawn;
        self.yaw = 0.0;
        self.pitch = 0.0;
    }

    /// Accumulate a drag of `(dx, dy)` pixels into yaw and pitch
    pub fn apply_look(&mut self, dx: f32, dy: f32, config: &LookConfig) {
        self.yaw -= dx * config.yaw_sensitivity;
        self.pitch = (self.pitch - dy * config.pitch_sensitivity)
            .clamp(-config.pitch_limit, config.pitch_limit);
    }
}
