//! Room generation and movement configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Interior pillar settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillarConfig {
    /// Fewest pillars per room
    pub min_count: u32,
    /// Most pillars per room
    pub max_count: u32,
    /// Minimum distance in blocks from any room edge
    pub margin: i32,
    /// Shortest pillar in blocks
    pub min_height: i32,
    /// Tallest pillar in blocks
    pub max_height: i32,
    /// Chance of a platform block beside the pillar top
    pub platform_chance: f64,
    /// Chance of a second platform block, rolled only when the first is placed
    pub second_platform_chance: f64,
}

impl Default for PillarConfig {
    fn default() -> Self {
        Self {
            min_count: 6,
            max_count: 11,
            margin: 2,
            min_height: 2,
            max_height: 4,
            platform_chance: 0.5,
            second_platform_chance: 0.5,
        }
    }
}

/// Torch (point light) markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorchConfig {
    pub count: u32,
    /// Block layer the torch sits in
    pub height: i32,
    /// Minimum distance in blocks from the side walls
    pub margin: i32,
}

impl Default for TorchConfig {
    fn default() -> Self {
        Self {
            count: 4,
            height: 3,
            margin: 2,
        }
    }
}

/// Portal frame, trigger and spawn settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Block layer of the lowest frame block
    pub frame_base: i32,
    /// Frame column height in blocks (capstone sits on top)
    pub frame_height: i32,
    /// Offset of the core marker from the anchor cell's min corner
    pub core_offset: Vec3,
    /// Distance below which the player traverses the portal
    pub trigger_radius: f32,
    /// How far from the portal, away from its wall, the player spawns
    pub spawn_offset: f32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            frame_base: 1,
            frame_height: 3,
            core_offset: Vec3::new(0.5, 1.6, 0.5),
            trigger_radius: 1.6,
            spawn_offset: 4.5,
        }
    }
}

/// Room generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Smallest width/depth in blocks
    pub min_extent: i32,
    /// Largest width/depth in blocks
    pub max_extent: i32,
    /// Room height in blocks; walls fill `1..height`
    pub height: i32,
    pub pillars: PillarConfig,
    pub torches: TorchConfig,
    pub portal: PortalConfig,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            min_extent: 18,
            max_extent: 23,
            height: 6,
            pillars: PillarConfig::default(),
            torches: TorchConfig::default(),
            portal: PortalConfig::default(),
        }
    }
}

impl RoomConfig {
    /// Check that every room this config can produce is well formed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_extent > self.max_extent {
            return Err(ConfigError::EmptyExtentRange {
                min: self.min_extent,
                max: self.max_extent,
            });
        }

        let p = &self.pillars;
        if p.margin < 1 || self.min_extent < 2 * p.margin + 1 {
            return Err(ConfigError::NoInterior {
                extent: self.min_extent,
                margin: p.margin,
            });
        }
        let t = &self.torches;
        if t.margin < 1 || self.min_extent < 2 * t.margin + 1 {
            return Err(ConfigError::NoInterior {
                extent: self.min_extent,
                margin: t.margin,
            });
        }
        if p.min_count > p.max_count {
            return Err(ConfigError::InvalidValue {
                name: "pillar count range",
                value: p.min_count as f64,
            });
        }
        if p.min_height < 1 || p.min_height > p.max_height {
            return Err(ConfigError::InvalidValue {
                name: "pillar height range",
                value: p.min_height as f64,
            });
        }
        for (name, chance) in [
            ("platform chance", p.platform_chance),
            ("second platform chance", p.second_platform_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::InvalidValue { name, value: chance });
            }
        }

        let portal = &self.portal;
        if portal.frame_base < 1 || portal.frame_height < 1 {
            return Err(ConfigError::InvalidValue {
                name: "portal frame",
                value: portal.frame_height as f64,
            });
        }
        // Capstone, torches and platforms must all stay below the ceiling
        for top in [
            portal.frame_base + portal.frame_height,
            t.height,
            p.max_height + 1,
        ] {
            if top >= self.height {
                return Err(ConfigError::TooShort {
                    height: self.height,
                    top,
                });
            }
        }
        if !(portal.trigger_radius > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "portal trigger radius",
                value: portal.trigger_radius as f64,
            });
        }
        if portal.spawn_offset - portal.core_offset.z.max(portal.core_offset.x)
            <= portal.trigger_radius
        {
            return Err(ConfigError::SpawnInsideTrigger {
                offset: portal.spawn_offset,
                radius: portal.trigger_radius,
            });
        }
        Ok(())
    }
}

/// Bounds used before any room has been generated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackBounds {
    pub width: i32,
    pub depth: i32,
}

/// Movement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in meters per second
    pub speed: f32,
    /// Inset from the room edge the player can never cross
    pub pad: f32,
    /// Fixed camera height; there is no jumping or gravity
    pub eye_height: f32,
    pub fallback_bounds: FallbackBounds,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 2.9,
            pad: 1.2,
            eye_height: 1.6,
            fallback_bounds: FallbackBounds {
                width: 30,
                depth: 30,
            },
        }
    }
}

impl MovementConfig {
    /// Check the walkable box is non-empty for the smallest room `rooms` can produce
    pub fn validate(&self, rooms: &RoomConfig) -> Result<(), ConfigError> {
        if !(self.speed >= 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "movement speed",
                value: self.speed as f64,
            });
        }
        if !(self.eye_height > 0.0) || self.eye_height >= rooms.height as f32 {
            return Err(ConfigError::InvalidValue {
                name: "eye height",
                value: self.eye_height as f64,
            });
        }
        let smallest = rooms
            .min_extent
            .min(self.fallback_bounds.width)
            .min(self.fallback_bounds.depth);
        if !(self.pad > 0.0) || 2.0 * self.pad >= smallest as f32 {
            return Err(ConfigError::PadTooLarge {
                pad: self.pad,
                extent: smallest,
            });
        }
        Ok(())
    }
}
