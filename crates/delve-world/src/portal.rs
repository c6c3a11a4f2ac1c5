//! Portal placement
//!
//! Every room has exactly one portal set against one of four walls. The frame
//! is solid; the core is a marker the player is distance-tested against.

use delve_core::{CellRole, VoxelCell};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::PortalConfig;

/// Which wall the portal stands against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorSide {
    /// z pinned to 1, centered on x
    North,
    /// z pinned to depth - 2, centered on x
    South,
    /// x pinned to 1, centered on z
    West,
    /// x pinned to width - 2, centered on z
    East,
}

impl DoorSide {
    pub const ALL: [DoorSide; 4] = [
        DoorSide::North,
        DoorSide::South,
        DoorSide::West,
        DoorSide::East,
    ];

    /// Side from its 0..=3 draw index
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index as usize).min(3)]
    }

    pub fn index(&self) -> u32 {
        match self {
            DoorSide::North => 0,
            DoorSide::South => 1,
            DoorSide::West => 2,
            DoorSide::East => 3,
        }
    }

    /// Anchor column (x, z) of the portal in a `width` x `depth` room
    pub fn anchor(&self, width: i32, depth: i32) -> (i32, i32) {
        match self {
            DoorSide::North => (width / 2, 1),
            DoorSide::South => (width / 2, depth - 2),
            DoorSide::West => (1, depth / 2),
            DoorSide::East => (width - 2, depth / 2),
        }
    }

    /// Unit step on the floor plane pointing away from the portal's wall
    pub fn inward(&self) -> (f32, f32) {
        match self {
            DoorSide::North => (0.0, 1.0),
            DoorSide::South => (0.0, -1.0),
            DoorSide::West => (1.0, 0.0),
            DoorSide::East => (-1.0, 0.0),
        }
    }
}

/// The single traversal trigger of a room
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub side: DoorSide,
    /// Cell at the base of the opening, between the frame columns
    pub anchor: VoxelCell,
    /// Center of the portal core
    pub marker: Vec3,
}

impl Portal {
    /// Place a portal against `side` of a `width` x `depth` room
    pub fn place(side: DoorSide, width: i32, depth: i32, config: &PortalConfig) -> Self {
        let (x, z) = side.anchor(width, depth);
        let anchor = VoxelCell::new(x, config.frame_base, z);
        let marker = Vec3::new(x as f32, config.frame_base as f32, z as f32) + config.core_offset;
        Self {
            side,
            anchor,
            marker,
        }
    }

    /// Solid frame blocks: two columns flanking the anchor along x, plus a capstone
    pub fn frame_cells(&self, config: &PortalConfig) -> Vec<(VoxelCell, CellRole)> {
        let mut cells = Vec::with_capacity(config.frame_height as usize * 2 + 1);
        for dy in 0..config.frame_height {
            cells.push((self.anchor.offset(-1, dy, 0), CellRole::PortalFrame));
            cells.push((self.anchor.offset(1, dy, 0), CellRole::PortalFrame));
        }
        cells.push((
            self.anchor.offset(0, config.frame_height, 0),
            CellRole::PortalFrame,
        ));
        cells
    }

    /// Where the player arrives, `spawn_offset` out from the portal at eye height
    pub fn spawn_point(&self, config: &PortalConfig, eye_height: f32) -> Vec3 {
        let (ix, iz) = self.side.inward();
        // Offset axis starts from the cell's min corner, the other axis from its center
        let x = self.anchor.x as f32 + if ix == 0.0 { 0.5 } else { ix * config.spawn_offset };
        let z = self.anchor.z as f32 + if iz == 0.0 { 0.5 } else { iz * config.spawn_offset };
        Vec3::new(x, eye_height, z)
    }

    /// Whether `pos` is close enough to the core to traverse
    pub fn is_within(&self, pos: Vec3, radius: f32) -> bool {
        self.marker.distance(pos) < radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_side_round_trip() {
        for (i, side) in DoorSide::ALL.iter().enumerate() {
            assert_eq!(DoorSide::from_index(i as u32), *side);
            assert_eq!(side.index(), i as u32);
        }
    }

    #[test]
    fn test_anchor_formulas() {
        assert_eq!(DoorSide::North.anchor(19, 22), (9, 1));
        assert_eq!(DoorSide::South.anchor(19, 22), (9, 20));
        assert_eq!(DoorSide::West.anchor(19, 22), (1, 11));
        assert_eq!(DoorSide::East.anchor(19, 22), (17, 11));
    }

    #[test]
    fn test_spawn_points() {
        let config = PortalConfig::default();
        let north = Portal::place(DoorSide::North, 18, 18, &config);
        assert_eq!(north.spawn_point(&config, 1.6), Vec3::new(9.5, 1.6, 5.5));

        let south = Portal::place(DoorSide::South, 18, 20, &config);
        assert_eq!(south.spawn_point(&config, 1.6), Vec3::new(9.5, 1.6, 13.5));

        let west = Portal::place(DoorSide::West, 21, 21, &config);
        assert_eq!(west.spawn_point(&config, 1.6), Vec3::new(5.5, 1.6, 10.5));

        let east = Portal::place(DoorSide::East, 23, 23, &config);
        assert_eq!(east.spawn_point(&config, 1.6), Vec3::new(16.5, 1.6, 11.5));
    }

    #[test]
    fn test_marker_position() {
        let config = PortalConfig::default();
        let portal = Portal::place(DoorSide::North, 18, 18, &config);
        assert_eq!(portal.anchor, VoxelCell::new(9, 1, 1));
        assert!((portal.marker - Vec3::new(9.5, 2.6, 1.5)).length() < 1e-5);
    }

    #[test]
    fn test_frame_cells() {
        let config = PortalConfig::default();
        let portal = Portal::place(DoorSide::West, 20, 20, &config);
        let cells: Vec<VoxelCell> = portal
            .frame_cells(&config)
            .into_iter()
            .map(|(cell, _)| cell)
            .collect();
        assert_eq!(cells.len(), 7);
        assert!(cells.contains(&VoxelCell::new(0, 1, 10)));
        assert!(cells.contains(&VoxelCell::new(2, 3, 10)));
        assert!(cells.contains(&VoxelCell::new(1, 4, 10)));
        assert!(!cells.contains(&portal.anchor));
    }

    #[test]
    fn test_is_within() {
        let config = PortalConfig::default();
        let portal = Portal::place(DoorSide::East, 20, 20, &config);
        assert!(portal.is_within(portal.marker, 1.6));
        assert!(!portal.is_within(portal.marker + Vec3::new(1.0, 0.0, 1.3), 1.6));
    }
}
