//! Core types used throughout Delve

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Integer position of a unit cube in room space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelCell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCell {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// World-space center of this cell
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        )
    }

    /// The cell containing a world position
    pub fn from_world_pos(pos: Vec3) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
            z: pos.z.floor() as i32,
        }
    }

    /// Offset by the given deltas
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl From<IVec3> for VoxelCell {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<VoxelCell> for IVec3 {
    fn from(cell: VoxelCell) -> Self {
        IVec3::new(cell.x, cell.y, cell.z)
    }
}

/// What a solid cell is for. Only affects how a renderer draws it;
/// collision only looks at occupancy. The portal core is not a cell; see
/// `RoomDescription::portal_marker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellRole {
    Floor,
    Wall,
    Platform,
    PortalFrame,
}
