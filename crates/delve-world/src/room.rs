//! Procedurally generated voxel rooms
//!
//! A [`RoomWorld`] holds exactly one active room at a time. Generating a new
//! room throws away every cell of the previous one; there is no loading state
//! and no incremental update. Collision is a soft inset box over the room
//! extents rather than a per-voxel test.

use std::collections::BTreeMap;

use delve_core::{CellRole, RoomRng, VoxelCell};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{MovementConfig, RoomConfig};
use crate::error::ConfigError;
use crate::portal::{DoorSide, Portal};

/// Extents of a room in whole blocks, fixed for the room's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomBounds {
    pub width: i32,
    pub depth: i32,
    pub height: i32,
}

impl RoomBounds {
    /// Whether `cell` lies inside the perimeter walls, above the floor
    pub fn is_interior(&self, cell: VoxelCell) -> bool {
        cell.x > 0
            && cell.x < self.width - 1
            && cell.z > 0
            && cell.z < self.depth - 1
            && cell.y > 0
            && cell.y < self.height
    }
}

/// A solid cell and what it is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCell {
    pub cell: VoxelCell,
    pub role: CellRole,
}

/// Everything a host needs to draw and run a freshly generated room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDescription {
    /// Label index of the room; does not influence generation
    pub index: u32,
    /// Solid cells, ordered by position
    pub cells: Vec<PlacedCell>,
    pub bounds: RoomBounds,
    /// Player start, at eye height
    pub spawn: Vec3,
    /// Center of the portal core
    pub portal_marker: Vec3,
    pub door_side: DoorSide,
    /// Point-light positions along the two z-walls
    pub torches: Vec<Vec3>,
}

/// The active room: occupancy, bounds and its one portal
pub struct RoomWorld {
    config: RoomConfig,
    movement: MovementConfig,
    occupancy: BTreeMap<VoxelCell, CellRole>,
    bounds: Option<RoomBounds>,
    portal: Option<Portal>,
    torches: Vec<Vec3>,
}

impl RoomWorld {
    /// Create an empty world with the default configuration
    pub fn new() -> Self {
        Self::build(RoomConfig::default(), MovementConfig::default())
    }

    /// Create an empty world, rejecting configurations that could produce a broken room
    pub fn with_config(config: RoomConfig, movement: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        movement.validate(&config)?;
        Ok(Self::build(config, movement))
    }

    fn build(config: RoomConfig, movement: MovementConfig) -> Self {
        Self {
            config,
            movement,
            occupancy: BTreeMap::new(),
            bounds: None,
            portal: None,
            torches: Vec::new(),
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn movement_config(&self) -> &MovementConfig {
        &self.movement
    }

    /// Bounds of the active room, if one has been generated
    pub fn bounds(&self) -> Option<RoomBounds> {
        self.bounds
    }

    /// The active room's portal
    pub fn portal(&self) -> Option<&Portal> {
        self.portal.as_ref()
    }

    pub fn torches(&self) -> &[Vec3] {
        &self.torches
    }

    /// Whether `cell` is occupied in the active room
    pub fn is_solid(&self, cell: VoxelCell) -> bool {
        self.occupancy.contains_key(&cell)
    }

    /// Role of an occupied cell
    pub fn role_at(&self, cell: VoxelCell) -> Option<CellRole> {
        self.occupancy.get(&cell).copied()
    }

    /// Number of occupied cells
    pub fn solid_count(&self) -> usize {
        self.occupancy.len()
    }

    /// Occupied cells in position order
    pub fn cells(&self) -> impl Iterator<Item = PlacedCell> + '_ {
        self.occupancy
            .iter()
            .map(|(&cell, &role)| PlacedCell { cell, role })
    }

    /// Replace the active room with a freshly generated one.
    ///
    /// Draws, in order: width, depth, pillar count, then per pillar its x, z,
    /// height and platform rolls, then each torch's x, then the door side.
    pub fn generate_room<R: RoomRng + ?Sized>(
        &mut self,
        room_index: u32,
        rng: &mut R,
    ) -> RoomDescription {
        self.clear();

        let config = &self.config;
        let width = rng.range_inclusive(config.min_extent, config.max_extent);
        let depth = rng.range_inclusive(config.min_extent, config.max_extent);
        let height = config.height;

        let mut cells: Vec<(VoxelCell, CellRole)> = Vec::new();

        for x in 0..width {
            for z in 0..depth {
                cells.push((VoxelCell::new(x, 0, z), CellRole::Floor));
            }
        }

        for x in 0..width {
            for y in 1..height {
                cells.push((VoxelCell::new(x, y, 0), CellRole::Wall));
                cells.push((VoxelCell::new(x, y, depth - 1), CellRole::Wall));
            }
        }
        for z in 0..depth {
            for y in 1..height {
                cells.push((VoxelCell::new(0, y, z), CellRole::Wall));
                cells.push((VoxelCell::new(width - 1, y, z), CellRole::Wall));
            }
        }

        let pillars = &config.pillars;
        let pillar_count = rng.range_inclusive(pillars.min_count as i32, pillars.max_count as i32);
        for _ in 0..pillar_count {
            let px = pillars.margin + rng.below((width - 2 * pillars.margin) as u32) as i32;
            let pz = pillars.margin + rng.below((depth - 2 * pillars.margin) as u32) as i32;
            let ph = rng.range_inclusive(pillars.min_height, pillars.max_height);
            for y in 1..=ph {
                cells.push((VoxelCell::new(px, y, pz), CellRole::Platform));
            }
            if rng.chance(pillars.platform_chance) {
                cells.push((VoxelCell::new(px + 1, ph + 1, pz), CellRole::Platform));
                if rng.chance(pillars.second_platform_chance) {
                    cells.push((VoxelCell::new(px + 1, ph + 1, pz + 1), CellRole::Platform));
                }
            }
        }

        let torch_config = &config.torches;
        let mut torches = Vec::with_capacity(torch_config.count as usize);
        for i in 0..torch_config.count {
            let tx = torch_config.margin + rng.below((width - 2 * torch_config.margin) as u32) as i32;
            let tz = if i % 2 == 1 { 1 } else { depth - 2 };
            torches.push(VoxelCell::new(tx, torch_config.height, tz).center());
        }

        let side = DoorSide::from_index(rng.below(4));
        let portal = Portal::place(side, width, depth, &config.portal);
        cells.extend(portal.frame_cells(&config.portal));
        let spawn = portal.spawn_point(&config.portal, self.movement.eye_height);

        for (cell, role) in cells {
            // Later placements win the role; occupancy itself is a set
            self.occupancy.insert(cell, role);
        }

        let bounds = RoomBounds {
            width,
            depth,
            height,
        };
        self.bounds = Some(bounds);
        self.portal = Some(portal);
        self.torches = torches;

        debug!(
            "Generated room {}: {}x{}, {} pillars, portal {:?} at {:?}, {} solid cells",
            room_index,
            width,
            depth,
            pillar_count,
            side,
            portal.anchor,
            self.occupancy.len()
        );

        RoomDescription {
            index: room_index,
            cells: self.cells().collect(),
            bounds,
            spawn,
            portal_marker: portal.marker,
            door_side: side,
            torches: self.torches.clone(),
        }
    }

    /// Move from `pos` by a joystick deflection `input` (x = strafe, y = back)
    /// rotated by `yaw`, for `dt` seconds.
    ///
    /// The result always lies in the room box inset by the movement pad, at
    /// eye height. Callers clamp `dt` to a short frame before calling.
    pub fn resolve_movement(&self, pos: Vec3, input: Vec2, yaw: f32, dt: f32) -> Vec3 {
        let input = input.clamp(Vec2::NEG_ONE, Vec2::ONE);
        let (sin, cos) = yaw.sin_cos();
        let dx = input.x * cos - input.y * sin;
        let dz = input.x * sin - input.y * cos;

        let step = self.movement.speed * dt.max(0.0);
        let nx = pos.x + dx * step;
        let nz = pos.z + dz * step;

        let (width, depth) = match self.bounds {
            Some(b) => (b.width, b.depth),
            None => (
                self.movement.fallback_bounds.width,
                self.movement.fallback_bounds.depth,
            ),
        };
        let pad = self.movement.pad;
        // max/min rather than clamp so a NaN coordinate lands on the pad
        let nx = nx.max(pad).min(width as f32 - pad);
        let nz = nz.max(pad).min(depth as f32 - pad);

        Vec3::new(nx, self.movement.eye_height, nz)
    }

    /// Whether `pos` is within the trigger radius of the active portal's core
    pub fn check_portal_proximity(&self, pos: Vec3) -> bool {
        self.portal
            .as_ref()
            .is_some_and(|portal| portal.is_within(pos, self.config.portal.trigger_radius))
    }

    fn clear(&mut self) {
        self.occupancy.clear();
        self.bounds = None;
        self.portal = None;
        self.torches.clear();
    }
}

impl Default for RoomWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Returns the same draw forever
    struct Constant(f64);

    impl RoomRng for Constant {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    fn expected_spawn(desc: &RoomDescription) -> Vec3 {
        let (w, d) = (desc.bounds.width, desc.bounds.depth);
        match desc.door_side {
            DoorSide::North => Vec3::new((w / 2) as f32 + 0.5, 1.6, 1.0 + 4.5),
            DoorSide::South => Vec3::new((w / 2) as f32 + 0.5, 1.6, (d - 2) as f32 - 4.5),
            DoorSide::West => Vec3::new(1.0 + 4.5, 1.6, (d / 2) as f32 + 0.5),
            DoorSide::East => Vec3::new((w - 2) as f32 - 4.5, 1.6, (d / 2) as f32 + 0.5),
        }
    }

    #[test]
    fn test_constant_draws_pick_each_side() {
        let cases = [
            (0.0, DoorSide::North, 18),
            (0.3, DoorSide::South, 19),
            (0.6, DoorSide::West, 21),
            (0.9, DoorSide::East, 23),
        ];
        for (draw, side, extent) in cases {
            let mut world = RoomWorld::new();
            let desc = world.generate_room(1, &mut Constant(draw));
            assert_eq!(desc.door_side, side);
            assert_eq!(desc.bounds.width, extent);
            assert_eq!(desc.bounds.depth, extent);
            assert_eq!(desc.spawn, expected_spawn(&desc));
        }
    }

    #[test]
    fn test_exact_layout_from_constant_draws() {
        // 0.6: 21x21, 9 pillars all at (12, 1..=3, 12), no platforms, west portal
        let mut world = RoomWorld::new();
        let desc = world.generate_room(1, &mut Constant(0.6));

        let floor = 21 * 21;
        let walls = (2 * 21 + 2 * 21 - 4) * 5;
        let pillar = 3;
        // West frame column at x = 0 merges into the wall
        let frame = 3 + 1;
        assert_eq!(world.solid_count(), floor + walls + pillar + frame);
        assert_eq!(desc.cells.len(), world.solid_count());

        assert_eq!(world.role_at(VoxelCell::new(12, 3, 12)), Some(CellRole::Platform));
        assert!(!world.is_solid(VoxelCell::new(12, 4, 12)));
        assert_eq!(world.role_at(VoxelCell::new(0, 2, 10)), Some(CellRole::PortalFrame));
        assert_eq!(world.role_at(VoxelCell::new(1, 4, 10)), Some(CellRole::PortalFrame));
        assert_eq!(world.role_at(VoxelCell::new(0, 2, 9)), Some(CellRole::Wall));
        assert!(!world.is_solid(VoxelCell::new(1, 1, 10)));
        assert_eq!(desc.spawn, Vec3::new(5.5, 1.6, 10.5));
    }

    #[test]
    fn test_platforms_when_rolls_succeed() {
        // 0.0: every pillar at (2, 1..=2, 2) with both platform blocks
        let mut world = RoomWorld::new();
        world.generate_room(1, &mut Constant(0.0));
        assert!(world.is_solid(VoxelCell::new(3, 3, 2)));
        assert!(world.is_solid(VoxelCell::new(3, 3, 3)));
    }

    #[test]
    fn test_torches_alternate_walls() {
        let mut world = RoomWorld::new();
        let desc = world.generate_room(1, &mut Constant(0.0));
        assert_eq!(desc.torches.len(), 4);
        for (i, torch) in desc.torches.iter().enumerate() {
            let expected_z = if i % 2 == 1 { 1.5 } else { 16.5 };
            assert_eq!(*torch, Vec3::new(2.5, 3.5, expected_z));
        }
        // Torches are lights, not geometry
        assert!(!world.is_solid(VoxelCell::new(2, 3, 1)));
    }

    #[test]
    fn test_generated_rooms_respect_bounds_and_portal_rules() {
        let mut rng = StdRng::seed_from_u64(0xD31E);
        let mut world = RoomWorld::new();
        for index in 1..=300 {
            let desc = world.generate_room(index, &mut rng);
            let b = desc.bounds;
            assert!((18..=23).contains(&b.width));
            assert!((18..=23).contains(&b.depth));
            assert_eq!(b.height, 6);

            // Marker lies strictly inside the perimeter walls
            let m = desc.portal_marker;
            assert!(m.x > 1.0 && m.x < (b.width - 1) as f32);
            assert!(m.z > 1.0 && m.z < (b.depth - 1) as f32);
            assert!(b.is_interior(VoxelCell::from_world_pos(m)));
            assert!(!world.is_solid(VoxelCell::from_world_pos(m)));

            assert_eq!(desc.spawn, expected_spawn(&desc));
            assert!(!world.check_portal_proximity(desc.spawn));
            assert_eq!(world.resolve_movement(desc.spawn, Vec2::ZERO, 0.0, 0.016), desc.spawn);

            for placed in &desc.cells {
                assert!(placed.cell.x >= 0 && placed.cell.x < b.width);
                assert!(placed.cell.z >= 0 && placed.cell.z < b.depth);
                assert!(placed.cell.y >= 0 && placed.cell.y < b.height);
            }
        }
    }

    #[test]
    fn test_regeneration_replaces_occupancy() {
        let mut world = RoomWorld::new();
        world.generate_room(1, &mut Constant(0.9));
        assert!(world.is_solid(VoxelCell::new(22, 0, 22)));

        let desc = world.generate_room(2, &mut Constant(0.0));
        assert!(!world.is_solid(VoxelCell::new(22, 0, 22)));
        assert!(desc.cells.iter().all(|p| p.cell.x < 18 && p.cell.z < 18));

        let mut fresh = RoomWorld::new();
        let fresh_desc = fresh.generate_room(2, &mut Constant(0.0));
        assert_eq!(desc, fresh_desc);
    }

    #[test]
    fn test_portal_core_is_not_a_cell() {
        let mut world = RoomWorld::new();
        for draw in [0.0, 0.3, 0.6, 0.9] {
            let desc = world.generate_room(1, &mut Constant(draw));
            let core = VoxelCell::from_world_pos(desc.portal_marker);
            assert!(!world.is_solid(core));
            assert!(desc.cells.iter().all(|p| p.cell != core));
            assert!(desc.cells.iter().any(|p| p.role == CellRole::PortalFrame));
        }
    }

    #[test]
    fn test_generate_through_trait_object() {
        let mut boxed: Box<dyn RoomRng> = Box::new(Constant(0.6));
        let mut world = RoomWorld::new();
        let desc = world.generate_room(1, boxed.as_mut());
        assert_eq!(desc.door_side, DoorSide::West);

        let mut fresh = RoomWorld::new();
        assert_eq!(desc, fresh.generate_room(1, &mut Constant(0.6)));
    }

    #[test]
    fn test_movement_stays_inside_padded_box() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut world = RoomWorld::new();
        let desc = world.generate_room(1, &mut rng);
        let (w, d) = (desc.bounds.width as f32, desc.bounds.depth as f32);

        let mut pos = desc.spawn;
        for i in 0..5_000 {
            let input = Vec2::new(
                rng.next_unit() as f32 * 8.0 - 4.0,
                rng.next_unit() as f32 * 8.0 - 4.0,
            );
            let yaw = rng.next_unit() as f32 * std::f32::consts::TAU;
            let dt = (i % 6) as f32 * 0.01;
            pos = world.resolve_movement(pos, input, yaw, dt);
            assert!(pos.x >= 1.2 && pos.x <= w - 1.2, "x escaped: {pos:?}");
            assert!(pos.z >= 1.2 && pos.z <= d - 1.2, "z escaped: {pos:?}");
            assert_eq!(pos.y, 1.6);
        }
    }

    #[test]
    fn test_movement_rotation() {
        let mut world = RoomWorld::new();
        world.generate_room(1, &mut Constant(0.9));
        let start = Vec3::new(10.0, 1.6, 10.0);

        // Stick y is negated into world z at zero yaw
        let forward = world.resolve_movement(start, Vec2::new(0.0, -1.0), 0.0, 0.05);
        assert!((forward.z - (10.0 + 2.9 * 0.05)).abs() < 1e-5);
        assert!((forward.x - 10.0).abs() < 1e-5);

        let strafe = world.resolve_movement(start, Vec2::new(1.0, 0.0), 0.0, 0.05);
        assert!((strafe.x - (10.0 + 2.9 * 0.05)).abs() < 1e-5);

        let turned = world.resolve_movement(
            start,
            Vec2::new(0.0, -1.0),
            std::f32::consts::FRAC_PI_2,
            0.05,
        );
        assert!((turned.x - (10.0 + 2.9 * 0.05)).abs() < 1e-5);
        assert!((turned.z - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_movement_clamps_nan_and_uses_fallback_bounds() {
        let world = RoomWorld::new();
        let pos = world.resolve_movement(Vec3::new(f32::NAN, 0.0, 100.0), Vec2::ZERO, 0.0, 0.016);
        assert_eq!(pos, Vec3::new(1.2, 1.6, 30.0 - 1.2));
    }

    #[test]
    fn test_portal_proximity() {
        let mut world = RoomWorld::new();
        assert!(!world.check_portal_proximity(Vec3::ZERO));

        let desc = world.generate_room(1, &mut Constant(0.3));
        let marker = desc.portal_marker;
        assert!(world.check_portal_proximity(marker));
        assert!(world.check_portal_proximity(marker + Vec3::new(0.0, -1.0, 0.9)));
        assert!(!world.check_portal_proximity(marker + Vec3::new(1.7, 0.0, 0.0)));
        assert!(!world.check_portal_proximity(marker + Vec3::new(1.0, -1.0, 0.9)));
        assert!(!world.check_portal_proximity(marker + Vec3::new(1.6, 0.0, 0.0)));
    }

    #[test]
    fn test_portal_proximity_excludes_exact_radius() {
        let mut config = RoomConfig::default();
        config.portal.trigger_radius = 1.5;
        let mut world = RoomWorld::with_config(config, MovementConfig::default()).unwrap();

        // South portal in a 19-wide room: marker x = 9.5, so +1.5 lands exactly on 11.0
        let desc = world.generate_room(1, &mut Constant(0.3));
        let marker = desc.portal_marker;
        assert_eq!(marker.x, 9.5);
        assert!(!world.check_portal_proximity(marker + Vec3::new(1.5, 0.0, 0.0)));
        assert!(world.check_portal_proximity(marker + Vec3::new(1.25, 0.0, 0.0)));
    }

    #[test]
    fn test_with_config_rejects_bad_config() {
        let config = RoomConfig {
            min_extent: 3,
            max_extent: 3,
            ..Default::default()
        };
        assert!(RoomWorld::with_config(config, MovementConfig::default()).is_err());
    }

    #[test]
    fn test_description_serializes() {
        let mut world = RoomWorld::new();
        let desc = world.generate_room(7, &mut Constant(0.6));
        let json = serde_json::to_string(&desc).unwrap();
        let back: RoomDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index, 7);
        assert_eq!(back.door_side, DoorSide::West);
        assert_eq!(back.cells.len(), desc.cells.len());
    }
}
