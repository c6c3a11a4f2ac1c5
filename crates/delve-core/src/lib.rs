//! Delve Core - Core types and utilities for Delve
//!
//! This crate provides the foundational types shared by the world and game crates:
//! - Mathematical primitives (re-exported from glam)
//! - Voxel cell coordinates and roles
//! - Frame clock for clamped per-frame delta time
//! - Injectable random sources for procedural generation

pub mod rng;
pub mod time;
pub mod types;

pub use glam::{IVec3, Vec2, Vec3};
pub use rng::RoomRng;
pub use time::{FrameClock, TimeConfig};
pub use types::{CellRole, VoxelCell};
