//! Delve World - Procedural rooms and traversal
//!
//! Generates walled voxel rooms with one exit portal each, and resolves player
//! movement against the active room's bounds.

pub mod config;
pub mod error;
pub mod portal;
pub mod room;

pub use config::{FallbackBounds, MovementConfig, PillarConfig, PortalConfig, RoomConfig, TorchConfig};
pub use error::ConfigError;
pub use portal::{DoorSide, Portal};
pub use room::{PlacedCell, RoomBounds, RoomDescription, RoomWorld};
