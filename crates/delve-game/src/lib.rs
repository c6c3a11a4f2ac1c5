//! Delve Game - Session and per-frame traversal
//!
//! Owns the player state and drives one frame at a time: clamp the frame
//! delta, resolve movement, then test the portal and swap rooms.

pub mod input;
pub mod player;
pub mod session;

pub use input::MovementInput;
pub use player::{LookConfig, PlayerState};
pub use session::{FrameOutcome, Session};
