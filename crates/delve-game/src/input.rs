//! Movement input helpers
//!
//! Hosts decode joystick, touch or keys into a stick deflection in
//! `[-1, 1] x [-1, 1]`: x strafes, y is pushed back (screen down).

use glam::{Vec2, Vec3};

/// Helpers for producing stick deflections
pub struct MovementInput;

impl MovementInput {
    /// Deflection that walks from `from` straight at `to` on the floor plane
    /// at full speed, for a player facing `yaw`.
    ///
    /// Returns zero when already there, or at yaw angles where the stick
    /// cannot express the needed direction.
    pub fn toward(from: Vec3, to: Vec3, yaw: f32) -> Vec2 {
        let dx = to.x - from.x;
        let dz = to.z - from.z;
        let (sin, cos) = yaw.sin_cos();

        // Inverse of the stick-to-world mapping used by movement resolution
        let det = sin * sin - cos * cos;
        if det.abs() < 1e-4 {
            return Vec2::ZERO;
        }
        let jx = (-cos * dx + sin * dz) / det;
        let jy = (-sin * dx + cos * dz) / det;

        let largest = jx.abs().max(jy.abs());
        if largest < 1e-6 {
            return Vec2::ZERO;
        }
        Vec2::new(jx, jy) / largest
    }
}
