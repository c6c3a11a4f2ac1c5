//! Frame timing for Delve
//!
//! Movement resolution only clamps against a soft room box, so a long frame
//! gap could carry the player far in a single step. The clock caps every delta
//! before it reaches game logic.

use serde::{Deserialize, Serialize};

/// Configuration for frame timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Maximum delta time handed to game logic (seconds)
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            max_delta_time: 0.05,
        }
    }
}

/// Per-frame time tracking
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Configuration
    pub config: TimeConfig,
    /// Time since session start in seconds (sum of clamped deltas)
    pub total_time: f64,
    /// Delta time for this frame (clamped)
    pub delta_time: f32,
    /// Raw delta as reported by the host
    pub raw_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
}

impl FrameClock {
    /// Create a new clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance by the raw delta since the previous frame and return the clamped delta
    pub fn tick(&mut self, raw_delta: f32) -> f32 {
        self.raw_delta_time = raw_delta;
        // Negative or NaN deltas come from non-monotonic host clocks
        let raw = if raw_delta.is_finite() { raw_delta.max(0.0) } else { 0.0 };
        self.delta_time = raw.min(self.config.max_delta_time);
        self.total_time += self.delta_time as f64;
        self.frame_count += 1;
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_passes_small_deltas() {
        let mut clock = FrameClock::default();
        let dt = clock.tick(0.016);
        assert!((dt - 0.016).abs() < f32::EPSILON);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn test_tick_clamps_large_gaps() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(1.5), 0.05);
        assert_eq!(clock.raw_delta_time, 1.5);
        assert!((clock.total_time - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_tick_rejects_negative_and_nan() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(-0.2), 0.0);
        assert_eq!(clock.tick(f32::NAN), 0.0);
        assert_eq!(clock.frame_count, 2);
    }
}
