//! Random sources for procedural generation
//!
//! Generation draws uniform values in `[0, 1)` and floors them into integer
//! ranges. Keeping that shape behind a trait lets tests swap in a seeded or
//! fully scripted source and assert exact layouts.

use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;

/// A source of uniform random draws
pub trait RoomRng {
    /// Uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `0..n` (`0` when `n` is zero)
    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        ((self.next_unit() * n as f64).floor() as u32).min(n - 1)
    }

    /// Uniform integer in the inclusive range `min..=max`
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        min + self.below((max - min + 1) as u32) as i32
    }

    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

impl RoomRng for ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RoomRng for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
