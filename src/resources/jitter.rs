//! Per-instance parameter jitter.
//!
//! Controllers that ask for a randomized speed, distance, interval or delay
//! draw it exactly once when they attach. Draws go through the pure
//! [`draw`] function so a test can reproduce any value from its seed; the
//! [`Jitter`] resource only hands out seeds from the session seed.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

/// Lower bound of every randomized controller parameter.
pub const JITTER_MIN: f32 = 0.1;

/// Uniform draw in `[min, max)` from a fixed seed.
///
/// The bounds may be given in either order; a configured maximum below
/// [`JITTER_MIN`] therefore draws from `[max, JITTER_MIN)`. Equal bounds
/// return that bound.
pub fn draw(seed: u64, min: f32, max: f32) -> f32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let mut rng = Rng::with_seed(seed);
    lo + rng.f32() * (hi - lo)
}

/// Session-wide seed source for parameter jitter.
#[derive(Resource, Debug, Clone)]
pub struct Jitter {
    rng: Rng,
}

impl Jitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    pub fn next_seed(&mut self) -> u64 {
        self.rng.u64(..)
    }

    /// Draw a value in `[JITTER_MIN, max)`.
    pub fn draw_up_to(&mut self, max: f32) -> f32 {
        draw(self.next_seed(), JITTER_MIN, max)
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::new(0)
    }
}
