//! Simulation clock.
//!
//! [`WorldTime`] is the only clock controllers read. `elapsed` is the
//! monotonic "now" every deadline is compared against and `delta` is the
//! duration of the current tick, already scaled by `time_scale`.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Monotonic simulation time in seconds.
    pub fn now(&self) -> f32 {
        self.elapsed
    }

    /// Scaled duration of the current tick in seconds.
    pub fn tick_delta(&self) -> f32 {
        self.delta
    }
}
