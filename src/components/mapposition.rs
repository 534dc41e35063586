//! World-space position of an entity.
//!
//! Controllers own the position of the entity they are attached to and write
//! it directly once per tick; nothing else is expected to move a controlled
//! entity while its controller is active.

use bevy_ecs::prelude::Component;
use glam::Vec3;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec3,
}

impl MapPosition {
    /// Position on the 2D plane (z = 0).
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, 0.0),
        }
    }

    pub fn from_vec3(pos: Vec3) -> Self {
        Self { pos }
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.pos += delta;
    }
}

impl Default for MapPosition {
    fn default() -> Self {
        Self { pos: Vec3::ZERO }
    }
}
