use bevy_ecs::prelude::Component;

/// Orientation about the Z axis, in degrees. Positive is counter-clockwise.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}

impl Rotation {
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }

    pub fn rotate(&mut self, delta_degrees: f32) {
        self.degrees += delta_degrees;
    }
}
