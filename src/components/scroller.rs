use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Endless leftward scroll for a repeating backdrop.
///
/// The owner moves left at `speed` and jumps back to where it started once
/// it has covered half its `span`, less one tick of motion so the seam never
/// shows.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Scroller {
    pub speed: f32,
    pub span: f32,
    start: Option<Vec3>,
    covered: f32,
}

impl Scroller {
    pub fn new(speed: f32, span: f32) -> Self {
        Self {
            speed,
            span,
            start: None,
            covered: 0.0,
        }
    }

    pub fn covered(&self) -> f32 {
        self.covered
    }

    pub fn step(&mut self, position: &mut Vec3, dt: f32) {
        let start = *self.start.get_or_insert(*position);
        let step = self.speed * dt;
        if self.covered >= self.span / 2.0 - step {
            *position = start;
            self.covered = 0.0;
        }
        position.x -= step;
        self.covered += step;
    }
}
