//! Per-tick action input resource.
//!
//! The shell polls its input device and feeds the result in through
//! [`update_input_state`](crate::systems::input::update_input_state).
//! Controllers only ever poll this resource; nothing is pushed to them.
use bevy_ecs::prelude::*;

/// Boolean action state with edge detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolState {
    /// Whether the action is currently held this tick.
    pub active: bool,
    /// Whether the action was just pressed this tick.
    pub just_pressed: bool,
    /// Whether the action was just released this tick.
    pub just_released: bool,
}

impl BoolState {
    /// Feed this tick's raw state and recompute the edges.
    pub fn feed(&mut self, pressed: bool) {
        self.just_pressed = pressed && !self.active;
        self.just_released = !pressed && self.active;
        self.active = pressed;
    }
}

/// Resource capturing the actions gameplay controllers care about.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    /// The "use" / special action (switches, handwheels).
    pub action_use: BoolState,
}

impl InputState {
    /// "Action requested this tick".
    pub fn use_requested(&self) -> bool {
        self.action_use.just_pressed
    }
}
