//! Input feed.
//!
//! There is no device polling in this crate. The shell calls
//! [`update_input_state`] once per tick, before the schedule runs, with the
//! raw state of the use button.
use bevy_ecs::prelude::*;

use crate::resources::input::InputState;

pub fn update_input_state(world: &mut World, use_pressed: bool) {
    let mut input = world.resource_mut::<InputState>();
    input.action_use.feed(use_pressed);
}
