use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::scroller::Scroller;
use crate::resources::worldtime::WorldTime;

pub fn scroller_system(time: Res<WorldTime>, mut query: Query<(&mut MapPosition, &mut Scroller)>) {
    for (mut position, mut scroller) in query.iter_mut() {
        scroller.step(&mut position.pos, time.tick_delta());
    }
}
