use bevy_ecs::prelude::*;
use log::debug;

use crate::components::switchable::{Switchable, Toggle};
use crate::resources::worldtime::WorldTime;

/// Clear the busy flag of toggles whose settle time has passed.
pub fn toggle_system(time: Res<WorldTime>, mut query: Query<(Entity, &mut Toggle)>) {
    for (entity, mut toggle) in query.iter_mut() {
        if !toggle.is_switching() {
            continue;
        }
        if toggle.settle(time.now()) {
            debug!("toggle {:?} settled ({})", entity, if toggle.active { "on" } else { "off" });
        }
    }
}
