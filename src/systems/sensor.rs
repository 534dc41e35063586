//! Sensor overlap detection.
//!
//! [`sensor_detector`] checks every [`Sensor`] box against every tagged actor
//! box (an entity with a [`Group`] and a [`BoxCollider`] that is not itself a
//! sensor) and fires a [`TriggerEvent`] for each enter, stay and exit edge.
//! Events are queued through `Commands`, so observers run once the system
//! finishes.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::sensor::Sensor;
use crate::events::trigger::TriggerEvent;

pub fn sensor_detector(
    mut sensors: Query<(Entity, &MapPosition, &BoxCollider, &mut Sensor)>,
    actors: Query<(Entity, &MapPosition, &BoxCollider, &Group), Without<Sensor>>,
    mut commands: Commands,
) {
    for (sensor_entity, sensor_pos, sensor_box, mut sensor) in sensors.iter_mut() {
        let mut inside: FxHashMap<Entity, String> = FxHashMap::default();
        for (actor, actor_pos, actor_box, group) in actors.iter() {
            if sensor_box.overlaps(sensor_pos.pos, actor_box, actor_pos.pos) {
                inside.insert(actor, group.name().to_string());
            }
        }
        if inside.is_empty() && sensor.overlap_count() == 0 {
            continue;
        }
        for (actor, tag, kind) in sensor.update(inside) {
            commands.trigger(TriggerEvent::new(sensor_entity, actor, tag, kind));
        }
    }
}
