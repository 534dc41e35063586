//! Observers routing [`TriggerEvent`]s to trigger-reactive components.
//!
//! Each observer looks at the sensor entity named in the event and reacts
//! only if that entity carries its component. Events for sensors without any
//! of these components fall through silently.
//!
//! Use [`register_trigger_observers`] once during world setup.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::actuator::HideShowActuator;
use crate::components::axistoggletrigger::AxisToggleTrigger;
use crate::components::handwheel::Handwheel;
use crate::components::multiaxismover::MultiAxisMover;
use crate::components::presencedetector::PresenceDetector;
use crate::components::rotation::Rotation;
use crate::components::tilttrigger::TiltTrigger;
use crate::components::waypointtraveler::WaypointTraveler;
use crate::events::trigger::{TriggerEvent, TriggerKind};

pub fn register_trigger_observers(world: &mut World) {
    world.spawn(Observer::new(actuator_presence_observer));
    world.spawn(Observer::new(handwheel_presence_observer));
    world.spawn(Observer::new(presence_detector_observer));
    world.spawn(Observer::new(axis_toggle_observer));
    world.spawn(Observer::new(tilt_trigger_observer));
}

pub fn actuator_presence_observer(
    trigger: On<TriggerEvent>,
    mut actuators: Query<&mut HideShowActuator>,
) {
    let event = trigger.event();
    if let Ok(mut actuator) = actuators.get_mut(event.sensor) {
        actuator.on_trigger(event.kind, &event.tag);
    }
}

pub fn handwheel_presence_observer(trigger: On<TriggerEvent>, mut wheels: Query<&mut Handwheel>) {
    let event = trigger.event();
    if let Ok(mut wheel) = wheels.get_mut(event.sensor) {
        wheel.on_trigger(event.kind, &event.tag);
    }
}

pub fn presence_detector_observer(
    trigger: On<TriggerEvent>,
    mut detectors: Query<&mut PresenceDetector>,
) {
    let event = trigger.event();
    if let Ok(mut detector) = detectors.get_mut(event.sensor) {
        detector.on_trigger(event.kind, &event.tag);
    }
}

pub fn axis_toggle_observer(
    trigger: On<TriggerEvent>,
    toggles: Query<&AxisToggleTrigger>,
    mut movers: Query<&mut MultiAxisMover>,
) {
    let event = trigger.event();
    if event.kind != TriggerKind::Enter {
        return;
    }
    let Ok(toggle) = toggles.get(event.sensor) else {
        return;
    };
    let Some((target, enabled)) = toggle.fire(&event.tag) else {
        return;
    };
    match movers.get_mut(target) {
        Ok(mut mover) => mover.set_axis_enabled(toggle.axis, enabled),
        Err(_) => debug!("axis toggle {:?}: target {:?} has no mover", event.sensor, target),
    }
}

pub fn tilt_trigger_observer(
    trigger: On<TriggerEvent>,
    mut tilt_triggers: Query<&mut TiltTrigger>,
    mut travelers: Query<&mut WaypointTraveler>,
    rotations: Query<&Rotation>,
) {
    let event = trigger.event();
    if event.kind != TriggerKind::Enter {
        return;
    }
    let Ok(mut tilt) = tilt_triggers.get_mut(event.sensor) else {
        return;
    };
    if tilt.actor_tag.is_empty() || event.tag != tilt.actor_tag {
        return;
    }
    let Some(traveler_entity) = tilt.traveler else {
        return;
    };
    let Ok(mut traveler) = travelers.get_mut(traveler_entity) else {
        debug!("tilt trigger {:?}: traveler {:?} missing", event.sensor, traveler_entity);
        return;
    };
    let degrees = rotations.get(event.actor).map_or(0.0, |r| r.degrees);
    tilt.record_actor(event.actor, degrees);
    traveler.request_tilt();
    info!("tilt trigger {:?} tilting {:?}", event.sensor, traveler_entity);
}

/// Hold each tilt trigger's actor at its entry rotation while the linked
/// traveler is fully tilted.
pub fn tilt_trigger_straighten_system(
    tilt_triggers: Query<&TiltTrigger>,
    travelers: Query<&WaypointTraveler>,
    mut rotations: Query<&mut Rotation>,
) {
    for tilt in tilt_triggers.iter() {
        let (Some(traveler), Some((actor, degrees))) = (tilt.traveler, tilt.actor()) else {
            continue;
        };
        let tilted = travelers.get(traveler).is_ok_and(|t| t.is_tilted());
        if !tilted {
            continue;
        }
        if let Ok(mut rotation) = rotations.get_mut(actor) {
            if rotation.degrees != degrees {
                rotation.degrees = degrees;
            }
        }
    }
}
