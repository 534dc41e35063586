//! Per-tick driver for [`WaypointTraveler`] components.
//!
//! Entities without a [`Rotation`] can still travel; their tilt runs against
//! a scratch angle that is thrown away.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::mapposition::MapPosition;
use crate::components::rotation::Rotation;
use crate::components::waypointtraveler::{TravelerEvent, WaypointTraveler};
use crate::resources::worldtime::WorldTime;

pub fn waypoint_traveler_system(
    time: Res<WorldTime>,
    mut query: Query<(
        Entity,
        &mut MapPosition,
        Option<&mut Rotation>,
        &mut WaypointTraveler,
    )>,
) {
    for (entity, mut position, rotation, mut traveler) in query.iter_mut() {
        let mut pos = position.pos;
        let mut degrees = rotation.as_ref().map_or(0.0, |r| r.degrees);

        if !traveler.is_attached() {
            traveler.attach(pos, degrees);
        }
        let events = traveler.step(&mut pos, &mut degrees, time.now(), time.tick_delta());

        if pos != position.pos {
            position.pos = pos;
        }
        if let Some(mut rotation) = rotation {
            if rotation.degrees != degrees {
                rotation.degrees = degrees;
            }
        }

        for event in events {
            match event {
                TravelerEvent::Arrived { index } => {
                    debug!("traveler {:?} arrived at waypoint {}", entity, index)
                }
                TravelerEvent::Departed { index } => {
                    debug!("traveler {:?} heading for waypoint {}", entity, index)
                }
                TravelerEvent::TiltStarted => info!("traveler {:?} tilting", entity),
                TravelerEvent::TiltPeaked => debug!("traveler {:?} fully tilted", entity),
                TravelerEvent::TiltFinished => info!("traveler {:?} level again", entity),
            }
        }
    }
}
