//! Per-tick driver for [`MultiAxisMover`] components.
//!
//! Attaches movers on the first tick they are seen (drawing any jittered
//! parameters from the session [`Jitter`]), advances every enabled axis and
//! republishes the per-axis enabled state into the entity's [`Signals`]
//! when it has one.

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::axismover::Axis;
use crate::components::mapposition::MapPosition;
use crate::components::multiaxismover::MultiAxisMover;
use crate::components::signals::Signals;
use crate::resources::jitter::Jitter;
use crate::resources::worldtime::WorldTime;

pub fn multi_axis_mover_system(
    time: Res<WorldTime>,
    mut jitter: ResMut<Jitter>,
    mut query: Query<(&mut MapPosition, &mut MultiAxisMover, Option<&mut Signals>)>,
) {
    for (mut position, mut mover, signals) in query.iter_mut() {
        if !mover.is_attached() {
            mover.attach(position.pos, &mut jitter);
        }
        let displacement = mover.step(position.pos, time.now(), time.tick_delta());
        if displacement != Vec3::ZERO {
            position.translate(displacement);
        }
        if let Some(mut signals) = signals {
            for axis in Axis::ALL {
                let enabled = mover.is_axis_enabled(axis);
                if signals.has_flag(axis.signal_key()) != enabled {
                    signals.put_flag(axis.signal_key(), enabled);
                }
            }
        }
    }
}
