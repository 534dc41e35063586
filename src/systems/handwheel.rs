use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::handwheel::Handwheel;
use crate::components::switchable::Toggle;
use crate::components::waypointtraveler::WaypointTraveler;
use crate::events::cue::CueMessage;
use crate::resources::cuepool::CuePool;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::cue::play_cue;

/// Turn every in-range [`Handwheel`] on a use press.
pub fn handwheel_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    wheels: Query<(Entity, &Handwheel)>,
    mut travelers: Query<&mut WaypointTraveler>,
    mut toggles: Query<&mut Toggle>,
    mut cues: ResMut<CuePool>,
    mut writer: MessageWriter<CueMessage>,
) {
    let pressed = input.use_requested();
    for (entity, wheel) in wheels.iter() {
        let Some(traveler_entity) = wheel.turn(pressed) else {
            continue;
        };
        let Ok(mut traveler) = travelers.get_mut(traveler_entity) else {
            debug!("handwheel {:?}: traveler {:?} missing", entity, traveler_entity);
            continue;
        };
        traveler.request_tilt();
        info!("handwheel {:?} turned", entity);

        if let Some(cue) = wheel.cue.as_deref() {
            play_cue(&mut cues, &mut writer, cue, entity, time.now());
        }
        for (targets, active) in [(&wheel.turn_off, false), (&wheel.turn_on, true)] {
            for target in targets.iter() {
                if let Ok(mut toggle) = toggles.get_mut(*target) {
                    toggle.set_active(active);
                }
            }
        }
    }
}
