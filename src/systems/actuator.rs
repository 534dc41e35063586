//! Hide/show actuator systems.
//!
//! - [`actuator_input_system`] turns a use press into [`HideShowActuator::use_switch`]
//!   calls for every actuator.
//! - [`actuator_system`] runs each actuator's state machine, switches its
//!   targets when a cycle is armed and plays its cue on reaching the hidden
//!   pose.
//!
//! Targets are reached through [`SwitchTargets`], which resolves an entity to
//! whichever [`Switchable`] component it carries. A target entity that no
//! longer exists, or carries nothing switchable, is skipped.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, info};

use crate::components::actuator::HideShowActuator;
use crate::components::mapposition::MapPosition;
use crate::components::switchable::{Switchable, Toggle};
use crate::components::waypointtraveler::WaypointTraveler;
use crate::events::cue::CueMessage;
use crate::resources::cuepool::CuePool;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::cue::play_cue;

/// Every switchable component kind, looked up by entity.
#[derive(SystemParam)]
pub struct SwitchTargets<'w, 's> {
    travelers: Query<'w, 's, &'static mut WaypointTraveler>,
    toggles: Query<'w, 's, &'static mut Toggle>,
}

impl SwitchTargets<'_, '_> {
    /// Busy state of `entity`, `None` when it is not switchable.
    pub fn is_switching(&self, entity: Entity) -> Option<bool> {
        if let Ok(traveler) = self.travelers.get(entity) {
            return Some(traveler.is_switching());
        }
        if let Ok(toggle) = self.toggles.get(entity) {
            return Some(toggle.is_switching());
        }
        None
    }

    pub fn any_busy(&self, targets: &[Entity]) -> bool {
        targets
            .iter()
            .any(|target| self.is_switching(*target).unwrap_or(false))
    }

    /// Switch `entity`. Returns `false` when it is not switchable.
    pub fn switch(&mut self, entity: Entity, activate: bool) -> bool {
        if let Ok(mut traveler) = self.travelers.get_mut(entity) {
            traveler.switch(activate);
            return true;
        }
        if let Ok(mut toggle) = self.toggles.get_mut(entity) {
            toggle.switch(activate);
            return true;
        }
        false
    }
}

pub fn actuator_input_system(
    input: Res<InputState>,
    mut query: Query<(Entity, &mut HideShowActuator)>,
    targets: SwitchTargets,
) {
    if !input.use_requested() {
        return;
    }
    for (entity, mut actuator) in query.iter_mut() {
        let busy = targets.any_busy(&actuator.targets);
        if actuator.use_switch(busy) {
            debug!("actuator {:?} used", entity);
        }
    }
}

pub fn actuator_system(
    time: Res<WorldTime>,
    mut query: Query<(Entity, &mut MapPosition, &mut HideShowActuator)>,
    mut targets: SwitchTargets,
    mut cues: ResMut<CuePool>,
    mut writer: MessageWriter<CueMessage>,
) {
    for (entity, mut position, mut actuator) in query.iter_mut() {
        let busy = targets.any_busy(&actuator.targets);
        let mut pos = position.pos;
        let step = actuator.step(&mut pos, busy, time.now(), time.tick_delta());
        if pos != position.pos {
            position.pos = pos;
        }

        if step.armed {
            info!("actuator {:?} armed, switching {} target(s)", entity, actuator.targets.len());
            for target in actuator.targets.iter() {
                if !targets.switch(*target, true) {
                    debug!("actuator {:?}: target {:?} is not switchable", entity, target);
                }
            }
        }
        if step.hidden {
            info!("actuator {:?} hidden", entity);
            if let Some(cue) = actuator.cue.as_deref() {
                play_cue(&mut cues, &mut writer, cue, entity, time.now());
            }
        }
        if step.shown {
            info!("actuator {:?} visible", entity);
        }
    }
}
