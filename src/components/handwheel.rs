//! Proximity-gated wheel the player turns with the use action.
//!
//! Turning the wheel tilts its linked traveler, plays its cue and flips two
//! lists of `Toggle` targets: `turn_off` ones are deactivated and `turn_on`
//! ones activated. It does nothing unless a traveler is linked.

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

use crate::events::trigger::TriggerKind;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Handwheel {
    pub traveler: Option<Entity>,
    pub turn_off: SmallVec<[Entity; 4]>,
    pub turn_on: SmallVec<[Entity; 4]>,
    pub actor_tag: String,
    pub cue: Option<String>,
    in_range: bool,
}

impl Handwheel {
    pub fn new(traveler: Entity, actor_tag: impl Into<String>) -> Self {
        Self {
            traveler: Some(traveler),
            turn_off: SmallVec::new(),
            turn_on: SmallVec::new(),
            actor_tag: actor_tag.into(),
            cue: None,
            in_range: false,
        }
    }

    pub fn with_toggles(
        mut self,
        turn_off: impl IntoIterator<Item = Entity>,
        turn_on: impl IntoIterator<Item = Entity>,
    ) -> Self {
        self.turn_off = turn_off.into_iter().collect();
        self.turn_on = turn_on.into_iter().collect();
        self
    }

    pub fn with_cue(mut self, cue: impl Into<String>) -> Self {
        self.cue = Some(cue.into());
        self
    }

    pub fn is_in_range(&self) -> bool {
        self.in_range
    }

    pub fn on_trigger(&mut self, kind: TriggerKind, tag: &str) {
        if self.traveler.is_none() || tag != self.actor_tag {
            return;
        }
        match kind {
            TriggerKind::Enter => self.in_range = true,
            TriggerKind::Exit => self.in_range = false,
            TriggerKind::Stay => {}
        }
    }

    /// The traveler to tilt, if the wheel can be turned right now.
    pub fn turn(&self, use_pressed: bool) -> Option<Entity> {
        if !self.in_range || !use_pressed {
            return None;
        }
        self.traveler
    }
}
