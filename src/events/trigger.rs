//! Presence events delivered by sensors.
//!
//! A [`TriggerEvent`] is fired whenever a tagged actor enters, stays inside
//! or leaves a sensor volume. The headless shell can trigger these directly
//! with `world.trigger(..)`; otherwise `systems::sensor::sensor_detector`
//! derives them from box overlaps every tick.
//!
//! Observers registered in `systems::triggers` route the event to whatever
//! trigger-reactive component the sensor entity carries.
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Edge or level of a sensor overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Enter,
    Stay,
    Exit,
}

/// An actor carrying `tag` touched the volume of `sensor`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    pub sensor: Entity,
    pub actor: Entity,
    pub tag: String,
    pub kind: TriggerKind,
}

impl TriggerEvent {
    pub fn new(sensor: Entity, actor: Entity, tag: impl Into<String>, kind: TriggerKind) -> Self {
        Self {
            sensor,
            actor,
            tag: tag.into(),
            kind,
        }
    }
}
