//! Trigger volume that turns box overlaps into presence edges.
//!
//! A sensor entity carries [`Sensor`], a `BoxCollider` and a `MapPosition`.
//! Each tick `systems::sensor::sensor_detector` hands it the set of tagged
//! actors currently overlapping its box and the sensor reports what changed.

use bevy_ecs::prelude::{Component, Entity};
use rustc_hash::FxHashMap;

use crate::events::trigger::TriggerKind;

#[derive(Component, Debug, Clone, Default)]
pub struct Sensor {
    overlapping: FxHashMap<Entity, String>,
}

impl Sensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_overlapping(&self, actor: Entity) -> bool {
        self.overlapping.contains_key(&actor)
    }

    pub fn overlap_count(&self) -> usize {
        self.overlapping.len()
    }

    /// Replace the overlap set and return the resulting edges.
    ///
    /// New actors yield `Enter`, actors still inside yield `Stay` and actors
    /// that left (or no longer exist) yield `Exit`. The result is ordered by
    /// entity so runs are reproducible.
    pub fn update(&mut self, current: FxHashMap<Entity, String>) -> Vec<(Entity, String, TriggerKind)> {
        let mut edges: Vec<(Entity, String, TriggerKind)> = Vec::new();
        for (actor, tag) in &current {
            let kind = if self.overlapping.contains_key(actor) {
                TriggerKind::Stay
            } else {
                TriggerKind::Enter
            };
            edges.push((*actor, tag.clone(), kind));
        }
        for (actor, tag) in &self.overlapping {
            if !current.contains_key(actor) {
                edges.push((*actor, tag.clone(), TriggerKind::Exit));
            }
        }
        edges.sort_by_key(|(actor, _, _)| *actor);
        self.overlapping = current;
        edges
    }
}
