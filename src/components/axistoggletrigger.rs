use bevy_ecs::prelude::{Component, Entity};
use serde::{Deserialize, Serialize};

use super::axismover::Axis;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisAction {
    #[default]
    Activate,
    Deactivate,
}

/// Sensor that enables or disables one axis of a `MultiAxisMover` when the
/// tagged actor walks in.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AxisToggleTrigger {
    pub target: Option<Entity>,
    pub axis: Axis,
    pub action: AxisAction,
    pub actor_tag: String,
}

impl AxisToggleTrigger {
    pub fn new(target: Entity, axis: Axis, action: AxisAction, actor_tag: impl Into<String>) -> Self {
        Self {
            target: Some(target),
            axis,
            action,
            actor_tag: actor_tag.into(),
        }
    }

    /// The target and the enable state to apply, if `tag` fires this trigger.
    ///
    /// An empty tag or missing target never fires.
    pub fn fire(&self, tag: &str) -> Option<(Entity, bool)> {
        if self.actor_tag.is_empty() || tag != self.actor_tag {
            return None;
        }
        let target = self.target?;
        Some((target, self.action == AxisAction::Activate))
    }
}
