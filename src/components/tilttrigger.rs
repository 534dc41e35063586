use bevy_ecs::prelude::{Component, Entity};

/// Sensor that tilts a linked `WaypointTraveler` as soon as the tagged actor
/// enters, and keeps that actor upright while the traveler is at full tilt.
///
/// The actor is held at the rotation it had when it entered. The actor is
/// remembered after it leaves, matching a platform that throws its rider off.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct TiltTrigger {
    pub traveler: Option<Entity>,
    pub actor_tag: String,
    actor: Option<(Entity, f32)>,
}

impl TiltTrigger {
    pub fn new(traveler: Entity, actor_tag: impl Into<String>) -> Self {
        Self {
            traveler: Some(traveler),
            actor_tag: actor_tag.into(),
            actor: None,
        }
    }

    /// Remember `actor` and its rotation at entry.
    pub fn record_actor(&mut self, actor: Entity, rotation: f32) {
        self.actor = Some((actor, rotation));
    }

    /// The tracked actor and the rotation it must be held at.
    pub fn actor(&self) -> Option<(Entity, f32)> {
        self.actor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_no_actor_until_recorded() {
        let trigger = TiltTrigger::new(Entity::PLACEHOLDER, "player");
        assert_eq!(trigger.actor(), None);
        assert_eq!(trigger.traveler, Some(Entity::PLACEHOLDER));
    }

    #[test]
    fn test_reentry_overwrites_actor_rotation() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();
        let mut trigger = TiltTrigger::new(Entity::PLACEHOLDER, "player");

        trigger.record_actor(first, 15.0);
        assert_eq!(trigger.actor(), Some((first, 15.0)));

        trigger.record_actor(first, -30.0);
        assert_eq!(trigger.actor(), Some((first, -30.0)));

        trigger.record_actor(second, 0.0);
        assert_eq!(trigger.actor(), Some((second, 0.0)));
    }
}
