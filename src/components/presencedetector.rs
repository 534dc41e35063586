use bevy_ecs::prelude::Component;

use crate::events::trigger::TriggerKind;

/// Level-triggered presence flag.
///
/// `colliding` is raised while an actor with `actor_tag` stays inside the
/// sensor and dropped when it leaves. The first overlap tick only reports
/// `Enter`, so the flag rises one tick after contact.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct PresenceDetector {
    pub actor_tag: String,
    pub colliding: bool,
}

impl PresenceDetector {
    pub fn new(actor_tag: impl Into<String>) -> Self {
        Self {
            actor_tag: actor_tag.into(),
            colliding: false,
        }
    }

    pub fn on_trigger(&mut self, kind: TriggerKind, tag: &str) {
        if tag != self.actor_tag {
            return;
        }
        match kind {
            TriggerKind::Stay => self.colliding = true,
            TriggerKind::Exit => self.colliding = false,
            TriggerKind::Enter => {}
        }
    }
}
