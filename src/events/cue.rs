use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

/// A cue was started on one of the [`CuePool`](crate::resources::cuepool::CuePool)
/// voices. The audio shell (if any) reads these to actually play something.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct CueMessage {
    pub id: String,
    pub voice: usize,
    pub source: Entity,
}
