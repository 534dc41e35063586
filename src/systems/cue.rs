//! Cue pool upkeep.
//!
//! Controllers start cues through [`play_cue`]; [`cue_release_system`] frees
//! voices whose cue ran out and [`update_cue_messages`] advances the
//! `Messages<CueMessage>` queue once per tick so readers see this tick's cues.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::events::cue::CueMessage;
use crate::resources::cuepool::CuePool;
use crate::resources::worldtime::WorldTime;

/// Start `id` on an idle voice and announce it. Drops the cue when the pool
/// is exhausted.
pub fn play_cue(
    pool: &mut CuePool,
    writer: &mut MessageWriter<CueMessage>,
    id: &str,
    source: Entity,
    now: f32,
) -> Option<usize> {
    match pool.play(id, now) {
        Some(voice) => {
            debug!("cue '{}' on voice {} for {:?}", id, voice, source);
            writer.write(CueMessage {
                id: id.to_string(),
                voice,
                source,
            });
            Some(voice)
        }
        None => {
            warn!("cue '{}' dropped, no idle voice", id);
            None
        }
    }
}

pub fn cue_release_system(time: Res<WorldTime>, mut pool: ResMut<CuePool>) {
    if pool.active_count() > 0 {
        pool.release_finished(time.now());
    }
}

pub fn update_cue_messages(mut messages: ResMut<Messages<CueMessage>>) {
    messages.update();
}
