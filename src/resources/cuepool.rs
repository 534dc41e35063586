//! Fixed-size pool of cue voices.
//!
//! Controllers that want a one-shot cue (a switch clunk, a handwheel creak)
//! grab an idle voice with [`CuePool::play`]. When every voice is busy the
//! cue is dropped, which is the same behaviour a pooled sound source has when
//! its pool runs dry. Voices free themselves `cue_length` seconds after they
//! started, see `systems::cue::cue_release_system`.
//!
//! The pool is created per session from the `[audio]` section of the
//! simulation config and inserted as a resource; nothing global.

use bevy_ecs::prelude::Resource;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueVoice {
    pub cue: Option<String>,
    pub busy_until: f32,
}

impl CueVoice {
    pub fn is_idle(&self) -> bool {
        self.cue.is_none()
    }
}

#[derive(Resource, Debug, Clone)]
pub struct CuePool {
    voices: Vec<CueVoice>,
    cue_length: f32,
    dropped: u64,
}

impl CuePool {
    pub fn new(voices: usize, cue_length: f32) -> Self {
        Self {
            voices: vec![CueVoice::default(); voices],
            cue_length: cue_length.abs(),
            dropped: 0,
        }
    }

    /// Start `id` on the first idle voice, returning the voice index.
    pub fn play(&mut self, id: &str, now: f32) -> Option<usize> {
        let Some(index) = self.voices.iter().position(CueVoice::is_idle) else {
            self.dropped += 1;
            return None;
        };
        let voice = &mut self.voices[index];
        voice.cue = Some(id.to_owned());
        voice.busy_until = now + self.cue_length;
        Some(index)
    }

    /// Free every voice whose cue has run its course. Returns how many.
    pub fn release_finished(&mut self, now: f32) -> usize {
        let mut released = 0;
        for voice in self.voices.iter_mut().filter(|v| !v.is_idle()) {
            if now >= voice.busy_until {
                voice.cue = None;
                released += 1;
            }
        }
        released
    }

    pub fn voices(&self) -> &[CueVoice] {
        &self.voices
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| !v.is_idle()).count()
    }

    /// Cues that found no idle voice since the pool was created.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for CuePool {
    fn default() -> Self {
        Self::new(4, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_uses_first_idle_voice() {
        let mut pool = CuePool::new(2, 1.0);
        assert_eq!(pool.play("click", 0.0), Some(0));
        assert_eq!(pool.play("creak", 0.0), Some(1));
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.voices()[1].cue.as_deref(), Some("creak"));
    }

    #[test]
    fn test_exhausted_pool_drops_cue() {
        let mut pool = CuePool::new(1, 1.0);
        pool.play("click", 0.0);
        assert_eq!(pool.play("click", 0.5), None);
        assert_eq!(pool.dropped(), 1);
    }

    #[test]
    fn test_release_after_cue_length() {
        let mut pool = CuePool::new(2, 0.5);
        pool.play("a", 0.0);
        pool.play("b", 0.25);
        assert_eq!(pool.release_finished(0.4), 0);
        assert_eq!(pool.release_finished(0.5), 1);
        assert_eq!(pool.play("c", 0.5), Some(0));
        assert_eq!(pool.release_finished(0.75), 1);
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_zero_voices_never_plays() {
        let mut pool = CuePool::new(0, 1.0);
        assert_eq!(pool.play("x", 0.0), None);
    }
}
