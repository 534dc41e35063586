//! Per-entity flags published for other systems and the shell.
//!
//! Controllers that expose state to outside collaborators (the multi-axis
//! mover's `move_x`/`move_y`/`move_z` toggles, for instance) write named
//! flags here instead of being queried directly.

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Component, Default)]
pub struct Signals {
    pub flags: FxHashSet<String>,
}

impl Signals {
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.flags.insert(key.into());
        self
    }

    /// Set or clear a flag from a boolean.
    pub fn put_flag(&mut self, key: &str, value: bool) {
        if value {
            if !self.flags.contains(key) {
                self.flags.insert(key.to_owned());
            }
        } else {
            self.flags.remove(key);
        }
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}
