//! Actor tag component.
//!
//! Sensors and triggers react only to actors carrying a [`Group`] whose name
//! matches their configured tag (for example `"player"`).

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}
