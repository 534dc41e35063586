//! Capability shared by everything an actuator can drive.
//!
//! An actuator never cares what its target does when switched; it only needs
//! to know whether the target is still busy with a previous switch. Concrete
//! targets are ordinary components ([`WaypointTraveler`], [`Toggle`]) that
//! implement [`Switchable`]; systems resolve an entity to whichever one it
//! carries through `systems::actuator::SwitchTargets`.
//!
//! [`WaypointTraveler`]: super::waypointtraveler::WaypointTraveler

use bevy_ecs::prelude::Component;

/// Something an actuator can switch.
pub trait Switchable {
    /// `true` until the effect of the last [`switch`](Switchable::switch) has
    /// completed.
    fn is_switching(&self) -> bool;

    fn switch(&mut self, activate: bool);
}

/// Generic on/off object (doors, barriers, lights).
///
/// Switching sets `active` and keeps the toggle busy for `settle_time`
/// seconds, measured by `toggle_system` from the first tick it observes the
/// switch. A zero settle time clears on that same tick.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Toggle {
    pub active: bool,
    pub settle_time: f32,
    switching: bool,
    settle_at: Option<f32>,
}

impl Toggle {
    pub fn new(active: bool) -> Self {
        Self {
            active,
            settle_time: 0.0,
            switching: false,
            settle_at: None,
        }
    }

    pub fn with_settle_time(mut self, settle_time: f32) -> Self {
        self.settle_time = settle_time.abs();
        self
    }

    /// Set the state directly, without becoming busy.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Clear the busy flag once the settle time has passed.
    ///
    /// Returns `true` on the tick the toggle settles.
    pub fn settle(&mut self, now: f32) -> bool {
        if !self.switching {
            return false;
        }
        let settle_at = *self.settle_at.get_or_insert(now + self.settle_time);
        if now >= settle_at {
            self.switching = false;
            self.settle_at = None;
            true
        } else {
            false
        }
    }
}

impl Default for Toggle {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Switchable for Toggle {
    fn is_switching(&self) -> bool {
        self.switching
    }

    fn switch(&mut self, activate: bool) {
        self.active = activate;
        self.switching = true;
        self.settle_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_sets_state_and_busy() {
        let mut toggle = Toggle::new(false);
        toggle.switch(true);
        assert!(toggle.active);
        assert!(toggle.is_switching());
    }

    #[test]
    fn test_zero_settle_clears_on_first_tick() {
        let mut toggle = Toggle::new(true);
        toggle.switch(false);
        assert!(toggle.settle(2.0));
        assert!(!toggle.is_switching());
        assert!(!toggle.active);
    }

    #[test]
    fn test_settle_time_holds_busy() {
        let mut toggle = Toggle::new(true).with_settle_time(1.0);
        toggle.switch(true);
        assert!(!toggle.settle(0.5));
        assert!(!toggle.settle(1.0));
        assert!(toggle.is_switching());
        assert!(toggle.settle(1.5));
        assert!(!toggle.is_switching());
    }

    #[test]
    fn test_set_active_is_not_busy() {
        let mut toggle = Toggle::default();
        toggle.set_active(false);
        assert!(!toggle.active);
        assert!(!toggle.is_switching());
        assert!(!toggle.settle(0.0));
    }
}
