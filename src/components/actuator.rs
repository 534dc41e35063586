//! Hide/show switch actuator.
//!
//! A [`HideShowActuator`] is a button or lever the player uses while
//! standing next to it. Using it slides the owner along one of four fixed
//! orientations until it has travelled `length * hide_depth`, and switches
//! every linked target on the way in. In boomerang mode the actuator comes
//! back on its own after `hide_delay` seconds; otherwise it stays hidden
//! until it is used again.
//!
//! Completion is measured by accumulated travel, never by absolute position,
//! so the owner may start anywhere. A phase always runs to completion before
//! the next one starts.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::events::trigger::TriggerKind;

/// Direction the actuator slides when hiding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    VerticalDown,
    VerticalUp,
    HorizontalLeft,
    HorizontalRight,
}

impl Orientation {
    /// Unit vector of the hiding motion. Showing moves the opposite way.
    pub fn hide_direction(self) -> Vec3 {
        match self {
            Orientation::VerticalDown => Vec3::NEG_Y,
            Orientation::VerticalUp => Vec3::Y,
            Orientation::HorizontalLeft => Vec3::NEG_X,
            Orientation::HorizontalRight => Vec3::X,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActuatorPhase {
    Visible,
    Hiding,
    Hidden,
    AwaitingReturn,
    Showing,
}

/// What happened during one [`HideShowActuator::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActuatorStep {
    /// The cycle was armed; linked targets must be switched on.
    pub armed: bool,
    /// The hidden pose was reached.
    pub hidden: bool,
    /// The visible pose was reached again.
    pub shown: bool,
}

#[derive(Component, Clone, Debug)]
pub struct HideShowActuator {
    pub targets: SmallVec<[Entity; 4]>,
    pub orientation: Orientation,
    /// Units per second.
    pub moving_speed: f32,
    /// Fraction of `length` travelled to count as hidden.
    pub hide_depth: f32,
    pub boomerang: bool,
    /// Seconds spent hidden before an automatic return.
    pub hide_delay: f32,
    pub length: f32,
    /// Group name of the actor allowed to use the actuator.
    pub actor_tag: String,
    /// Cue played on reaching the hidden pose.
    pub cue: Option<String>,
    usable: bool,
    in_range: bool,
    in_use: bool,
    visible: bool,
    hidden: bool,
    moving: bool,
    pending_hide: bool,
    pending_show: bool,
    distance_travelled: f32,
    show_at: Option<f32>,
}

impl HideShowActuator {
    pub fn new(orientation: Orientation, length: f32, actor_tag: impl Into<String>) -> Self {
        Self {
            targets: SmallVec::new(),
            orientation,
            moving_speed: 1.0,
            hide_depth: 0.5,
            boomerang: false,
            hide_delay: 1.0,
            length,
            actor_tag: actor_tag.into(),
            cue: None,
            usable: true,
            in_range: false,
            in_use: false,
            visible: true,
            hidden: false,
            moving: false,
            pending_hide: false,
            pending_show: false,
            distance_travelled: 0.0,
            show_at: None,
        }
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Entity>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    pub fn with_speed(mut self, moving_speed: f32) -> Self {
        self.moving_speed = moving_speed;
        self
    }

    pub fn with_hide_depth(mut self, hide_depth: f32) -> Self {
        self.hide_depth = hide_depth;
        self
    }

    pub fn with_boomerang(mut self, boomerang: bool, hide_delay: f32) -> Self {
        self.boomerang = boomerang;
        self.hide_delay = hide_delay;
        self
    }

    pub fn with_cue(mut self, cue: impl Into<String>) -> Self {
        self.cue = Some(cue.into());
        self
    }

    pub fn is_usable(&self) -> bool {
        self.usable
    }

    pub fn is_in_range(&self) -> bool {
        self.in_range
    }

    pub fn is_in_use(&self) -> bool {
        self.in_use
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn distance_travelled(&self) -> f32 {
        self.distance_travelled
    }

    /// Distance that completes a hide or show phase.
    pub fn travel_span(&self) -> f32 {
        self.length * self.hide_depth
    }

    pub fn phase(&self) -> ActuatorPhase {
        if self.pending_hide {
            ActuatorPhase::Hiding
        } else if self.pending_show {
            ActuatorPhase::Showing
        } else if self.hidden && self.show_at.is_some() {
            ActuatorPhase::AwaitingReturn
        } else if self.hidden {
            ActuatorPhase::Hidden
        } else {
            ActuatorPhase::Visible
        }
    }

    /// Presence edge from the actuator's sensor.
    pub fn on_trigger(&mut self, kind: TriggerKind, tag: &str) {
        if !self.usable || tag != self.actor_tag {
            return;
        }
        match kind {
            TriggerKind::Enter => self.in_range = true,
            TriggerKind::Exit => self.in_range = false,
            TriggerKind::Stay => {}
        }
    }

    /// Request a hide/show cycle.
    ///
    /// Returns `false`, leaving every field untouched, unless the actuator is
    /// usable, the actor is in range, no linked target is busy and the
    /// actuator is at rest.
    pub fn use_switch(&mut self, targets_busy: bool) -> bool {
        if !self.usable || !self.in_range || targets_busy || self.moving {
            return false;
        }
        self.in_use = true;
        true
    }

    /// Run one tick against the owner's position.
    pub fn step(&mut self, position: &mut Vec3, targets_busy: bool, now: f32, dt: f32) -> ActuatorStep {
        let mut out = ActuatorStep::default();
        if self.targets.is_empty() {
            self.usable = false;
        }

        if self.in_range && self.in_use && !targets_busy && !self.moving {
            if self.visible {
                self.pending_hide = true;
            } else if self.hidden {
                self.pending_show = true;
            }
            self.moving = true;
            out.armed = true;
        }

        if self.show_at.is_some_and(|show_at| now >= show_at) {
            self.show_at = None;
            self.pending_show = true;
        }

        let span = self.travel_span();
        let step = self.moving_speed.abs() * dt;
        let direction = self.orientation.hide_direction();

        if self.pending_hide {
            if self.travel(position, direction, span, step) {
                self.finish_hide(now);
                out.hidden = true;
            }
        } else if self.pending_show && self.travel(position, -direction, span, step) {
            self.finish_show();
            out.shown = true;
        }
        out
    }

    /// Move up to `step` along `direction`, never past `span`. Returns true
    /// once the phase has covered its span.
    fn travel(&mut self, position: &mut Vec3, direction: Vec3, span: f32, step: f32) -> bool {
        let remaining = span - self.distance_travelled;
        if remaining > span_tolerance(span) {
            let moved = step.min(remaining);
            *position += direction * moved;
            self.distance_travelled += moved;
        }
        span - self.distance_travelled <= span_tolerance(span)
    }

    fn finish_hide(&mut self, now: f32) {
        self.hidden = true;
        self.visible = false;
        self.pending_hide = false;
        self.distance_travelled = 0.0;
        if self.boomerang {
            self.show_at = Some(now + self.hide_delay.abs());
        } else {
            self.moving = false;
            self.in_use = false;
        }
    }

    fn finish_show(&mut self) {
        self.visible = true;
        self.hidden = false;
        self.pending_show = false;
        self.moving = false;
        self.in_use = false;
        self.distance_travelled = 0.0;
    }
}

/// Slack for f32 accumulation when comparing travelled distance to a span.
fn span_tolerance(span: f32) -> f32 {
    span.abs() * 1e-5
}
