//! Up to three independently configured axis oscillators on one entity.
//!
//! Each axis carries its own [`AxisSettings`]. On the first tick the
//! component resolves every axis (absolute speed/interval/delay, optional
//! jitter draws) and builds its [`AxisMover`] from the current position.
//! Axes that start disabled are resolved too, so enabling one later
//! behaves exactly as if it had been enabled from the start.
//!
//! An axis activates only after its start delay has elapsed. The delay
//! deadline is scheduled the first tick the axis is seen enabled and is
//! never re-armed; toggling the axis off and on again pauses and resumes
//! its mover without touching the deadline or the mover's progress.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::axismover::{Axis, AxisMover};
use crate::resources::jitter::Jitter;

/// Declarative per-axis configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub enabled: bool,
    /// Units per second. The sign is ignored.
    pub speed: f32,
    pub randomize_speed: bool,
    /// Signed travel distance from the initial position.
    pub distance: f32,
    pub randomize_distance: bool,
    pub boomerang: bool,
    /// Pause in seconds before each reversal.
    pub interval: f32,
    pub randomize_interval: bool,
    /// Seconds to wait before the axis first moves.
    pub delay: f32,
    pub randomize_delay: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 1.0,
            randomize_speed: false,
            distance: 1.0,
            randomize_distance: false,
            boomerang: false,
            interval: 0.0,
            randomize_interval: false,
            delay: 0.0,
            randomize_delay: false,
        }
    }
}

impl AxisSettings {
    pub fn new(speed: f32, distance: f32) -> Self {
        Self {
            enabled: true,
            speed,
            distance,
            ..Default::default()
        }
    }

    pub fn with_boomerang(mut self, boomerang: bool) -> Self {
        self.boomerang = boomerang;
        self
    }

    pub fn with_interval(mut self, interval: f32) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Resolve the final speed, distance, interval and delay.
    ///
    /// Randomized values are drawn from `[0.1, configured]`.
    fn resolve(&self, jitter: &mut Jitter) -> ResolvedAxis {
        let mut speed = self.speed.abs();
        if self.randomize_speed {
            speed = jitter.draw_up_to(speed);
        }
        let mut distance = self.distance;
        if self.randomize_distance {
            distance = jitter.draw_up_to(distance);
        }
        let mut interval = self.interval.abs();
        if self.randomize_interval {
            interval = jitter.draw_up_to(interval);
        }
        let mut delay = self.delay.abs();
        if self.randomize_delay {
            delay = jitter.draw_up_to(delay);
        }
        ResolvedAxis {
            speed,
            distance,
            interval,
            delay,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ResolvedAxis {
    speed: f32,
    distance: f32,
    interval: f32,
    delay: f32,
}

#[derive(Clone, Debug)]
struct AxisChannel {
    settings: AxisSettings,
    enabled: bool,
    mover: Option<AxisMover>,
    delay: f32,
    start_at: Option<f32>,
    started: bool,
}

impl AxisChannel {
    fn new(settings: AxisSettings) -> Self {
        Self {
            enabled: settings.enabled,
            settings,
            mover: None,
            delay: 0.0,
            start_at: None,
            started: false,
        }
    }
}

/// Per-entity composition of X/Y/Z [`AxisMover`]s.
#[derive(Component, Clone, Debug)]
pub struct MultiAxisMover {
    channels: [AxisChannel; 3],
    attached: bool,
}

impl MultiAxisMover {
    pub fn new(x: AxisSettings, y: AxisSettings, z: AxisSettings) -> Self {
        Self {
            channels: [AxisChannel::new(x), AxisChannel::new(y), AxisChannel::new(z)],
            attached: false,
        }
    }

    /// A mover with only `axis` configured.
    pub fn single(axis: Axis, settings: AxisSettings) -> Self {
        let mut mover = Self::new(
            AxisSettings::default(),
            AxisSettings::default(),
            AxisSettings::default(),
        );
        mover.channels[axis.index()] = AxisChannel::new(settings);
        mover
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Build every axis mover from `position`. Only the first call has any effect.
    pub fn attach(&mut self, position: Vec3, jitter: &mut Jitter) {
        if self.attached {
            return;
        }
        for axis in Axis::ALL {
            let channel = &mut self.channels[axis.index()];
            let resolved = channel.settings.resolve(jitter);
            channel.delay = resolved.delay;
            channel.mover = Some(AxisMover::new(
                axis,
                axis.component(position),
                axis.unit() * resolved.speed,
                resolved.distance,
                channel.settings.boomerang,
                resolved.interval,
            ));
            debug!(
                "axis {:?} resolved: speed {:.3} distance {:.3} interval {:.3} delay {:.3}",
                axis, resolved.speed, resolved.distance, resolved.interval, resolved.delay
            );
        }
        self.attached = true;
    }

    pub fn set_axis_enabled(&mut self, axis: Axis, enabled: bool) {
        let channel = &mut self.channels[axis.index()];
        if channel.enabled != enabled {
            info!("axis {:?} {}", axis, if enabled { "enabled" } else { "disabled" });
        }
        channel.enabled = enabled;
    }

    pub fn is_axis_enabled(&self, axis: Axis) -> bool {
        self.channels[axis.index()].enabled
    }

    /// Whether the start delay of `axis` has elapsed.
    pub fn is_axis_started(&self, axis: Axis) -> bool {
        self.channels[axis.index()].started
    }

    /// Resolved start delay for `axis`, zero before attach.
    pub fn axis_delay(&self, axis: Axis) -> f32 {
        self.channels[axis.index()].delay
    }

    pub fn axis_mover(&self, axis: Axis) -> Option<&AxisMover> {
        self.channels[axis.index()].mover.as_ref()
    }

    pub fn settings(&self, axis: Axis) -> &AxisSettings {
        &self.channels[axis.index()].settings
    }

    /// Advance every enabled axis one tick and return the summed displacement.
    ///
    /// Must be called after [`attach`](MultiAxisMover::attach); before that it
    /// is a no-op.
    pub fn step(&mut self, position: Vec3, now: f32, dt: f32) -> Vec3 {
        let mut displacement = Vec3::ZERO;
        for axis in Axis::ALL {
            let channel = &mut self.channels[axis.index()];
            if !channel.enabled {
                continue;
            }
            let Some(mover) = channel.mover.as_mut() else {
                continue;
            };
            if !channel.started {
                let start_at = *channel.start_at.get_or_insert(now + channel.delay);
                if now < start_at {
                    continue;
                }
                channel.started = true;
                debug!("axis {:?} started at {:.3}", axis, now);
            }
            displacement += mover.advance(axis.component(position), now, dt);
        }
        displacement
    }
}
