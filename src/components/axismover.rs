//! Single-axis oscillation.
//!
//! [`AxisMover`] drives one coordinate of its owner between an initial
//! position and `initial + distance`. It either stops for good at the far
//! bound or, in boomerang mode, reverses at both bounds. Every reversal is
//! gated by an [`AxisTimer`] so the object pauses for `interval` seconds
//! before turning around.
//!
//! The mover is not a component on its own; it is owned by
//! [`MultiAxisMover`](super::multiaxismover::MultiAxisMover), which feeds it
//! the current coordinate once per tick and applies the returned
//! displacement.

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::strictly_between;

/// One of the three spatial axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// The coordinate of `v` along this axis.
    pub fn component(self, v: Vec3) -> f32 {
        v[self.index()]
    }

    /// Flag name used when republishing the enabled state into `Signals`.
    pub fn signal_key(self) -> &'static str {
        match self {
            Axis::X => "move_x",
            Axis::Y => "move_y",
            Axis::Z => "move_z",
        }
    }
}

/// Interval gate used to pause before a reversal.
///
/// The first [`wait`](AxisTimer::wait) call arms the timer at the given time;
/// subsequent calls keep reporting "waiting" until `interval` seconds have
/// passed since arming, at which point the timer disarms itself. A zero
/// interval clears on the same call that armed it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisTimer {
    interval: f32,
    armed_at: Option<f32>,
}

impl AxisTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.abs(),
            armed_at: None,
        }
    }

    /// Returns `true` while the interval is still running.
    pub fn wait(&mut self, now: f32) -> bool {
        let armed_at = *self.armed_at.get_or_insert(now);
        if now - armed_at >= self.interval {
            self.armed_at = None;
            false
        } else {
            true
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}

/// Which end of the travel range a reversal happened at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Origin,
    Far,
}

/// Oscillating mover for a single axis.
///
/// Bound comparisons are inclusive: sitting exactly on a bound counts as
/// having reached it. Once a reversal happened at a bound it cannot fire
/// again at that same bound until the object has been observed strictly
/// between both bounds.
#[derive(Clone, Debug)]
pub struct AxisMover {
    axis: Axis,
    initial: f32,
    distance: f32,
    target: Option<f32>,
    velocity: Vec3,
    boomerang: bool,
    timer: AxisTimer,
    reversal_lock: Option<Bound>,
    waiting: bool,
    stopped: bool,
    reversals: u32,
}

impl AxisMover {
    /// Create a mover for `axis`.
    ///
    /// `velocity` is in world units per second; only its `axis` component
    /// matters. The object always starts moving along `velocity`; when that
    /// points away from the far bound (negative distance with a positive
    /// velocity) the first tick performs a gated reversal at the origin so
    /// the object heads for its target.
    pub fn new(
        axis: Axis,
        initial: f32,
        velocity: Vec3,
        distance: f32,
        boomerang: bool,
        interval: f32,
    ) -> Self {
        let velocity = axis.unit() * axis.component(velocity);
        let heading_far = (axis.component(velocity) >= 0.0) == (distance >= 0.0);
        Self {
            axis,
            initial,
            distance,
            target: None,
            velocity,
            boomerang,
            timer: AxisTimer::new(interval),
            reversal_lock: heading_far.then_some(Bound::Origin),
            waiting: false,
            stopped: false,
            reversals: 0,
        }
    }

    /// Advance one tick from `current` and return the displacement to apply.
    ///
    /// The returned vector is zero while the mover waits on its interval
    /// timer and forever after it has stopped.
    pub fn advance(&mut self, current: f32, now: f32, dt: f32) -> Vec3 {
        let target = *self.target.get_or_insert(self.initial + self.distance);
        if self.stopped {
            return Vec3::ZERO;
        }
        if target == self.initial {
            // nothing to travel: arrived on the first comparison
            self.stopped = true;
            return Vec3::ZERO;
        }

        let ascending = target >= self.initial;
        let at_far = if ascending {
            current >= target
        } else {
            current <= target
        };
        let at_origin = if ascending {
            current <= self.initial
        } else {
            current >= self.initial
        };

        if at_far {
            if self.boomerang {
                self.reverse(Bound::Far, now);
            } else {
                self.stopped = true;
                self.waiting = false;
                debug!("axis {:?} stopped at {:.3}", self.axis, current);
            }
        } else if at_origin {
            self.reverse(Bound::Origin, now);
        }

        if strictly_between(current, self.initial, target) {
            self.reversal_lock = None;
        }

        if self.waiting || self.stopped {
            Vec3::ZERO
        } else {
            self.velocity * dt
        }
    }

    fn reverse(&mut self, bound: Bound, now: f32) {
        if self.reversal_lock == Some(bound) {
            return;
        }
        self.waiting = self.timer.wait(now);
        if !self.waiting {
            self.velocity = -self.velocity;
            self.reversal_lock = Some(bound);
            self.reversals += 1;
            debug!("axis {:?} reversed at {:.3}", self.axis, now);
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }

    /// Far bound, fixed on the first [`advance`](AxisMover::advance).
    pub fn target(&self) -> Option<f32> {
        self.target
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn is_boomerang(&self) -> bool {
        self.boomerang
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Number of direction reversals performed so far.
    pub fn reversals(&self) -> u32 {
        self.reversals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Tick the mover the way `MultiAxisMover` does, returning the position.
    fn run(mover: &mut AxisMover, pos: &mut f32, now: &mut f32, dt: f32, ticks: usize) {
        for _ in 0..ticks {
            *now += dt;
            let d = mover.advance(*pos, *now, dt);
            *pos += mover.axis().component(d);
        }
    }

    // ==================== AXIS TIMER TESTS ====================

    #[test]
    fn test_timer_zero_interval_clears_immediately() {
        let mut timer = AxisTimer::new(0.0);
        assert!(!timer.wait(3.0));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_timer_waits_full_interval() {
        let mut timer = AxisTimer::new(1.0);
        assert!(timer.wait(2.0));
        assert!(timer.is_armed());
        assert!(timer.wait(2.5));
        assert!(!timer.wait(3.0));
        assert!(!timer.is_armed());
        // re-arms from scratch
        assert!(timer.wait(10.0));
    }

    #[test]
    fn test_timer_negative_interval_is_absolute() {
        let timer = AxisTimer::new(-2.0);
        assert_eq!(timer.interval(), 2.0);
    }

    // ==================== AXIS MOVER TESTS ====================

    #[test]
    fn test_target_fixed_on_first_advance() {
        let mut mover = AxisMover::new(Axis::X, 2.0, Vec3::X, 3.0, false, 0.0);
        assert_eq!(mover.target(), None);
        mover.advance(2.0, 0.0, 0.1);
        assert_eq!(mover.target(), Some(5.0));
    }

    #[test]
    fn test_velocity_restricted_to_axis() {
        let mover = AxisMover::new(Axis::Y, 0.0, Vec3::new(4.0, 2.0, 9.0), 1.0, false, 0.0);
        assert_eq!(mover.velocity(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_stops_at_far_bound_without_boomerang() {
        let mut mover = AxisMover::new(Axis::X, 0.0, Vec3::X * 2.0, 1.0, false, 0.0);
        let (mut pos, mut now) = (0.0, 0.0);
        run(&mut mover, &mut pos, &mut now, 0.25, 10);
        assert!(mover.is_stopped());
        assert!(approx_eq(pos, 1.0));
        assert_eq!(mover.reversals(), 0);
    }

    #[test]
    fn test_exact_bound_counts_as_arrived() {
        let mut mover = AxisMover::new(Axis::X, 0.0, Vec3::X, 1.0, false, 0.0);
        let d = mover.advance(1.0, 0.0, 0.5);
        assert_eq!(d, Vec3::ZERO);
        assert!(mover.is_stopped());
    }

    #[test]
    fn test_stopped_axis_never_resumes() {
        let mut mover = AxisMover::new(Axis::Z, 0.0, Vec3::Z, 0.5, false, 0.0);
        let (mut pos, mut now) = (0.0, 0.0);
        run(&mut mover, &mut pos, &mut now, 0.25, 4);
        assert!(mover.is_stopped());
        // even if something else drags the object back inside the range
        assert_eq!(mover.advance(0.1, now + 1.0, 0.25), Vec3::ZERO);
        assert_eq!(mover.advance(-5.0, now + 2.0, 0.25), Vec3::ZERO);
    }

    #[test]
    fn test_boomerang_does_not_reverse_at_start() {
        let mut mover = AxisMover::new(Axis::X, 0.0, Vec3::X, 2.0, true, 0.0);
        let d = mover.advance(0.0, 0.0, 0.5);
        assert!(approx_eq(d.x, 0.5));
        assert_eq!(mover.reversals(), 0);
    }

    #[test]
    fn test_boomerang_waits_interval_then_flips_once() {
        let mut mover = AxisMover::new(Axis::X, 0.0, Vec3::X, 1.0, true, 0.5);
        let (mut pos, mut now) = (0.0, 0.0);
        // four ticks of 0.25 reach the far bound exactly
        run(&mut mover, &mut pos, &mut now, 0.25, 4);
        assert!(approx_eq(pos, 1.0));

        // arrival tick arms the timer and holds position
        run(&mut mover, &mut pos, &mut now, 0.25, 1);
        assert!(mover.is_waiting());
        assert!(approx_eq(pos, 1.0));
        assert_eq!(mover.reversals(), 0);

        run(&mut mover, &mut pos, &mut now, 0.25, 1);
        assert!(mover.is_waiting());

        // interval elapsed: flips and starts moving back on the same tick
        run(&mut mover, &mut pos, &mut now, 0.25, 1);
        assert!(!mover.is_waiting());
        assert_eq!(mover.reversals(), 1);
        assert!(mover.velocity().x < 0.0);
        assert!(approx_eq(pos, 0.75));
    }

    #[test]
    fn test_boomerang_full_cycle_returns_to_start() {
        let mut mover = AxisMover::new(Axis::Y, 3.0, Vec3::Y, 1.0, true, 0.0);
        let (mut pos, mut now) = (3.0, 0.0);
        let mut max_seen: f32 = pos;
        // out 4 ticks, back 4 ticks (the flip tick already moves)
        for _ in 0..8 {
            run(&mut mover, &mut pos, &mut now, 0.25, 1);
            max_seen = max_seen.max(pos);
        }
        assert!(approx_eq(max_seen, 4.0));
        assert!(approx_eq(pos, 3.0));
        assert_eq!(mover.reversals(), 1);

        // next tick reverses at the origin and heads out again
        run(&mut mover, &mut pos, &mut now, 0.25, 1);
        assert_eq!(mover.reversals(), 2);
        assert!(mover.velocity().y > 0.0);
        assert!(approx_eq(pos, 3.25));
    }

    #[test]
    fn test_negative_distance_flips_toward_target_then_stops() {
        let mut mover = AxisMover::new(Axis::X, 0.0, Vec3::X, -1.0, false, 0.0);
        let (mut pos, mut now) = (0.0, 0.0);
        run(&mut mover, &mut pos, &mut now, 0.25, 1);
        assert_eq!(mover.reversals(), 1);
        assert!(approx_eq(pos, -0.25));

        run(&mut mover, &mut pos, &mut now, 0.25, 10);
        assert!(mover.is_stopped());
        assert!(approx_eq(pos, -1.0));
        assert_eq!(mover.reversals(), 1);
    }

    #[test]
    fn test_negative_distance_launch_waits_interval() {
        let mut mover = AxisMover::new(Axis::X, 0.0, Vec3::X, -1.0, false, 1.0);
        let (mut pos, mut now) = (0.0, 0.0);
        run(&mut mover, &mut pos, &mut now, 0.5, 2);
        assert!(mover.is_waiting());
        assert!(approx_eq(pos, 0.0));
        run(&mut mover, &mut pos, &mut now, 0.5, 1);
        assert!(approx_eq(pos, -0.5));
    }

    #[test]
    fn test_negative_boomerang_oscillates() {
        let mut mover = AxisMover::new(Axis::X, 0.0, Vec3::X, -1.0, true, 0.0);
        let (mut pos, mut now) = (0.0, 0.0);
        let mut min_seen: f32 = 0.0;
        let mut max_seen: f32 = 0.0;
        for _ in 0..40 {
            run(&mut mover, &mut pos, &mut now, 0.25, 1);
            min_seen = min_seen.min(pos);
            max_seen = max_seen.max(pos);
        }
        assert!(approx_eq(min_seen, -1.0));
        assert!(approx_eq(max_seen, 0.0));
        assert!(mover.reversals() > 3);
    }

    #[test]
    fn test_degenerate_distance_never_moves() {
        let mut mover = AxisMover::new(Axis::X, 5.0, Vec3::X * 3.0, 0.0, true, 0.0);
        let (mut pos, mut now) = (5.0, 0.0);
        run(&mut mover, &mut pos, &mut now, 0.1, 20);
        assert_eq!(pos, 5.0);
        assert!(mover.is_stopped());
    }

    #[test]
    fn test_large_step_overshoot_still_reverses() {
        // a tick longer than the whole range must not run away
        let mut mover = AxisMover::new(Axis::X, 0.0, Vec3::X * 4.0, 1.0, true, 0.0);
        let (mut pos, mut now) = (0.0, 0.0);
        for _ in 0..20 {
            run(&mut mover, &mut pos, &mut now, 0.5, 1);
            assert!(pos >= -2.0 && pos <= 3.0, "ran away to {pos}");
        }
    }
}
