//! Looping waypoint traveler with an interruptible tilt.
//!
//! The traveler moves its owner through an ordered, cyclic list of
//! waypoints. Every arrival is snapped exactly onto the waypoint and followed
//! by a wait of `wait_time` seconds before heading for the next one.
//!
//! A tilt request (from an actuator switching it, a tilt trigger or a
//! handwheel) takes priority over both travelling and waiting: the owner
//! rotates away from its initial orientation by `target_rotation` degrees,
//! rotates back, has its rotation restored exactly and then carries on from
//! wherever it was suspended. Waypoint progress is frozen for the whole tilt.
//!
//! Only the traveler clears the tilt request. Other parties may set it
//! through [`request_tilt`](WaypointTraveler::request_tilt) or
//! [`Switchable::switch`].

use bevy_ecs::prelude::Component;
use glam::Vec3;
use smallvec::SmallVec;

use super::switchable::Switchable;
use crate::geometry::{segment_direction, snap_to_target};

/// The leg currently travelled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TravelSegment {
    pub previous_target: Vec3,
    pub current_target: Vec3,
    pub direction: Vec3,
}

impl TravelSegment {
    pub fn new(previous_target: Vec3, current_target: Vec3) -> Self {
        Self {
            previous_target,
            current_target,
            direction: segment_direction(previous_target, current_target),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltState {
    pub in_progress: bool,
    pub is_tilted: bool,
    pub degrees_out: f32,
    pub degrees_back: f32,
}

/// Observable state of a [`WaypointTraveler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelPhase {
    Traveling,
    Waiting,
    TiltingOut,
    TiltingBack,
}

/// Discrete transitions reported by [`WaypointTraveler::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelerEvent {
    Arrived { index: usize },
    Departed { index: usize },
    TiltStarted,
    TiltPeaked,
    TiltFinished,
}

pub type TravelerEvents = SmallVec<[TravelerEvent; 2]>;

#[derive(Component, Clone, Debug)]
pub struct WaypointTraveler {
    pub waypoints: Vec<Vec3>,
    /// Units per second along the current segment.
    pub move_speed: f32,
    /// Seconds spent at each waypoint.
    pub wait_time: f32,
    /// Degrees per second.
    pub tilt_speed: f32,
    /// Signed tilt amplitude in degrees.
    pub target_rotation: f32,
    index: usize,
    segment: TravelSegment,
    waiting: bool,
    resume_at: f32,
    should_tilt: bool,
    tilt: TiltState,
    initial_rotation: f32,
    switching: bool,
    attached: bool,
    completed_waits: u64,
}

impl Default for WaypointTraveler {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl WaypointTraveler {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self {
            waypoints,
            move_speed: 1.0,
            wait_time: 3.0,
            tilt_speed: 0.1,
            target_rotation: 0.0,
            index: 0,
            segment: TravelSegment::default(),
            waiting: false,
            resume_at: 0.0,
            should_tilt: false,
            tilt: TiltState::default(),
            initial_rotation: 0.0,
            switching: false,
            attached: false,
            completed_waits: 0,
        }
    }

    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    pub fn with_wait_time(mut self, wait_time: f32) -> Self {
        self.wait_time = wait_time;
        self
    }

    pub fn with_tilt(mut self, tilt_speed: f32, target_rotation: f32) -> Self {
        self.tilt_speed = tilt_speed;
        self.target_rotation = target_rotation;
        self
    }

    /// Capture the starting pose. Only the first call has any effect.
    ///
    /// An empty waypoint list gets a single waypoint at `position`, which
    /// leaves the owner parked there.
    pub fn attach(&mut self, position: Vec3, rotation: f32) {
        if self.attached {
            return;
        }
        if self.waypoints.is_empty() {
            self.waypoints.push(position);
        }
        self.index = 0;
        self.segment = TravelSegment::new(position, self.waypoints[0]);
        self.initial_rotation = rotation;
        self.attached = true;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Ask for a tilt without marking the traveler busy.
    pub fn request_tilt(&mut self) {
        self.should_tilt = true;
    }

    pub fn should_tilt(&self) -> bool {
        self.should_tilt
    }

    pub fn is_tilted(&self) -> bool {
        self.tilt.is_tilted
    }

    pub fn tilt_state(&self) -> &TiltState {
        &self.tilt
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn segment(&self) -> &TravelSegment {
        &self.segment
    }

    pub fn initial_rotation(&self) -> f32 {
        self.initial_rotation
    }

    /// Number of wait phases that ended with a departure.
    pub fn completed_waits(&self) -> u64 {
        self.completed_waits
    }

    pub fn resume_at(&self) -> Option<f32> {
        self.waiting.then_some(self.resume_at)
    }

    pub fn phase(&self) -> TravelPhase {
        if self.should_tilt {
            if self.tilt.is_tilted {
                TravelPhase::TiltingBack
            } else {
                TravelPhase::TiltingOut
            }
        } else if self.waiting {
            TravelPhase::Waiting
        } else {
            TravelPhase::Traveling
        }
    }

    /// Run one tick against the owner's position and rotation.
    pub fn step(
        &mut self,
        position: &mut Vec3,
        rotation: &mut f32,
        now: f32,
        dt: f32,
    ) -> TravelerEvents {
        let mut events = TravelerEvents::new();
        if !self.attached {
            return events;
        }
        if self.should_tilt {
            self.tilt(rotation, dt, &mut events);
        } else if self.waiting {
            self.start_check(now, &mut events);
        } else {
            self.travel(position, now, dt, &mut events);
        }
        events
    }

    fn start_check(&mut self, now: f32, events: &mut TravelerEvents) {
        if now < self.resume_at {
            return;
        }
        self.waiting = false;
        self.completed_waits += 1;
        self.index = (self.index + 1) % self.waypoints.len();
        self.segment = TravelSegment::new(self.segment.current_target, self.waypoints[self.index]);
        events.push(TravelerEvent::Departed { index: self.index });
    }

    fn travel(&mut self, position: &mut Vec3, now: f32, dt: f32, events: &mut TravelerEvents) {
        *position += self.segment.direction * self.move_speed * dt;
        if snap_to_target(position, self.segment.current_target, self.segment.direction) {
            self.waiting = true;
            self.resume_at = now + self.wait_time;
            events.push(TravelerEvent::Arrived { index: self.index });
        }
    }

    fn tilt(&mut self, rotation: &mut f32, dt: f32, events: &mut TravelerEvents) {
        let amplitude = self.target_rotation.abs();
        let step = self.tilt_speed.abs() * dt;
        let sign = if self.target_rotation < 0.0 { -1.0 } else { 1.0 };

        if !self.tilt.in_progress {
            self.tilt.in_progress = true;
            events.push(TravelerEvent::TiltStarted);
        }

        if !self.tilt.is_tilted {
            if self.tilt.degrees_out < amplitude {
                *rotation += sign * step;
                self.tilt.degrees_out += step;
                return;
            }
            // peak reached, start back on this same tick
            self.tilt.degrees_out = 0.0;
            self.tilt.is_tilted = true;
            events.push(TravelerEvent::TiltPeaked);
        }

        if self.tilt.degrees_back < amplitude {
            *rotation -= sign * step;
            self.tilt.degrees_back += step;
            return;
        }
        self.tilt = TiltState::default();
        *rotation = self.initial_rotation;
        self.should_tilt = false;
        self.switching = false;
        events.push(TravelerEvent::TiltFinished);
    }
}

impl Switchable for WaypointTraveler {
    fn is_switching(&self) -> bool {
        self.switching
    }

    /// Switching on starts a tilt. Switching off only drops the busy flag;
    /// the pending tilt still runs to completion.
    fn switch(&mut self, activate: bool) {
        self.switching = activate;
        if activate {
            self.should_tilt = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    struct Rig {
        traveler: WaypointTraveler,
        pos: Vec3,
        rot: f32,
        now: f32,
    }

    impl Rig {
        fn new(traveler: WaypointTraveler, pos: Vec3, rot: f32) -> Self {
            let mut traveler = traveler;
            traveler.attach(pos, rot);
            Self {
                traveler,
                pos,
                rot,
                now: 0.0,
            }
        }

        fn tick(&mut self, dt: f32) -> TravelerEvents {
            self.now += dt;
            self.traveler.step(&mut self.pos, &mut self.rot, self.now, dt)
        }

        fn run(&mut self, dt: f32, ticks: usize) {
            for _ in 0..ticks {
                self.tick(dt);
            }
        }
    }

    #[test]
    fn test_empty_waypoints_self_heal() {
        let mut rig = Rig::new(WaypointTraveler::default(), Vec3::new(2.0, 3.0, 0.0), 0.0);
        assert_eq!(rig.traveler.waypoints, vec![Vec3::new(2.0, 3.0, 0.0)]);
        let events = rig.tick(0.1);
        assert_eq!(events.as_slice(), &[TravelerEvent::Arrived { index: 0 }]);
        assert_eq!(rig.pos, Vec3::new(2.0, 3.0, 0.0));
        rig.run(0.1, 100);
        assert_eq!(rig.pos, Vec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn test_travels_and_snaps_onto_waypoint() {
        let traveler = WaypointTraveler::new(vec![Vec3::new(1.0, 0.0, 0.0)]).with_move_speed(3.0);
        let mut rig = Rig::new(traveler, Vec3::ZERO, 0.0);
        rig.tick(0.25);
        assert!(approx_eq(rig.pos.x, 0.75));
        let events = rig.tick(0.25);
        assert_eq!(rig.pos, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(events.as_slice(), &[TravelerEvent::Arrived { index: 0 }]);
        assert_eq!(rig.traveler.phase(), TravelPhase::Waiting);
        assert_eq!(rig.traveler.resume_at(), Some(0.5 + 3.0));
    }

    #[test]
    fn test_wait_then_departs_to_next() {
        let traveler = WaypointTraveler::new(vec![Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO])
            .with_move_speed(4.0)
            .with_wait_time(1.0);
        let mut rig = Rig::new(traveler, Vec3::ZERO, 0.0);
        rig.tick(0.25); // arrives at t=0.25, resume at 1.25
        rig.run(0.25, 3);
        assert_eq!(rig.traveler.phase(), TravelPhase::Waiting);
        let events = rig.tick(0.25);
        assert_eq!(events.as_slice(), &[TravelerEvent::Departed { index: 1 }]);
        assert_eq!(rig.traveler.segment().direction, Vec3::NEG_X);
        // departure tick does not move
        assert_eq!(rig.pos, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_wait_advances_next_tick() {
        let traveler = WaypointTraveler::new(vec![Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO])
            .with_move_speed(4.0)
            .with_wait_time(0.0);
        let mut rig = Rig::new(traveler, Vec3::ZERO, 0.0);
        rig.tick(0.25);
        let events = rig.tick(0.25);
        assert_eq!(events.as_slice(), &[TravelerEvent::Departed { index: 1 }]);
    }

    #[test]
    fn test_index_wraps_after_last_waypoint() {
        let points = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let traveler = WaypointTraveler::new(points)
            .with_move_speed(8.0)
            .with_wait_time(0.0);
        let mut rig = Rig::new(traveler, Vec3::ZERO, 0.0);
        while rig.traveler.completed_waits() < 3 {
            rig.tick(0.125);
            assert!(rig.now < 100.0);
        }
        assert_eq!(rig.traveler.current_index(), 0);
        // segment from the last waypoint back to the first
        assert_eq!(rig.traveler.segment().previous_target, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_diagonal_overshoot_snaps_each_axis() {
        let traveler = WaypointTraveler::new(vec![Vec3::new(1.0, 2.0, 0.0)]).with_move_speed(10.0);
        let mut rig = Rig::new(traveler, Vec3::ZERO, 0.0);
        let events = rig.tick(1.0);
        assert_eq!(rig.pos, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(events.as_slice(), &[TravelerEvent::Arrived { index: 0 }]);
    }

    #[test]
    fn test_tilt_out_and_back_restores_rotation() {
        let traveler = WaypointTraveler::new(vec![Vec3::new(10.0, 0.0, 0.0)])
            .with_move_speed(1.0)
            .with_tilt(4.0, 1.0);
        let mut rig = Rig::new(traveler, Vec3::ZERO, 15.0);
        rig.traveler.request_tilt();

        let events = rig.tick(0.125);
        assert_eq!(events.as_slice(), &[TravelerEvent::TiltStarted]);
        assert!(approx_eq(rig.rot, 15.5));
        assert_eq!(rig.traveler.phase(), TravelPhase::TiltingOut);

        rig.tick(0.125);
        assert!(approx_eq(rig.rot, 16.0));

        // peak detected and first back step on the same tick
        let events = rig.tick(0.125);
        assert_eq!(events.as_slice(), &[TravelerEvent::TiltPeaked]);
        assert!(approx_eq(rig.rot, 15.5));
        assert_eq!(rig.traveler.phase(), TravelPhase::TiltingBack);
        assert!(rig.traveler.is_tilted());

        rig.tick(0.125);
        let events = rig.tick(0.125);
        assert_eq!(events.as_slice(), &[TravelerEvent::TiltFinished]);
        assert_eq!(rig.rot, 15.0);
        assert!(!rig.traveler.should_tilt());
        assert!(!rig.traveler.is_tilted());
        assert_eq!(rig.traveler.phase(), TravelPhase::Traveling);
        // no travel happened while tilting
        assert_eq!(rig.pos, Vec3::ZERO);
    }

    #[test]
    fn test_negative_target_rotation_tilts_clockwise() {
        let traveler = WaypointTraveler::default().with_tilt(8.0, -2.0);
        let mut rig = Rig::new(traveler, Vec3::ZERO, 0.0);
        rig.traveler.request_tilt();
        rig.tick(0.125);
        assert!(approx_eq(rig.rot, -1.0));
    }

    #[test]
    fn test_zero_target_rotation_finishes_in_one_tick() {
        let mut rig = Rig::new(WaypointTraveler::default(), Vec3::ZERO, 5.0);
        rig.traveler.request_tilt();
        let events = rig.tick(0.1);
        assert_eq!(
            events.as_slice(),
            &[
                TravelerEvent::TiltStarted,
                TravelerEvent::TiltPeaked,
                TravelerEvent::TiltFinished
            ][..]
        );
        assert_eq!(rig.rot, 5.0);
    }

    #[test]
    fn test_tilt_freezes_waiting() {
        let traveler = WaypointTraveler::new(vec![Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO])
            .with_move_speed(4.0)
            .with_wait_time(0.5)
            .with_tilt(1.0, 1.0);
        let mut rig = Rig::new(traveler, Vec3::ZERO, 0.0);
        rig.tick(0.25);
        assert_eq!(rig.traveler.phase(), TravelPhase::Waiting);
        rig.traveler.request_tilt();
        // tilt lasts well beyond the wait deadline
        for _ in 0..8 {
            rig.tick(0.25);
            assert_eq!(rig.traveler.current_index(), 0);
        }
        while rig.traveler.should_tilt() {
            rig.tick(0.25);
            assert_eq!(rig.traveler.current_index(), 0);
        }
        // resumes waiting and departs on the following tick
        assert_eq!(rig.traveler.phase(), TravelPhase::Waiting);
        let events = rig.tick(0.25);
        assert_eq!(events.as_slice(), &[TravelerEvent::Departed { index: 1 }]);
    }

    #[test]
    fn test_switch_marks_busy_until_tilt_done() {
        let mut traveler = WaypointTraveler::default().with_tilt(8.0, 1.0);
        traveler.attach(Vec3::ZERO, 0.0);
        traveler.switch(true);
        assert!(traveler.is_switching());
        assert!(traveler.should_tilt());

        let (mut pos, mut rot) = (Vec3::ZERO, 0.0);
        let mut now = 0.0;
        while traveler.should_tilt() {
            now += 0.125;
            traveler.step(&mut pos, &mut rot, now, 0.125);
        }
        assert!(!traveler.is_switching());
    }

    #[test]
    fn test_switch_off_keeps_pending_tilt() {
        let mut traveler = WaypointTraveler::default();
        traveler.switch(true);
        traveler.switch(false);
        assert!(!traveler.is_switching());
        assert!(traveler.should_tilt());
    }

    #[test]
    fn test_step_before_attach_is_noop() {
        let mut traveler = WaypointTraveler::new(vec![Vec3::X]);
        let (mut pos, mut rot) = (Vec3::ZERO, 0.0);
        assert!(traveler.step(&mut pos, &mut rot, 1.0, 1.0).is_empty());
        assert_eq!(pos, Vec3::ZERO);
    }
}
