//! Simulation systems.
//!
//! Submodules overview
//! - [`actuator`] – use input and hide/show motion for actuators, switching their targets
//! - [`cue`] – start cues on the pool, free finished voices, rotate cue messages
//! - [`handwheel`] – turn handwheels on use
//! - [`input`] – feed the use button into [`crate::resources::input::InputState`]
//! - [`multiaxismover`] – step multi-axis movers and publish their axis flags
//! - [`scroller`] – advance scrolling backdrops
//! - [`sensor`] – detect sensor overlaps and trigger enter/stay/exit events
//! - [`time`] – update simulation time and delta
//! - [`toggle`] – settle switching toggles
//! - [`triggers`] – observers reacting to sensor events
//! - [`waypointtraveler`] – step waypoint travelers and their tilt cycles
pub mod actuator;
pub mod cue;
pub mod handwheel;
pub mod input;
pub mod multiaxismover;
pub mod scroller;
pub mod sensor;
pub mod time;
pub mod toggle;
pub mod triggers;
pub mod waypointtraveler;
