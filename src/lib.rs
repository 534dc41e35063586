//! Stagehand library.
//!
//! Timed kinematic controllers for the moving parts of a 2D platformer
//! scene: axis movers, waypoint travelers that can tilt, hide/show
//! actuators and the trigger volumes that drive them. Everything runs on
//! `bevy_ecs`; the binary in `main.rs` is a headless shell around
//! [`game`].

pub mod components;
pub mod events;
pub mod game;
pub mod geometry;
pub mod resources;
pub mod systems;
