//! ECS resources made available to systems.
//!
//! Overview
//! - `cuepool` – fixed set of cue voices shared by every controller
//! - `input` – per-tick state of the use button
//! - `jitter` – seeded random draws for per-entity parameter jitter
//! - `scenelayout` – JSON description of a scene and its controllers
//! - `simconfig` – INI-backed settings for a simulation session
//! - `worldtime` – simulation time and delta
pub mod cuepool;
pub mod input;
pub mod jitter;
pub mod scenelayout;
pub mod simconfig;
pub mod worldtime;
