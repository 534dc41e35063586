//! ECS components for entities.
//!
//! Pose and collision data shared by every scene entity, plus the state
//! machines that move them.
//!
//! Submodules overview:
//! - [`actuator`] – lever that hides and shows itself, switching its targets
//! - [`axismover`] – single-axis mover with pause interval and boomerang, and its timer
//! - [`axistoggletrigger`] – trigger volume that enables or disables one mover axis
//! - [`boxcollider`] – axis-aligned rectangle used for overlap tests
//! - [`group`] – tag component for grouping entities by name
//! - [`handwheel`] – use-activated wheel that tilts a traveler and flips toggles
//! - [`mapposition`] – world-space position of an entity
//! - [`multiaxismover`] – up to three independent axis movers with start delays
//! - [`presencedetector`] – trigger volume that reports whether the actor is inside
//! - [`rotation`] – rotation angle in degrees
//! - [`scroller`] – constant-speed drift that wraps back after a span
//! - [`sensor`] – turns a collider into a trigger volume tracking overlaps
//! - [`signals`] – per-entity signal storage for cross-system communication
//! - [`switchable`] – the switch contract and a plain two-state toggle
//! - [`tilttrigger`] – trigger volume that tilts a traveler
//! - [`waypointtraveler`] – loop over waypoints with waits and a tilt cycle

pub mod actuator;
pub mod axismover;
pub mod axistoggletrigger;
pub mod boxcollider;
pub mod group;
pub mod handwheel;
pub mod mapposition;
pub mod multiaxismover;
pub mod presencedetector;
pub mod rotation;
pub mod scroller;
pub mod sensor;
pub mod signals;
pub mod switchable;
pub mod tilttrigger;
pub mod waypointtraveler;
