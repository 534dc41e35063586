//! Event and message types.
//!
//! Submodules:
//! - [`cue`] – buffered notification that a cue started on a pool voice
//! - [`trigger`] – sensor enter/stay/exit edges, delivered to observers
pub mod cue;
pub mod trigger;
