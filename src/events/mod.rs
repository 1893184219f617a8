//! Event and message types, and the observers that react to them.
//!
//! Events are immediate and observer-driven; messages are buffered queues read
//! by systems or drained by the engine binding.
//!
//! Submodules:
//! - [`collision`] – raw and resolved overlap reports, typed progression events
//! - [`cue`] – semantic presentation cues written by gameplay systems
//! - [`engine`] – commands for the engine collaborator
//! - [`gamestate`] – state transition notifications for the level flow
//! - [`switchdebug`] – toggle physics debug drawing on/off
//! - [`timer`] – expiry of scheduled actions
pub mod collision;
pub mod cue;
pub mod engine;
pub mod gamestate;
pub mod switchdebug;
pub mod timer;
