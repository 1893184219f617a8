//! Gameplay systems and observers.
//!
//! Submodules overview
//! - [`cues`] – map presentation cues to engine commands
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`input`] – fold the engine's frame report into [`crate::resources::input::InputState`]
//! - [`level`] – spawn (and respawn) the level from its layout
//! - [`locomotion`] – turn input and grounded status into motion commands
//! - [`progression`] – score, lock-and-key and win rules
//! - [`router`] – resolve and classify overlap reports
//! - [`scheduler`] – fire expired timed actions
//! - [`time`] – update session time and delta

pub mod cues;
pub mod gamestate;
pub mod input;
pub mod level;
pub mod locomotion;
pub mod progression;
pub mod router;
pub mod scheduler;
pub mod time;
