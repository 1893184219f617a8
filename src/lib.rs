//! gemquest gameplay library.
//!
//! This module exposes the gameplay core's ECS components, resources, systems,
//! and events, the [`game::GameSession`] an engine binding drives, and the
//! headless [`replay`] driver used by the binary and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod replay;
pub mod resources;
pub mod systems;
