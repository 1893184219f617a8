//! Player avatar components.
//!
//! The player entity carries:
//! - [`Player`] – marker used to find the avatar in queries
//! - [`PlayerState`] – score plus the locomotion labels (facing, grounded,
//!   movement state)
//! - [`MovementEffects`] – which locomotion particle emitters are running, so
//!   start/stop cues are only emitted on transitions
//! - [`RigidBody`](super::rigidbody::RigidBody) and
//!   [`MapPosition`](super::mapposition::MapPosition)

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Marker for the single player avatar.
#[derive(Component, Clone, Copy, Debug)]
pub struct Player;

/// Horizontal direction the sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    /// The avatar spawns flipped to face right.
    #[default]
    Right,
}

/// Discrete movement label used to pick animations and dust effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementState {
    #[default]
    Idle,
    Walking,
    Jumping,
}

impl MovementState {
    /// Animation key the engine plays for this state.
    pub fn animation(&self) -> &'static str {
        match self {
            MovementState::Idle => "idle",
            MovementState::Walking => "walk",
            MovementState::Jumping => "jump",
        }
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self, MovementState::Jumping)
    }
}

/// Persistent per-level player state.
///
/// `score` is only touched by the progression observer; the remaining fields
/// only by the locomotion system.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerState {
    pub score: u32,
    pub facing: Facing,
    /// Resting on a solid surface this frame (blocked below, not merely
    /// touching something).
    pub grounded: bool,
    pub movement_state: MovementState,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Running state of the locomotion particle emitters.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementEffects {
    /// Dust trail while walking on the ground.
    pub walking: bool,
    /// Burst that follows a jump.
    pub jumping: bool,
}
