//! Semantic presentation cues.
//!
//! Gameplay systems say *what happened* by writing a [`Cue`]; the dispatcher in
//! [`crate::systems::cues`] decides which sounds, emitters and texts that
//! means for the engine.

use bevy_ecs::message::Message;
use glam::Vec2;

use crate::components::player::{Facing, MovementState};

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    WalkDustStarted(Facing),
    WalkDustStopped,
    JumpDustStarted,
    JumpDustStopped,
    Jumped,
    MovementChanged(MovementState),
    FacingChanged(Facing),
    /// A coin was picked up at the given position.
    CoinCollected(Vec2),
    ScoreChanged { score: u32, target: u32 },
    KeyCollected,
    BlockUnlocked,
    Won,
    HintShown,
    HintCleared,
}
