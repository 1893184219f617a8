//! Commands sent *to* the engine collaborator.
//!
//! The core never renders, plays audio or moves bodies itself. Everything the
//! engine has to do is written as an [`EngineCmd`] into the
//! `Messages<EngineCmd>` queue and drained by the engine binding through
//! [`GameSession::drain_commands`](crate::game::GameSession::drain_commands),
//! in the order the commands were written.

use bevy_ecs::message::Message;
use glam::Vec2;

use crate::components::collectible::EngineHandle;
use crate::components::player::Facing;
use crate::components::rigidbody::MotionCommand;

/// Particle emitters that follow the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emitter {
    /// Dust trail while walking.
    Walking,
    /// Puff that follows a jump.
    Jumping,
}

/// Bitmap text objects the HUD owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    /// Fixed-to-screen score counter.
    Score,
    /// Hint shown next to the checkpoint.
    Hint,
    /// Large win banner.
    Win,
}

/// Static camera-follow setup, sent once when the level is entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    /// Camera bounds (map size in pixels).
    pub bounds: Vec2,
    pub lerp: Vec2,
    pub deadzone: Vec2,
    pub zoom: f32,
    pub round_pixels: bool,
}

#[derive(Message, Debug, Clone, PartialEq)]
pub enum EngineCmd {
    PlaySound {
        id: String,
        volume: f32,
    },
    StartEmitter {
        emitter: Emitter,
        /// Follow offset relative to the player sprite.
        offset: Vec2,
        /// Particle speed override, if any.
        speed: Option<Vec2>,
    },
    StopEmitter {
        emitter: Emitter,
    },
    /// One-shot particle burst at a world position.
    BurstParticles {
        effect: String,
        at: Vec2,
        count: u32,
    },
    SetText {
        slot: TextSlot,
        text: String,
    },
    PlayAnimation {
        key: String,
    },
    SetFacing(Facing),
    ApplyMotion(MotionCommand),
    DestroyEntity(EngineHandle),
    /// Enable or disable the collider between the player and the lock blocks.
    SetBlockCollider {
        enabled: bool,
    },
    ConfigureCamera(CameraFollow),
    SetGravity {
        y: f32,
    },
    SetPhysicsDebug {
        enabled: bool,
    },
    /// Tear down and rebuild the engine-side scene objects.
    RestartLevel,
}
