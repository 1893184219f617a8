//! Player locomotion.
//!
//! [`locomotion_step`] turns one frame of directional input plus the engine's
//! grounded flag into a [`MotionCommand`] and updates the player's movement
//! labels. It is a pure function of its arguments so it can be exercised
//! without a world; [`locomotion_system`] is the thin ECS wrapper that feeds
//! it from [`InputState`] and writes its results as messages.
//!
//! Rules, per frame:
//! - left or right held: accelerate that way and face it (left wins when both
//!   are held)
//! - neither held: no acceleration, drag set so the body slides to a stop
//! - jump pressed while grounded: vertical velocity override and a
//!   [`Cue::Jumped`]; holding the key never jumps again
//! - airborne: `Jumping`, whatever else is held
//!
//! Cues are only produced when something changes, so a steady state emits
//! nothing frame after frame.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;

use crate::components::player::{Facing, MovementEffects, MovementState, Player, PlayerState};
use crate::components::rigidbody::{MotionCommand, RigidBody};
use crate::events::cue::Cue;
use crate::events::engine::EngineCmd;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{FrameInput, InputState};

/// Locomotion tuning, taken from [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionParams {
    pub acceleration: f32,
    pub drag: f32,
    /// Negative is up.
    pub jump_velocity: f32,
}

impl From<&GameConfig> for LocomotionParams {
    fn from(config: &GameConfig) -> Self {
        Self {
            acceleration: config.acceleration,
            drag: config.drag,
            jump_velocity: config.jump_velocity,
        }
    }
}

/// Frame-local facts the controller decides on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionInput {
    pub left: bool,
    pub right: bool,
    /// Jump key went down this frame.
    pub jump_pressed: bool,
    /// Body blocked below this frame.
    pub grounded: bool,
}

/// Upper bound of cues one step can emit.
pub const MAX_STEP_CUES: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionOutput {
    pub command: MotionCommand,
    pub cues: ArrayVec<Cue, MAX_STEP_CUES>,
}

/// Advance the locomotion controller by one frame.
pub fn locomotion_step(
    input: &LocomotionInput,
    params: &LocomotionParams,
    state: &mut PlayerState,
    effects: &mut MovementEffects,
) -> LocomotionOutput {
    let mut cues = ArrayVec::new();
    let mut command = MotionCommand::default();

    let direction = if input.left {
        Some(Facing::Left)
    } else if input.right {
        Some(Facing::Right)
    } else {
        None
    };

    match direction {
        Some(Facing::Left) => command.acceleration_x = -params.acceleration,
        Some(Facing::Right) => command.acceleration_x = params.acceleration,
        None => command.drag_x = Some(params.drag),
    }

    let jumped = input.jump_pressed && input.grounded;
    if jumped {
        command.velocity_y_override = Some(params.jump_velocity);
    }

    let movement_state = if jumped || !input.grounded {
        MovementState::Jumping
    } else if direction.is_some() {
        MovementState::Walking
    } else {
        MovementState::Idle
    };

    let facing_changed = match direction {
        Some(facing) if facing != state.facing => {
            state.facing = facing;
            cues.push(Cue::FacingChanged(facing));
            true
        }
        _ => false,
    };

    if movement_state != state.movement_state {
        state.movement_state = movement_state;
        cues.push(Cue::MovementChanged(movement_state));
    }
    state.grounded = input.grounded;

    // The walking emitter is re-aimed when the player turns around.
    let walk_dust = input.grounded && direction.is_some() && !jumped;
    if walk_dust && (!effects.walking || facing_changed) {
        cues.push(Cue::WalkDustStarted(state.facing));
    } else if !walk_dust && effects.walking {
        cues.push(Cue::WalkDustStopped);
    }
    effects.walking = walk_dust;

    let jump_dust =
        jumped || (movement_state.is_airborne() && direction.is_some() && effects.jumping);
    if jump_dust && !effects.jumping {
        cues.push(Cue::JumpDustStarted);
    } else if !jump_dust && effects.jumping {
        cues.push(Cue::JumpDustStopped);
    }
    effects.jumping = jump_dust;

    if jumped {
        cues.push(Cue::Jumped);
    }

    LocomotionOutput { command, cues }
}

/// Run [`locomotion_step`] for the player and publish the result.
///
/// The motion command is written every frame as [`EngineCmd::ApplyMotion`]
/// and mirrored onto the player's [`RigidBody`].
pub fn locomotion_system(
    input: Res<InputState>,
    frame: Res<FrameInput>,
    config: Res<GameConfig>,
    mut query: Query<(&mut PlayerState, &mut MovementEffects, &mut RigidBody), With<Player>>,
    mut cues: MessageWriter<Cue>,
    mut engine_cmds: MessageWriter<EngineCmd>,
) {
    let params = LocomotionParams::from(config.as_ref());
    for (mut state, mut effects, mut rigidbody) in query.iter_mut() {
        let step_input = LocomotionInput {
            left: input.left.active,
            right: input.right.active,
            jump_pressed: input.up.just_pressed,
            grounded: frame.grounded,
        };
        let output = locomotion_step(&step_input, &params, &mut state, &mut effects);
        rigidbody.apply(&output.command);
        engine_cmds.write(EngineCmd::ApplyMotion(output.command));
        cues.write_batch(output.cues);
    }
}
