//! Input systems.
//!
//! - [`update_input_state`] folds the engine's [`FrameInput`] report into
//!   [`InputState`] and mirrors the reported body state onto the player.
//! - Debug keys act on their just-pressed edge: the debug key toggles debug
//!   mode via [`SwitchDebugEvent`], the restart-test key logs the player's
//!   position and, with debug mode on, requests a level restart.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::debugmode::DebugMode;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::{FrameInput, InputState};

/// Update the `InputState` resource from this frame's engine report.
pub fn update_input_state(
    frame: Res<FrameInput>,
    mut input: ResMut<InputState>,
    mut player: Query<(&mut RigidBody, &mut MapPosition), With<Player>>,
    debug_mode: Option<Res<DebugMode>>,
    mut next_state: ResMut<NextGameState>,
    mut commands: Commands,
) {
    input.apply(&frame);

    // The engine owns the body; keep our mirror in sync.
    for (mut rigidbody, mut position) in player.iter_mut() {
        rigidbody.velocity = frame.velocity;
        if let Some(pos) = frame.position {
            position.pos = pos;
        }
    }

    if input.debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }

    if input.restart.just_pressed {
        if let Ok((_, position)) = player.single() {
            debug!("Player position: ({}, {})", position.pos.x, position.pos.y);
        }
        if debug_mode.is_some() {
            info!("Restart requested from the debug key");
            next_state.set(GameStates::Playing);
        }
    }
}
