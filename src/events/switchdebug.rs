//! Event and observer to toggle physics debug drawing.
//!
//! Emitting a [`SwitchDebugEvent`] flips the presence of the [`DebugMode`]
//! resource and tells the engine to show or hide its physics debug overlay.
//! The restart-test key only restarts the level while debug mode is on.
use crate::events::engine::EngineCmd;
use crate::resources::debugmode::DebugMode;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// Event used to toggle the [`DebugMode`] resource on/off.
///
/// This carries no data; the observer simply switches the presence of the
/// resource.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

/// Observer that toggles the [`DebugMode`] resource.
///
/// - If `DebugMode` is present, it is removed (debug disabled).
/// - If absent, it is inserted (debug enabled).
///
/// Either way a [`EngineCmd::SetPhysicsDebug`] follows so the engine clears or
/// draws its debug graphics.
pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
    mut engine_cmds: MessageWriter<EngineCmd>,
) {
    let enabled = debug_mode.is_none();
    if enabled {
        commands.insert_resource(DebugMode {});
    } else {
        commands.remove_resource::<DebugMode>();
    }
    info!("Debug mode {}", if enabled { "enabled" } else { "disabled" });
    engine_cmds.write(EngineCmd::SetPhysicsDebug { enabled });
}
