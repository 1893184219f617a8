//! Game state transition event and observer.
//!
//! Systems request a change of [`GameStates`] by updating [`NextGameState`].
//! At the start of the next frame
//! [`check_pending_state`](crate::systems::gamestate::check_pending_state)
//! emits a [`GameStateChangedEvent`], and the observer in this module applies
//! the transition to [`GameState`] and runs the enter hook stored in
//! [`SystemsStore`].
//!
//! This decouples the intent to change state (a timer firing, the restart-test
//! key) from rebuilding the level, which must never happen in the middle of an
//! update.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::{ENTER_LEVEL, SystemsStore};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// Emitting this event causes [`observe_gamestate_change_event`] to read
/// [`NextGameState`]. If it contains [`Pending`], the observer updates the
/// authoritative [`GameState`], runs the enter hook, and clears the pending
/// value; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], then:
///   - logs the exit of the previous state
///   - runs the enter hook of the new state
///   - resets [`NextGameState`] to [`Unchanged`]
/// - If any required resource is missing, logs a diagnostic and returns.
///
/// Entering [`GameStates::Playing`] runs the system stored under
/// [`ENTER_LEVEL`], which rebuilds every level object. This is how a level
/// restart happens, whether it was requested after a win or from the
/// restart-test key.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
) {
    debug!("GameStateChangedEvent triggered");

    if let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    {
        match next_game_state.get() {
            Pending(new_state) => {
                let old_state = game_state.get();
                info!("Transitioning from {:?} to {:?}", old_state, new_state);
                game_state.set(new_state);
                next_game_state.reset();
                on_state_exit(old_state);
                on_state_enter(new_state, &mut commands, &systems_store);
            }
            Unchanged => {
                debug!("No state change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
    }
}

/// Internal: run state-specific "enter" systems for the given state.
fn on_state_enter(state: GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match state {
        GameStates::Playing => match systems_store.get(ENTER_LEVEL) {
            Some(enter_level) => commands.run_system(*enter_level),
            None => warn!("No '{}' system registered; level not rebuilt", ENTER_LEVEL),
        },
        GameStates::Won => debug!("Entered Won state"),
    }
}

/// Internal: state-specific "exit" hooks.
fn on_state_exit(state: GameStates) {
    match state {
        GameStates::Playing => debug!("Exited Playing state"),
        GameStates::Won => debug!("Exited Won state"),
    }
}
