//! Progression state resources.
//!
//! [`GameState`] is the authoritative progression phase. Winning switches it
//! to [`GameStates::Won`] immediately, so later overlaps in the same frame are
//! already ignored. Going back to [`GameStates::Playing`] is never immediate:
//! it is requested through [`NextGameState`] and applied at the start of the
//! following frame by
//! [`observe_gamestate_change_event`](crate::events::gamestate::observe_gamestate_change_event),
//! which rebuilds the level.

use bevy_ecs::prelude::Resource;

/// Discrete progression phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    Playing,
    /// Terminal until the level restarts.
    Won,
}

/// Representation of a requested next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current progression phase.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::Playing`].
    pub fn new() -> Self {
        Self::default()
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> GameStates {
        self.current
    }
    /// Update the current state immediately.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
    pub fn is_playing(&self) -> bool {
        self.current == GameStates::Playing
    }
}

/// Intent to change to a new progression state at the next safe point.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    /// Create a new value initialized to [`NextGameStates::Unchanged`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current transition request.
    pub fn get(&self) -> NextGameStates {
        self.next
    }

    /// Request a transition to `next` by marking it as pending.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.next, NextGameStates::Pending(_))
    }

    /// Reset to [`NextGameStates::Unchanged`].
    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
