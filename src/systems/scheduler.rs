//! Timed event systems.
//!
//! - [`poll_timed_events`] – takes due events out of the
//!   [`TimedScheduler`] and triggers a [`TimerEvent`] for each
//! - [`timer_observer`] – applies the expired action
//!
//! # System Flow
//!
//! Each frame, right after any pending state transition has been applied:
//!
//! 1. `poll_timed_events` asks the scheduler for everything due at
//!    [`WorldTime::elapsed`], earliest first
//! 2. `timer_observer` receives one event per expired action:
//!    - `ClearHint` emits [`Cue::HintCleared`]
//!    - `RestartLevel` requests the `Playing` state, which rebuilds the level
//!      at the start of the next frame

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::events::cue::Cue;
use crate::events::timer::TimerEvent;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::scheduler::{TimedAction, TimedScheduler};
use crate::resources::worldtime::WorldTime;

/// Trigger a [`TimerEvent`] for every scheduled action that came due.
pub fn poll_timed_events(
    world_time: Res<WorldTime>,
    mut scheduler: ResMut<TimedScheduler>,
    mut commands: Commands,
) {
    for event in scheduler.poll(world_time.elapsed) {
        debug!(
            "{:?} due at {:.3}s fired at {:.3}s",
            event.action, event.fire_at, world_time.elapsed
        );
        commands.trigger(TimerEvent {
            action: event.action,
        });
    }
}

/// Observer that applies expired timed actions.
pub fn timer_observer(
    trigger: On<TimerEvent>,
    mut next_state: ResMut<NextGameState>,
    mut cues: MessageWriter<Cue>,
) {
    match trigger.event().action {
        TimedAction::ClearHint => {
            cues.write(Cue::HintCleared);
        }
        TimedAction::RestartLevel => {
            info!("Restarting level");
            next_state.set(GameStates::Playing);
        }
    }
}
