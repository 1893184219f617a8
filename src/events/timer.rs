//! Timed event expiration.
//!
//! When a [`TimedEvent`](crate::resources::scheduler::TimedEvent) registered in
//! the [`TimedScheduler`](crate::resources::scheduler::TimedScheduler) comes due,
//! [`poll_timed_events`](crate::systems::scheduler::poll_timed_events) triggers
//! a [`TimerEvent`] carrying its action. The observer
//! [`timer_observer`](crate::systems::scheduler::timer_observer) applies it.
//!
//! # Related
//!
//! - [`crate::resources::scheduler`] – the pending event store
//! - [`crate::systems::scheduler`] – polling and applying expired events

use bevy_ecs::prelude::*;

use crate::resources::scheduler::TimedAction;

/// Event emitted when a scheduled action expires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub action: TimedAction,
}
