//! Delayed, cancellable actions.
//!
//! The [`TimedScheduler`] resource holds [`TimedEvent`] records keyed on the
//! session's elapsed time ([`WorldTime::elapsed`](super::worldtime::WorldTime)).
//! Nothing fires on its own: [`poll_timed_events`](crate::systems::scheduler::poll_timed_events)
//! asks for due events at the start of each frame, so an expired action is
//! always applied between two updates, never during one.
//!
//! At most one event per [`TimedAction`] is outstanding:
//! - [`TimedAction::ClearHint`] is replaced when scheduled again, which
//!   restarts its delay
//! - [`TimedAction::RestartLevel`] keeps the first request; later ones are
//!   refused

use bevy_ecs::prelude::Resource;
use smallvec::SmallVec;

/// Actions that can be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimedAction {
    /// Blank the checkpoint hint text.
    ClearHint,
    /// Restart the level after a win.
    RestartLevel,
}

/// A scheduled one-shot action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    /// Elapsed session time, in seconds, at which the action fires.
    pub fire_at: f32,
    pub action: TimedAction,
    pub cancelled: bool,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct TimedScheduler {
    events: SmallVec<[TimedEvent; 2]>,
}

impl TimedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` to fire `delay` seconds after `now`.
    ///
    /// Returns `false` when the request was refused because a
    /// non-replaceable event of the same kind is already pending.
    pub fn schedule(&mut self, action: TimedAction, delay: f32, now: f32) -> bool {
        match action {
            TimedAction::ClearHint => {
                self.cancel_pending(action);
            }
            TimedAction::RestartLevel => {
                if self.is_pending(action) {
                    return false;
                }
            }
        }
        self.events.push(TimedEvent {
            fire_at: now + delay.max(0.0),
            action,
            cancelled: false,
        });
        true
    }

    /// Invalidate every pending event of kind `action`.
    ///
    /// Returns how many were cancelled.
    pub fn cancel_pending(&mut self, action: TimedAction) -> usize {
        let mut cancelled = 0;
        for event in self
            .events
            .iter_mut()
            .filter(|e| e.action == action && !e.cancelled)
        {
            event.cancelled = true;
            cancelled += 1;
        }
        cancelled
    }

    pub fn is_pending(&self, action: TimedAction) -> bool {
        self.fire_at(action).is_some()
    }

    /// Fire time of the live event of kind `action`, if any.
    pub fn fire_at(&self, action: TimedAction) -> Option<f32> {
        self.events
            .iter()
            .find(|e| e.action == action && !e.cancelled)
            .map(|e| e.fire_at)
    }

    /// Take every live event due at `now`, earliest first.
    ///
    /// Due events and cancelled records are forgotten; everything else stays
    /// queued.
    pub fn poll(&mut self, now: f32) -> SmallVec<[TimedEvent; 2]> {
        let mut due: SmallVec<[TimedEvent; 2]> = self
            .events
            .iter()
            .filter(|e| !e.cancelled && e.fire_at <= now)
            .copied()
            .collect();
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        self.events.retain(|e| !e.cancelled && e.fire_at > now);
        due
    }

    /// Drop everything, including pending restarts.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of live (not cancelled) events.
    pub fn len(&self) -> usize {
        self.events.iter().filter(|e| !e.cancelled).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
