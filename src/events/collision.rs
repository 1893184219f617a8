//! Overlap event types.
//!
//! The engine reports overlaps between the player body and level objects
//! through [`GameSession::report_overlap`](crate::game::GameSession::report_overlap),
//! which resolves engine handles and triggers an [`OverlapEvent`]. The router
//! observer ([`crate::systems::router::route_overlap_observer`]) classifies it
//! and triggers the matching [`ProgressionEvent`], which the progression
//! observer turns into score, lock and win changes.
//!
//! Both are immediate [`Event`]s: every overlap is fully processed before the
//! next one is delivered, in delivery order.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw overlap notification as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOverlap {
    /// Engine handle of the first body; expected to be the player.
    pub player: u32,
    /// Engine handle of the other body.
    pub other: u32,
    /// Group name of the other body (`"coin"`, `"key"`, `"block"`,
    /// `"checkpoint"`).
    pub other_kind: String,
}

impl RawOverlap {
    pub fn new(player: u32, other: u32, other_kind: impl Into<String>) -> Self {
        Self {
            player,
            other,
            other_kind: other_kind.into(),
        }
    }
}

/// Overlap between the player and another entity, handles already resolved.
#[derive(Event, Debug, Clone)]
pub struct OverlapEvent {
    pub player: Entity,
    pub other: Entity,
    /// Group name as reported by the engine; classified by the router.
    pub other_kind: String,
}

/// Typed overlap forwarded to the progression state machine.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionEvent {
    CoinOverlap(Entity),
    KeyOverlap(Entity),
    BlockOverlap(Entity),
    CheckpointOverlap(Entity),
}

impl ProgressionEvent {
    /// The collectible entity involved.
    pub fn entity(&self) -> Entity {
        match *self {
            ProgressionEvent::CoinOverlap(e)
            | ProgressionEvent::KeyOverlap(e)
            | ProgressionEvent::BlockOverlap(e)
            | ProgressionEvent::CheckpointOverlap(e) => e,
        }
    }
}
