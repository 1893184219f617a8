//! Collectible level objects.
//!
//! Every object placed on the level's object layer (coins, the key, the
//! lock blocks and the checkpoint) is spawned as an entity carrying a
//! [`Collectible`], an [`EngineHandle`] and a
//! [`MapPosition`](super::mapposition::MapPosition).
//!
//! Consuming a collectible never despawns it. The entity stays in the world
//! with `consumed = true` so its id remains stable, and the engine is asked to
//! remove the visual object through
//! [`EngineCmd::DestroyEntity`](crate::events::engine::EngineCmd::DestroyEntity).

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four object kinds the progression rules know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectibleKind {
    Coin,
    Key,
    Block,
    Checkpoint,
}

impl CollectibleKind {
    /// Parse the object name used on the level's object layer.
    ///
    /// Returns `None` for names the core does not handle.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "coin" => Some(CollectibleKind::Coin),
            "key" => Some(CollectibleKind::Key),
            "block" => Some(CollectibleKind::Block),
            "checkpoint" => Some(CollectibleKind::Checkpoint),
            _ => None,
        }
    }

    /// Object-layer name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            CollectibleKind::Coin => "coin",
            CollectibleKind::Key => "key",
            CollectibleKind::Block => "block",
            CollectibleKind::Checkpoint => "checkpoint",
        }
    }
}

impl fmt::Display for CollectibleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A level object the player can pick up, unlock or touch.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub kind: CollectibleKind,
    /// Set once, the first time the object is consumed. Never cleared; a
    /// restart spawns fresh entities instead.
    pub consumed: bool,
}

impl Collectible {
    pub fn new(kind: CollectibleKind) -> Self {
        Self {
            kind,
            consumed: false,
        }
    }

    /// Mark the collectible consumed.
    ///
    /// Returns `false` if it already was, so callers can bail out without
    /// scoring or emitting anything twice.
    pub fn consume(&mut self) -> bool {
        if self.consumed {
            return false;
        }
        self.consumed = true;
        true
    }
}

/// Opaque handle the engine uses for the object behind an entity.
///
/// For level objects this is the object id from the level's object layer,
/// which is stable across level restarts.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EngineHandle(pub u32);

impl fmt::Display for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
