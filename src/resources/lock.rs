//! Lock-and-key puzzle state.

use bevy_ecs::prelude::Resource;

/// Whether the lock blocks still bar the way.
///
/// Starts locked. Picking up the key unlocks it for the rest of the level;
/// only a restart locks it again. While locked the engine keeps the
/// player/block collider active and block overlaps do nothing.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleLock {
    pub locked: bool,
}

impl Default for PuzzleLock {
    fn default() -> Self {
        Self { locked: true }
    }
}

impl PuzzleLock {
    /// Unlock; returns `false` if it already was unlocked.
    pub fn unlock(&mut self) -> bool {
        if !self.locked {
            return false;
        }
        self.locked = false;
        true
    }
}
