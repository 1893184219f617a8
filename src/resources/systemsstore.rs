//! Registry for dynamically addressable systems.
//!
//! Allows systems to be registered under string keys and looked up later to
//! run via their [`bevy_ecs::system::SystemId`]. The session uses it to run
//! the level-enter hook from the state-change observer, and to feed engine
//! overlap reports into the world one at a time.

use bevy_ecs::prelude::{In, Resource};
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

use crate::events::collision::RawOverlap;

/// Well-known key of the system that (re)builds the level.
pub const ENTER_LEVEL: &str = "enter_level";
/// Well-known key of the system that takes in engine overlap reports.
pub const OVERLAP_INTAKE: &str = "overlap_intake";

/// Map of string names to system IDs.
#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemId>,
    /// Systems taking a [`RawOverlap`] as input.
    pub overlap_map: FxHashMap<String, SystemId<In<RawOverlap>>>,
}

impl SystemsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a system ID under a human-readable name.
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    /// Retrieve a system ID by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.map.get(name.as_ref())
    }

    pub fn insert_overlap_system(
        &mut self,
        name: impl Into<String>,
        id: SystemId<In<RawOverlap>>,
    ) {
        self.overlap_map.insert(name.into(), id);
    }

    pub fn get_overlap_system(&self, name: impl AsRef<str>) -> Option<&SystemId<In<RawOverlap>>> {
        self.overlap_map.get(name.as_ref())
    }
}
