//! Engine handle lookup.
//!
//! Overlaps arrive from the engine as pairs of engine handles. The
//! [`HandleIndex`] resource maps each handle to the entity standing for it in
//! the world. It is rebuilt whenever the level is (re)entered, so handles
//! reported after a restart resolve to the fresh entities.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

use crate::components::collectible::EngineHandle;

#[derive(Resource, Debug, Clone, Default)]
pub struct HandleIndex {
    map: FxHashMap<EngineHandle, Entity>,
}

impl HandleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle` to `entity`, replacing any previous binding.
    pub fn insert(&mut self, handle: EngineHandle, entity: Entity) {
        self.map.insert(handle, entity);
    }

    pub fn get(&self, handle: EngineHandle) -> Option<Entity> {
        self.map.get(&handle).copied()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
