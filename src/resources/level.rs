//! Level layout resource.
//!
//! The engine collaborator parses the tilemap and hands the core the level's
//! object layer: every object tagged `coin`, `key`, `block` or `checkpoint`,
//! with its object id and position, plus the player spawn and the score the
//! checkpoint requires. [`LevelLayout`] is that data. It is kept for the whole
//! session so a restart can rebuild every collectible from it.
//!
//! The layout can also be read from JSON:
//!
//! ```json
//! {
//!   "name": "platformer-level-1",
//!   "target_score": 30,
//!   "width": 720,
//!   "height": 400,
//!   "player": { "handle": 0, "x": 70, "y": 200 },
//!   "objects": [
//!     { "id": 12, "name": "coin", "x": 160, "y": 288 },
//!     { "id": 40, "name": "checkpoint", "x": 680, "y": 96 }
//!   ]
//! }
//! ```

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::collectible::CollectibleKind;

/// Required score of the sample level.
pub const DEFAULT_TARGET_SCORE: u32 = 30;

/// One object from the level's object layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelObject {
    /// Object id; doubles as the engine handle.
    pub id: u32,
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl LevelObject {
    pub fn kind(&self) -> Option<CollectibleKind> {
        CollectibleKind::from_name(&self.name)
    }
}

/// Where the player avatar spawns and which handle the engine gives it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub handle: u32,
    pub x: f32,
    pub y: f32,
}

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self {
            handle: 0,
            x: 70.0,
            y: 200.0,
        }
    }
}

fn default_target_score() -> u32 {
    DEFAULT_TARGET_SCORE
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub name: String,
    /// Score needed at the checkpoint.
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    /// Map size in pixels, used as camera bounds.
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub player: PlayerSpawn,
    #[serde(default)]
    pub objects: Vec<LevelObject>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            name: String::new(),
            target_score: DEFAULT_TARGET_SCORE,
            width: 0.0,
            height: 0.0,
            player: PlayerSpawn::default(),
            objects: Vec::new(),
        }
    }
}

impl LevelLayout {
    /// Parse a layout from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse level JSON: {}", e))
    }

    /// Load a layout from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read level file {:?}: {}", path, e))?;
        let layout = Self::from_json_str(&json)?;
        info!(
            "Loaded level '{}': {} objects, {} coins, target {}",
            layout.name,
            layout.objects.len(),
            layout.count(CollectibleKind::Coin),
            layout.target_score
        );
        if layout.count(CollectibleKind::Checkpoint) == 0 {
            warn!("Level '{}' has no checkpoint; it cannot be won", layout.name);
        }
        if layout.count(CollectibleKind::Coin) < layout.target_score as usize {
            warn!(
                "Level '{}' places {} coins but requires {}",
                layout.name,
                layout.count(CollectibleKind::Coin),
                layout.target_score
            );
        }
        for id in layout.colliding_handles() {
            warn!(
                "Level '{}' reuses handle {}; only the last entity with it receives overlaps",
                layout.name, id
            );
        }
        Ok(layout)
    }

    /// Collectible ids used more than once, or equal to the player handle.
    ///
    /// Each id is reported once, in layer order.
    pub fn colliding_handles(&self) -> Vec<u32> {
        let mut seen = FxHashSet::default();
        seen.insert(self.player.handle);
        let mut colliding = Vec::new();
        for (_, object) in self.collectibles() {
            if !seen.insert(object.id) && !colliding.contains(&object.id) {
                colliding.push(object.id);
            }
        }
        colliding
    }

    /// Number of objects of the given kind.
    pub fn count(&self, kind: CollectibleKind) -> usize {
        self.objects
            .iter()
            .filter(|o| o.kind() == Some(kind))
            .count()
    }

    /// Objects with a recognised kind, in layer order.
    pub fn collectibles(&self) -> impl Iterator<Item = (CollectibleKind, &LevelObject)> {
        self.objects.iter().filter_map(|o| o.kind().map(|k| (k, o)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "test",
        "target_score": 2,
        "player": { "handle": 1, "x": 10, "y": 20 },
        "objects": [
            { "id": 5, "name": "coin", "x": 1, "y": 2 },
            { "id": 6, "name": "coin", "x": 3, "y": 4 },
            { "id": 7, "name": "ladder", "x": 0, "y": 0 },
            { "id": 8, "name": "checkpoint", "x": 9, "y": 9 }
        ]
    }"#;

    #[test]
    fn parses_objects_and_player() {
        let layout = LevelLayout::from_json_str(SAMPLE).unwrap();
        assert_eq!(layout.name, "test");
        assert_eq!(layout.target_score, 2);
        assert_eq!(layout.player.handle, 1);
        assert_eq!(layout.objects.len(), 4);
        assert_eq!(layout.count(CollectibleKind::Coin), 2);
        assert_eq!(layout.count(CollectibleKind::Key), 0);
    }

    #[test]
    fn unknown_objects_are_skipped_as_collectibles() {
        let layout = LevelLayout::from_json_str(SAMPLE).unwrap();
        let ids: Vec<u32> = layout.collectibles().map(|(_, o)| o.id).collect();
        assert_eq!(ids, vec![5, 6, 8]);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let layout = LevelLayout::from_json_str("{}").unwrap();
        assert_eq!(layout.target_score, DEFAULT_TARGET_SCORE);
        assert_eq!(layout.player, PlayerSpawn::default());
        assert!(layout.objects.is_empty());
    }

    #[test]
    fn sample_has_no_colliding_handles() {
        let layout = LevelLayout::from_json_str(SAMPLE).unwrap();
        assert!(layout.colliding_handles().is_empty());
    }

    #[test]
    fn reused_ids_and_player_handle_are_reported() {
        let layout = LevelLayout::from_json_str(
            r#"{
                "player": { "handle": 5, "x": 0, "y": 0 },
                "objects": [
                    { "id": 5, "name": "coin", "x": 1, "y": 2 },
                    { "id": 6, "name": "coin", "x": 3, "y": 4 },
                    { "id": 6, "name": "key", "x": 5, "y": 6 },
                    { "id": 6, "name": "block", "x": 7, "y": 8 },
                    { "id": 9, "name": "ladder", "x": 0, "y": 0 },
                    { "id": 9, "name": "checkpoint", "x": 9, "y": 9 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(layout.colliding_handles(), vec![5, 6]);
    }

    #[test]
    fn loading_a_file_with_colliding_handles_still_succeeds() {
        let path = std::env::temp_dir().join(format!(
            "gemquest_level_collision_{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{ "player": { "handle": 5, "x": 0, "y": 0 },
                 "objects": [ { "id": 5, "name": "coin", "x": 1, "y": 2 } ] }"#,
        )
        .unwrap();
        let layout = LevelLayout::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(layout.colliding_handles(), vec![5]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = LevelLayout::from_json_str("{ not json").unwrap_err();
        assert!(err.starts_with("Failed to parse level JSON"));
    }
}
