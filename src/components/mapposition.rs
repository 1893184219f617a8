use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position of an entity, in level pixels.
///
/// For level objects this is the spawn position from the object layer. The
/// player's position is owned by the engine and mirrored here from each frame
/// report.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
