//! Per-frame input resources.
//!
//! The engine polls the keyboard and reports one [`FrameInput`] per frame:
//! the held state of the logical keys, whether the player body is blocked
//! below, and the body's current velocity. The
//! [`update_input_state`](crate::systems::input::update_input_state) system
//! folds it into [`InputState`], deriving the just-pressed / just-released
//! edges from the previous frame.
use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean key state with its frame edges.
pub struct BoolState {
    /// Whether the key is held this frame.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Feed this frame's held state and recompute the edges.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame state of the logical keys.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    /// Jump.
    pub up: BoolState,
    /// Restart-test key.
    pub restart: BoolState,
    /// Physics debug toggle.
    pub debug: BoolState,
}

impl InputState {
    pub fn apply(&mut self, frame: &FrameInput) {
        self.left.update(frame.left);
        self.right.update(frame.right);
        self.up.update(frame.up);
        self.restart.update(frame.restart);
        self.debug.update(frame.debug);
    }
}

/// What the engine reports at the start of a frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub restart: bool,
    pub debug: bool,
    /// Player body blocked below this frame.
    pub grounded: bool,
    /// Player body velocity as integrated by the engine.
    pub velocity: Vec2,
    /// Player position, when the engine reports it.
    pub position: Option<Vec2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_boolstate_edges() {
        let mut bs = BoolState::default();
        bs.update(true);
        assert!(bs.active && bs.just_pressed && !bs.just_released);
        bs.update(true);
        assert!(bs.active && !bs.just_pressed && !bs.just_released);
        bs.update(false);
        assert!(!bs.active && !bs.just_pressed && bs.just_released);
        bs.update(false);
        assert_eq!(bs, BoolState::default());
    }

    #[test]
    fn test_inputstate_apply_tracks_each_key() {
        let mut input = InputState::default();
        input.apply(&FrameInput {
            left: true,
            up: true,
            ..Default::default()
        });
        assert!(input.left.just_pressed);
        assert!(input.up.just_pressed);
        assert!(!input.right.active);
        input.apply(&FrameInput {
            left: true,
            ..Default::default()
        });
        assert!(input.left.active && !input.left.just_pressed);
        assert!(input.up.just_released);
    }

    #[test]
    fn test_frame_input_parses_with_defaults() {
        let frame: FrameInput = serde_json::from_str(r#"{ "dt": 0.016, "right": true }"#).unwrap();
        assert!(frame.right);
        assert!(!frame.grounded);
        assert_eq!(frame.velocity, Vec2::ZERO);
        assert_eq!(frame.position, None);
    }
}
