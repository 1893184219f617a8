//! Arcade body of the player avatar.
//!
//! The engine owns the real physics body. The [`RigidBody`] component keeps
//! the core's view of it: the velocity the engine reported this frame and the
//! horizontal acceleration/drag last requested through a [`MotionCommand`].
//!
//! [`RigidBody::integrate_horizontal`] reproduces the engine's arcade rule for
//! the horizontal axis (acceleration when one is set, otherwise drag toward
//! zero). The headless replay driver uses it in place of a physics engine.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Motion request produced by the locomotion controller for one frame.
///
/// `drag_x` and `velocity_y_override` are only set when they change the
/// body; `None` means "leave the engine's current value".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionCommand {
    pub acceleration_x: f32,
    pub drag_x: Option<f32>,
    /// Negative is up.
    pub velocity_y_override: Option<f32>,
}

/// Kinematic mirror of the engine body.
///
/// # Fields
/// - `velocity` - Engine-reported velocity in pixels per second (read-only for
///   gameplay code)
/// - `acceleration_x` - Horizontal acceleration last requested
/// - `drag_x` - Horizontal drag last requested; only applied while
///   `acceleration_x` is zero
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub acceleration_x: f32,
    pub drag_x: f32,
}

impl RigidBody {
    /// Create a RigidBody at rest with no acceleration or drag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a motion command the same way the engine applies it.
    pub fn apply(&mut self, command: &MotionCommand) {
        self.acceleration_x = command.acceleration_x;
        if let Some(drag) = command.drag_x {
            self.drag_x = drag;
        }
        if let Some(vy) = command.velocity_y_override {
            self.velocity.y = vy;
        }
    }

    /// Advance horizontal velocity by `delta` seconds.
    ///
    /// With acceleration the velocity grows linearly. Without it, drag eats
    /// `drag_x * delta` of speed per step and clamps at zero instead of
    /// overshooting.
    pub fn integrate_horizontal(&mut self, delta: f32) {
        if self.acceleration_x != 0.0 {
            self.velocity.x += self.acceleration_x * delta;
        } else if self.drag_x > 0.0 {
            let drag = self.drag_x * delta;
            if self.velocity.x - drag > 0.0 {
                self.velocity.x -= drag;
            } else if self.velocity.x + drag < 0.0 {
                self.velocity.x += drag;
            } else {
                self.velocity.x = 0.0;
            }
        }
    }
}
