//! Headless replay of scripted input.
//!
//! A replay script is a JSON list of frames. Each frame holds the keys held
//! that frame, whether the player stands on the ground, how many times the
//! frame repeats and the overlaps the engine reports right after it:
//!
//! ```json
//! {
//!   "frames": [
//!     { "right": true, "repeat": 30 },
//!     { "overlaps": [ { "player": 0, "other": 12, "other_kind": "coin" } ] },
//!     { "up": true, "grounded": true },
//!     { "grounded": false, "repeat": 20 }
//!   ]
//! }
//! ```
//!
//! [`HeadlessEngine`] stands in for the engine collaborator: it executes the
//! motion commands on a [`RigidBody`] so the session sees plausible
//! velocities, and records every command it receives.

use glam::Vec2;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::rigidbody::RigidBody;
use crate::events::collision::RawOverlap;
use crate::events::engine::EngineCmd;
use crate::game::{GameSession, SceneHooks};
use crate::resources::input::FrameInput;

pub const DEFAULT_FRAME_DT: f32 = 1.0 / 60.0;

/// One scripted frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayFrame {
    pub dt: f32,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub restart: bool,
    pub debug: bool,
    pub grounded: bool,
    /// How many consecutive frames use these inputs.
    pub repeat: u32,
    /// Overlaps reported after the (last repeated) frame.
    pub overlaps: Vec<RawOverlap>,
}

impl Default for ReplayFrame {
    fn default() -> Self {
        Self {
            dt: DEFAULT_FRAME_DT,
            left: false,
            right: false,
            up: false,
            restart: false,
            debug: false,
            grounded: true,
            repeat: 1,
            overlaps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub frames: Vec<ReplayFrame>,
}

impl ReplayScript {
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse replay JSON: {}", e))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read replay file {:?}: {}", path, e))?;
        let script = Self::from_json_str(&json)?;
        info!(
            "Loaded replay {:?}: {} frames",
            path,
            script.frame_count()
        );
        Ok(script)
    }

    /// Frames the script runs, repeats included.
    pub fn frame_count(&self) -> u64 {
        self.frames.iter().map(|f| f.repeat as u64).sum()
    }
}

/// Minimal stand-in for the engine's physics and command execution.
#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    pub body: RigidBody,
    pub position: Vec2,
    spawn: Vec2,
    gravity_y: f32,
    /// Every command executed, in order.
    pub executed: Vec<EngineCmd>,
}

impl HeadlessEngine {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: RigidBody::new(),
            position: spawn,
            spawn,
            gravity_y: 0.0,
            executed: Vec::new(),
        }
    }

    /// Input report for `frame`, with the body's current state.
    pub fn frame_input(&self, frame: &ReplayFrame) -> FrameInput {
        FrameInput {
            dt: frame.dt,
            left: frame.left,
            right: frame.right,
            up: frame.up,
            restart: frame.restart,
            debug: frame.debug,
            grounded: frame.grounded,
            velocity: self.body.velocity,
            position: Some(self.position),
        }
    }

    /// Execute the commands the session emitted.
    pub fn execute(&mut self, cmds: Vec<EngineCmd>) {
        for cmd in cmds {
            match &cmd {
                EngineCmd::ApplyMotion(motion) => self.body.apply(motion),
                EngineCmd::SetGravity { y } => self.gravity_y = *y,
                EngineCmd::RestartLevel => {
                    self.body = RigidBody::new();
                    self.position = self.spawn;
                }
                _ => {}
            }
            self.executed.push(cmd);
        }
    }

    /// Integrate the body over `dt` seconds.
    pub fn step(&mut self, dt: f32, grounded: bool) {
        self.body.integrate_horizontal(dt);
        if grounded {
            if self.body.velocity.y > 0.0 {
                self.body.velocity.y = 0.0;
            }
        } else {
            self.body.velocity.y += self.gravity_y * dt;
        }
        self.position += self.body.velocity * dt;
    }
}

/// Drive `session` through `script`, feeding its commands to `engine`.
///
/// The session must already be entered.
pub fn run_replay(session: &mut GameSession, script: &ReplayScript, engine: &mut HeadlessEngine) {
    engine.execute(session.drain_commands());
    for (index, frame) in script.frames.iter().enumerate() {
        for _ in 0..frame.repeat {
            let input = engine.frame_input(frame);
            session.on_frame(&input);
            engine.execute(session.drain_commands());
            engine.step(frame.dt, frame.grounded);
        }
        for overlap in &frame.overlaps {
            debug!("Frame {}: reporting {:?}", index, overlap);
            session.report_overlap(overlap.clone());
            engine.execute(session.drain_commands());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::rigidbody::MotionCommand;

    #[test]
    fn frame_defaults() {
        let script = ReplayScript::from_json_str(r#"{ "frames": [ {}, { "repeat": 3 } ] }"#).unwrap();
        assert_eq!(script.frames[0], ReplayFrame::default());
        assert!(script.frames[0].grounded);
        assert_eq!(script.frame_count(), 4);
    }

    #[test]
    fn engine_applies_motion_and_gravity() {
        let mut engine = HeadlessEngine::new(Vec2::ZERO);
        engine.execute(vec![
            EngineCmd::SetGravity { y: 1000.0 },
            EngineCmd::ApplyMotion(MotionCommand {
                acceleration_x: 100.0,
                drag_x: None,
                velocity_y_override: Some(-500.0),
            }),
        ]);
        engine.step(0.1, false);
        assert!((engine.body.velocity.x - 10.0).abs() < 1e-4);
        assert!((engine.body.velocity.y + 400.0).abs() < 1e-3);
        assert_eq!(engine.executed.len(), 2);
    }

    #[test]
    fn restart_resets_the_body() {
        let mut engine = HeadlessEngine::new(Vec2::new(70.0, 200.0));
        engine.body.velocity = Vec2::new(50.0, 0.0);
        engine.step(1.0, true);
        engine.execute(vec![EngineCmd::RestartLevel]);
        assert_eq!(engine.position, Vec2::new(70.0, 200.0));
        assert_eq!(engine.body.velocity, Vec2::ZERO);
    }
}
