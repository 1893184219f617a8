use bevy_ecs::prelude::Resource;

/// Session clock, advanced once per frame from the engine-reported delta.
///
/// `elapsed` is the time base of the
/// [`TimedScheduler`](super::scheduler::TimedScheduler).
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since the session started (scaled).
    pub elapsed: f32,
    /// Seconds covered by the current frame (scaled).
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}
