//! Debug toggle resource.
//!
//! The mere presence of this resource means the engine is drawing physics
//! debug graphics and the restart-test key is live. Toggled by
//! [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).

use bevy_ecs::prelude::Resource;

/// Marker resource: present while debug mode is on.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
