//! Moving platforms that carry actors.
//!
//! A platform is a ground body with a [`Platform`] marker, a
//! [`WaypointPath`](super::waypoints::WaypointPath) and a
//! [`PathMotor`](super::waypoints::PathMotor). The
//! [`platform_controller`](crate::systems::platform::platform_controller)
//! system moves it and drags its passengers along.

use bevy_ecs::prelude::Component;

use crate::components::collisionlayer::Layers;
use crate::components::raycaster::{DEFAULT_RAY_GAP, SKIN_WIDTH};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    /// Layers of the bodies the platform pushes or carries.
    pub passenger_mask: Layers,
    pub ray_gap: f32,
    pub skin_width: f32,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            passenger_mask: Layers::ACTOR,
            ray_gap: DEFAULT_RAY_GAP,
            skin_width: SKIN_WIDTH,
        }
    }
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }
}
