//! Path following for anything that is not a platform.
//!
//! Decorative movers and hazards can carry a [`PathMotor`] without being a
//! [`Platform`]; they move along their path but push no passengers.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::platform::Platform;
use crate::components::waypoints::{PathMotor, WaypointPath};
use crate::resources::collisionworld::CollisionWorld;
use crate::resources::worldtime::WorldTime;

/// Moves non-platform entities along their paths.
pub fn path_follow(
    mut movers: Query<
        (Entity, &mut PathMotor, &WaypointPath, &mut MapPosition, Option<&BoxCollider>),
        Without<Platform>,
    >,
    mut physics: ResMut<CollisionWorld>,
    time: Res<WorldTime>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }
    for (entity, mut motor, path, mut position, collider) in movers.iter_mut() {
        position.pos = motor.advance(position.pos, path, dt);
        if let Some(collider) = collider {
            physics.set_bounds(entity, collider.aabb(position.pos));
        }
    }
}
