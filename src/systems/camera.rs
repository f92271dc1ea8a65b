//! Camera follow system.
//!
//! Runs last in the frame so it frames the resolved positions. A rig whose
//! target has no position or collider keeps its place.
use bevy_ecs::prelude::*;

use crate::components::actor::Actor;
use crate::components::boxcollider::BoxCollider;
use crate::components::camerafollow::CameraFollow;
use crate::components::mapposition::MapPosition;
use crate::resources::worldtime::WorldTime;

pub fn camera_follow(
    mut cameras: Query<(&mut CameraFollow, &mut MapPosition)>,
    targets: Query<(&MapPosition, &BoxCollider, Option<&Actor>), Without<CameraFollow>>,
    time: Res<WorldTime>,
) {
    for (mut rig, mut position) in cameras.iter_mut() {
        let Ok((target_pos, collider, actor)) = targets.get(rig.target) else {
            continue;
        };
        let input_x = actor.map(|a| a.input.x).unwrap_or(0.0);
        position.pos = rig.follow(position.pos, collider.aabb(target_pos.pos), input_x, time.delta);
    }
}
