//! Collision snapshot system.
//!
//! [`sync_collision_world`] rebuilds the
//! [`CollisionWorld`](crate::resources::collisionworld::CollisionWorld) from
//! every entity with a position, a box collider and a collision layer. Run it
//! once per frame before any controller queries the world.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::collisionlayer::{CollisionLayer, OneWayPlatform};
use crate::components::mapposition::MapPosition;
use crate::resources::collisionworld::CollisionWorld;

pub fn sync_collision_world(
    bodies: Query<(
        Entity,
        &MapPosition,
        &BoxCollider,
        &CollisionLayer,
        Has<OneWayPlatform>,
    )>,
    mut world: ResMut<CollisionWorld>,
) {
    world.clear();
    for (entity, position, collider, layer, one_way) in bodies.iter() {
        world.insert(entity, collider.aabb(position.pos), layer.0, one_way);
    }
}
