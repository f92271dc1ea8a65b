//! Moving platform system.
//!
//! Each platform asks its [`PathMotor`] for this frame's displacement, then
//! looks for passengers before moving:
//!
//! - rays along the vertical direction of travel find actors above a rising
//!   platform (carried, plus the horizontal component) or below a sinking
//!   one (pushed down out of the way);
//! - rays along the horizontal direction find actors in the way, which are
//!   pushed and nudged down by the skin width;
//! - when the platform sinks or only moves sideways, a short probe above
//!   its top finds riders.
//!
//! Actors found by the first two are moved before the platform so they get
//! out of its way; riders found by the probe are moved after it so they
//! follow. Every passenger moves through its own [`Raycaster`], so world
//! geometry still blocks it.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::warn;
use rustc_hash::FxHashSet;

use crate::components::actor::Actor;
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::platform::Platform;
use crate::components::raycaster::{RayLayout, Raycaster};
use crate::components::waypoints::{PathMotor, WaypointPath};
use crate::events::landed::LandedEvent;
use crate::math::{Aabb, sign};
use crate::resources::collisionworld::{CollisionWorld, PhysicsQuery, RayHit};
use crate::resources::worldtime::WorldTime;

/// An actor the platform moves this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Passenger {
    pub entity: Entity,
    pub movement: Vec2,
    /// Rides on top of the platform.
    pub standing: bool,
    /// Moved before the platform itself.
    pub move_before: bool,
}

/// Scratch buffers reused across frames.
#[derive(Default)]
pub struct PassengerScratch {
    passengers: Vec<Passenger>,
    seen: FxHashSet<Entity>,
    warned_empty: FxHashSet<Entity>,
}

/// Collect the passengers of a platform with `bounds` about to move by `movement`.
pub fn detect_passengers(
    physics: &dyn PhysicsQuery,
    platform: &Platform,
    bounds: Aabb,
    movement: Vec2,
    passengers: &mut Vec<Passenger>,
    seen: &mut FxHashSet<Entity>,
) {
    passengers.clear();
    seen.clear();

    let layout = RayLayout::from_size(bounds.size(), platform.ray_gap);
    let skin = platform.skin_width;
    let mask = platform.passenger_mask;
    let accept = |hit: &RayHit| hit.distance > 0.0;
    let dir_x = sign(movement.x);
    let dir_y = sign(movement.y);

    let mut add = |hit: RayHit, movement: Vec2, standing: bool, move_before: bool| {
        if seen.insert(hit.entity) {
            passengers.push(Passenger {
                entity: hit.entity,
                movement,
                standing,
                move_before,
            });
        }
    };

    if movement.y != 0.0 {
        let ray_length = movement.y.abs() + skin;
        let edge_y = if dir_y > 0.0 { bounds.max.y } else { bounds.min.y };
        let dir = Vec2::new(0.0, dir_y);
        for i in 0..layout.vertical_count {
            let origin = Vec2::new(bounds.min.x + layout.vertical_gap * i as f32, edge_y);
            if let Some(hit) = physics.raycast(origin, dir, ray_length, mask, &accept) {
                let moving_up = dir_y > 0.0;
                let push_x = if moving_up { movement.x } else { 0.0 };
                let push_y = movement.y - (hit.distance - skin) * dir_y;
                add(hit, Vec2::new(push_x, push_y), moving_up, true);
            }
        }
    }

    if movement.x != 0.0 {
        let ray_length = movement.x.abs() + skin;
        let edge_x = if dir_x > 0.0 { bounds.max.x } else { bounds.min.x };
        let dir = Vec2::new(dir_x, 0.0);
        for i in 0..layout.horizontal_count {
            let origin = Vec2::new(edge_x, bounds.min.y + layout.horizontal_gap * i as f32);
            if let Some(hit) = physics.raycast(origin, dir, ray_length, mask, &accept) {
                let push_x = movement.x - (hit.distance - skin) * dir_x;
                add(hit, Vec2::new(push_x, -skin), false, true);
            }
        }
    }

    if dir_y < 0.0 || (movement.y == 0.0 && movement.x != 0.0) {
        let ray_length = skin * 2.0;
        for i in 0..layout.vertical_count {
            let origin = Vec2::new(bounds.min.x + layout.vertical_gap * i as f32, bounds.max.y);
            if let Some(hit) = physics.raycast(origin, Vec2::Y, ray_length, mask, &accept) {
                add(hit, movement, true, false);
            }
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn platform_controller(
    mut platforms: Query<
        (
            Entity,
            &Platform,
            &mut PathMotor,
            &WaypointPath,
            &mut MapPosition,
            &BoxCollider,
        ),
        Without<Actor>,
    >,
    mut actors: Query<(&mut MapPosition, &BoxCollider, &mut Raycaster), With<Actor>>,
    mut physics: ResMut<CollisionWorld>,
    time: Res<WorldTime>,
    mut scratch: Local<PassengerScratch>,
    mut commands: Commands,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }
    let PassengerScratch {
        passengers,
        seen,
        warned_empty,
    } = &mut *scratch;

    for (entity, platform, mut motor, path, mut position, collider) in platforms.iter_mut() {
        if path.is_empty() {
            if warned_empty.insert(entity) {
                warn!("platform {:?} has an empty waypoint path", entity);
            }
            continue;
        }

        let target = motor.advance(position.pos, path, dt);
        let movement = target - position.pos;
        if movement == Vec2::ZERO {
            continue;
        }

        let bounds = collider.aabb(position.pos);
        detect_passengers(&*physics, platform, bounds, movement, passengers, seen);

        let mut move_passengers = |move_before: bool, physics: &mut CollisionWorld| {
            for p in passengers.iter().filter(|p| p.move_before == move_before) {
                let Ok((mut pos, col, mut raycaster)) = actors.get_mut(p.entity) else {
                    continue;
                };
                let outcome =
                    raycaster.move_and_collide(&mut pos.pos, col, p.movement, p.standing, &*physics);
                physics.set_bounds(p.entity, col.aabb(pos.pos));
                if outcome.landed {
                    commands.trigger(LandedEvent { entity: p.entity });
                }
            }
        };

        move_passengers(true, &mut *physics);
        position.pos = target;
        physics.set_bounds(entity, collider.aabb(position.pos));
        move_passengers(false, &mut *physics);
    }
}
