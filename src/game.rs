//! World setup, frame schedule and spawn helpers.
//!
//! A host drives the simulation like this:
//!
//! ```ignore
//! let mut world = World::new();
//! setup_world(&mut world, MotionConfig::default());
//! let mut schedule = build_frame_schedule();
//! loop {
//!     world.resource_mut::<InputState>().sample(axis, jump, dash);
//!     tick(&mut world, &mut schedule, dt);
//! }
//! ```

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::abilities::Abilities;
use crate::components::actor::Actor;
use crate::components::boxcollider::BoxCollider;
use crate::components::camerafollow::CameraFollow;
use crate::components::collisionlayer::{CollisionLayer, Layers, OneWayPlatform};
use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::components::platform::Platform;
use crate::components::raycaster::Raycaster;
use crate::components::rigidbody::RigidBody;
use crate::components::waypoints::{PathMotor, WaypointPath};
use crate::events::landed::observe_landed_reset_jumps;
use crate::resources::collisionworld::CollisionWorld;
use crate::resources::input::InputState;
use crate::resources::inputbuffer::InputBuffer;
use crate::resources::motionconfig::MotionConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::camera_follow;
use crate::systems::collisionworld::sync_collision_world;
use crate::systems::controller::actor_controller;
use crate::systems::input::update_input_buffer;
use crate::systems::pathfollow::path_follow;
use crate::systems::platform::platform_controller;
use crate::systems::time::update_world_time;

/// Insert every resource and observer the frame schedule needs.
pub fn setup_world(world: &mut World, config: MotionConfig) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(InputBuffer::new(config.input.jump_buffer_time));
    world.insert_resource(CollisionWorld::new());
    world.insert_resource(config);
    world.add_observer(observe_landed_reset_jumps);
    world.flush();
}

/// The per-frame systems, chained in dependency order.
pub fn build_frame_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            update_input_buffer,
            sync_collision_world,
            actor_controller,
            platform_controller,
            path_follow,
            camera_follow,
        )
            .chain(),
    );
    schedule
}

/// Advance the clock by `dt` and run one frame.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Spawn an input-controlled actor with every ability.
pub fn spawn_player(world: &mut World, position: Vec2, size: Vec2) -> Entity {
    let config = world.resource::<MotionConfig>().clone();
    let entity = spawn_actor(world, position, size);
    world.entity_mut(entity).insert((
        InputControlled::new(
            config.locomotion.run_speed,
            config.locomotion.ground_smooth_time,
            config.locomotion.air_smooth_time,
        ),
        Abilities::from_config(&config),
    ));
    info!("spawned player {:?} at {}", entity, position);
    entity
}

/// Spawn a bare actor: gravity, collisions and platform transport only.
pub fn spawn_actor(world: &mut World, position: Vec2, size: Vec2) -> Entity {
    let config = world.resource::<MotionConfig>();
    let mut raycaster = Raycaster::new(Layers::GROUND)
        .with_ray_gap(config.raycast.ray_gap)
        .with_pass_through(
            config.raycast.pass_through_delay,
            config.raycast.pass_through_policy,
        );
    raycaster.skin_width = config.raycast.skin_width;
    let body = RigidBody::with_gravity(config.locomotion.gravity);
    world
        .spawn((
            Actor::new(),
            MapPosition { pos: position },
            BoxCollider::new(size.x, size.y),
            CollisionLayer::actor(),
            body,
            raycaster,
        ))
        .id()
}

/// Solid ground spanning `min..max`.
pub fn spawn_solid(world: &mut World, min: Vec2, max: Vec2) -> Entity {
    let size = max - min;
    world
        .spawn((
            MapPosition { pos: (min + max) * 0.5 },
            BoxCollider::new(size.x, size.y),
            CollisionLayer::ground(),
        ))
        .id()
}

/// Ground that only blocks from above.
pub fn spawn_one_way(world: &mut World, min: Vec2, max: Vec2) -> Entity {
    let entity = spawn_solid(world, min, max);
    world.entity_mut(entity).insert(OneWayPlatform);
    entity
}

/// Climbable ladder volume spanning `min..max`.
pub fn spawn_ladder(world: &mut World, min: Vec2, max: Vec2) -> Entity {
    let size = max - min;
    world
        .spawn((
            MapPosition { pos: (min + max) * 0.5 },
            BoxCollider::new(size.x, size.y),
            CollisionLayer::ladder(),
        ))
        .id()
}

/// Platform of `size` starting at the path's first point.
pub fn spawn_moving_platform(
    world: &mut World,
    size: Vec2,
    path: WaypointPath,
    speed: f32,
    looping: bool,
) -> Entity {
    let start = path.point(0).unwrap_or(Vec2::ZERO);
    let ray_gap = world.resource::<MotionConfig>().raycast.ray_gap;
    world
        .spawn((
            Platform {
                ray_gap,
                ..Platform::new()
            },
            MapPosition { pos: start },
            BoxCollider::new(size.x, size.y),
            CollisionLayer::ground(),
            path,
            PathMotor::new(speed, looping),
        ))
        .id()
}

/// Camera rig following `target`.
pub fn spawn_camera(world: &mut World, target: Entity) -> Entity {
    let config = world.resource::<MotionConfig>().camera.clone();
    let start = world
        .get::<MapPosition>(target)
        .map(|p| p.pos)
        .unwrap_or(Vec2::ZERO);
    world
        .spawn((CameraFollow::new(target, &config), MapPosition { pos: start }))
        .id()
}

/// Entities of the demo level.
#[derive(Debug, Clone, Copy)]
pub struct DemoLevel {
    pub player: Entity,
    pub camera: Entity,
    pub platform: Entity,
    pub ladder: Entity,
}

/// A small level exercising every behavior: floor, a tall wall with a ledge,
/// a one-way shelf reached by a ladder, and a platform going up and down.
pub fn spawn_demo_level(world: &mut World) -> DemoLevel {
    spawn_solid(world, Vec2::new(-20.0, -1.0), Vec2::new(40.0, 0.0));
    spawn_solid(world, Vec2::new(8.0, 0.0), Vec2::new(9.0, 4.0));
    spawn_one_way(world, Vec2::new(-6.0, 4.0), Vec2::new(-2.0, 4.3));
    let ladder = spawn_ladder(world, Vec2::new(-4.5, 0.0), Vec2::new(-3.5, 4.3));
    let platform = spawn_moving_platform(
        world,
        Vec2::new(3.0, 0.5),
        WaypointPath::new(vec![Vec2::new(14.0, 0.25), Vec2::new(14.0, 6.0)]),
        2.0,
        false,
    );
    let player = spawn_player(world, Vec2::new(0.0, 0.6), Vec2::new(1.0, 1.0));
    let camera = spawn_camera(world, player);
    info!("demo level ready");
    DemoLevel {
        player,
        camera,
        platform,
        ladder,
    }
}
