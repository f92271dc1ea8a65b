//! End-to-end frame tests: a full world, the frame schedule and scripted input.

use bevy_ecs::prelude::*;
use glam::Vec2;

use aberredmotion::components::abilities::Abilities;
use aberredmotion::components::actor::{Actor, ActorState};
use aberredmotion::components::mapposition::MapPosition;
use aberredmotion::components::raycaster::{Raycaster, SKIN_WIDTH};
use aberredmotion::components::rigidbody::RigidBody;
use aberredmotion::components::waypoints::WaypointPath;
use aberredmotion::game::{
    build_frame_schedule, setup_world, spawn_actor, spawn_ladder, spawn_moving_platform,
    spawn_one_way, spawn_player, spawn_solid, tick,
};
use aberredmotion::resources::input::InputState;
use aberredmotion::resources::motionconfig::MotionConfig;

const EPSILON: f32 = 1e-4;
const DT: f32 = 1.0 / 60.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> (World, Schedule) {
    let mut world = World::new();
    setup_world(&mut world, MotionConfig::default());
    (world, build_frame_schedule())
}

/// Floor whose top surface is at y = 0.
fn floor(world: &mut World) -> Entity {
    spawn_solid(world, Vec2::new(-50.0, -1.0), Vec2::new(50.0, 0.0))
}

fn input(world: &mut World, axis: Vec2, jump: bool, dash: bool) {
    world.resource_mut::<InputState>().sample(axis, jump, dash);
}

fn pos(world: &World, e: Entity) -> Vec2 {
    world.get::<MapPosition>(e).unwrap().pos
}

fn velocity(world: &World, e: Entity) -> Vec2 {
    world.get::<RigidBody>(e).unwrap().velocity
}

fn state(world: &World, e: Entity) -> ActorState {
    world.get::<Actor>(e).unwrap().state
}

fn grounded(world: &World, e: Entity) -> bool {
    world.get::<Raycaster>(e).unwrap().collisions.below
}

fn charges(world: &World, e: Entity) -> u32 {
    world
        .get::<Abilities>(e)
        .unwrap()
        .jump()
        .unwrap()
        .remaining()
}

#[test]
fn actor_at_rest_on_ground_stays_put() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    let actor = spawn_actor(&mut world, Vec2::new(0.0, 0.5 + SKIN_WIDTH), Vec2::ONE);

    tick(&mut world, &mut schedule, DT);

    assert!(grounded(&world, actor));
    assert!(approx_eq(pos(&world, actor).y, 0.5 + SKIN_WIDTH));
    assert_eq!(velocity(&world, actor).y, 0.0);

    for _ in 0..30 {
        tick(&mut world, &mut schedule, DT);
    }
    assert!(grounded(&world, actor));
    assert!(approx_eq(pos(&world, actor).y, 0.5 + SKIN_WIDTH));
}

#[test]
fn falling_actor_never_sinks_into_the_floor() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    let actor = spawn_actor(&mut world, Vec2::new(0.0, 8.0), Vec2::ONE);

    for _ in 0..240 {
        tick(&mut world, &mut schedule, DT);
        assert!(pos(&world, actor).y - 0.5 >= 0.0);
    }
    assert!(grounded(&world, actor));
}

#[test]
fn two_air_jumps_then_the_third_is_rejected() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    let player = spawn_player(&mut world, Vec2::new(0.0, 20.0), Vec2::ONE);

    input(&mut world, Vec2::ZERO, true, false);
    tick(&mut world, &mut schedule, DT);
    assert_eq!(charges(&world, player), 1);

    input(&mut world, Vec2::ZERO, false, false);
    tick(&mut world, &mut schedule, DT);
    input(&mut world, Vec2::ZERO, true, false);
    tick(&mut world, &mut schedule, DT);
    assert_eq!(charges(&world, player), 0);
    assert!(approx_eq(velocity(&world, player).y, 20.0));

    input(&mut world, Vec2::ZERO, false, false);
    tick(&mut world, &mut schedule, DT);
    let before = velocity(&world, player).y;

    input(&mut world, Vec2::ZERO, true, false);
    tick(&mut world, &mut schedule, DT);
    assert_eq!(charges(&world, player), 0);
    assert!(approx_eq(velocity(&world, player).y, before - 50.0 * DT));
}

#[test]
fn landing_refills_jump_charges() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    let player = spawn_player(&mut world, Vec2::new(0.0, 3.0), Vec2::ONE);

    input(&mut world, Vec2::ZERO, true, false);
    tick(&mut world, &mut schedule, DT);
    input(&mut world, Vec2::ZERO, false, false);
    assert_eq!(charges(&world, player), 1);

    let mut landed = false;
    for _ in 0..300 {
        let was_grounded = grounded(&world, player);
        tick(&mut world, &mut schedule, DT);
        if !was_grounded && grounded(&world, player) {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert_eq!(charges(&world, player), 2);
}

#[test]
fn dash_lasts_its_duration_and_respects_cooldown() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    let player = spawn_player(&mut world, Vec2::new(0.0, 0.5 + SKIN_WIDTH), Vec2::ONE);
    tick(&mut world, &mut schedule, 0.01);

    // Dash starts at t = 0.02.
    input(&mut world, Vec2::X, false, true);
    tick(&mut world, &mut schedule, 0.01);
    assert_eq!(state(&world, player), ActorState::Dash);
    assert!(approx_eq(velocity(&world, player).x, 15.0));

    input(&mut world, Vec2::ZERO, false, false);
    tick(&mut world, &mut schedule, 0.2);
    assert_eq!(state(&world, player), ActorState::Dash);

    // 0.41 s after the start.
    tick(&mut world, &mut schedule, 0.21);
    assert_eq!(state(&world, player), ActorState::Normal);
    assert_eq!(velocity(&world, player), Vec2::ZERO);

    // 0.5 s after the start, still cooling down.
    input(&mut world, Vec2::ZERO, false, true);
    tick(&mut world, &mut schedule, 0.09);
    assert_eq!(state(&world, player), ActorState::Normal);
}

#[test]
fn rising_platform_carries_its_rider() {
    let (mut world, mut schedule) = make_world();
    let platform = spawn_moving_platform(
        &mut world,
        Vec2::new(4.0, 1.0),
        WaypointPath::new(vec![Vec2::ZERO, Vec2::new(0.0, 5.0)]),
        2.0,
        false,
    );
    let actor = spawn_actor(&mut world, Vec2::new(0.0, 1.0 + SKIN_WIDTH), Vec2::ONE);

    // First frame the motor only reaches its start point.
    tick(&mut world, &mut schedule, 0.1);
    assert!(grounded(&world, actor));
    let actor_before = pos(&world, actor).y;
    let platform_before = pos(&world, platform).y;

    tick(&mut world, &mut schedule, 0.1);
    let platform_delta = pos(&world, platform).y - platform_before;
    let actor_delta = pos(&world, actor).y - actor_before;
    assert!(approx_eq(platform_delta, 0.2));
    assert!(approx_eq(actor_delta, platform_delta));
    assert!(grounded(&world, actor));

    for _ in 0..10 {
        tick(&mut world, &mut schedule, 0.1);
    }
    assert!(approx_eq(
        pos(&world, actor).y - pos(&world, platform).y,
        1.0 + SKIN_WIDTH
    ));
}

#[test]
fn sinking_platform_keeps_its_rider() {
    let (mut world, mut schedule) = make_world();
    let platform = spawn_moving_platform(
        &mut world,
        Vec2::new(4.0, 1.0),
        WaypointPath::new(vec![Vec2::new(0.0, 5.0), Vec2::ZERO]),
        2.0,
        false,
    );
    let actor = spawn_actor(&mut world, Vec2::new(0.0, 6.0 + SKIN_WIDTH), Vec2::ONE);

    for _ in 0..10 {
        tick(&mut world, &mut schedule, 0.1);
        assert!(grounded(&world, actor));
    }
    assert!(pos(&world, platform).y < 4.0);
    assert!(approx_eq(
        pos(&world, actor).y - pos(&world, platform).y,
        1.0 + SKIN_WIDTH
    ));
}

#[test]
fn wall_slide_caps_fall_speed_then_wall_jump() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    spawn_solid(&mut world, Vec2::new(1.0, 0.0), Vec2::new(2.0, 30.0));
    let player = spawn_player(&mut world, Vec2::new(0.5 - SKIN_WIDTH, 20.0), Vec2::ONE);

    input(&mut world, Vec2::X, false, false);
    for _ in 0..60 {
        tick(&mut world, &mut schedule, DT);
    }
    assert_eq!(state(&world, player), ActorState::SlideWall);
    assert!(velocity(&world, player).y >= -3.0 - EPSILON);
    assert!(approx_eq(pos(&world, player).x, 0.5 - SKIN_WIDTH));

    input(&mut world, Vec2::X, true, false);
    tick(&mut world, &mut schedule, DT);
    let v = velocity(&world, player);
    assert!(approx_eq(v.x, -10.0));
    assert!(approx_eq(v.y, 20.0));

    input(&mut world, Vec2::ZERO, false, false);
    tick(&mut world, &mut schedule, DT);
    assert_eq!(state(&world, player), ActorState::Normal);
}

#[test]
fn down_jump_drops_through_one_way_platform() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    spawn_one_way(&mut world, Vec2::new(-3.0, 3.0), Vec2::new(3.0, 3.3));
    let player = spawn_player(&mut world, Vec2::new(0.0, 3.8 + SKIN_WIDTH), Vec2::ONE);

    tick(&mut world, &mut schedule, DT);
    assert!(grounded(&world, player));
    assert!(world.get::<Raycaster>(player).unwrap().collisions.below_one_way);

    input(&mut world, Vec2::NEG_Y, true, false);
    tick(&mut world, &mut schedule, DT);
    assert!(world.get::<Raycaster>(player).unwrap().is_passing_through());

    input(&mut world, Vec2::ZERO, false, false);
    for _ in 0..60 {
        tick(&mut world, &mut schedule, DT);
    }
    assert!(pos(&world, player).y < 3.0);
    assert!(grounded(&world, player));
    assert!(approx_eq(pos(&world, player).y, 0.5 + SKIN_WIDTH));
}

#[test]
fn jumping_up_through_one_way_platform_lands_on_it() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    spawn_one_way(&mut world, Vec2::new(-3.0, 2.0), Vec2::new(3.0, 2.3));
    let player = spawn_player(&mut world, Vec2::new(0.0, 0.5 + SKIN_WIDTH), Vec2::ONE);
    tick(&mut world, &mut schedule, DT);

    input(&mut world, Vec2::ZERO, true, false);
    tick(&mut world, &mut schedule, DT);
    input(&mut world, Vec2::ZERO, true, false);
    for _ in 0..120 {
        tick(&mut world, &mut schedule, DT);
    }
    assert!(grounded(&world, player));
    assert!(approx_eq(pos(&world, player).y, 2.8 + SKIN_WIDTH));
}

#[test]
fn ladder_snaps_climbs_and_blocks_dash() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    spawn_ladder(&mut world, Vec2::new(-0.5, 0.0), Vec2::new(0.5, 5.0));
    let player = spawn_player(&mut world, Vec2::new(0.3, 0.5 + SKIN_WIDTH), Vec2::ONE);
    tick(&mut world, &mut schedule, DT);

    input(&mut world, Vec2::Y, false, false);
    let mut climbing = false;
    for _ in 0..120 {
        tick(&mut world, &mut schedule, DT);
        if state(&world, player) == ActorState::ClimbLadder {
            climbing = true;
            break;
        }
    }
    assert!(climbing);
    assert_eq!(pos(&world, player).x, 0.0);

    let y = pos(&world, player).y;
    input(&mut world, Vec2::Y, false, true);
    tick(&mut world, &mut schedule, DT);
    assert_eq!(state(&world, player), ActorState::ClimbLadder);
    assert!(pos(&world, player).y > y);

    // Climbing stops at the top of the ladder.
    input(&mut world, Vec2::Y, false, false);
    for _ in 0..120 {
        tick(&mut world, &mut schedule, DT);
    }
    assert!(pos(&world, player).y <= 5.0 + EPSILON);

    // Sideways input lets go.
    input(&mut world, Vec2::X, false, false);
    tick(&mut world, &mut schedule, DT);
    assert_eq!(state(&world, player), ActorState::Normal);
}

#[test]
fn wall_beside_ladder_does_not_interrupt_climb() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    spawn_ladder(&mut world, Vec2::new(-0.5, 0.0), Vec2::new(0.5, 10.0));
    spawn_solid(&mut world, Vec2::new(0.505, 0.0), Vec2::new(3.0, 10.0));
    let player = spawn_player(&mut world, Vec2::new(0.0, 5.0), Vec2::ONE);

    input(&mut world, Vec2::Y, false, false);
    tick(&mut world, &mut schedule, DT);
    assert_eq!(state(&world, player), ActorState::ClimbLadder);
    assert!(world.get::<Raycaster>(player).unwrap().collisions.right);
    for _ in 0..2 {
        tick(&mut world, &mut schedule, DT);
        assert_eq!(state(&world, player), ActorState::ClimbLadder);
    }

    input(&mut world, Vec2::NEG_Y, false, false);
    for _ in 0..6 {
        tick(&mut world, &mut schedule, DT);
        assert_eq!(state(&world, player), ActorState::ClimbLadder);
    }
    // Ladder speed, not the wall slide cap.
    assert!(approx_eq(velocity(&world, player).y, -5.0));
}

#[test]
fn dash_press_while_hanging_keeps_the_ledge() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    spawn_solid(&mut world, Vec2::new(0.5 + SKIN_WIDTH, 0.0), Vec2::new(3.0, 5.4));
    let player = spawn_player(&mut world, Vec2::new(0.0, 5.7), Vec2::ONE);

    input(&mut world, Vec2::X, false, false);
    let mut grabbed = false;
    for _ in 0..60 {
        tick(&mut world, &mut schedule, DT);
        let s = state(&world, player);
        assert!(matches!(
            s,
            ActorState::Normal | ActorState::SlideWall | ActorState::GrabLedge
        ));
        if s == ActorState::GrabLedge {
            grabbed = true;
            break;
        }
    }
    assert!(grabbed);

    input(&mut world, Vec2::X, false, true);
    tick(&mut world, &mut schedule, DT);
    assert_eq!(state(&world, player), ActorState::GrabLedge);

    input(&mut world, Vec2::X, false, false);
    for _ in 0..10 {
        tick(&mut world, &mut schedule, DT);
        assert_eq!(state(&world, player), ActorState::GrabLedge);
    }
    let top = pos(&world, player).y + 0.5;
    assert!((top - 5.4).abs() < 1e-3);
}

#[test]
fn dash_into_wall_stays_dash_until_it_ends() {
    let (mut world, mut schedule) = make_world();
    floor(&mut world);
    spawn_solid(&mut world, Vec2::new(2.0, 0.0), Vec2::new(3.0, 20.0));
    let player = spawn_player(&mut world, Vec2::new(0.0, 10.0), Vec2::ONE);

    input(&mut world, Vec2::X, false, true);
    tick(&mut world, &mut schedule, DT);
    assert_eq!(state(&world, player), ActorState::Dash);

    input(&mut world, Vec2::X, false, false);
    for _ in 0..20 {
        tick(&mut world, &mut schedule, DT);
        assert_eq!(state(&world, player), ActorState::Dash);
    }
    assert!(world.get::<Raycaster>(player).unwrap().collisions.right);
    assert!(approx_eq(pos(&world, player).x, 1.5 - SKIN_WIDTH));

    let mut slid = false;
    for _ in 0..30 {
        tick(&mut world, &mut schedule, DT);
        let s = state(&world, player);
        assert!(matches!(
            s,
            ActorState::Dash | ActorState::Normal | ActorState::SlideWall
        ));
        slid |= s == ActorState::SlideWall;
    }
    assert!(slid);
    assert_eq!(state(&world, player), ActorState::SlideWall);
}
