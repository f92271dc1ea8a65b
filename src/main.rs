//! Aberred Motion demo.
//!
//! Runs the motion controllers headless on a small level, feeding a scripted
//! input sequence and logging what the player does.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --frames 600
//! cargo run -- --write-config motion.ini
//! cargo run -- --config motion.ini --dt 0.008
//! ```

use std::path::PathBuf;

use aberredmotion::components::actor::Actor;
use aberredmotion::components::mapposition::MapPosition;
use aberredmotion::components::raycaster::Raycaster;
use aberredmotion::game::{build_frame_schedule, setup_world, spawn_demo_level, tick};
use aberredmotion::resources::input::InputState;
use aberredmotion::resources::motionconfig::MotionConfig;
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use log::{error, info};

/// Aberred Motion: raycast platformer controllers
#[derive(Parser)]
#[command(version, about = "Headless demo of the platformer motion controllers.")]
struct Cli {
    /// Motion config INI file. Defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 480)]
    frames: u32,

    /// Fixed frame step in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Write the effective config to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    verbose: bool,
}

/// Input for a given simulated time: run right, jump twice, dash, walk back
/// to the ladder and climb it.
fn scripted_input(t: f32) -> (Vec2, bool, bool) {
    match t {
        t if t < 1.0 => (Vec2::X, false, false),
        t if t < 1.05 => (Vec2::X, true, false),
        t if t < 1.3 => (Vec2::X, false, false),
        t if t < 1.35 => (Vec2::X, true, false),
        t if t < 2.0 => (Vec2::X, false, false),
        t if t < 2.05 => (Vec2::NEG_X, false, true),
        t if t < 4.5 => (Vec2::NEG_X, false, false),
        t if t < 6.0 => (Vec2::Y, false, false),
        _ => (Vec2::ZERO, false, false),
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &cli.config {
        Some(path) => match MotionConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
        None => MotionConfig::default(),
    };

    if let Some(path) = &cli.write_config {
        if let Err(e) = config.save_to_file(path) {
            error!("{e}");
            std::process::exit(1);
        }
        return;
    }

    let mut world = World::new();
    setup_world(&mut world, config);
    let level = spawn_demo_level(&mut world);
    let mut schedule = build_frame_schedule();

    info!("simulating {} frames at dt = {}", cli.frames, cli.dt);
    let mut t = 0.0;
    for frame in 0..cli.frames {
        let (axis, jump, dash) = scripted_input(t);
        world.resource_mut::<InputState>().sample(axis, jump, dash);
        tick(&mut world, &mut schedule, cli.dt);
        t += cli.dt;

        if frame % 30 == 0 {
            let pos = world
                .get::<MapPosition>(level.player)
                .map(|p| p.pos)
                .unwrap_or_default();
            let state = world
                .get::<Actor>(level.player)
                .map(|a| a.state.name())
                .unwrap_or("missing");
            let grounded = world
                .get::<Raycaster>(level.player)
                .is_some_and(|r| r.collisions.below);
            let camera = world
                .get::<MapPosition>(level.camera)
                .map(|p| p.pos)
                .unwrap_or_default();
            info!(
                "t={:.2} player {:.2} state {} grounded {} camera {:.2}",
                t, pos, state, grounded, camera
            );
        }
    }
}
