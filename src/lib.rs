//! Aberred Motion library.
//!
//! Raycast-based kinematic controllers for 2D platformers, built on
//! `bevy_ecs`: an axis-by-axis collision resolver with one-way platforms,
//! an ability state machine (jump, dash, wall slide, ledge grab, ladder
//! climb), moving platforms that carry their passengers, a dead-zone camera
//! rig and authored waypoint paths.
//!
//! - [`components`] – actor, collider, raycaster, abilities, platforms, camera
//! - [`events`] – landing notifications
//! - [`game`] – world setup, frame schedule and spawn helpers
//! - [`resources`] – input, collision snapshot, clock and tuning
//! - [`systems`] – the per-frame systems

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod math;
pub mod resources;
pub mod systems;
