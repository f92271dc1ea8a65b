//! Simulation systems.
//!
//! Submodules overview
//! - [`camera`] – move camera rigs after everything else has moved
//! - [`collisionworld`] – rebuild the collider snapshot
//! - [`controller`] – locomotion, abilities and collision for actors
//! - [`input`] – fold raw input into the input buffer
//! - [`pathfollow`] – move non-platform entities along their paths
//! - [`platform`] – move platforms and their passengers
//! - [`time`] – update simulation time and delta

pub mod camera;
pub mod collisionworld;
pub mod controller;
pub mod input;
pub mod pathfollow;
pub mod platform;
pub mod time;
