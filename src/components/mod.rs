//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulated world.
//!
//! Submodules overview:
//! - [`abilities`] – jump, dash, wall, ledge and ladder behaviors plus their arbitration
//! - [`actor`] – actor state tag and per-frame input
//! - [`boxcollider`] – axis-aligned rectangular collider centred on the position
//! - [`camerafollow`] – dead-zone camera rig with look-ahead
//! - [`collisionlayer`] – layer membership and the one-way platform tag
//! - [`inputcontrolled`] – input-driven horizontal locomotion
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`platform`] – moving platform marker and settings
//! - [`raycaster`] – raycast collision resolver and contact flags
//! - [`rigidbody`] – kinematic body storing velocity and named forces
//! - [`waypoints`] – authored paths and the motor walking them

pub mod abilities;
pub mod actor;
pub mod boxcollider;
pub mod camerafollow;
pub mod collisionlayer;
pub mod inputcontrolled;
pub mod mapposition;
pub mod platform;
pub mod raycaster;
pub mod rigidbody;
pub mod waypoints;
