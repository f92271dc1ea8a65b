//! ECS resources shared across systems.
//!
//! Submodules overview:
//! - [`collisionworld`] – per-frame collider snapshot and the geometry query trait
//! - [`input`] – raw per-frame input written by the host
//! - [`inputbuffer`] – buffered, consumable view of the input
//! - [`motionconfig`] – tuning values loaded from INI
//! - [`worldtime`] – simulation clock

pub mod collisionworld;
pub mod input;
pub mod inputbuffer;
pub mod motionconfig;
pub mod worldtime;
