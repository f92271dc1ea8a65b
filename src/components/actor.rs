//! Actor state shared by the controller and its abilities.
//!
//! An entity becomes an actor by carrying [`Actor`] together with a
//! [`MapPosition`](super::mapposition::MapPosition),
//! [`BoxCollider`](super::boxcollider::BoxCollider),
//! [`RigidBody`](super::rigidbody::RigidBody) and
//! [`Raycaster`](super::raycaster::Raycaster).
//!
//! [`ActorState`] is a single tag, so at most one non-`Normal` behavior can
//! own the actor's motion at any time. Abilities hand the tag over
//! explicitly; an ability that can no longer run while holding it gives it
//! back to `Normal`.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Which behavior currently owns the actor's velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActorState {
    /// Walking, falling and jumping.
    #[default]
    Normal,
    Dash,
    SlideWall,
    GrabLedge,
    ClimbLadder,
}

impl ActorState {
    pub fn name(self) -> &'static str {
        match self {
            ActorState::Normal => "normal",
            ActorState::Dash => "dash",
            ActorState::SlideWall => "slide_wall",
            ActorState::GrabLedge => "grab_ledge",
            ActorState::ClimbLadder => "climb_ladder",
        }
    }
}

/// Raycaster-driven character.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Actor {
    pub state: ActorState,
    /// Directional input sampled this frame (each axis in `-1.0..=1.0`).
    pub input: Vec2,
}

impl Actor {
    pub fn new() -> Self {
        Self::default()
    }
}
