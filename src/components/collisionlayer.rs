//! Layer membership for anything the raycasters can see.
//!
//! Every collidable entity carries a [`CollisionLayer`] naming which
//! [`Layers`] it belongs to. Queries filter by a mask of layers, so an actor
//! casting against [`Layers::GROUND`] never sees other actors, and a moving
//! platform casting against [`Layers::ACTOR`] only sees its potential
//! passengers.
//!
//! [`OneWayPlatform`] is a tag rather than a layer: the body still blocks as
//! ground, but the vertical pass of the raycaster lets actors through from
//! below and while they are dropping through.

use bevy_ecs::prelude::Component;

bitflags::bitflags! {
    /// Collision layers used by ray and overlap queries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Layers: u32 {
        /// Static or moving level geometry, including one-way platforms.
        const GROUND = 1 << 0;
        /// Climbable ladder volumes. Never blocks movement.
        const LADDER = 1 << 1;
        /// Raycaster-driven actors; what platforms look for when carrying passengers.
        const ACTOR  = 1 << 2;
    }
}

/// Layers an entity's [`BoxCollider`](super::boxcollider::BoxCollider) belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionLayer(pub Layers);

impl CollisionLayer {
    pub fn ground() -> Self {
        Self(Layers::GROUND)
    }

    pub fn ladder() -> Self {
        Self(Layers::LADDER)
    }

    pub fn actor() -> Self {
        Self(Layers::ACTOR)
    }
}

/// Marks a ground body that only blocks actors coming from above.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneWayPlatform;
