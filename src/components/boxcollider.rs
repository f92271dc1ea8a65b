use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::math::Aabb;

/// Axis-aligned box centered on the entity position (plus `offset`).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given full width and height
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width.abs(), height.abs()),
            offset: Vec2::ZERO,
        }
    }

    /// Modify BoxCollider with given offset
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// World-space bounds for a given entity position.
    pub fn aabb(&self, position: Vec2) -> Aabb {
        Aabb::from_center(position + self.offset, self.half_extents())
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        self.aabb(position).overlaps(&other.aabb(other_position))
    }
}
