//! Raycast-based kinematic collision resolver.
//!
//! A [`Raycaster`] turns a requested displacement into the largest
//! displacement that does not cross solid geometry. Each axis is resolved on
//! its own:
//!
//! 1. **Horizontal pass**: parallel rays leave the leading vertical edge of
//!    the box (left or right, picked by the sign of `dx`, or the facing
//!    direction when `dx` is zero). The nearest hit across all rays clamps
//!    `dx` to `distance - skin` and marks the touching side.
//! 2. **Vertical pass** (skipped when `dy` is zero): rays leave the top or
//!    bottom edge, shifted by the already resolved `dx` so diagonal moves are
//!    swept consistently. One-way platforms never block upward motion and
//!    are ignored while a drop-through is in progress.
//!
//! Hits at distance zero mean the ray origin already sits inside a body and
//! are discarded; otherwise a floating point artifact could freeze an axis
//! for good.
//!
//! The skin width keeps the box a hair away from every surface, so ray
//! origins never coincide with the geometry they are meant to detect.
//!
//! # Drop-through
//!
//! [`Raycaster::fall_through`] arms a pass-through flag with an expiry
//! timestamp. Under [`PassThroughPolicy::FixedDelay`] the flag clears after
//! a fixed delay no matter what, so an actor that jumps back onto the
//! platform it just dropped through before the delay ends falls through it
//! again. [`PassThroughPolicy::HoldWhileOverlapping`] additionally keeps the
//! flag while the actor is still inside a one-way platform.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use log::debug;

use crate::components::boxcollider::BoxCollider;
use crate::components::collisionlayer::Layers;
use crate::math::sign;
use crate::resources::collisionworld::{PhysicsQuery, RayHit};

/// Inset between the box and any surface it rests against.
pub const SKIN_WIDTH: f32 = 0.015;
/// Target spacing between parallel rays.
pub const DEFAULT_RAY_GAP: f32 = 0.25;
/// Seconds a drop-through stays armed.
pub const DEFAULT_PASS_THROUGH_DELAY: f32 = 0.5;

/// Horizontal facing of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceDir {
    Left,
    #[default]
    Right,
}

impl FaceDir {
    /// `-1.0` for left, `1.0` for right.
    pub fn sign(self) -> f32 {
        match self {
            FaceDir::Left => -1.0,
            FaceDir::Right => 1.0,
        }
    }

    pub fn from_sign(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(FaceDir::Right)
        } else if x < 0.0 {
            Some(FaceDir::Left)
        } else {
            None
        }
    }
}

/// Which sides of the box touched something during the last move.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionInfo {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
    /// The ground under the box is a one-way platform.
    pub below_one_way: bool,
    /// Displacement that was requested before clamping.
    pub origin_movement: Vec2,
}

impl CollisionInfo {
    pub fn reset(&mut self, origin_movement: Vec2) {
        *self = CollisionInfo {
            origin_movement,
            ..Default::default()
        };
    }

    pub fn touching_wall(&self) -> bool {
        self.left || self.right
    }

    /// Side of the touched wall: `-1.0` left, `1.0` right.
    pub fn wall_dir(&self) -> Option<f32> {
        if self.left {
            Some(-1.0)
        } else if self.right {
            Some(1.0)
        } else {
            None
        }
    }
}

/// How an armed drop-through is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassThroughPolicy {
    /// Clear once the delay elapses.
    #[default]
    FixedDelay,
    /// Clear once the delay elapses and the actor is clear of every one-way platform.
    HoldWhileOverlapping,
}

impl PassThroughPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "fixed_delay" => Some(Self::FixedDelay),
            "hold_while_overlapping" => Some(Self::HoldWhileOverlapping),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FixedDelay => "fixed_delay",
            Self::HoldWhileOverlapping => "hold_while_overlapping",
        }
    }
}

/// One-way platform drop-through flag with an expiry timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassThrough {
    pub active: bool,
    pub expires_at: f32,
    pub delay: f32,
    pub policy: PassThroughPolicy,
}

impl Default for PassThrough {
    fn default() -> Self {
        Self {
            active: false,
            expires_at: 0.0,
            delay: DEFAULT_PASS_THROUGH_DELAY,
            policy: PassThroughPolicy::FixedDelay,
        }
    }
}

impl PassThrough {
    /// Arm the flag. Re-arming while active does not extend the expiry.
    pub fn start(&mut self, now: f32) {
        if self.active {
            return;
        }
        self.active = true;
        self.expires_at = now + self.delay;
    }

    /// Clear the flag if its policy allows. Returns true when it was cleared.
    pub fn update(&mut self, now: f32, overlapping_one_way: bool) -> bool {
        if !self.active || now < self.expires_at {
            return false;
        }
        if self.policy == PassThroughPolicy::HoldWhileOverlapping && overlapping_one_way {
            return false;
        }
        self.active = false;
        true
    }
}

/// Ray counts and spacing derived from a box size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayLayout {
    pub horizontal_count: usize,
    pub horizontal_gap: f32,
    pub vertical_count: usize,
    pub vertical_gap: f32,
}

impl RayLayout {
    /// At least two rays per edge, spaced evenly from corner to corner.
    pub fn from_size(size: Vec2, ray_gap: f32) -> Self {
        let count = |extent: f32| ((extent / ray_gap.max(f32::EPSILON)).round() as usize).max(2);
        let horizontal_count = count(size.y);
        let vertical_count = count(size.x);
        Self {
            horizontal_count,
            horizontal_gap: size.y / (horizontal_count - 1) as f32,
            vertical_count,
            vertical_gap: size.x / (vertical_count - 1) as f32,
        }
    }
}

/// Outcome of a single [`Raycaster::move_and_collide`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Displacement actually applied to the position.
    pub displacement: Vec2,
    /// The box just came to rest on something this frame.
    pub landed: bool,
}

/// Per-actor collision resolver state.
#[derive(Component, Debug, Clone)]
pub struct Raycaster {
    /// Layers that block this actor.
    pub mask: Layers,
    pub ray_gap: f32,
    pub skin_width: f32,
    pub collisions: CollisionInfo,
    pub face: FaceDir,
    pub pass_through: PassThrough,
    was_below: bool,
    landed_this_frame: bool,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self::new(Layers::GROUND)
    }
}

impl Raycaster {
    pub fn new(mask: Layers) -> Self {
        Self {
            mask,
            ray_gap: DEFAULT_RAY_GAP,
            skin_width: SKIN_WIDTH,
            collisions: CollisionInfo::default(),
            face: FaceDir::Right,
            pass_through: PassThrough::default(),
            was_below: false,
            landed_this_frame: false,
        }
    }

    pub fn with_ray_gap(mut self, ray_gap: f32) -> Self {
        self.ray_gap = ray_gap;
        self
    }

    pub fn with_pass_through(mut self, delay: f32, policy: PassThroughPolicy) -> Self {
        self.pass_through.delay = delay;
        self.pass_through.policy = policy;
        self
    }

    /// Snapshot the grounded flag so the next landing can be detected.
    pub fn begin_frame(&mut self) {
        self.was_below = self.collisions.below;
        self.landed_this_frame = false;
    }

    /// Start dropping through one-way platforms.
    pub fn fall_through(&mut self, now: f32) {
        if !self.pass_through.active {
            debug!("pass-through armed until {:.3}", now + self.pass_through.delay);
        }
        self.pass_through.start(now);
    }

    pub fn is_passing_through(&self) -> bool {
        self.pass_through.active
    }

    /// Resolve `movement` against `physics` and apply it to `position`.
    ///
    /// `on_platform` marks the actor as carried by a platform: the below flag
    /// is forced on whatever the rays found.
    pub fn move_and_collide(
        &mut self,
        position: &mut Vec2,
        collider: &BoxCollider,
        movement: Vec2,
        on_platform: bool,
        physics: &dyn PhysicsQuery,
    ) -> MoveOutcome {
        self.collisions.reset(movement);

        let mut movement = movement;
        self.horizontal_collisions(*position, collider, &mut movement, physics);
        self.vertical_collisions(*position, collider, &mut movement, physics);

        *position += movement;

        if let Some(face) = FaceDir::from_sign(self.collisions.origin_movement.x) {
            self.face = face;
        }

        if on_platform {
            self.collisions.below = true;
        }

        let landed = self.collisions.below && !self.was_below && !self.landed_this_frame;
        if landed {
            self.landed_this_frame = true;
        }

        MoveOutcome {
            displacement: movement,
            landed,
        }
    }

    fn horizontal_collisions(
        &mut self,
        position: Vec2,
        collider: &BoxCollider,
        movement: &mut Vec2,
        physics: &dyn PhysicsQuery,
    ) {
        let bounds = collider.aabb(position);
        let layout = RayLayout::from_size(bounds.size(), self.ray_gap);
        let skin = self.skin_width;

        let dir_x = if movement.x != 0.0 {
            sign(movement.x)
        } else {
            self.face.sign()
        };
        let edge_x = if dir_x < 0.0 { bounds.min.x } else { bounds.max.x };
        let ray_dir = Vec2::new(dir_x, 0.0);
        let mut ray_length = movement.x.abs() + skin;

        let accept = |hit: &RayHit| hit.distance > 0.0 && !hit.one_way;

        for i in 0..layout.horizontal_count {
            let origin = Vec2::new(edge_x, bounds.min.y + layout.horizontal_gap * i as f32);
            if let Some(hit) = physics.raycast(origin, ray_dir, ray_length, self.mask, &accept) {
                movement.x = (hit.distance - skin) * dir_x;
                ray_length = hit.distance;
                self.collisions.left = dir_x < 0.0;
                self.collisions.right = dir_x > 0.0;
            }
        }
    }

    fn vertical_collisions(
        &mut self,
        position: Vec2,
        collider: &BoxCollider,
        movement: &mut Vec2,
        physics: &dyn PhysicsQuery,
    ) {
        if movement.y == 0.0 {
            return;
        }

        let bounds = collider.aabb(position);
        let layout = RayLayout::from_size(bounds.size(), self.ray_gap);
        let skin = self.skin_width;

        let dir_y = sign(movement.y);
        let edge_y = if dir_y < 0.0 { bounds.min.y } else { bounds.max.y };
        let ray_dir = Vec2::new(0.0, dir_y);
        let mut ray_length = movement.y.abs() + skin;

        let moving_up = dir_y > 0.0;
        let passing_through = self.pass_through.active;
        let accept = |hit: &RayHit| {
            if hit.distance <= 0.0 {
                return false;
            }
            !(hit.one_way && (moving_up || passing_through))
        };

        for i in 0..layout.vertical_count {
            let origin = Vec2::new(
                bounds.min.x + layout.vertical_gap * i as f32 + movement.x,
                edge_y,
            );
            if let Some(hit) = physics.raycast(origin, ray_dir, ray_length, self.mask, &accept) {
                movement.y = (hit.distance - skin) * dir_y;
                ray_length = hit.distance;
                self.collisions.below = dir_y < 0.0;
                self.collisions.above = dir_y > 0.0;
                self.collisions.below_one_way = dir_y < 0.0 && hit.one_way;
            }
        }
    }
}
