//! Ladder climbing.
//!
//! Pressing up or down while overlapping a ladder volume pulls the actor
//! onto the ladder's centre line, then vertical input climbs. Any horizontal
//! input or a jump lets go. Descending arms drop-through so a ladder can lead
//! down through a one-way platform; getting on a ladder from solid ground by
//! pressing down is refused.
use bevy_ecs::prelude::Entity;
use glam::Vec2;

use super::AbilityContext;
use crate::components::actor::ActorState;
use crate::components::collisionlayer::Layers;
use crate::math::sign;
use crate::resources::motionconfig::LadderConfig;

#[derive(Debug, Clone)]
pub struct ClimbLadderAbility {
    pub climb_speed: f32,
    pub snap_speed: f32,
    pub snap_distance_far: f32,
    pub snap_distance_near: f32,
    pub valid_distance: f32,
    ladder: Option<Entity>,
}

impl ClimbLadderAbility {
    pub fn from_config(config: &LadderConfig) -> Self {
        Self {
            climb_speed: config.climb_speed,
            snap_speed: config.snap_speed,
            snap_distance_far: config.snap_distance_far,
            snap_distance_near: config.snap_distance_near,
            valid_distance: config.valid_distance,
            ladder: None,
        }
    }

    /// Ladder the actor last snapped to, if any.
    pub fn ladder(&self) -> Option<Entity> {
        self.ladder
    }

    pub(super) fn release(&mut self) {
        self.ladder = None;
    }

    pub(super) fn can_update(&self, ctx: &AbilityContext) -> bool {
        if !matches!(*ctx.state, ActorState::Normal | ActorState::ClimbLadder) {
            return false;
        }

        let info = &ctx.raycaster.collisions;
        if ctx.input.y < 0.0 && info.below && !info.below_one_way {
            return false;
        }

        if ctx.input.x != 0.0 {
            return false;
        }

        if *ctx.state == ActorState::ClimbLadder {
            let Some(bounds) = self.ladder.and_then(|e| ctx.physics.bounds_of(e)) else {
                return false;
            };
            if !bounds.contains_point(*ctx.position) {
                return false;
            }
        }

        true
    }

    pub(super) fn update(&mut self, ctx: &mut AbilityContext) {
        if *ctx.state == ActorState::ClimbLadder {
            self.climb(ctx);
        } else {
            self.snap(ctx);
        }
    }

    fn climb(&mut self, ctx: &mut AbilityContext) {
        if ctx.buttons.consume_jump_down() {
            *ctx.velocity = Vec2::ZERO;
            self.release();
            ctx.set_state(ActorState::Normal);
            return;
        }

        let Some(bounds) = self.ladder.and_then(|e| ctx.physics.bounds_of(e)) else {
            self.release();
            ctx.set_state(ActorState::Normal);
            return;
        };

        let mut v = Vec2::ZERO;
        if ctx.input.y > 0.0 {
            // The actor's pivot never rises above the ladder top.
            let to_top = bounds.max.y - ctx.position.y;
            v.y = if ctx.dt > 0.0 {
                self.climb_speed.min(to_top / ctx.dt)
            } else {
                0.0
            };
        } else if ctx.input.y < 0.0 {
            v.y = -self.climb_speed;
            ctx.raycaster.fall_through(ctx.now);
        }
        *ctx.velocity = v;
    }

    fn snap(&mut self, ctx: &mut AbilityContext) {
        if ctx.input.y == 0.0 {
            return;
        }

        let area = ctx.collider.aabb(*ctx.position);
        let Some(hit) = ctx.physics.overlap_box(area, Layers::LADDER) else {
            return;
        };
        self.ladder = Some(hit.entity);

        let ladder_x = hit.bounds.center().x;
        let delta_x = ladder_x - ctx.position.x;
        let dist = delta_x.abs();
        if dist > self.snap_distance(ctx) {
            return;
        }

        let climb = if dist > self.valid_distance {
            let movement = ctx.velocity.x * ctx.dt;
            // Already moving past the centre line this frame.
            if sign(movement) == sign(delta_x) && movement.abs() > dist {
                true
            } else {
                ctx.velocity.x += self.snap_speed * sign(delta_x);
                false
            }
        } else {
            true
        };

        if climb {
            ctx.set_state(ActorState::ClimbLadder);
            ctx.position.x = ladder_x;
            ctx.velocity.x = 0.0;
        }
    }

    fn snap_distance(&self, ctx: &AbilityContext) -> f32 {
        if ctx.grounded() && ctx.input.y > 0.0 {
            self.snap_distance_far
        } else {
            self.snap_distance_near
        }
    }
}
