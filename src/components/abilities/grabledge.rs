//! Hanging from ledges.
//!
//! A ledge is found with two short probes from the box's top corner on the
//! wall side: one outward that must find nothing (the wall ends below the
//! top edge), then one downward from the end of the first that must hit a
//! surface. The hit height is remembered as the ledge height; while grabbing,
//! the box's top edge is never lowered below it in one frame.
use glam::Vec2;

use super::AbilityContext;
use crate::components::actor::ActorState;
use crate::resources::collisionworld::RayHit;
use crate::resources::motionconfig::LedgeConfig;

/// Rounding slack when comparing the top edge with the ledge height.
const LEDGE_TOLERANCE: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct GrabLedgeAbility {
    pub probe_distance: f32,
    pub push_speed: f32,
    pub climb_speed: f32,
    /// Slowest descent while hanging (negative).
    pub slide_speed: f32,
    ledge_height: f32,
}

impl GrabLedgeAbility {
    pub fn from_config(config: &LedgeConfig, slide_speed: f32) -> Self {
        Self {
            probe_distance: config.probe_distance,
            push_speed: config.grab_push_speed,
            climb_speed: config.climb_speed,
            slide_speed,
            ledge_height: 0.0,
        }
    }

    pub fn ledge_height(&self) -> f32 {
        self.ledge_height
    }

    pub(super) fn can_update(&self, ctx: &AbilityContext) -> bool {
        if matches!(*ctx.state, ActorState::Dash | ActorState::ClimbLadder) {
            return false;
        }

        let info = &ctx.raycaster.collisions;
        let Some(wall_dir) = info.wall_dir() else {
            return false;
        };
        if info.below {
            return false;
        }

        if ctx.input.x != 0.0 && ctx.input.x.signum() != wall_dir {
            return false;
        }

        if *ctx.state == ActorState::GrabLedge
            && ctx.top() - self.ledge_height < -LEDGE_TOLERANCE
        {
            return false;
        }

        true
    }

    pub(super) fn update(&mut self, ctx: &mut AbilityContext) {
        if *ctx.state == ActorState::GrabLedge {
            self.hang(ctx);
            return;
        }

        let Some(dir) = ctx.raycaster.collisions.wall_dir() else {
            return;
        };
        if let Some(hit) = self.find_ledge(ctx, dir) {
            self.ledge_height = ctx.top() - hit.distance;
            *ctx.velocity = Vec2::new(self.push_speed * dir, 0.0);
            ctx.set_state(ActorState::GrabLedge);
        }
    }

    fn hang(&mut self, ctx: &mut AbilityContext) {
        if ctx.buttons.jump_down() {
            ctx.set_state(ActorState::SlideWall);
            return;
        }

        let Some(dir) = ctx.raycaster.collisions.wall_dir() else {
            return;
        };
        let to_ledge = ctx.top() - self.ledge_height;
        let vy = if ctx.input.y > 0.0 {
            self.climb_speed
        } else if ctx.dt > 0.0 {
            self.slide_speed.max(-to_ledge / ctx.dt)
        } else {
            0.0
        };
        *ctx.velocity = Vec2::new(self.push_speed * dir, vy);
    }

    fn find_ledge(&self, ctx: &AbilityContext, dir: f32) -> Option<RayHit> {
        let corner = ctx.top_corner(dir);
        let outward = Vec2::new(dir, 0.0);
        let accept_all = |_: &RayHit| true;

        if ctx
            .physics
            .raycast(corner, outward, self.probe_distance, ctx.raycaster.mask, &accept_all)
            .is_some()
        {
            return None;
        }

        let origin = corner + outward * self.probe_distance;
        ctx.physics
            .raycast(
                origin,
                Vec2::NEG_Y,
                self.probe_distance,
                ctx.raycaster.mask,
                &accept_all,
            )
            .filter(|hit| hit.distance != 0.0)
    }
}
