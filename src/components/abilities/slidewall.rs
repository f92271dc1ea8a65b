//! Sliding down walls and jumping off them.
//!
//! While airborne, falling and pressed against a wall the fall speed is
//! capped. Letting go of the direction toward the wall does not detach at
//! once: for a short stick time the actor keeps leaning into the wall, so a
//! jump pressed together with the away direction is still read as a wall
//! jump.
use glam::Vec2;

use super::AbilityContext;
use crate::components::actor::ActorState;
use crate::components::raycaster::CollisionInfo;
use crate::math::sign;
use crate::resources::motionconfig::WallConfig;

/// Launch velocity of a wall jump, mirrored away from the wall.
pub(super) fn wall_jump_velocity(
    input_x: f32,
    wall_dir: f32,
    toward: Vec2,
    neutral: Vec2,
    away: Vec2,
) -> Vec2 {
    let mut v = if input_x == 0.0 {
        neutral
    } else if sign(input_x) == wall_dir {
        toward
    } else {
        away
    };
    v.x *= -wall_dir;
    v
}

/// Side of the wall the actor is sliding down, if it is sliding.
pub(super) fn sliding_wall(info: &CollisionInfo, velocity: Vec2) -> Option<f32> {
    info.wall_dir().filter(|_| !info.below && velocity.y < 0.0)
}

#[derive(Debug, Clone)]
pub struct SlideWallAbility {
    pub slide_speed: f32,
    pub stick_time: f32,
    pub jump_toward: Vec2,
    pub jump_neutral: Vec2,
    pub jump_away: Vec2,
    stick_timer: f32,
}

impl SlideWallAbility {
    pub fn from_config(config: &WallConfig) -> Self {
        Self {
            slide_speed: config.slide_speed,
            stick_time: config.stick_time,
            jump_toward: config.jump_toward,
            jump_neutral: config.jump_neutral,
            jump_away: config.jump_away,
            stick_timer: 0.0,
        }
    }

    pub(super) fn can_update(&self, ctx: &AbilityContext) -> bool {
        !matches!(
            *ctx.state,
            ActorState::Dash | ActorState::GrabLedge | ActorState::ClimbLadder
        )
    }

    pub(super) fn update(&mut self, ctx: &mut AbilityContext) {
        let mut v = *ctx.velocity;
        let wall = sliding_wall(&ctx.raycaster.collisions, v);

        if let Some(wall_dir) = wall {
            v.y = v.y.max(self.slide_speed);
            ctx.set_state(ActorState::SlideWall);

            if sign(ctx.input.x) == wall_dir {
                self.stick_timer = 0.0;
            } else {
                self.stick_timer += ctx.dt;
                if self.stick_timer < self.stick_time {
                    v.x = wall_dir;
                }
            }

            if ctx.buttons.consume_jump_down() {
                v = wall_jump_velocity(
                    ctx.input.x,
                    wall_dir,
                    self.jump_toward,
                    self.jump_neutral,
                    self.jump_away,
                );
            }
        } else {
            self.stick_timer = 0.0;
            if *ctx.state == ActorState::SlideWall {
                ctx.set_state(ActorState::Normal);
            }
        }

        *ctx.velocity = v;
    }
}
