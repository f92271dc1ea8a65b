//! Wall slide without the stick timer.
//!
//! An older, simpler take on [`SlideWallAbility`](super::SlideWallAbility):
//! same slide cap, a gentler toward-wall jump, and the actor detaches the
//! instant input points away from the wall.
use glam::Vec2;

use super::AbilityContext;
use super::slidewall::{sliding_wall, wall_jump_velocity};
use crate::components::actor::ActorState;

#[derive(Debug, Clone)]
pub struct ClimbWallAbility {
    pub slide_speed: f32,
    pub jump_toward: Vec2,
    pub jump_neutral: Vec2,
    pub jump_away: Vec2,
}

impl Default for ClimbWallAbility {
    fn default() -> Self {
        Self {
            slide_speed: -3.0,
            jump_toward: Vec2::new(8.0, 16.0),
            jump_neutral: Vec2::new(8.0, 8.0),
            jump_away: Vec2::new(16.0, 16.0),
        }
    }
}

impl ClimbWallAbility {
    pub fn new(slide_speed: f32) -> Self {
        Self {
            slide_speed,
            ..Default::default()
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

            if ctx.buttons.consume_jump_down() {
                v = wall_jump_velocity(
                    ctx.input.x,
                    wall_dir,
                    self.jump_toward,
                    self.jump_neutral,
                    self.jump_away,
                );
            }
        } else if *ctx.state == ActorState::SlideWall {
            ctx.set_state(ActorState::Normal);
        }

        *ctx.velocity = v;
    }
}
