//! Jumping, multi-jumps and drop-through.
use log::debug;

use super::AbilityContext;
use crate::components::actor::ActorState;
use crate::resources::motionconfig::JumpConfig;

#[derive(Debug, Clone)]
pub struct JumpAbility {
    pub launch_speed: f32,
    pub release_speed: f32,
    pub max_jumps: u32,
    remaining: u32,
}

impl JumpAbility {
    pub fn new(launch_speed: f32, release_speed: f32, max_jumps: u32) -> Self {
        Self {
            launch_speed,
            release_speed,
            max_jumps,
            remaining: max_jumps,
        }
    }

    pub fn from_config(config: &JumpConfig) -> Self {
        Self::new(config.launch_speed, config.release_speed, config.max_jumps)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Refill the jump charges. Called when the actor lands.
    pub fn reset_charges(&mut self) {
        self.remaining = self.max_jumps;
    }

    pub(super) fn can_update(&self, ctx: &AbilityContext) -> bool {
        *ctx.state == ActorState::Normal
    }

    pub(super) fn update(&mut self, ctx: &mut AbilityContext) {
        if ctx.buttons.jump_down() {
            if ctx.grounded() {
                ctx.buttons.consume_jump_down();
                if ctx.input.y < 0.0 {
                    ctx.raycaster.fall_through(ctx.now);
                } else {
                    self.jump(ctx);
                }
            } else if self.remaining > 0 && ctx.buttons.consume_jump_down() {
                self.jump(ctx);
            }
        }
        if ctx.buttons.jump_released() && ctx.velocity.y > self.release_speed {
            ctx.velocity.y = self.release_speed;
        }
    }

    fn jump(&mut self, ctx: &mut AbilityContext) {
        self.remaining = self.remaining.saturating_sub(1);
        ctx.velocity.y = self.launch_speed;
        debug!("jump, {} left", self.remaining);
    }
}
