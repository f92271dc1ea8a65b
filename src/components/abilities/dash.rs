//! Fixed-speed horizontal burst on a cooldown.
use glam::Vec2;
use log::debug;

use super::AbilityContext;
use crate::components::actor::ActorState;
use crate::resources::motionconfig::DashConfig;

#[derive(Debug, Clone)]
pub struct DashAbility {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
    dash_end: f32,
    cooldown_end: f32,
    dir: f32,
}

impl DashAbility {
    pub fn new(speed: f32, duration: f32, cooldown: f32) -> Self {
        Self {
            speed,
            duration,
            cooldown,
            dash_end: f32::NEG_INFINITY,
            cooldown_end: f32::NEG_INFINITY,
            dir: 1.0,
        }
    }

    pub fn from_config(config: &DashConfig) -> Self {
        Self::new(config.speed, config.duration, config.cooldown)
    }

    pub fn is_cooling_down(&self, now: f32) -> bool {
        self.cooldown_end > now
    }

    fn is_dashing(&self, state: ActorState, now: f32) -> bool {
        state == ActorState::Dash && self.dash_end > now
    }

    pub(super) fn can_update(&self, ctx: &AbilityContext) -> bool {
        matches!(*ctx.state, ActorState::Normal | ActorState::Dash)
    }

    pub(super) fn update(&mut self, ctx: &mut AbilityContext) {
        if ctx.buttons.dash_down()
            && !self.is_cooling_down(ctx.now)
            && !self.is_dashing(*ctx.state, ctx.now)
        {
            self.dash_end = ctx.now + self.duration;
            self.cooldown_end = ctx.now + self.cooldown;
            self.dir = if ctx.input.x != 0.0 {
                ctx.input.x.signum()
            } else {
                ctx.raycaster.face.sign()
            };
            debug!("dash start, dir {}", self.dir);
            ctx.set_state(ActorState::Dash);
        }

        if self.is_dashing(*ctx.state, ctx.now) {
            *ctx.velocity = Vec2::new(self.speed * self.dir, 0.0);
        } else if *ctx.state == ActorState::Dash {
            debug!("dash end");
            ctx.set_state(ActorState::Normal);
            *ctx.velocity = Vec2::ZERO;
        }
    }
}
