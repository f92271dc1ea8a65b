//! Input-driven horizontal locomotion.
//!
//! Actors with [`InputControlled`] read the shared
//! [`InputBuffer`](crate::resources::inputbuffer::InputBuffer) each frame: the
//! horizontal axis becomes a target run speed that the velocity eases toward,
//! and the buttons feed the actor's abilities. Actors without it only fall
//! and get carried.

use bevy_ecs::prelude::Component;

use crate::math::smooth_damp;

pub const DEFAULT_RUN_SPEED: f32 = 6.0;
pub const DEFAULT_GROUND_SMOOTH_TIME: f32 = 0.1;
pub const DEFAULT_AIR_SMOOTH_TIME: f32 = 0.1;

#[derive(Component, Clone, Copy, Debug)]
pub struct InputControlled {
    /// Horizontal speed at full stick deflection.
    pub run_speed: f32,
    /// Seconds to reach the target speed on the ground.
    pub ground_smooth_time: f32,
    /// Seconds to reach the target speed in the air.
    pub air_smooth_time: f32,
    velocity_x_smoothing: f32,
}

impl Default for InputControlled {
    fn default() -> Self {
        Self::new(DEFAULT_RUN_SPEED, DEFAULT_GROUND_SMOOTH_TIME, DEFAULT_AIR_SMOOTH_TIME)
    }
}

impl InputControlled {
    pub fn new(run_speed: f32, ground_smooth_time: f32, air_smooth_time: f32) -> Self {
        Self {
            run_speed,
            ground_smooth_time,
            air_smooth_time,
            velocity_x_smoothing: 0.0,
        }
    }

    /// Ease `current_vx` toward `input_x * run_speed`.
    pub fn horizontal_velocity(&mut self, current_vx: f32, input_x: f32, grounded: bool, dt: f32) -> f32 {
        let target = input_x * self.run_speed;
        let smooth_time = if grounded {
            self.ground_smooth_time
        } else {
            self.air_smooth_time
        };
        smooth_damp(current_vx, target, &mut self.velocity_x_smoothing, smooth_time, dt)
    }
}
