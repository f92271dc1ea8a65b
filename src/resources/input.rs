//! Per-frame raw input resource.
//!
//! The host samples its devices once per frame and writes the result into
//! [`InputState`]. Key bindings live with the host; this crate only sees the
//! movement axis and the two action buttons. Buffering and one-shot
//! consumption happen in [`InputBuffer`](super::inputbuffer::InputBuffer).
use bevy_ecs::prelude::*;
use glam::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with edge flags.
pub struct BoolState {
    /// Whether the button is currently held this frame.
    pub active: bool,
    /// Whether the button was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the button was just released this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Feed the current level and derive the edge flags from the previous one.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the raw per-frame input relevant to movement.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Movement axis, each component in `-1.0..=1.0`. Positive `y` is up.
    pub move_axis: Vec2,
    pub jump: BoolState,
    pub dash: BoolState,
}

impl InputState {
    /// Convenience for hosts and scripts: set every channel at once.
    pub fn sample(&mut self, move_axis: Vec2, jump_down: bool, dash_down: bool) {
        self.move_axis = move_axis.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        self.jump.update(jump_down);
        self.dash.update(dash_down);
    }
}
