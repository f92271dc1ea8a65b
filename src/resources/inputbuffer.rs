//! Buffered view of the raw input.
//!
//! A jump press stays readable as [`KeyState::Down`] for a short window
//! after it happens, so a press made slightly before landing still jumps.
//! Whoever acts on it calls [`InputBuffer::consume_jump_down`], which clears
//! the buffer so the same press cannot trigger twice.
use bevy_ecs::prelude::*;
use glam::Vec2;

use super::input::{BoolState, InputState};

/// Seconds a jump press stays buffered.
pub const DEFAULT_JUMP_BUFFER_TIME: f32 = 0.1;

/// Four-phase button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    None,
    Down,
    Pressing,
    Up,
}

impl KeyState {
    fn from_bool_state(state: &BoolState) -> Self {
        if state.just_pressed {
            KeyState::Down
        } else if state.active {
            KeyState::Pressing
        } else if state.just_released {
            KeyState::Up
        } else {
            KeyState::None
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct InputBuffer {
    pub move_axis: Vec2,
    pub jump_buffer_time: f32,
    jump: KeyState,
    dash: KeyState,
    raw_jump: BoolState,
    jump_down_until: f32,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_BUFFER_TIME)
    }
}

impl InputBuffer {
    pub fn new(jump_buffer_time: f32) -> Self {
        Self {
            move_axis: Vec2::ZERO,
            jump_buffer_time,
            jump: KeyState::None,
            dash: KeyState::None,
            raw_jump: BoolState::default(),
            jump_down_until: f32::NEG_INFINITY,
        }
    }

    /// Fold this frame's raw sample in. `now` is the elapsed world time.
    pub fn update(&mut self, raw: &InputState, now: f32) {
        self.move_axis = raw.move_axis;
        self.dash = KeyState::from_bool_state(&raw.dash);
        self.raw_jump = raw.jump;

        if raw.jump.just_pressed {
            self.jump_down_until = now + self.jump_buffer_time;
        }

        self.jump = if self.jump_down_until > now {
            KeyState::Down
        } else {
            KeyState::from_bool_state(&raw.jump)
        };
    }

    pub fn jump(&self) -> KeyState {
        self.jump
    }

    pub fn jump_down(&self) -> bool {
        self.jump == KeyState::Down
    }

    /// The jump button was let go this frame.
    pub fn jump_released(&self) -> bool {
        self.raw_jump.just_released
    }

    pub fn dash_down(&self) -> bool {
        self.dash == KeyState::Down
    }

    /// One-shot read of a (possibly buffered) jump press.
    pub fn consume_jump_down(&mut self) -> bool {
        if self.jump != KeyState::Down {
            return false;
        }
        self.jump_down_until = f32::NEG_INFINITY;
        self.jump = if self.raw_jump.active {
            KeyState::Pressing
        } else {
            KeyState::None
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed() -> InputState {
        let mut raw = InputState::default();
        raw.sample(Vec2::ZERO, true, false);
        raw
    }

    #[test]
    fn test_press_is_buffered_for_window() {
        let mut buffer = InputBuffer::default();
        let mut raw = pressed();
        buffer.update(&raw, 1.0);
        assert!(buffer.jump_down());

        raw.sample(Vec2::ZERO, false, false);
        buffer.update(&raw, 1.05);
        assert!(buffer.jump_down());

        raw.sample(Vec2::ZERO, false, false);
        buffer.update(&raw, 1.11);
        assert!(!buffer.jump_down());
        assert_eq!(buffer.jump(), KeyState::None);
    }

    #[test]
    fn test_consume_is_one_shot() {
        let mut buffer = InputBuffer::default();
        let mut raw = pressed();
        buffer.update(&raw, 0.0);
        assert!(buffer.consume_jump_down());
        assert!(!buffer.consume_jump_down());
        assert_eq!(buffer.jump(), KeyState::Pressing);

        raw.sample(Vec2::ZERO, true, false);
        buffer.update(&raw, 0.02);
        assert!(!buffer.jump_down());
    }

    #[test]
    fn test_release_and_dash_edges() {
        let mut buffer = InputBuffer::default();
        let mut raw = InputState::default();
        raw.sample(Vec2::X, false, true);
        buffer.update(&raw, 0.0);
        assert!(buffer.dash_down());
        assert_eq!(buffer.move_axis, Vec2::X);

        raw.sample(Vec2::X, true, true);
        buffer.update(&raw, 0.016);
        assert!(!buffer.dash_down());

        raw.sample(Vec2::X, false, false);
        buffer.update(&raw, 0.2);
        assert!(buffer.jump_released());
    }
}
