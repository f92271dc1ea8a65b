//! Input systems.
//!
//! - [`update_input_buffer`] folds the raw [`InputState`] sampled by the host
//!   into the buffered [`InputBuffer`] the controllers read.
use bevy_ecs::prelude::*;

use crate::resources::input::InputState;
use crate::resources::inputbuffer::InputBuffer;
use crate::resources::worldtime::WorldTime;

pub fn update_input_buffer(
    input: Res<InputState>,
    mut buffer: ResMut<InputBuffer>,
    time: Res<WorldTime>,
) {
    buffer.update(&input, time.elapsed);
}
