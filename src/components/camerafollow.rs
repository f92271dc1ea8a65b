//! Dead-zone camera rig with horizontal look-ahead.
//!
//! The camera tracks a [`FocusArea`]: a rectangle that only moves when the
//! target's box pushes against one of its sides, and then by exactly the
//! overflow. The vertical camera position is smooth-damped toward the area's
//! centre. Horizontally, while the area is moving and the player holds the
//! same direction, the camera leads by the look-ahead distance; when input
//! stops agreeing, the lead target eases only a quarter of the way toward
//! the full lead and stays there, so the view does not snap.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::math::{Aabb, sign, smooth_damp};
use crate::resources::motionconfig::CameraConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusArea {
    pub center: Vec2,
    /// Shift applied by the last update.
    pub movement: Vec2,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
}

impl FocusArea {
    pub fn new(target: Aabb, size: Vec2) -> Self {
        let c = target.center();
        let half = size * 0.5;
        Self {
            center: c,
            movement: Vec2::ZERO,
            left: c.x - half.x,
            right: c.x + half.x,
            bottom: c.y - half.y,
            top: c.y + half.y,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.left, self.bottom),
            Vec2::new(self.right, self.top),
        )
    }

    /// Shift just enough to contain `target` again on each axis.
    pub fn update(&mut self, target: Aabb) {
        let shift_x = if target.min.x < self.left {
            target.min.x - self.left
        } else if target.max.x > self.right {
            target.max.x - self.right
        } else {
            0.0
        };

        let shift_y = if target.min.y < self.bottom {
            target.min.y - self.bottom
        } else if target.max.y > self.top {
            target.max.y - self.top
        } else {
            0.0
        };

        self.left += shift_x;
        self.right += shift_x;
        self.bottom += shift_y;
        self.top += shift_y;
        self.center = Vec2::new(
            (self.left + self.right) * 0.5,
            (self.bottom + self.top) * 0.5,
        );
        self.movement = Vec2::new(shift_x, shift_y);
    }
}

/// Camera rig following one actor.
#[derive(Component, Debug, Clone)]
pub struct CameraFollow {
    pub target: Entity,
    /// Offset from the focus centre to the camera position.
    pub offset: Vec2,
    pub focus_size: Vec2,
    pub look_ahead_distance: f32,
    pub horizontal_smooth_time: f32,
    pub vertical_smooth_time: f32,
    focus: Option<FocusArea>,
    smooth_x: f32,
    smooth_y: f32,
    look_ahead: f32,
    look_ahead_target: f32,
    look_ahead_stopped: bool,
}

impl CameraFollow {
    pub fn new(target: Entity, config: &CameraConfig) -> Self {
        Self {
            target,
            offset: Vec2::ZERO,
            focus_size: config.focus_size,
            look_ahead_distance: config.look_ahead_distance,
            horizontal_smooth_time: config.horizontal_smooth_time,
            vertical_smooth_time: config.vertical_smooth_time,
            focus: None,
            smooth_x: 0.0,
            smooth_y: 0.0,
            look_ahead: 0.0,
            look_ahead_target: 0.0,
            look_ahead_stopped: false,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn focus(&self) -> Option<&FocusArea> {
        self.focus.as_ref()
    }

    pub fn look_ahead(&self) -> f32 {
        self.look_ahead
    }

    /// New camera position for a target box and the target's input.
    ///
    /// The first call only initialises the focus area around the target.
    pub fn follow(&mut self, camera: Vec2, target: Aabb, input_x: f32, dt: f32) -> Vec2 {
        let focus = self
            .focus
            .get_or_insert_with(|| FocusArea::new(target, self.focus_size));
        focus.update(target);
        let area = *focus;

        let mut pos = area.center + self.offset;
        pos.y = smooth_damp(
            camera.y,
            pos.y,
            &mut self.smooth_y,
            self.vertical_smooth_time,
            dt,
        );

        if area.movement.x != 0.0 {
            let dir = sign(area.movement.x);
            if input_x != 0.0 && sign(input_x) == dir {
                self.look_ahead_stopped = false;
                self.look_ahead_target = dir * self.look_ahead_distance;
            } else if !self.look_ahead_stopped {
                self.look_ahead_stopped = true;
                self.look_ahead_target = self.look_ahead
                    + (dir * self.look_ahead_distance - self.look_ahead) / 4.0;
            }
        }

        self.look_ahead = smooth_damp(
            self.look_ahead,
            self.look_ahead_target,
            &mut self.smooth_x,
            self.horizontal_smooth_time,
            dt,
        );
        pos.x += self.look_ahead;
        pos
    }
}
