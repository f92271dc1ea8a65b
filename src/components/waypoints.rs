//! Authored patrol paths and the motor that walks them.
//!
//! A [`WaypointPath`] is an ordered list of world-space points. For editing,
//! it is treated as a closed polyline (the last point links back to the
//! first), which is what [`WaypointPath::segment_near`] searches. Traversal
//! by [`PathMotor`] follows the points in order and either wraps around or
//! turns back at the ends.

use std::fs;
use std::path::Path;

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Distance under which a dragged point's axis snaps to a neighbour.
pub const SNAP_DISTANCE: f32 = 0.15;
/// Pick radius used by editors when hit-testing points.
pub const POINT_PICK_RADIUS: f32 = 0.15;

#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointPath {
    pub points: Vec<Vec2>,
}

impl WaypointPath {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    /// Append a point and return its index.
    pub fn add_point(&mut self, point: Vec2) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Insert a point before `index`; an index past the end appends.
    pub fn insert_point(&mut self, index: usize, point: Vec2) -> usize {
        let index = index.min(self.points.len());
        self.points.insert(index, point);
        index
    }

    pub fn remove_point(&mut self, index: usize) -> Option<Vec2> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    /// First point within `radius` of `pos`.
    pub fn point_near(&self, pos: Vec2, radius: f32) -> Option<usize> {
        self.points.iter().position(|p| p.distance(pos) <= radius)
    }

    /// Closest segment within `max_distance` of `pos`. Segment `i` runs from
    /// point `i` to point `i + 1`, the last one closing back to point 0.
    /// Inserting at `i + 1` splits it.
    pub fn segment_near(&self, pos: Vec2, max_distance: f32) -> Option<usize> {
        let n = self.points.len();
        let mut best = None;
        let mut best_dist = max_distance;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let dist = distance_to_segment(pos, a, b);
            if dist <= best_dist {
                best = Some(i);
                best_dist = dist;
            }
        }
        best
    }

    /// Move a point. With `snap`, each axis lines up with the nearer of the
    /// two neighbours when it is within [`SNAP_DISTANCE`].
    pub fn move_point(&mut self, index: usize, target: Vec2, snap: bool) -> Option<Vec2> {
        let n = self.points.len();
        if index >= n {
            return None;
        }
        let mut pos = target;
        if snap {
            let prev = self.points[(index + n - 1) % n];
            let next = self.points[(index + 1) % n];
            pos.x = snap_axis(target.x, prev.x, next.x);
            pos.y = snap_axis(target.y, prev.y, next.y);
        }
        self.points[index] = pos;
        Some(pos)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::WaypointIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| Error::WaypointIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn snap_axis(value: f32, prev: f32, next: f32) -> f32 {
    let prev_delta = (value - prev).abs();
    let next_delta = (value - next).abs();
    if prev_delta < next_delta {
        if prev_delta < SNAP_DISTANCE {
            return prev;
        }
    } else if next_delta < SNAP_DISTANCE {
        return next;
    }
    value
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Walks a [`WaypointPath`] at constant speed.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PathMotor {
    /// Units per second.
    pub speed: f32,
    /// Wrap from the last point to the first instead of turning back.
    pub looping: bool,
    index: usize,
    descend: bool,
}

impl PathMotor {
    pub fn new(speed: f32, looping: bool) -> Self {
        Self {
            speed,
            looping,
            index: 0,
            descend: false,
        }
    }

    /// Index of the point currently headed for.
    pub fn target_index(&self) -> usize {
        self.index
    }

    pub fn is_descending(&self) -> bool {
        self.descend
    }

    /// Position after moving from `current` toward the target for `dt`.
    /// Reaching the target snaps onto it and selects the next one; leftover
    /// distance is dropped.
    pub fn advance(&mut self, current: Vec2, path: &WaypointPath, dt: f32) -> Vec2 {
        let Some(target) = path.point(self.index.min(path.len().saturating_sub(1))) else {
            return current;
        };
        let to_target = target - current;
        let step = self.speed * dt;
        if step >= to_target.length() {
            self.next_index(path.len());
            target
        } else {
            current + to_target.normalize_or_zero() * step
        }
    }

    fn next_index(&mut self, count: usize) {
        let count = count as isize;
        let mut index = self.index as isize;
        if self.descend {
            index -= 1;
            if index < 0 {
                if self.looping {
                    index = count - 1;
                } else {
                    index = 1;
                    self.descend = false;
                }
            }
        } else {
            index += 1;
            if index >= count {
                if self.looping {
                    index = 0;
                } else {
                    index -= 2;
                    self.descend = true;
                }
            }
        }
        self.index = index.clamp(0, (count - 1).max(0)) as usize;
    }
}
