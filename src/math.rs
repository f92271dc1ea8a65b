//! Small geometry and smoothing helpers shared by the controllers.
//!
//! The coordinate system is y-up: positive `y` points toward the ceiling and
//! gravity is a negative vertical acceleration.

use glam::Vec2;

/// Axis-aligned rectangle stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build from corners, normalizing so that `min <= max` on both axes.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Strict overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Slab test for a ray starting at `origin` travelling along `dir` (unit length).
    ///
    /// Returns the distance to the first intersection within `max_distance`.
    /// An origin inside (or on the boundary of) the box reports distance zero.
    pub fn ray_intersection(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for axis in 0..2 {
            let o = origin[axis];
            let d = dir[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if d.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// Sign that maps zero to zero, unlike [`f32::signum`].
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Critically damped spring toward `target`.
///
/// `velocity` carries the spring state between calls. Never overshoots the
/// target. A zero or negative `dt` leaves `current` untouched.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_aabb_normalizes_corners() {
        let aabb = Aabb::new(Vec2::new(2.0, 3.0), Vec2::new(-1.0, 0.0));
        assert_eq!(aabb.min, Vec2::new(-1.0, 0.0));
        assert_eq!(aabb.max, Vec2::new(2.0, 3.0));
        assert_eq!(aabb.center(), Vec2::new(0.5, 1.5));
    }

    #[test]
    fn test_aabb_overlap_excludes_touching() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(1.0));
        let b = Aabb::from_center(Vec2::new(2.0, 0.0), Vec2::splat(1.0));
        let c = Aabb::from_center(Vec2::new(1.5, 0.0), Vec2::splat(1.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_ray_hits_box_ahead() {
        let aabb = Aabb::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0));
        let d = aabb.ray_intersection(Vec2::ZERO, Vec2::X, 5.0).unwrap();
        assert!(approx_eq(d, 2.0));
    }

    #[test]
    fn test_ray_misses_when_too_short_or_behind() {
        let aabb = Aabb::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0));
        assert!(aabb.ray_intersection(Vec2::ZERO, Vec2::X, 1.5).is_none());
        assert!(aabb.ray_intersection(Vec2::ZERO, Vec2::NEG_X, 5.0).is_none());
        assert!(aabb.ray_intersection(Vec2::new(0.0, 2.0), Vec2::X, 5.0).is_none());
    }

    #[test]
    fn test_ray_from_inside_reports_zero() {
        let aabb = Aabb::from_center(Vec2::ZERO, Vec2::splat(1.0));
        assert_eq!(aabb.ray_intersection(Vec2::ZERO, Vec2::Y, 1.0), Some(0.0));
    }

    #[test]
    fn test_sign_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(0.2), 1.0);
    }

    #[test]
    fn test_smooth_damp_converges_without_overshoot() {
        let mut v = 0.0;
        let mut x = 0.0;
        for _ in 0..200 {
            x = smooth_damp(x, 6.0, &mut v, 0.1, 1.0 / 60.0);
            assert!(x <= 6.0 + EPSILON);
        }
        assert!(approx_eq(x, 6.0));
    }

    #[test]
    fn test_smooth_damp_zero_dt_is_noop() {
        let mut v = 1.0;
        assert_eq!(smooth_damp(2.0, 10.0, &mut v, 0.1, 0.0), 2.0);
        assert_eq!(v, 1.0);
    }
}
