//! Frame snapshot of every collider, answering ray and box queries.
//!
//! The [`PhysicsQuery`] trait is the seam between the controllers and
//! whatever owns world geometry. [`CollisionWorld`] is the in-crate
//! implementation: a flat list of bodies rebuilt each frame by
//! [`sync_collision_world`](crate::systems::collisionworld::sync_collision_world)
//! and patched in place whenever an actor or platform moves mid-frame, so
//! later queries in the same frame see up-to-date bounds.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::components::collisionlayer::Layers;
use crate::math::Aabb;

/// Result of a successful ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The body that was hit.
    pub entity: Entity,
    /// Distance from the ray origin to the hit point. Zero when the origin
    /// already lies inside the body.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec2,
    /// Layers of the body that was hit.
    pub layers: Layers,
    /// Whether the body is tagged as a one-way platform.
    pub one_way: bool,
}

/// Result of a successful box overlap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyHit {
    pub entity: Entity,
    pub bounds: Aabb,
    pub layers: Layers,
    pub one_way: bool,
}

/// Geometry queries the controllers need from the world.
pub trait PhysicsQuery {
    /// Nearest body on `mask` hit by the ray that `accept` does not reject.
    ///
    /// `dir` must be unit length. Rejected bodies are skipped entirely, so a
    /// body further along the ray can still be reported.
    fn raycast(
        &self,
        origin: Vec2,
        dir: Vec2,
        max_distance: f32,
        mask: Layers,
        accept: &dyn Fn(&RayHit) -> bool,
    ) -> Option<RayHit>;

    /// First body on `mask` strictly overlapping `area`.
    fn overlap_box(&self, area: Aabb, mask: Layers) -> Option<BodyHit>;

    /// Current bounds of a known body.
    fn bounds_of(&self, entity: Entity) -> Option<Aabb>;
}

#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    bounds: Aabb,
    layers: Layers,
    one_way: bool,
}

/// Flat collider snapshot used as the frame's [`PhysicsQuery`].
#[derive(Resource, Debug, Default)]
pub struct CollisionWorld {
    bodies: Vec<Body>,
    index: FxHashMap<Entity, usize>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all bodies, keeping allocations for the next rebuild.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Insert or replace a body.
    pub fn insert(&mut self, entity: Entity, bounds: Aabb, layers: Layers, one_way: bool) {
        let body = Body {
            entity,
            bounds,
            layers,
            one_way,
        };
        match self.index.get(&entity) {
            Some(&i) => self.bodies[i] = body,
            None => {
                self.index.insert(entity, self.bodies.len());
                self.bodies.push(body);
            }
        }
    }

    /// Update the bounds of a body that moved. Unknown entities are ignored.
    pub fn set_bounds(&mut self, entity: Entity, bounds: Aabb) {
        if let Some(&i) = self.index.get(&entity) {
            self.bodies[i].bounds = bounds;
        }
    }

    /// Whether `area` overlaps any one-way platform.
    pub fn overlaps_one_way(&self, area: Aabb) -> bool {
        self.bodies
            .iter()
            .any(|b| b.one_way && b.bounds.overlaps(&area))
    }
}

impl PhysicsQuery for CollisionWorld {
    fn raycast(
        &self,
        origin: Vec2,
        dir: Vec2,
        max_distance: f32,
        mask: Layers,
        accept: &dyn Fn(&RayHit) -> bool,
    ) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for body in &self.bodies {
            if !body.layers.intersects(mask) {
                continue;
            }
            let Some(distance) = body.bounds.ray_intersection(origin, dir, max_distance) else {
                continue;
            };
            if best.is_some_and(|b| b.distance <= distance) {
                continue;
            }
            let hit = RayHit {
                entity: body.entity,
                distance,
                point: origin + dir * distance,
                layers: body.layers,
                one_way: body.one_way,
            };
            if accept(&hit) {
                best = Some(hit);
            }
        }
        best
    }

    fn overlap_box(&self, area: Aabb, mask: Layers) -> Option<BodyHit> {
        self.bodies
            .iter()
            .find(|b| b.layers.intersects(mask) && b.bounds.overlaps(&area))
            .map(|b| BodyHit {
                entity: b.entity,
                bounds: b.bounds,
                layers: b.layers,
                one_way: b.one_way,
            })
    }

    fn bounds_of(&self, entity: Entity) -> Option<Aabb> {
        self.index.get(&entity).map(|&i| self.bodies[i].bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accept_all(_: &RayHit) -> bool {
        true
    }

    fn world_with_two_walls() -> (World, CollisionWorld, Entity, Entity) {
        let mut ecs = World::new();
        let near = ecs.spawn_empty().id();
        let far = ecs.spawn_empty().id();
        let mut cw = CollisionWorld::new();
        cw.insert(
            near,
            Aabb::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0)),
            Layers::GROUND,
            true,
        );
        cw.insert(
            far,
            Aabb::new(Vec2::new(5.0, -1.0), Vec2::new(6.0, 1.0)),
            Layers::GROUND,
            false,
        );
        (ecs, cw, near, far)
    }

    #[test]
    fn test_raycast_returns_nearest() {
        let (_ecs, cw, near, _far) = world_with_two_walls();
        let hit = cw
            .raycast(Vec2::ZERO, Vec2::X, 10.0, Layers::GROUND, &accept_all)
            .unwrap();
        assert_eq!(hit.entity, near);
        assert!(hit.one_way);
        assert!((hit.distance - 2.0).abs() < 1e-6);
        assert!((hit.point.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejected_body_does_not_hide_the_next_one() {
        let (_ecs, cw, _near, far) = world_with_two_walls();
        let hit = cw
            .raycast(Vec2::ZERO, Vec2::X, 10.0, Layers::GROUND, &|h| !h.one_way)
            .unwrap();
        assert_eq!(hit.entity, far);
    }

    #[test]
    fn test_mask_filters_layers() {
        let (_ecs, cw, _near, _far) = world_with_two_walls();
        assert!(
            cw.raycast(Vec2::ZERO, Vec2::X, 10.0, Layers::ACTOR, &accept_all)
                .is_none()
        );
    }

    #[test]
    fn test_set_bounds_moves_body() {
        let (_ecs, mut cw, near, _far) = world_with_two_walls();
        let moved = Aabb::new(Vec2::new(-3.0, -1.0), Vec2::new(-2.0, 1.0));
        cw.set_bounds(near, moved);
        assert_eq!(cw.bounds_of(near), Some(moved));
        assert_eq!(cw.len(), 2);
    }

    #[test]
    fn test_overlap_box_and_one_way_probe() {
        let (_ecs, cw, near, _far) = world_with_two_walls();
        let probe = Aabb::from_center(Vec2::new(2.5, 0.0), Vec2::splat(0.25));
        let hit = cw.overlap_box(probe, Layers::GROUND).unwrap();
        assert_eq!(hit.entity, near);
        assert!(cw.overlaps_one_way(probe));
        assert!(cw.overlap_box(probe, Layers::LADDER).is_none());
    }

    #[test]
    fn test_clear_keeps_nothing() {
        let (_ecs, mut cw, near, _far) = world_with_two_walls();
        cw.clear();
        assert!(cw.is_empty());
        assert!(cw.bounds_of(near).is_none());
    }
}
