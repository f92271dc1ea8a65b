//! Actor controller system.
//!
//! One pass per actor, in this order:
//!
//! 1. expire a drop-through whose time is up;
//! 2. read input (input-controlled actors only) and ease the horizontal
//!    velocity toward the run speed, then integrate forces such as gravity;
//! 3. run the abilities in priority order;
//! 4. resolve `velocity * dt` through the [`Raycaster`] and write the moved
//!    bounds back into the [`CollisionWorld`];
//! 5. trigger a [`LandedEvent`] on landing, and zero the vertical velocity
//!    when the box touches something above or below.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::abilities::{Abilities, AbilityContext};
use crate::components::actor::Actor;
use crate::components::boxcollider::BoxCollider;
use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::components::raycaster::Raycaster;
use crate::components::rigidbody::RigidBody;
use crate::events::landed::LandedEvent;
use crate::resources::collisionworld::CollisionWorld;
use crate::resources::inputbuffer::InputBuffer;
use crate::resources::worldtime::WorldTime;

#[allow(clippy::type_complexity)]
pub fn actor_controller(
    mut actors: Query<(
        Entity,
        &mut Actor,
        &mut MapPosition,
        &BoxCollider,
        &mut RigidBody,
        &mut Raycaster,
        Option<&mut InputControlled>,
        Option<&mut Abilities>,
    )>,
    mut physics: ResMut<CollisionWorld>,
    mut buttons: ResMut<InputBuffer>,
    mut idle_buttons: Local<InputBuffer>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    let dt = time.delta;
    let now = time.elapsed;
    if dt <= 0.0 {
        return;
    }

    for (entity, mut actor, mut position, collider, mut body, mut raycaster, controlled, abilities) in
        actors.iter_mut()
    {
        raycaster.begin_frame();
        let overlapping = physics.overlaps_one_way(collider.aabb(position.pos));
        if raycaster.pass_through.update(now, overlapping) {
            debug!("{:?} pass-through cleared", entity);
        }

        let actor_buttons: &mut InputBuffer = match controlled {
            Some(mut controlled) => {
                actor.input = buttons.move_axis;
                body.velocity.x = controlled.horizontal_velocity(
                    body.velocity.x,
                    actor.input.x,
                    raycaster.collisions.below,
                    dt,
                );
                &mut *buttons
            }
            None => &mut *idle_buttons,
        };
        body.integrate_forces(dt);

        let actor = &mut *actor;
        let body = &mut *body;
        let raycaster = &mut *raycaster;
        if let Some(mut abilities) = abilities {
            let mut ctx = AbilityContext {
                state: &mut actor.state,
                velocity: &mut body.velocity,
                position: &mut position.pos,
                collider,
                raycaster: &mut *raycaster,
                input: actor.input,
                buttons: actor_buttons,
                physics: &*physics,
                now,
                dt,
            };
            abilities.update(&mut ctx);
        }

        let movement = body.velocity * dt;
        let outcome =
            raycaster.move_and_collide(&mut position.pos, collider, movement, false, &*physics);
        physics.set_bounds(entity, collider.aabb(position.pos));

        if outcome.landed {
            commands.trigger(LandedEvent { entity });
        }

        let info = &raycaster.collisions;
        if info.above || info.below {
            body.velocity.y = 0.0;
        }
    }
}
