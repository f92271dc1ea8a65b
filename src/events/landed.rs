//! Landing notifications.
//!
//! The actor controller triggers a [`LandedEvent`] the frame an actor's
//! below contact turns on, at most once per frame. The built-in observer
//! [`observe_landed_reset_jumps`] refills the actor's jump charges; games
//! can attach more observers (landing dust, sounds) next to it.
//!
//! Events triggered through `Commands` are applied once the controller
//! system finishes, so a refill takes effect from the following frame on.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::abilities::Abilities;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandedEvent {
    pub entity: Entity,
}

/// Refill the jump charges of the actor that landed.
pub fn observe_landed_reset_jumps(trigger: On<LandedEvent>, mut abilities: Query<&mut Abilities>) {
    let entity = trigger.event().entity;
    debug!("{:?} landed", entity);
    if let Ok(mut abilities) = abilities.get_mut(entity)
        && let Some(jump) = abilities.jump_mut()
    {
        jump.reset_charges();
    }
}
