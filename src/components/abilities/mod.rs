//! Ability state machine.
//!
//! Abilities are a closed set, so they are an enum rather than trait
//! objects. Every ability answers two questions each frame:
//!
//! - `can_update`: may it run given the actor's current state and contacts?
//! - `update`: read input and contacts, write the velocity and possibly
//!   claim or release [`ActorState`].
//!
//! [`Ability::tick`] glues them: when `can_update` fails and the ability
//! owns the current state, the actor falls back to [`ActorState::Normal`].
//! [`Abilities`] keeps the list in a fixed priority order and runs it.
//!
//! Abilities never hold a reference to their actor. The controller lends
//! them an [`AbilityContext`] for the duration of one update instead.

pub mod climbladder;
pub mod climbwall;
pub mod dash;
pub mod grabledge;
pub mod jump;
pub mod slidewall;

use bevy_ecs::prelude::Component;
use glam::Vec2;
use log::debug;

use crate::components::actor::ActorState;
use crate::components::boxcollider::BoxCollider;
use crate::components::raycaster::Raycaster;
use crate::resources::collisionworld::PhysicsQuery;
use crate::resources::inputbuffer::InputBuffer;
use crate::resources::motionconfig::MotionConfig;

pub use climbladder::ClimbLadderAbility;
pub use climbwall::ClimbWallAbility;
pub use dash::DashAbility;
pub use grabledge::GrabLedgeAbility;
pub use jump::JumpAbility;
pub use slidewall::SlideWallAbility;

/// Everything an ability may read or write during one update.
pub struct AbilityContext<'a> {
    pub state: &'a mut ActorState,
    pub velocity: &'a mut Vec2,
    pub position: &'a mut Vec2,
    pub collider: &'a BoxCollider,
    pub raycaster: &'a mut Raycaster,
    /// Directional input of this frame.
    pub input: Vec2,
    pub buttons: &'a mut InputBuffer,
    pub physics: &'a dyn PhysicsQuery,
    /// Elapsed world time in seconds.
    pub now: f32,
    pub dt: f32,
}

impl AbilityContext<'_> {
    /// Hand the state tag over, logging real transitions.
    pub fn set_state(&mut self, next: ActorState) {
        if *self.state != next {
            debug!("actor state {} -> {}", self.state.name(), next.name());
            *self.state = next;
        }
    }

    pub fn grounded(&self) -> bool {
        self.raycaster.collisions.below
    }

    /// World-space top-left or top-right corner of the box.
    pub fn top_corner(&self, dir: f32) -> Vec2 {
        let bounds = self.collider.aabb(*self.position);
        Vec2::new(
            if dir < 0.0 { bounds.min.x } else { bounds.max.x },
            bounds.max.y,
        )
    }

    pub fn top(&self) -> f32 {
        self.collider.aabb(*self.position).max.y
    }
}

/// Discriminant of [`Ability`], handy for lookups and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    Jump,
    Dash,
    SlideWall,
    ClimbWall,
    GrabLedge,
    ClimbLadder,
}

impl AbilityKind {
    /// Evaluation order; lower runs first.
    pub fn priority(self) -> u8 {
        match self {
            AbilityKind::Jump => 0,
            AbilityKind::SlideWall => 1,
            AbilityKind::ClimbWall => 2,
            AbilityKind::GrabLedge => 3,
            AbilityKind::ClimbLadder => 4,
            AbilityKind::Dash => 5,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Ability {
    Jump(JumpAbility),
    Dash(DashAbility),
    SlideWall(SlideWallAbility),
    ClimbWall(ClimbWallAbility),
    GrabLedge(GrabLedgeAbility),
    ClimbLadder(ClimbLadderAbility),
}

impl Ability {
    pub fn kind(&self) -> AbilityKind {
        match self {
            Ability::Jump(_) => AbilityKind::Jump,
            Ability::Dash(_) => AbilityKind::Dash,
            Ability::SlideWall(_) => AbilityKind::SlideWall,
            Ability::ClimbWall(_) => AbilityKind::ClimbWall,
            Ability::GrabLedge(_) => AbilityKind::GrabLedge,
            Ability::ClimbLadder(_) => AbilityKind::ClimbLadder,
        }
    }

    /// State tag this ability claims while active. Jump never claims one.
    pub fn owned_state(&self) -> Option<ActorState> {
        match self {
            Ability::Jump(_) => None,
            Ability::Dash(_) => Some(ActorState::Dash),
            Ability::SlideWall(_) | Ability::ClimbWall(_) => Some(ActorState::SlideWall),
            Ability::GrabLedge(_) => Some(ActorState::GrabLedge),
            Ability::ClimbLadder(_) => Some(ActorState::ClimbLadder),
        }
    }

    pub fn can_update(&self, ctx: &AbilityContext) -> bool {
        match self {
            Ability::Jump(a) => a.can_update(ctx),
            Ability::Dash(a) => a.can_update(ctx),
            Ability::SlideWall(a) => a.can_update(ctx),
            Ability::ClimbWall(a) => a.can_update(ctx),
            Ability::GrabLedge(a) => a.can_update(ctx),
            Ability::ClimbLadder(a) => a.can_update(ctx),
        }
    }

    pub fn update(&mut self, ctx: &mut AbilityContext) {
        match self {
            Ability::Jump(a) => a.update(ctx),
            Ability::Dash(a) => a.update(ctx),
            Ability::SlideWall(a) => a.update(ctx),
            Ability::ClimbWall(a) => a.update(ctx),
            Ability::GrabLedge(a) => a.update(ctx),
            Ability::ClimbLadder(a) => a.update(ctx),
        }
    }

    fn relinquish(&mut self, ctx: &mut AbilityContext) {
        if let Ability::ClimbLadder(a) = self {
            a.release();
        }
        ctx.set_state(ActorState::Normal);
    }

    /// Run the ability for one frame, or give its state back if it cannot run.
    pub fn tick(&mut self, ctx: &mut AbilityContext) {
        if self.can_update(ctx) {
            self.update(ctx);
        } else if self.owned_state() == Some(*ctx.state) {
            self.relinquish(ctx);
        }
    }
}

/// Ordered ability set of one actor.
#[derive(Component, Debug, Clone, Default)]
pub struct Abilities {
    list: Vec<Ability>,
}

impl Abilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every ability, tuned from `config`. Wall handling uses the sliding
    /// variant with a stick timer.
    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new()
            .with(Ability::Jump(JumpAbility::from_config(&config.jump)))
            .with(Ability::SlideWall(SlideWallAbility::from_config(&config.wall)))
            .with(Ability::GrabLedge(GrabLedgeAbility::from_config(
                &config.ledge,
                config.wall.slide_speed,
            )))
            .with(Ability::ClimbLadder(ClimbLadderAbility::from_config(&config.ladder)))
            .with(Ability::Dash(DashAbility::from_config(&config.dash)))
    }

    /// Add an ability, replacing one of the same kind, keeping priority order.
    pub fn with(mut self, ability: Ability) -> Self {
        self.insert(ability);
        self
    }

    pub fn insert(&mut self, ability: Ability) {
        let kind = ability.kind();
        self.list.retain(|a| a.kind() != kind);
        let at = self
            .list
            .iter()
            .position(|a| a.kind().priority() > kind.priority())
            .unwrap_or(self.list.len());
        self.list.insert(at, ability);
    }

    pub fn remove(&mut self, kind: AbilityKind) -> Option<Ability> {
        let at = self.list.iter().position(|a| a.kind() == kind)?;
        Some(self.list.remove(at))
    }

    pub fn kinds(&self) -> impl Iterator<Item = AbilityKind> + '_ {
        self.list.iter().map(Ability::kind)
    }

    pub fn jump(&self) -> Option<&JumpAbility> {
        self.list.iter().find_map(|a| match a {
            Ability::Jump(j) => Some(j),
            _ => None,
        })
    }

    pub fn jump_mut(&mut self) -> Option<&mut JumpAbility> {
        self.list.iter_mut().find_map(|a| match a {
            Ability::Jump(j) => Some(j),
            _ => None,
        })
    }

    /// Run every ability once in priority order.
    pub fn update(&mut self, ctx: &mut AbilityContext) {
        for ability in &mut self.list {
            ability.tick(ctx);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use bevy_ecs::prelude::*;
    use glam::Vec2;

    use crate::components::boxcollider::BoxCollider;
    use crate::components::collisionlayer::Layers;
    use crate::components::raycaster::Raycaster;
    use crate::math::Aabb;
    use crate::resources::collisionworld::CollisionWorld;
    use crate::resources::input::InputState;
    use crate::resources::inputbuffer::InputBuffer;

    /// Actor fixture: a 1x1 box plus a world to cast against.
    pub struct Rig {
        pub ecs: World,
        pub physics: CollisionWorld,
        pub position: Vec2,
        pub velocity: Vec2,
        pub collider: BoxCollider,
        pub raycaster: Raycaster,
        pub buttons: InputBuffer,
        pub raw: InputState,
    }

    impl Rig {
        pub fn new(position: Vec2) -> Self {
            Self {
                ecs: World::new(),
                physics: CollisionWorld::new(),
                position,
                velocity: Vec2::ZERO,
                collider: BoxCollider::new(1.0, 1.0),
                raycaster: Raycaster::new(Layers::GROUND),
                buttons: InputBuffer::default(),
                raw: InputState::default(),
            }
        }

        pub fn solid(&mut self, min: Vec2, max: Vec2) -> Entity {
            let e = self.ecs.spawn_empty().id();
            self.physics.insert(e, Aabb::new(min, max), Layers::GROUND, false);
            e
        }

        pub fn one_way(&mut self, min: Vec2, max: Vec2) -> Entity {
            let e = self.ecs.spawn_empty().id();
            self.physics.insert(e, Aabb::new(min, max), Layers::GROUND, true);
            e
        }

        pub fn ladder(&mut self, min: Vec2, max: Vec2) -> Entity {
            let e = self.ecs.spawn_empty().id();
            self.physics.insert(e, Aabb::new(min, max), Layers::LADDER, false);
            e
        }

        /// Feed the buttons for this frame.
        pub fn press(&mut self, jump: bool, dash: bool, now: f32) {
            self.raw.sample(Vec2::ZERO, jump, dash);
            self.buttons.update(&self.raw, now);
        }
    }

    /// Build an [`AbilityContext`](super::AbilityContext) borrowing from a [`Rig`].
    macro_rules! ctx {
        ($rig:expr, $state:expr, $input:expr, $now:expr, $dt:expr) => {
            $crate::components::abilities::AbilityContext {
                state: $state,
                velocity: &mut $rig.velocity,
                position: &mut $rig.position,
                collider: &$rig.collider,
                raycaster: &mut $rig.raycaster,
                input: $input,
                buttons: &mut $rig.buttons,
                physics: &$rig.physics,
                now: $now,
                dt: $dt,
            }
        };
    }
    pub(crate) use ctx;
}
