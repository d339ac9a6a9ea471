//! Force layer
//!
//! Forces add into the `f`/`t` accumulators once per `calc_forces()` pass.
//! Actors run once per frame after that pass and before integration.
//!
//! - gravity.rs         - uniform field, plus corner torque on rigid boxes
//! - spring.rs          - damped linear spring between two particles
//! - angular_spring.rs  - hinge spring over three particles
//! - glue.rs            - pins a particle to a fixed point
//! - borders.rs         - keeps bodies inside the scene bounds
//! - rigid_force.rs     - couples a proxy particle to a rigid body
//! - drag.rs            - pointer spring used while dragging

mod angular_spring;
mod borders;
mod drag;
mod glue;
mod gravity;
mod rigid_force;
mod spring;

pub use angular_spring::{unwrap_angle, AngularSpring};
pub use borders::Borders;
pub use drag::Drag;
pub use glue::Glue;
pub use gravity::Gravity;
pub use rigid_force::{RigidCoupling, RigidFollow, RigidRedirect};
pub use spring::Spring;

use crate::core::Vec2;
use crate::domain::{Bounds, PointerState};
use crate::state::{ParticleStore, RigidStore};

use super::shapes::{Collidable, Quad};
use super::visit::EntityVisitor;

/// Scene-wide values forces read but never write
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Environment {
    pub bounds: Bounds,
    pub gravity: Vec2,
    pub pointer: PointerState,
}

impl Environment {
    /// Pointer position in world coordinates
    pub fn pointer_world(&self) -> Vec2 {
        self.bounds.denormalize(self.pointer.pos)
    }
}

/// Mutable access to the stores for one force/actor pass
pub struct Bodies<'a> {
    pub particles: &'a mut ParticleStore,
    pub rigids: &'a mut RigidStore,
    pub quads: &'a [Quad],
    pub collidables: &'a [Collidable],
    pub env: &'a Environment,
}

/// Read-only counterpart of [`Bodies`] for drawing
pub struct BodiesView<'a> {
    pub particles: &'a ParticleStore,
    pub rigids: &'a RigidStore,
    pub quads: &'a [Quad],
    pub env: &'a Environment,
}

pub trait Force {
    fn apply(&mut self, bodies: &mut Bodies<'_>);

    /// Kinematic forces write positions/velocities that every other force
    /// must see, so the scene runs them first.
    fn is_kinematic(&self) -> bool {
        false
    }

    /// Queried once at registration to build the drawable list.
    fn is_drawable(&self) -> bool {
        false
    }

    fn draw(&self, _bodies: &BodiesView<'_>, _visitor: &mut dyn EntityVisitor) {}
}

pub trait Actor {
    fn act(&mut self, bodies: &mut Bodies<'_>, dt: f64);
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Owns everything a [`Bodies`] borrows, for force unit tests.
    #[derive(Default)]
    pub struct Fixture {
        pub particles: ParticleStore,
        pub rigids: RigidStore,
        pub quads: Vec<Quad>,
        pub collidables: Vec<Collidable>,
        pub env: Environment,
    }

    impl Fixture {
        pub fn particle(&mut self, x: Vec2, v: Vec2, m: f64) -> crate::state::ParticleId {
            let id = self.particles.append(x, v, m);
            self.particles.rebase();
            id
        }

        pub fn rigid(&mut self, x: Vec2, angle: f64, size: f64, m: f64) -> crate::state::RigidId {
            let id = self.rigids.append(x, angle, size, m);
            self.rigids.rebase();
            id
        }

        pub fn bodies(&mut self) -> Bodies<'_> {
            Bodies {
                particles: &mut self.particles,
                rigids: &mut self.rigids,
                quads: &self.quads,
                collidables: &self.collidables,
                env: &self.env,
            }
        }
    }
}
