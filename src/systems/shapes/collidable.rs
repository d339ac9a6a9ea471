use crate::core::Vec2;
use crate::state::{ParticleStore, QuadId, RigidId, RigidStore};

use super::Quad;

/// Something the collision and fluid layers can treat as a convex polygon.
///
/// Resolved once when the shape is registered, so per-frame code matches on
/// the tag instead of asking each entity what it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collidable {
    Quad(QuadId),
    Rigid(RigidId),
}

impl Collidable {
    pub fn corners(&self, particles: &ParticleStore, rigids: &RigidStore, quads: &[Quad]) -> [Vec2; 4] {
        match *self {
            Collidable::Quad(id) => quads[id.index()].positions(particles),
            Collidable::Rigid(id) => rigids.corners(id),
        }
    }

    pub fn center(&self, particles: &ParticleStore, rigids: &RigidStore, quads: &[Quad]) -> Vec2 {
        match *self {
            Collidable::Quad(id) => quads[id.index()].center(particles),
            Collidable::Rigid(id) => rigids.x(id),
        }
    }

    pub fn inverse_mass(&self, particles: &ParticleStore, rigids: &RigidStore, quads: &[Quad]) -> f64 {
        match *self {
            Collidable::Quad(id) => 1.0 / quads[id.index()].mass(particles),
            Collidable::Rigid(id) => 1.0 / rigids.m(id),
        }
    }

    pub fn velocity_at(&self, particles: &ParticleStore, rigids: &RigidStore, quads: &[Quad], at: Vec2) -> Vec2 {
        match *self {
            Collidable::Quad(id) => quads[id.index()].velocity(particles),
            Collidable::Rigid(id) => rigids.velocity_at(id, at),
        }
    }

    pub fn translate(&self, particles: &mut ParticleStore, rigids: &mut RigidStore, quads: &[Quad], delta: Vec2) {
        match *self {
            Collidable::Quad(id) => quads[id.index()].translate(particles, delta),
            Collidable::Rigid(id) => *rigids.x_mut(id) += delta,
        }
    }

    pub fn apply_impulse(
        &self,
        particles: &mut ParticleStore,
        rigids: &mut RigidStore,
        quads: &[Quad],
        impulse: Vec2,
        at: Vec2,
    ) {
        match *self {
            Collidable::Quad(id) => quads[id.index()].apply_impulse(particles, impulse),
            Collidable::Rigid(id) => rigids.apply_impulse(id, impulse, at),
        }
    }

    pub fn add_force_at(
        &self,
        particles: &mut ParticleStore,
        rigids: &mut RigidStore,
        quads: &[Quad],
        force: Vec2,
        at: Vec2,
    ) {
        match *self {
            Collidable::Quad(id) => quads[id.index()].add_force_at(particles, force, at),
            Collidable::Rigid(id) => rigids.add_force_at(id, force, at),
        }
    }
}
