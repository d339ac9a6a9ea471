//! Scene - everything the integrators touch
//!
//! Kept apart from `Simulation` so an integrator can borrow the scene
//! mutably while the simulation still owns the integrator itself.

use crate::core::Vec2;
use crate::domain::{check_mass, Bounds, SceneError};
use crate::state::{ParticleId, ParticleStore, QuadId, RigidId, RigidStore};
use crate::systems::forces::{Bodies, BodiesView, Drag, Environment, Force};
use crate::systems::shapes::{Collidable, Quad, QuadTexture};

/// Where a registered force lives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceSlot {
    Kinematic(usize),
    Ordinary(usize),
}

pub struct Scene {
    pub(super) particles: ParticleStore,
    pub(super) rigids: RigidStore,
    // one entry per rigid row
    pub(super) rigid_textures: Vec<Option<QuadTexture>>,
    pub(super) quads: Vec<Quad>,
    pub(super) collidables: Vec<Collidable>,
    // run before `forces` every pass
    pub(super) kinematic: Vec<Box<dyn Force>>,
    pub(super) forces: Vec<Box<dyn Force>>,
    pub(super) drag: Option<Drag>,
    pub(super) env: Environment,
    pub(super) quad_epoch: u32,
}

impl Scene {
    pub fn new(bounds: Bounds, gravity: Vec2) -> Self {
        Self {
            particles: ParticleStore::new(),
            rigids: RigidStore::new(),
            rigid_textures: Vec::new(),
            quads: Vec::new(),
            collidables: Vec::new(),
            kinematic: Vec::new(),
            forces: Vec::new(),
            drag: None,
            env: Environment { bounds, gravity, ..Environment::default() },
            quad_epoch: 0,
        }
    }

    // === Integrator contract ===

    /// Zeroes every accumulator, then runs kinematic forces, ordinary
    /// forces and the pointer drag, in that order.
    pub fn calc_forces(&mut self) {
        self.particles.clear_forces();
        self.rigids.clear_forces();

        let Scene { particles, rigids, quads, collidables, kinematic, forces, drag, env, .. } = self;
        let mut bodies = Bodies {
            particles,
            rigids,
            quads: &quads[..],
            collidables: &collidables[..],
            env: &*env,
        };
        for force in kinematic.iter_mut().chain(forces.iter_mut()) {
            force.apply(&mut bodies);
        }
        if let Some(drag) = drag {
            drag.apply(&mut bodies);
        }
    }

    /// Snapshots `x, v` (and `o, w` for rigid bodies). Forces are not saved.
    pub fn save_state(&mut self) {
        self.particles.save_state();
        self.rigids.save_state();
    }

    pub fn restore_state(&mut self) {
        self.particles.restore_state();
        self.rigids.restore_state();
    }

    // === Access ===

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleStore {
        &mut self.particles
    }

    pub fn rigids(&self) -> &RigidStore {
        &self.rigids
    }

    pub fn rigids_mut(&mut self) -> &mut RigidStore {
        &mut self.rigids
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn collidables(&self) -> &[Collidable] {
        &self.collidables
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn force_count(&self) -> usize {
        self.kinematic.len() + self.forces.len()
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

    pub fn view(&self) -> BodiesView<'_> {
        BodiesView {
            particles: &self.particles,
            rigids: &self.rigids,
            quads: &self.quads,
            env: &self.env,
        }
    }

    // === Building ===

    pub fn add_particle(&mut self, x: Vec2, v: Vec2, m: f64) -> Result<ParticleId, SceneError> {
        let m = check_mass(m)?;
        let id = self.particles.append(x, v, m);
        self.particles.rebase();
        Ok(id)
    }

    /// Square rigid box; also registered as a collidable.
    pub fn add_rigid_box(&mut self, x: Vec2, angle: f64, size: f64, m: f64) -> Result<RigidId, SceneError> {
        let m = check_mass(m)?;
        if !(size.is_finite() && size > 0.0) {
            return Err(SceneError::InvalidConfiguration { reason: "box size must be positive" });
        }
        let id = self.rigids.append(x, angle, size, m);
        self.rigids.rebase();
        self.rigid_textures.push(None);
        self.collidables.push(Collidable::Rigid(id));
        Ok(id)
    }

    pub fn set_rigid_texture(&mut self, id: RigidId, texture: Option<QuadTexture>) -> Result<(), SceneError> {
        let row = self.rigids.check(id)?;
        self.rigid_textures[row] = texture;
        Ok(())
    }

    pub fn rigid_texture(&self, id: RigidId) -> Option<&QuadTexture> {
        self.rigid_textures.get(id.index()).and_then(Option::as_ref)
    }

    /// Quad over four existing particles; also registered as a collidable.
    pub fn add_quad(&mut self, quad: Quad) -> Result<QuadId, SceneError> {
        for corner in quad.corners {
            self.particles.check(corner)?;
        }
        self.quads.push(quad);
        let id = QuadId::new(self.quads.len() - 1, self.quad_epoch);
        self.collidables.push(Collidable::Quad(id));
        Ok(id)
    }

    pub fn quad_mut(&mut self, id: QuadId) -> Result<&mut Quad, SceneError> {
        let row = id.check(self.quads.len(), self.quad_epoch)?;
        Ok(&mut self.quads[row])
    }

    /// Handle for quad `row` in the current scene
    pub fn quad_id_at(&self, row: usize) -> Result<QuadId, SceneError> {
        let id = QuadId::new(row, self.quad_epoch);
        id.check(self.quads.len(), self.quad_epoch)?;
        Ok(id)
    }

    pub fn add_force(&mut self, force: Box<dyn Force>) -> ForceSlot {
        if force.is_kinematic() {
            self.kinematic.push(force);
            ForceSlot::Kinematic(self.kinematic.len() - 1)
        } else {
            self.forces.push(force);
            ForceSlot::Ordinary(self.forces.len() - 1)
        }
    }

    pub fn force(&self, slot: ForceSlot) -> Option<&dyn Force> {
        match slot {
            ForceSlot::Kinematic(i) => self.kinematic.get(i).map(|f| f.as_ref()),
            ForceSlot::Ordinary(i) => self.forces.get(i).map(|f| f.as_ref()),
        }
    }

    pub fn set_drag(&mut self, drag: Option<Drag>) {
        self.drag = drag;
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.env.gravity = gravity;
    }

    pub fn set_pointer(&mut self, pointer: crate::domain::PointerState) {
        self.env.pointer = pointer;
    }

    /// Drops every entity; old handles become stale.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.rigids.clear();
        self.rigid_textures.clear();
        self.quads.clear();
        self.collidables.clear();
        self.kinematic.clear();
        self.forces.clear();
        self.drag = None;
        self.quad_epoch = self.quad_epoch.wrapping_add(1);
    }
}
