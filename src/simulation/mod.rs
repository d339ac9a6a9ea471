//! Simulation - rigid/soft body sandbox with a coupled fluid grid
//!
//! `Simulation` only orchestrates. Each frame:
//! forces (`Scene::calc_forces`) -> actors (fluid first, then rigid
//! redirection) -> integrator.
//!
//! Physics lives in `systems/`; this module owns entities, registries and
//! the per-frame pipeline, and delegates each concern to a submodule.

use crate::core::Vec2;
use crate::domain::{IntegratorConfig, PointerState, SceneError, SimConfig};
use crate::state::{ParticleId, ParticleStore, QuadId, RigidId, RigidStore};
use crate::systems::fluid::FluidGrid;
use crate::systems::forces::Actor;
use crate::systems::integrators::Integrator;
use crate::systems::shapes::{Quad, QuadTexture};
use crate::systems::visit::EntityVisitor;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "scene/scene.rs"]
mod scene;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/pick.rs"]
mod pick;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/visit.rs"]
mod render;
mod facade;

pub use facade::{AbiLayout, Sandbox};
pub use perf_stats::PerfStats;
pub use pick::Pick;
pub use scene::{ForceSlot, Scene};

use perf_timer::PerfTimer;

pub(crate) struct AbiLayoutData {
    pub(crate) particle_x_ptr: *const Vec2,
    pub(crate) particle_v_ptr: *const Vec2,
    pub(crate) particle_count: usize,
    pub(crate) rigid_x_ptr: *const Vec2,
    pub(crate) rigid_o_ptr: *const Vec2,
    pub(crate) rigid_count: usize,
    pub(crate) fluid_density_ptr: *const f64,
    pub(crate) fluid_u_ptr: *const f64,
    pub(crate) fluid_v_ptr: *const f64,
    pub(crate) fluid_len: usize,
    pub(crate) fluid_width: usize,
    pub(crate) fluid_height: usize,
}

/// Registry entry for something the visitor is shown
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Drawable {
    Particle(ParticleId),
    Quad(QuadId),
    Rigid(RigidId),
    Force(ForceSlot),
}

/// The simulation
pub struct Simulation {
    config: SimConfig,
    scene: Scene,
    integrator: Box<dyn Integrator>,
    fluid: Option<FluidGrid>,
    // rigid redirection actors, run after the fluid
    actors: Vec<Box<dyn Actor>>,
    drawables: Vec<Drawable>,

    // State
    frame: u64,
    time: f64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SceneError> {
        init::create_simulation(config)
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Self::new(SimConfig::from_json(json)?)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn particles(&self) -> &ParticleStore {
        self.scene.particles()
    }

    pub fn rigids(&self) -> &RigidStore {
        self.scene.rigids()
    }

    pub fn quads(&self) -> &[Quad] {
        self.scene.quads()
    }

    pub fn fluid(&self) -> Option<&FluidGrid> {
        self.fluid.as_ref()
    }

    pub fn fluid_mut(&mut self) -> Option<&mut FluidGrid> {
        self.fluid.as_mut()
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds since the last clear
    pub fn time(&self) -> f64 {
        self.time
    }

    // === Settings ===

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        settings::set_gravity(self, gravity);
    }

    pub fn set_integrator(&mut self, config: IntegratorConfig) {
        settings::set_integrator(self, config);
    }

    // === Scene building ===

    pub fn add_particle(&mut self, x: Vec2, v: Vec2, m: f64) -> Result<ParticleId, SceneError> {
        commands::add_particle(self, x, v, m)
    }

    pub fn add_rigid_box(&mut self, x: Vec2, angle: f64, size: f64, m: f64) -> Result<RigidId, SceneError> {
        commands::add_rigid_box(self, x, angle, size, m)
    }

    pub fn add_quad(&mut self, corners: [ParticleId; 4], texture: Option<QuadTexture>) -> Result<QuadId, SceneError> {
        commands::add_quad(self, corners, texture)
    }

    pub fn set_quad_texture(&mut self, quad: QuadId, texture: Option<QuadTexture>) -> Result<(), SceneError> {
        commands::set_quad_texture(self, quad, texture)
    }

    pub fn set_rigid_texture(&mut self, body: RigidId, texture: Option<QuadTexture>) -> Result<(), SceneError> {
        commands::set_rigid_texture(self, body, texture)
    }

    /// `rest = None` uses the current distance between the endpoints.
    pub fn add_spring(
        &mut self,
        a: ParticleId,
        b: ParticleId,
        rest: Option<f64>,
        ks: f64,
        kd: f64,
    ) -> Result<ForceSlot, SceneError> {
        commands::add_spring(self, a, b, rest, ks, kd)
    }

    /// `rest = None` uses the current hinge angle.
    pub fn add_angular_spring(
        &mut self,
        p1: ParticleId,
        p2: ParticleId,
        p3: ParticleId,
        rest: Option<f64>,
        ks: f64,
    ) -> Result<ForceSlot, SceneError> {
        commands::add_angular_spring(self, p1, p2, p3, rest, ks)
    }

    /// `target = None` pins the particle where it currently is.
    pub fn add_glue(&mut self, particle: ParticleId, target: Option<Vec2>) -> Result<ForceSlot, SceneError> {
        commands::add_glue(self, particle, target)
    }

    pub fn add_gravity(&mut self) -> ForceSlot {
        commands::add_gravity(self)
    }

    pub fn add_borders(&mut self) -> ForceSlot {
        commands::add_borders(self)
    }

    pub fn add_collisions(&mut self) -> ForceSlot {
        commands::add_collisions(self)
    }

    /// Binds `proxy` to `body`. `offset = None` keeps the proxy where it is
    /// relative to the body.
    pub fn add_rigid_force(
        &mut self,
        body: RigidId,
        proxy: ParticleId,
        offset: Option<Vec2>,
    ) -> Result<ForceSlot, SceneError> {
        commands::add_rigid_force(self, body, proxy, offset)
    }

    pub fn add_fluid(&mut self) -> Result<(), SceneError> {
        commands::add_fluid(self)
    }

    /// Tears the scene down. Configuration, integrator and perf settings stay.
    pub fn clear(&mut self) {
        commands::clear(self);
    }

    // === Pointer ===

    pub fn update_pointer(&mut self, pointer: PointerState) {
        self.scene.set_pointer(pointer);
    }

    pub fn pointer(&self) -> PointerState {
        self.scene.env().pointer
    }

    /// Nearest particle within `radius` of `point`, else the topmost shape
    /// containing it.
    pub fn pick(&self, point: Vec2, radius: f64) -> Option<Pick> {
        pick::pick(self, point, radius)
    }

    pub fn begin_drag(&mut self, particle: ParticleId) -> Result<(), SceneError> {
        commands::begin_drag(self, particle)
    }

    pub fn end_drag(&mut self) {
        commands::end_drag(self);
    }

    pub fn dragged(&self) -> Option<ParticleId> {
        self.scene.drag().map(|drag| drag.particle)
    }

    // === Frame ===

    pub fn step(&mut self, dt: f64) {
        step::step(self, dt);
    }

    /// One step of the configured `dt`
    pub fn step_default(&mut self) {
        let dt = self.config.dt;
        step::step(self, dt);
    }

    pub fn visit(&self, visitor: &mut dyn EntityVisitor) {
        render::visit(self, visitor);
    }

    pub(crate) fn abi_layout_data(&self) -> AbiLayoutData {
        render::abi_layout_data(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
