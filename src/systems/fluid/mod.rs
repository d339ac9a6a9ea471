//! FluidGrid - stable-fluids solver coupled to the solid bodies
//!
//! Architecture:
//! - solver.rs     - grid kernels (sources, boundary, relax, advect, project)
//! - rasterize.rs  - sweep-line fill of solid shapes into the occupancy map
//! - coupling.rs   - momentum exchange and de-advection at occupied cells
//!
//! The grid spans the scene bounds: cell `(i, j)` of a `w x h` grid is
//! centered at grid coordinate `(i, j)`, and world space maps onto
//! `[0.5, w + 0.5] x [0.5, h + 0.5]`. Velocities are stored in domain
//! fractions per second, matching the `dt * w` back-trace of the advection.

mod coupling;
mod rasterize;
mod solver;

pub use rasterize::fill_polygon;
pub use solver::{
    add_source, advect, diffuse, interior_sum, lin_solve, project, set_bnd, Boundary, GridDims,
    RELAX_ITERATIONS,
};

use crate::core::Vec2;
use crate::domain::{Bounds, FluidConfig, PointerState};
use crate::systems::forces::{Actor, Bodies};
use crate::systems::shapes::Collidable;

/// What a renderer should show for this grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FluidView {
    #[default]
    Density,
    Velocity,
}

impl FluidView {
    pub fn toggled(self) -> Self {
        match self {
            FluidView::Density => FluidView::Velocity,
            FluidView::Velocity => FluidView::Density,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Injection {
    cell: usize,
    velocity: Vec2,
    density: f64,
}

pub struct FluidGrid {
    dims: GridDims,
    config: FluidConfig,

    // === Fields (with halo) ===
    u: Vec<f64>,
    v: Vec<f64>,
    d: Vec<f64>,
    // sources on entry to a step, scratch afterwards
    u0: Vec<f64>,
    v0: Vec<f64>,
    d0: Vec<f64>,

    occupancy: Vec<Option<Collidable>>,

    view: FluidView,
    pointer_prev: Option<Vec2>,
    injections: Vec<Injection>,
}

impl FluidGrid {
    pub fn new(config: &FluidConfig) -> Self {
        let dims = GridDims::new(config.width.max(1) as usize, config.height.max(1) as usize);
        let cells = dims.size();
        Self {
            dims,
            config: config.clone(),
            u: vec![0.0; cells],
            v: vec![0.0; cells],
            d: vec![0.0; cells],
            u0: vec![0.0; cells],
            v0: vec![0.0; cells],
            d0: vec![0.0; cells],
            occupancy: vec![None; cells],
            view: FluidView::default(),
            pointer_prev: None,
            injections: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn width(&self) -> usize {
        self.dims.w
    }

    pub fn height(&self) -> usize {
        self.dims.h
    }

    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Density including the halo, row-major with stride `width + 2`
    pub fn density(&self) -> &[f64] {
        &self.d
    }

    pub fn velocity_x(&self) -> &[f64] {
        &self.u
    }

    pub fn velocity_y(&self) -> &[f64] {
        &self.v
    }

    pub fn density_at(&self, i: usize, j: usize) -> f64 {
        self.d[self.dims.ix(i, j)]
    }

    pub fn velocity_at(&self, i: usize, j: usize) -> Vec2 {
        let idx = self.dims.ix(i, j);
        Vec2::new(self.u[idx], self.v[idx])
    }

    /// Collidable that covered the cell during the last step
    pub fn occupant(&self, i: usize, j: usize) -> Option<Collidable> {
        self.occupancy[self.dims.ix(i, j)]
    }

    pub fn total_density(&self) -> f64 {
        interior_sum(self.dims, &self.d)
    }

    pub fn view(&self) -> FluidView {
        self.view
    }

    pub fn set_view(&mut self, view: FluidView) {
        self.view = view;
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
    }

    // === Coordinates ===

    pub fn world_to_grid(&self, bounds: &Bounds, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - bounds.left) / bounds.width() * self.dims.w as f64 + 0.5,
            (p.y - bounds.top) / bounds.height() * self.dims.h as f64 + 0.5,
        )
    }

    pub fn grid_to_world(&self, bounds: &Bounds, i: usize, j: usize) -> Vec2 {
        Vec2::new(
            bounds.left + (i as f64 - 0.5) / self.dims.w as f64 * bounds.width(),
            bounds.top + (j as f64 - 0.5) / self.dims.h as f64 * bounds.height(),
        )
    }

    /// Interior cell under a normalized `[0,1]²` position (clamped).
    pub fn cell_at_normalized(&self, p: Vec2) -> (usize, usize) {
        let clamp = |t: f64, n: usize| ((t * n as f64).floor() + 1.0).clamp(1.0, n as f64) as usize;
        (clamp(p.x, self.dims.w), clamp(p.y, self.dims.h))
    }

    // === Host input ===

    /// Queues a velocity/density impulse at a normalized position; applied
    /// as a source on the next step.
    pub fn inject(&mut self, at: Vec2, velocity: Vec2, density: f64) {
        let (i, j) = self.cell_at_normalized(at);
        self.injections.push(Injection { cell: self.dims.ix(i, j), velocity, density });
    }

    /// Adds density/velocity, for scene setup.
    pub fn add_density(&mut self, i: usize, j: usize, amount: f64) {
        let idx = self.dims.ix(i.clamp(1, self.dims.w), j.clamp(1, self.dims.h));
        self.d[idx] += amount;
    }

    pub fn add_velocity(&mut self, i: usize, j: usize, velocity: Vec2) {
        let idx = self.dims.ix(i.clamp(1, self.dims.w), j.clamp(1, self.dims.h));
        self.u[idx] += velocity.x;
        self.v[idx] += velocity.y;
    }

    pub fn reset(&mut self) {
        for field in [&mut self.u, &mut self.v, &mut self.d, &mut self.u0, &mut self.v0, &mut self.d0] {
            field.fill(0.0);
        }
        self.occupancy.fill(None);
        self.injections.clear();
        self.pointer_prev = None;
    }

    // === Step phases ===

    fn seed_sources(&mut self) {
        let [gx, gy] = self.config.gravity;
        for (((u0, v0), d0), d) in self.u0.iter_mut().zip(self.v0.iter_mut()).zip(self.d0.iter_mut()).zip(&self.d) {
            *u0 = gx * d;
            *v0 = gy * d;
            *d0 = 0.0;
        }
        self.occupancy.fill(None);
    }

    fn rasterize(&mut self, bodies: &Bodies<'_>) {
        let bounds = bodies.env.bounds;
        for &owner in bodies.collidables {
            let corners = owner
                .corners(&*bodies.particles, &*bodies.rigids, bodies.quads)
                .map(|p| self.world_to_grid(&bounds, p));
            fill_polygon(self.dims, &mut self.occupancy, &corners, owner);
        }
    }

    fn apply_pointer(&mut self, pointer: PointerState, dt: f64) {
        let previous = self.pointer_prev.replace(pointer.pos);
        if !pointer.any_button() {
            return;
        }
        let (i, j) = self.cell_at_normalized(pointer.pos);
        let idx = self.dims.ix(i, j);
        if pointer.primary() {
            self.d0[idx] += self.config.pointer_density;
        }
        if let Some(previous) = previous {
            if dt > 0.0 {
                let push = (pointer.pos - previous) * (self.config.pointer_force / dt);
                self.u0[idx] += push.x;
                self.v0[idx] += push.y;
            }
        }
    }

    fn drain_injections(&mut self) {
        for inj in self.injections.drain(..) {
            self.u0[inj.cell] += inj.velocity.x;
            self.v0[inj.cell] += inj.velocity.y;
            self.d0[inj.cell] += inj.density;
        }
    }

    fn velocity_step(&mut self, dt: f64) {
        let dims = self.dims;
        let visc = self.config.viscosity;

        add_source(&mut self.u, &self.u0, dt);
        add_source(&mut self.v, &self.v0, dt);

        std::mem::swap(&mut self.u0, &mut self.u);
        diffuse(dims, Boundary::VelocityX, &mut self.u, &self.u0, visc, dt);
        std::mem::swap(&mut self.v0, &mut self.v);
        diffuse(dims, Boundary::VelocityY, &mut self.v, &self.v0, visc, dt);
        project(dims, &mut self.u, &mut self.v, &mut self.u0, &mut self.v0);

        std::mem::swap(&mut self.u0, &mut self.u);
        std::mem::swap(&mut self.v0, &mut self.v);
        advect(dims, Boundary::VelocityX, &mut self.u, &self.u0, &self.u0, &self.v0, dt);
        advect(dims, Boundary::VelocityY, &mut self.v, &self.v0, &self.u0, &self.v0, dt);
        project(dims, &mut self.u, &mut self.v, &mut self.u0, &mut self.v0);
    }

    fn density_step(&mut self, dt: f64) {
        let dims = self.dims;

        add_source(&mut self.d, &self.d0, dt);
        std::mem::swap(&mut self.d0, &mut self.d);
        diffuse(dims, Boundary::Scalar, &mut self.d, &self.d0, self.config.diffusion, dt);
        std::mem::swap(&mut self.d0, &mut self.d);
        advect(dims, Boundary::Scalar, &mut self.d, &self.d0, &self.u, &self.v, dt);
    }
}

impl Actor for FluidGrid {
    fn act(&mut self, bodies: &mut Bodies<'_>, dt: f64) {
        self.seed_sources();
        self.rasterize(bodies);
        self.apply_pointer(bodies.env.pointer, dt);
        self.drain_injections();
        self.velocity_step(dt);
        self.density_step(dt);
        coupling::couple(self, bodies);
    }
}
