use wasm_bindgen::prelude::*;

/// Timings and counts from the last `step()` (zeros while perf is off)
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) forces_ms: f64,
    pub(super) fluid_ms: f64,
    pub(super) actors_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) particle_count: u32,
    pub(super) rigid_count: u32,
    pub(super) quad_count: u32,
    pub(super) force_count: u32,
    pub(super) actor_count: u32,
    pub(super) fluid_cells: u32,
    pub(super) fluid_mass: f64,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

impl Default for PerfStats {
    fn default() -> Self {
        Self {
            step_ms: 0.0,
            forces_ms: 0.0,
            fluid_ms: 0.0,
            actors_ms: 0.0,
            integrate_ms: 0.0,
            particle_count: 0,
            rigid_count: 0,
            quad_count: 0,
            force_count: 0,
            actor_count: 0,
            fluid_cells: 0,
            fluid_mass: 0.0,
        }
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }

    /// Initial force pass only; stage resampling counts as integration
    #[wasm_bindgen(getter)]
    pub fn forces_ms(&self) -> f64 { self.forces_ms }

    #[wasm_bindgen(getter)]
    pub fn fluid_ms(&self) -> f64 { self.fluid_ms }

    #[wasm_bindgen(getter)]
    pub fn actors_ms(&self) -> f64 { self.actors_ms }

    /// Multi-stage integrators resample forces in here
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }

    #[wasm_bindgen(getter)]
    pub fn rigid_count(&self) -> u32 { self.rigid_count }

    #[wasm_bindgen(getter)]
    pub fn quad_count(&self) -> u32 { self.quad_count }

    #[wasm_bindgen(getter)]
    pub fn force_count(&self) -> u32 { self.force_count }

    #[wasm_bindgen(getter)]
    pub fn actor_count(&self) -> u32 { self.actor_count }

    /// Interior cells of the fluid grid, 0 without one
    #[wasm_bindgen(getter)]
    pub fn fluid_cells(&self) -> u32 { self.fluid_cells }

    #[wasm_bindgen(getter)]
    pub fn fluid_mass(&self) -> f64 { self.fluid_mass }
}
