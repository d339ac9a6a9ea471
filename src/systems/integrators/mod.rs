//! Integrators
//!
//! An integrator advances the scene by `dt` from the forces currently in
//! the accumulators. Multi-stage methods resample forces through the
//! scene's `save_state` / `calc_forces` / `restore_state` contract and
//! delegate the final advance to an inner integrator, chosen at runtime.

mod euler;
mod midpoint;
mod rk4;
mod verlet;

pub use euler::Euler;
pub use midpoint::MidPoint;
pub use rk4::{ForceSample, RungeKutta4};
pub use verlet::Verlet;

use crate::domain::{IntegratorConfig, IntegratorMethod};
use crate::simulation::Scene;

pub trait Integrator {
    fn integrate(&mut self, scene: &mut Scene, dt: f64);

    fn name(&self) -> &'static str;

    /// Name including any inner integrators, e.g. `rk4(verlet)`.
    fn describe(&self) -> String {
        self.name().to_string()
    }
}

/// Builds the integrator tree described by `config`. Multi-stage methods
/// without an explicit `inner` wrap Euler.
pub fn build(config: &IntegratorConfig) -> Box<dyn Integrator> {
    let inner = || match &config.inner {
        Some(inner) => build(inner),
        None => Box::new(Euler) as Box<dyn Integrator>,
    };
    match config.method {
        IntegratorMethod::Euler => Box::new(Euler),
        IntegratorMethod::Verlet => Box::new(Verlet),
        IntegratorMethod::Midpoint => Box::new(MidPoint::new(inner())),
        IntegratorMethod::Rk4 => Box::new(RungeKutta4::new(inner())),
    }
}
