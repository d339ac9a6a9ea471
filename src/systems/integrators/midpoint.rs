use crate::simulation::Scene;

use super::Integrator;

/// Forces resampled at the half step, then a full step from the start state.
pub struct MidPoint {
    inner: Box<dyn Integrator>,
}

impl MidPoint {
    pub fn new(inner: Box<dyn Integrator>) -> Self {
        Self { inner }
    }
}

impl Integrator for MidPoint {
    fn integrate(&mut self, scene: &mut Scene, dt: f64) {
        scene.save_state();
        self.inner.integrate(scene, dt / 2.0);
        scene.calc_forces();
        scene.restore_state();
        self.inner.integrate(scene, dt);
    }

    fn name(&self) -> &'static str {
        "midpoint"
    }

    fn describe(&self) -> String {
        format!("midpoint({})", self.inner.describe())
    }
}
