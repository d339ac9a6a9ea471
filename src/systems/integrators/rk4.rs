use crate::core::Vec2;
use crate::simulation::Scene;

use super::Integrator;

/// Force accumulators captured at one stage
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForceSample {
    pub particle_f: Vec<Vec2>,
    pub rigid_f: Vec<Vec2>,
    pub rigid_t: Vec<f64>,
}

impl ForceSample {
    fn capture(&mut self, scene: &Scene) {
        copy_into(&mut self.particle_f, scene.particles().forces());
        copy_into(&mut self.rigid_f, scene.rigids().forces());
        copy_into(&mut self.rigid_t, scene.rigids().torques());
    }
}

fn copy_into<T: Copy>(dst: &mut Vec<T>, src: &[T]) {
    dst.clear();
    dst.extend_from_slice(src);
}

/// Classic RK4 weights applied to force samples.
///
/// Stages 2-4 advance the inner integrator from the saved state by
/// `dt/2`, `dt/2` and `dt` using the previous stage's forces, resample, and
/// restore. The weighted force blend `k1/6 + k2/3 + k3/3 + k4/6` is written
/// back into the accumulators and the inner integrator takes the real step.
/// This blends forces rather than state derivatives.
pub struct RungeKutta4 {
    inner: Box<dyn Integrator>,
    samples: [ForceSample; 4],
}

impl RungeKutta4 {
    pub fn new(inner: Box<dyn Integrator>) -> Self {
        Self { inner, samples: Default::default() }
    }

    /// Samples from the last `integrate()` call, in stage order.
    pub fn samples(&self) -> &[ForceSample; 4] {
        &self.samples
    }

    fn stage(&mut self, scene: &mut Scene, k: usize, h: f64) {
        scene.save_state();
        self.inner.integrate(scene, h);
        scene.calc_forces();
        scene.restore_state();
        self.samples[k].capture(scene);
    }
}

const WEIGHTS: [f64; 4] = [1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0];

impl Integrator for RungeKutta4 {
    fn integrate(&mut self, scene: &mut Scene, dt: f64) {
        self.samples[0].capture(scene);
        self.stage(scene, 1, dt / 2.0);
        self.stage(scene, 2, dt / 2.0);
        self.stage(scene, 3, dt);

        let s = &self.samples;
        for (k, f) in scene.particles_mut().forces_mut().iter_mut().enumerate() {
            *f = s[0].particle_f[k] * WEIGHTS[0]
                + s[1].particle_f[k] * WEIGHTS[1]
                + s[2].particle_f[k] * WEIGHTS[2]
                + s[3].particle_f[k] * WEIGHTS[3];
        }
        let rigids = scene.rigids_mut();
        for (k, f) in rigids.forces_mut().iter_mut().enumerate() {
            *f = s[0].rigid_f[k] * WEIGHTS[0]
                + s[1].rigid_f[k] * WEIGHTS[1]
                + s[2].rigid_f[k] * WEIGHTS[2]
                + s[3].rigid_f[k] * WEIGHTS[3];
        }
        for (k, t) in rigids.torques_mut().iter_mut().enumerate() {
            *t = WEIGHTS.iter().zip(s.iter()).map(|(w, sample)| w * sample.rigid_t[k]).sum();
        }

        self.inner.integrate(scene, dt);
    }

    fn name(&self) -> &'static str {
        "rk4"
    }

    fn describe(&self) -> String {
        format!("rk4({})", self.inner.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bounds;
    use crate::systems::forces::Gravity;
    use crate::systems::integrators::Euler;

    #[test]
    fn uniform_gravity_samples_agree() {
        let mut scene = Scene::new(Bounds::default(), Vec2::new(0.0, 9.8));
        let p = scene.add_particle(Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0), 2.0).expect("valid");
        scene.add_force(Box::new(Gravity::default()));
        scene.calc_forces();

        let mut rk4 = RungeKutta4::new(Box::new(Euler));
        rk4.integrate(&mut scene, 0.1);

        let samples = rk4.samples();
        for sample in &samples[1..] {
            assert_eq!(sample, &samples[0]);
        }
        let weight = Vec2::new(0.0, 19.6);
        assert_eq!(samples[0].particle_f, vec![weight]);
        assert!((scene.particles().f(p) - weight).length() < 1e-12);
        assert!((scene.particles().v(p) - Vec2::new(1.0, 0.98)).length() < 1e-12);
    }

    #[test]
    fn stages_leave_state_at_the_start_point() {
        let mut scene = Scene::new(Bounds::default(), Vec2::new(0.0, 1.0));
        let p = scene.add_particle(Vec2::ZERO, Vec2::ZERO, 1.0).expect("valid");
        scene.add_force(Box::new(Gravity::default()));
        scene.calc_forces();

        let mut rk4 = RungeKutta4::new(Box::new(Euler));
        rk4.integrate(&mut scene, 0.0);
        assert_eq!(scene.particles().x(p), Vec2::ZERO);
        assert_eq!(scene.particles().v(p), Vec2::ZERO);
    }
}
