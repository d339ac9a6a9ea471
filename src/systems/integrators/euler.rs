use crate::simulation::Scene;

use super::Integrator;

/// Semi-implicit Euler: velocity first, then position from the new
/// velocity. Rigid spin is updated before the orientation uses it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euler;

impl Integrator for Euler {
    fn integrate(&mut self, scene: &mut Scene, dt: f64) {
        let p = scene.particles_mut().rows_mut();
        for k in 0..p.x.len() {
            p.v[k] += p.f[k] * (dt / p.m[k]);
            p.x[k] += p.v[k] * dt;
        }

        let r = scene.rigids_mut().rows_mut();
        for k in 0..r.x.len() {
            r.v[k] += r.f[k] * (dt / r.m[k]);
            r.x[k] += r.v[k] * dt;
            r.w[k] = r.w[k].rotate(dt * r.t[k] / (r.i[k] * r.m[k])).normalize();
            r.o[k] = r.o[k].rotate(r.w[k].angle() * dt).normalize();
        }
    }

    fn name(&self) -> &'static str {
        "euler"
    }
}
