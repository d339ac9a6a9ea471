use crate::core::Vec2;
use crate::simulation::Scene;

use super::Integrator;

/// Position Verlet with velocity recovered from the displacement.
#[derive(Clone, Copy, Debug, Default)]
pub struct Verlet;

impl Integrator for Verlet {
    fn integrate(&mut self, scene: &mut Scene, dt: f64) {
        let dt2 = dt * dt;

        let p = scene.particles_mut().rows_mut();
        for k in 0..p.x.len() {
            let next = p.x[k] + p.v[k] * dt + p.f[k] * (dt2 / p.m[k]);
            if dt > 0.0 {
                p.v[k] = (next - p.x[k]) / dt;
            }
            p.x[k] = next;
        }

        let r = scene.rigids_mut().rows_mut();
        for k in 0..r.x.len() {
            let next = r.x[k] + r.v[k] * dt + r.f[k] * (dt2 / r.m[k]);
            if dt > 0.0 {
                r.v[k] = (next - r.x[k]) / dt;
            }
            r.x[k] = next;

            let turn = r.w[k].angle() * dt + r.t[k] / (r.i[k] * r.m[k]) * dt2;
            r.o[k] = r.o[k].rotate(turn).normalize();
            if dt > 0.0 {
                r.w[k] = Vec2::from_angle(turn / dt);
            }
        }
    }

    fn name(&self) -> &'static str {
        "verlet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bounds;

    #[test]
    fn zero_dt_keeps_velocity() {
        let mut scene = Scene::new(Bounds::default(), Vec2::ZERO);
        let p = scene.add_particle(Vec2::new(0.1, 0.1), Vec2::new(3.0, 0.0), 1.0).expect("valid");
        scene.particles_mut().add_force(p, Vec2::new(0.0, 7.0));
        Verlet.integrate(&mut scene, 0.0);
        assert_eq!(scene.particles().v(p), Vec2::new(3.0, 0.0));
        assert_eq!(scene.particles().x(p), Vec2::new(0.1, 0.1));
    }

    #[test]
    fn spin_carries_over_without_torque() {
        let mut scene = Scene::new(Bounds::default(), Vec2::ZERO);
        let r = scene.add_rigid_box(Vec2::ZERO, 0.0, 1.0, 1.0).expect("valid");
        *scene.rigids_mut().w_mut(r) = Vec2::from_angle(1.0);
        Verlet.integrate(&mut scene, 0.1);
        assert!((scene.rigids().o(r).angle() - 0.1).abs() < 1e-12);
        assert!((scene.rigids().omega(r) - 1.0).abs() < 1e-12);
    }
}
