use crate::core::Vec2;
use crate::state::{ParticleId, ParticleStore, RigidId, RigidStore};

use super::{Actor, Bodies, Force};

/// Binding between a proxy particle and a point fixed in a rigid body.
///
/// The binding is registered twice: [`RigidFollow`] drags the proxy along
/// with the body before any other force runs, and [`RigidRedirect`] hands
/// whatever force the proxy collected back to the body before integration.
#[derive(Clone, Copy, Debug)]
pub struct RigidCoupling {
    pub body: RigidId,
    pub proxy: ParticleId,
    /// Body-local offset (unrotated)
    pub offset: Vec2,
}

impl RigidCoupling {
    pub fn new(body: RigidId, proxy: ParticleId, offset: Vec2) -> Self {
        Self { body, proxy, offset }
    }

    /// Offset taken from where the proxy currently sits relative to the body.
    pub fn at_current(body: RigidId, proxy: ParticleId, particles: &ParticleStore, rigids: &RigidStore) -> Self {
        let world = particles.x(proxy) - rigids.x(body);
        let offset = world.rotate_by(rigids.o(body).conjugate());
        Self { body, proxy, offset }
    }

    pub fn anchor(&self, rigids: &RigidStore) -> Vec2 {
        rigids.x(self.body) + self.offset.rotate_by(rigids.o(self.body))
    }
}

/// Force phase: pins the proxy to the body's anchor point.
#[derive(Clone, Copy, Debug)]
pub struct RigidFollow(pub RigidCoupling);

/// Actor phase: moves the proxy's accumulated force onto the body.
#[derive(Clone, Copy, Debug)]
pub struct RigidRedirect(pub RigidCoupling);

impl Force for RigidFollow {
    fn apply(&mut self, bodies: &mut Bodies<'_>) {
        let c = self.0;
        let rigids = &*bodies.rigids;
        let x = c.anchor(rigids);
        let v = rigids.velocity_at(c.body, x);
        *bodies.particles.x_mut(c.proxy) = x;
        *bodies.particles.v_mut(c.proxy) = v;
    }

    fn is_kinematic(&self) -> bool {
        true
    }
}

impl Actor for RigidRedirect {
    fn act(&mut self, bodies: &mut Bodies<'_>, _dt: f64) {
        let c = self.0;
        let f = bodies.particles.f(c.proxy);
        let at = bodies.particles.x(c.proxy);
        bodies.rigids.add_force_at(c.body, f, at);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::systems::forces::test_support::Fixture;

    #[test]
    fn proxy_follows_rotated_body() {
        let mut fx = Fixture::default();
        let body = fx.rigid(Vec2::new(1.0, 1.0), FRAC_PI_2, 1.0, 1.0);
        let proxy = fx.particle(Vec2::ZERO, Vec2::ZERO, 0.1);
        let coupling = RigidCoupling::new(body, proxy, Vec2::new(0.5, 0.0));
        RigidFollow(coupling).apply(&mut fx.bodies());
        let x = fx.particles.x(proxy);
        assert!((x - Vec2::new(1.0, 1.5)).length() < 1e-12, "proxy at {x:?}");
    }

    #[test]
    fn default_offset_keeps_proxy_in_place() {
        let mut fx = Fixture::default();
        let body = fx.rigid(Vec2::new(0.2, 0.3), 0.7, 1.0, 1.0);
        let proxy = fx.particle(Vec2::new(0.4, 0.1), Vec2::ZERO, 0.1);
        let coupling = RigidCoupling::at_current(body, proxy, &fx.particles, &fx.rigids);
        RigidFollow(coupling).apply(&mut fx.bodies());
        assert!((fx.particles.x(proxy) - Vec2::new(0.4, 0.1)).length() < 1e-12);
    }

    #[test]
    fn redirect_moves_force_and_torque_to_body() {
        let mut fx = Fixture::default();
        let body = fx.rigid(Vec2::ZERO, 0.0, 1.0, 1.0);
        let proxy = fx.particle(Vec2::new(0.5, 0.0), Vec2::ZERO, 0.1);
        *fx.particles.f_mut(proxy) = Vec2::new(0.0, 2.0);
        let coupling = RigidCoupling::new(body, proxy, Vec2::new(0.5, 0.0));
        RigidRedirect(coupling).act(&mut fx.bodies(), 0.01);
        assert_eq!(fx.rigids.f(body), Vec2::new(0.0, 2.0));
        assert!((fx.rigids.t(body) - 1.0).abs() < 1e-12);
    }
}
