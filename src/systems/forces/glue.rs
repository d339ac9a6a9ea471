use crate::core::Vec2;
use crate::state::ParticleId;

use super::{Bodies, Force};

/// Pins a particle: position forced to `target`, velocity and force zeroed.
#[derive(Clone, Copy, Debug)]
pub struct Glue {
    pub particle: ParticleId,
    pub target: Vec2,
}

impl Glue {
    pub fn new(particle: ParticleId, target: Vec2) -> Self {
        Self { particle, target }
    }
}

impl Force for Glue {
    fn apply(&mut self, bodies: &mut Bodies<'_>) {
        let p = &mut *bodies.particles;
        *p.x_mut(self.particle) = self.target;
        *p.v_mut(self.particle) = Vec2::ZERO;
        *p.f_mut(self.particle) = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::forces::test_support::Fixture;

    #[test]
    fn glue_resets_particle() {
        let mut fx = Fixture::default();
        let id = fx.particle(Vec2::new(3.0, 3.0), Vec2::new(1.0, 0.0), 1.0);
        *fx.particles.f_mut(id) = Vec2::new(0.0, 5.0);
        Glue::new(id, Vec2::new(0.5, 0.5)).apply(&mut fx.bodies());
        assert_eq!(fx.particles.x(id), Vec2::new(0.5, 0.5));
        assert_eq!(fx.particles.v(id), Vec2::ZERO);
        assert_eq!(fx.particles.f(id), Vec2::ZERO);
    }
}
