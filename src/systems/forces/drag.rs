use crate::state::ParticleId;
use crate::systems::visit::{EntityVisitor, SegmentKind};

use super::{Bodies, BodiesView, Force};

/// Spring from a grabbed particle to the pointer's world position.
#[derive(Clone, Copy, Debug)]
pub struct Drag {
    pub particle: ParticleId,
    pub ks: f64,
    pub kd: f64,
}

impl Drag {
    pub fn new(particle: ParticleId, ks: f64, kd: f64) -> Self {
        Self { particle, ks, kd }
    }
}

impl Force for Drag {
    fn apply(&mut self, bodies: &mut Bodies<'_>) {
        let target = bodies.env.pointer_world();
        let p = &mut *bodies.particles;
        let pull = (target - p.x(self.particle)) * self.ks - p.v(self.particle) * self.kd;
        p.add_force(self.particle, pull);
    }

    fn is_drawable(&self) -> bool {
        true
    }

    fn draw(&self, bodies: &BodiesView<'_>, visitor: &mut dyn EntityVisitor) {
        visitor.segment(
            SegmentKind::Drag,
            bodies.particles.x(self.particle),
            bodies.env.pointer_world(),
        );
    }
}
