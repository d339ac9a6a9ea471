use crate::core::Vec2;
use crate::state::ParticleId;
use crate::systems::visit::{EntityVisitor, SegmentKind};

use super::{Bodies, BodiesView, Force};

/// Damped linear spring between two particles.
///
/// `d = xA - xB`, `f = (ks (|d| - rest) + kd (vA - vB)·d / |d|) d/|d|`.
/// A loses `f` and B gains it, so a stretched spring pulls the ends
/// together and a compressed one pushes them apart.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    pub a: ParticleId,
    pub b: ParticleId,
    pub rest: f64,
    pub ks: f64,
    pub kd: f64,
}

impl Spring {
    pub fn new(a: ParticleId, b: ParticleId, rest: f64, ks: f64, kd: f64) -> Self {
        Self { a, b, rest, ks, kd }
    }

    /// Force on B; A receives the negation. Zero for coincident endpoints.
    pub fn force(&self, xa: Vec2, xb: Vec2, va: Vec2, vb: Vec2) -> Vec2 {
        let d = xa - xb;
        if d.is_zero() {
            return Vec2::ZERO;
        }
        let len = d.length();
        let dir = d / len;
        (self.ks * (len - self.rest) + self.kd * (va - vb).dot(d) / len) * dir
    }
}

impl Force for Spring {
    fn apply(&mut self, bodies: &mut Bodies<'_>) {
        let p = &mut *bodies.particles;
        let f = self.force(p.x(self.a), p.x(self.b), p.v(self.a), p.v(self.b));
        *p.f_mut(self.a) -= f;
        *p.f_mut(self.b) += f;
    }

    fn is_drawable(&self) -> bool {
        true
    }

    fn draw(&self, bodies: &BodiesView<'_>, visitor: &mut dyn EntityVisitor) {
        let xa = bodies.particles.x(self.a);
        let xb = bodies.particles.x(self.b);
        let strain = (xa.distance(xb) - self.rest).abs();
        visitor.segment(SegmentKind::Spring { strain }, xa, xb);
    }
}
