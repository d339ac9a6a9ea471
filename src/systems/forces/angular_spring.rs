use std::f64::consts::TAU;

use crate::state::ParticleId;
use crate::systems::visit::{EntityVisitor, SegmentKind};

use super::{Bodies, BodiesView, Force};

/// Hinge spring over `p1 - p2 - p3`, acting on the angle between the arms
/// `p1 - p2` and `p3 - p2`.
///
/// The restoring force is taken along the perpendicular of the first arm:
/// `p1` gets it, `p3` the opposite, so the hinge itself gets nothing.
///
/// The raw angle difference lives in `(-2π, 2π)`; `angle` keeps the
/// unwrapped value from the previous pass so a hinge that swings past ±π
/// keeps its winding instead of snapping back through zero.
#[derive(Clone, Copy, Debug)]
pub struct AngularSpring {
    pub p1: ParticleId,
    pub p2: ParticleId,
    pub p3: ParticleId,
    pub rest: f64,
    pub ks: f64,
    angle: f64,
}

/// Representative `raw + 2πk` closest to `previous`. On an exact tie the
/// smaller `|k|` wins.
pub fn unwrap_angle(previous: f64, raw: f64) -> f64 {
    let turns = (previous - raw) / TAU;
    let k = if (turns - turns.trunc()).abs() == 0.5 {
        turns.trunc()
    } else {
        turns.round()
    };
    raw + k * TAU
}

impl AngularSpring {
    pub fn new(p1: ParticleId, p2: ParticleId, p3: ParticleId, rest: f64, ks: f64) -> Self {
        Self { p1, p2, p3, rest, ks, angle: rest }
    }

    /// Unwrapped hinge angle from the last `apply()`
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl Force for AngularSpring {
    fn apply(&mut self, bodies: &mut Bodies<'_>) {
        let p = &mut *bodies.particles;
        let hinge = p.x(self.p2);
        let arm1 = p.x(self.p1) - hinge;
        let arm3 = p.x(self.p3) - hinge;
        if arm1.is_zero() || arm3.is_zero() {
            return;
        }

        self.angle = unwrap_angle(self.angle, arm1.angle() - arm3.angle());
        let s = -self.ks * (self.angle - self.rest);

        let f1 = arm1.normalize().perp() * s;
        let f3 = -f1;
        *p.f_mut(self.p1) += f1;
        *p.f_mut(self.p2) -= f1 + f3;
        *p.f_mut(self.p3) += f3;
    }

    fn is_drawable(&self) -> bool {
        true
    }

    fn draw(&self, bodies: &BodiesView<'_>, visitor: &mut dyn EntityVisitor) {
        let hinge = bodies.particles.x(self.p2);
        visitor.segment(SegmentKind::AngularSpring, bodies.particles.x(self.p1), hinge);
        visitor.segment(SegmentKind::AngularSpring, hinge, bodies.particles.x(self.p3));
    }
}
