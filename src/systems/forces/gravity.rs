use crate::core::Vec2;

use super::{Bodies, BodiesView, Force};
use crate::systems::visit::{EntityVisitor, SegmentKind};

/// Uniform field `g` read from the scene environment.
///
/// Rigid boxes also pick up a torque from every corner that sits against
/// the field direction, which tips an unsupported box over.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gravity {
    /// Where the field arrow is drawn
    pub origin: Vec2,
}

impl Gravity {
    pub fn new(origin: Vec2) -> Self {
        Self { origin }
    }
}

impl Force for Gravity {
    fn apply(&mut self, bodies: &mut Bodies<'_>) {
        let g = bodies.env.gravity;

        let rows = bodies.particles.rows_mut();
        for (f, m) in rows.f.iter_mut().zip(rows.m.iter()) {
            *f += g * *m;
        }

        let rigids = &mut *bodies.rigids;
        for row in 0..rigids.len() {
            let id = rigids.id_at(row);
            let weight = g * rigids.m(id);
            let center = rigids.x(id);
            rigids.add_force(id, weight);
            for corner in rigids.corners(id) {
                let r = corner - center;
                if r.dot(g) < 0.0 {
                    rigids.add_torque(id, r.cross(weight));
                }
            }
        }
    }

    fn is_drawable(&self) -> bool {
        true
    }

    fn draw(&self, bodies: &BodiesView<'_>, visitor: &mut dyn EntityVisitor) {
        let tip = self.origin + bodies.env.gravity * 0.1;
        visitor.segment(SegmentKind::Gravity, self.origin, tip);
    }
}
