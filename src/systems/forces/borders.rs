use crate::core::Vec2;
use crate::systems::visit::{EntityVisitor, SegmentKind};

use super::{Bodies, BodiesView, Force};

/// Keeps particles and rigid boxes inside the scene bounds.
///
/// A particle that crossed a side is clamped back onto it, its velocity
/// component along that axis is reflected and scaled by `absorption`, and
/// the matching force component is dropped. A rigid box is shifted back by
/// the penetration of each offending corner and loses its spin the same way.
#[derive(Clone, Copy, Debug)]
pub struct Borders {
    pub absorption: f64,
}

impl Borders {
    pub fn new(absorption: f64) -> Self {
        Self { absorption }
    }
}

/// Per-axis correction for a point against `[lo, hi]`: the shift needed to
/// bring it back inside, or `None` when it is already inside.
#[inline]
fn axis_shift(p: f64, lo: f64, hi: f64) -> Option<f64> {
    if p < lo {
        Some(lo - p)
    } else if p > hi {
        Some(hi - p)
    } else {
        None
    }
}

impl Force for Borders {
    fn apply(&mut self, bodies: &mut Bodies<'_>) {
        let b = bodies.env.bounds;
        let k = -self.absorption;

        let rows = bodies.particles.rows_mut();
        for ((x, v), f) in rows.x.iter_mut().zip(rows.v.iter_mut()).zip(rows.f.iter_mut()) {
            if let Some(dx) = axis_shift(x.x, b.left, b.right) {
                x.x += dx;
                v.x *= k;
                f.x = 0.0;
            }
            if let Some(dy) = axis_shift(x.y, b.top, b.bottom) {
                x.y += dy;
                v.y *= k;
                f.y = 0.0;
            }
        }

        let rigids = &mut *bodies.rigids;
        for row in 0..rigids.len() {
            let id = rigids.id_at(row);
            // deepest penetration per axis over all four corners
            let mut shift = Vec2::ZERO;
            for corner in rigids.corners(id) {
                if let Some(dx) = axis_shift(corner.x, b.left, b.right) {
                    if dx.abs() > shift.x.abs() {
                        shift.x = dx;
                    }
                }
                if let Some(dy) = axis_shift(corner.y, b.top, b.bottom) {
                    if dy.abs() > shift.y.abs() {
                        shift.y = dy;
                    }
                }
            }
            if shift.is_zero() {
                continue;
            }
            *rigids.x_mut(id) += shift;
            if shift.x != 0.0 {
                rigids.v_mut(id).x *= k;
                rigids.f_mut(id).x = 0.0;
            }
            if shift.y != 0.0 {
                rigids.v_mut(id).y *= k;
                rigids.f_mut(id).y = 0.0;
            }
            let omega = rigids.omega(id);
            *rigids.w_mut(id) = Vec2::from_angle(k * omega);
            *rigids.t_mut(id) = 0.0;
        }
    }

    fn is_drawable(&self) -> bool {
        true
    }

    fn draw(&self, bodies: &BodiesView<'_>, visitor: &mut dyn EntityVisitor) {
        let b = bodies.env.bounds;
        let corners = [
            Vec2::new(b.left, b.top),
            Vec2::new(b.right, b.top),
            Vec2::new(b.right, b.bottom),
            Vec2::new(b.left, b.bottom),
        ];
        for i in 0..4 {
            visitor.segment(SegmentKind::Border, corners[i], corners[(i + 1) % 4]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::forces::test_support::Fixture;

    #[test]
    fn particle_is_clamped_and_bounced() {
        let mut fx = Fixture::default();
        let id = fx.particle(Vec2::new(1.2, 0.5), Vec2::new(2.0, 1.0), 1.0);
        *fx.particles.f_mut(id) = Vec2::new(4.0, 4.0);
        Borders::new(0.5).apply(&mut fx.bodies());
        assert_eq!(fx.particles.x(id), Vec2::new(1.0, 0.5));
        assert_eq!(fx.particles.v(id), Vec2::new(-1.0, 1.0));
        assert_eq!(fx.particles.f(id), Vec2::new(0.0, 4.0));
    }

    #[test]
    fn particle_inside_is_untouched() {
        let mut fx = Fixture::default();
        let id = fx.particle(Vec2::new(0.5, 0.5), Vec2::new(2.0, 1.0), 1.0);
        Borders::new(0.5).apply(&mut fx.bodies());
        assert_eq!(fx.particles.v(id), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn rigid_box_is_pushed_back_inside() {
        let mut fx = Fixture::default();
        let id = fx.rigid(Vec2::new(0.5, 0.95), 0.0, 0.2, 1.0);
        *fx.rigids.v_mut(id) = Vec2::new(0.0, 1.0);
        *fx.rigids.w_mut(id) = Vec2::from_angle(0.5);
        fx.rigids.add_force(id, Vec2::new(2.0, 3.0));
        fx.rigids.add_torque(id, 1.5);
        Borders::new(0.6).apply(&mut fx.bodies());
        let bottom = fx.rigids.corners(id).iter().map(|c| c.y).fold(f64::MIN, f64::max);
        assert!(bottom <= 1.0 + 1e-12, "bottom edge at {bottom}");
        assert!((fx.rigids.v(id).y + 0.6).abs() < 1e-12);
        assert_eq!(fx.rigids.f(id), Vec2::new(2.0, 0.0));
        // spin reversed and damped, torque dropped
        assert!((fx.rigids.omega(id) + 0.3).abs() < 1e-12, "omega = {}", fx.rigids.omega(id));
        assert_eq!(fx.rigids.t(id), 0.0);
    }

    #[test]
    fn rigid_box_inside_keeps_its_spin() {
        let mut fx = Fixture::default();
        let id = fx.rigid(Vec2::new(0.5, 0.5), 0.0, 0.2, 1.0);
        *fx.rigids.w_mut(id) = Vec2::from_angle(0.5);
        fx.rigids.add_torque(id, 1.5);
        Borders::new(0.6).apply(&mut fx.bodies());
        assert!((fx.rigids.omega(id) - 0.5).abs() < 1e-12);
        assert_eq!(fx.rigids.t(id), 1.5);
    }
}
