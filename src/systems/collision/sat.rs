//! Separating axis test for convex polygons.

use crate::core::Vec2;

/// Minimum-overlap axis between two polygons
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit axis of least overlap; orientation is fixed up by the caller
    pub normal: Vec2,
    pub depth: f64,
}

/// Projects every vertex onto `axis` and returns (min, max).
#[inline]
fn project(polygon: &[Vec2], axis: Vec2) -> (f64, f64) {
    polygon.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

/// Overlap of the two projections on `axis` (negative when separated).
#[inline]
pub fn axis_overlap(a: &[Vec2], b: &[Vec2], axis: Vec2) -> f64 {
    let (a_min, a_max) = project(a, axis);
    let (b_min, b_max) = project(b, axis);
    a_max.min(b_max) - a_min.max(b_min)
}

/// SAT over the edge normals of both polygons. `None` as soon as one axis
/// separates them (overlap <= 0). Degenerate edges contribute no axis.
pub fn sat(a: &[Vec2], b: &[Vec2]) -> Option<Contact> {
    let mut best: Option<Contact> = None;
    for polygon in [a, b] {
        let n = polygon.len();
        for i in 0..n {
            let edge = polygon[(i + 1) % n] - polygon[i];
            let axis = edge.perp_cw().normalize();
            if axis.is_zero() {
                continue;
            }
            let depth = axis_overlap(a, b, axis);
            if depth <= 0.0 {
                return None;
            }
            if best.map_or(true, |c| depth < c.depth) {
                best = Some(Contact { normal: axis, depth });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(cx: f64, cy: f64) -> [Vec2; 4] {
        [
            Vec2::new(cx - 0.5, cy - 0.5),
            Vec2::new(cx + 0.5, cy - 0.5),
            Vec2::new(cx + 0.5, cy + 0.5),
            Vec2::new(cx - 0.5, cy + 0.5),
        ]
    }

    #[test]
    fn separated_squares_do_not_collide() {
        assert_eq!(sat(&unit_square(0.0, 0.0), &unit_square(1.5, 0.0)), None);
    }

    #[test]
    fn overlapping_squares_report_depth_along_x() {
        let contact = sat(&unit_square(0.0, 0.0), &unit_square(0.5, 0.0)).expect("squares overlap");
        assert!((contact.depth - 0.5).abs() < 1e-12, "depth {}", contact.depth);
        assert!(contact.normal.y.abs() < 1e-12 && (contact.normal.x.abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn touching_edges_do_not_collide() {
        assert_eq!(sat(&unit_square(0.0, 0.0), &unit_square(1.0, 0.0)), None);
    }
}
