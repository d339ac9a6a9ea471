//! Sweep-line polygon fill into the occupancy map.
//!
//! Polygons arrive in grid coordinates (cell `(i, j)` centered on `(i, j)`).
//! A cell is covered when its center lies inside the polygon; scanlines
//! run over cell-center rows from the lowest `j` to the highest, edges
//! follow the half-open `[y_min, y_max)` rule so shared vertices are not
//! counted twice.

use crate::core::Vec2;
use crate::systems::shapes::Collidable;

use super::solver::GridDims;

#[derive(Clone, Copy, Debug)]
struct Edge {
    y_min: f64,
    y_max: f64,
    /// x at `y_min`
    x_start: f64,
    inv_slope: f64,
}

#[derive(Clone, Copy, Debug)]
struct ActiveEdge {
    y_max: f64,
    x: f64,
    inv_slope: f64,
}

/// Marks every interior cell whose center is inside `polygon` as owned by
/// `owner`. Later calls overwrite earlier ones.
pub fn fill_polygon(dims: GridDims, occupancy: &mut [Option<Collidable>], polygon: &[Vec2], owner: Collidable) {
    let n = polygon.len();
    let mut edges: Vec<Edge> = Vec::with_capacity(n);
    for k in 0..n {
        let (p, q) = (polygon[k], polygon[(k + 1) % n]);
        if p.y == q.y || !(p.y.is_finite() && q.y.is_finite()) {
            continue;
        }
        let (lo, hi) = if p.y < q.y { (p, q) } else { (q, p) };
        edges.push(Edge {
            y_min: lo.y,
            y_max: hi.y,
            x_start: lo.x,
            inv_slope: (hi.x - lo.x) / (hi.y - lo.y),
        });
    }
    if edges.is_empty() {
        return;
    }
    edges.sort_by(|a, b| a.y_min.total_cmp(&b.y_min));

    let y_lo = edges[0].y_min;
    let y_hi = edges.iter().map(|e| e.y_max).fold(f64::NEG_INFINITY, f64::max);
    let first_row = y_lo.ceil().max(1.0) as usize;
    let last_row = y_hi.ceil().min(dims.h as f64 + 1.0) as usize;

    let mut active: Vec<ActiveEdge> = Vec::with_capacity(edges.len());
    let mut next_edge = 0;

    for j in first_row..last_row {
        let y = j as f64;

        while next_edge < edges.len() && edges[next_edge].y_min <= y {
            let e = edges[next_edge];
            if e.y_max > y {
                active.push(ActiveEdge {
                    y_max: e.y_max,
                    x: e.x_start + (y - e.y_min) * e.inv_slope,
                    inv_slope: e.inv_slope,
                });
            }
            next_edge += 1;
        }
        active.retain(|e| e.y_max > y);
        active.sort_by(|a, b| a.x.total_cmp(&b.x));

        for span in active.chunks_exact(2) {
            let from = span[0].x.ceil().max(1.0);
            let to = span[1].x.floor().min(dims.w as f64);
            if from > to {
                continue;
            }
            for i in from as usize..=to as usize {
                occupancy[dims.ix(i, j)] = Some(owner);
            }
        }

        for e in active.iter_mut() {
            e.x += e.inv_slope;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RigidId;

    fn owner() -> Collidable {
        Collidable::Rigid(RigidId::new(0, 0))
    }

    fn covered(dims: GridDims, occupancy: &[Option<Collidable>]) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for j in 1..=dims.h {
            for i in 1..=dims.w {
                if occupancy[dims.ix(i, j)].is_some() {
                    cells.push((i, j));
                }
            }
        }
        cells
    }

    #[test]
    fn axis_aligned_square_covers_its_cells() {
        let dims = GridDims::new(10, 10);
        let mut occupancy = vec![None; dims.size()];
        let square = [
            Vec2::new(2.5, 3.5),
            Vec2::new(5.5, 3.5),
            Vec2::new(5.5, 5.5),
            Vec2::new(2.5, 5.5),
        ];
        fill_polygon(dims, &mut occupancy, &square, owner());
        let cells = covered(dims, &occupancy);
        assert_eq!(cells.len(), 3 * 2);
        assert!(cells.contains(&(3, 4)) && cells.contains(&(5, 5)));
        assert!(!cells.contains(&(2, 4)) && !cells.contains(&(3, 6)));
    }

    #[test]
    fn diamond_is_symmetric() {
        let dims = GridDims::new(12, 12);
        let mut occupancy = vec![None; dims.size()];
        let diamond = [
            Vec2::new(6.0, 2.5),
            Vec2::new(9.5, 6.0),
            Vec2::new(6.0, 9.5),
            Vec2::new(2.5, 6.0),
        ];
        fill_polygon(dims, &mut occupancy, &diamond, owner());
        let cells = covered(dims, &occupancy);
        assert!(cells.contains(&(6, 6)));
        for &(i, j) in &cells {
            assert!(cells.contains(&(12 - i, j)), "missing mirror of ({i}, {j})");
        }
        assert!(!cells.contains(&(3, 3)));
    }

    #[test]
    fn polygon_outside_grid_is_clipped() {
        let dims = GridDims::new(4, 4);
        let mut occupancy = vec![None; dims.size()];
        let big = [
            Vec2::new(-10.0, -10.0),
            Vec2::new(20.0, -10.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(-10.0, 20.0),
        ];
        fill_polygon(dims, &mut occupancy, &big, owner());
        assert_eq!(covered(dims, &occupancy).len(), 16);
        // halo never written
        assert!(occupancy[dims.ix(0, 0)].is_none());
    }
}
