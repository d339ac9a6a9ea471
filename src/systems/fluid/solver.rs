//! Stable-fluids kernels on a `(w+2) x (h+2)` grid with a one-cell halo.
//!
//! Cell `(i, j)` lives at `i + (w+2)*j`; interior cells are `1..=w`,
//! `1..=h`. Every kernel leaves the halo consistent with [`set_bnd`].

/// Gauss-Seidel sweeps per implicit solve
pub const RELAX_ITERATIONS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    pub w: usize,
    pub h: usize,
}

impl GridDims {
    pub fn new(w: usize, h: usize) -> Self {
        Self { w, h }
    }

    #[inline(always)]
    pub fn ix(&self, i: usize, j: usize) -> usize {
        i + (self.w + 2) * j
    }

    /// Cells including the halo
    pub fn size(&self) -> usize {
        (self.w + 2) * (self.h + 2)
    }
}

/// Which field a boundary pass is for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Scalar,
    /// Horizontal velocity: negated on the left/right walls
    VelocityX,
    /// Vertical velocity: negated on the top/bottom walls
    VelocityY,
}

/// `x += dt * s` over every cell.
pub fn add_source(x: &mut [f64], s: &[f64], dt: f64) {
    for (x, s) in x.iter_mut().zip(s) {
        *x += dt * s;
    }
}

/// Fills the halo: mirrored copies of the neighbouring interior cell, with
/// the wall-normal velocity component negated. Corners average their two
/// edge neighbours.
pub fn set_bnd(dims: GridDims, b: Boundary, x: &mut [f64]) {
    let GridDims { w, h } = dims;
    let flip_x = if b == Boundary::VelocityX { -1.0 } else { 1.0 };
    let flip_y = if b == Boundary::VelocityY { -1.0 } else { 1.0 };

    for j in 1..=h {
        let left = *fast!(x, [dims.ix(1, j)]);
        let right = *fast!(x, [dims.ix(w, j)]);
        fast!(x, [dims.ix(0, j)] = flip_x * left);
        fast!(x, [dims.ix(w + 1, j)] = flip_x * right);
    }
    for i in 1..=w {
        let top = *fast!(x, [dims.ix(i, 1)]);
        let bottom = *fast!(x, [dims.ix(i, h)]);
        fast!(x, [dims.ix(i, 0)] = flip_y * top);
        fast!(x, [dims.ix(i, h + 1)] = flip_y * bottom);
    }

    let corner = |x: &[f64], a: usize, b: usize| 0.5 * (x[a] + x[b]);
    x[dims.ix(0, 0)] = corner(x, dims.ix(1, 0), dims.ix(0, 1));
    x[dims.ix(0, h + 1)] = corner(x, dims.ix(1, h + 1), dims.ix(0, h));
    x[dims.ix(w + 1, 0)] = corner(x, dims.ix(w, 0), dims.ix(w + 1, 1));
    x[dims.ix(w + 1, h + 1)] = corner(x, dims.ix(w, h + 1), dims.ix(w + 1, h));
}

/// Gauss-Seidel relaxation of `c x - a Σ neighbours = x0`.
pub fn lin_solve(dims: GridDims, b: Boundary, x: &mut [f64], x0: &[f64], a: f64, c: f64) {
    let inv_c = 1.0 / c;
    for _ in 0..RELAX_ITERATIONS {
        for j in 1..=dims.h {
            for i in 1..=dims.w {
                let idx = dims.ix(i, j);
                let neighbours = *fast!(x, [idx - 1])
                    + *fast!(x, [idx + 1])
                    + *fast!(x, [idx - (dims.w + 2)])
                    + *fast!(x, [idx + (dims.w + 2)]);
                let value = (*fast!(x0, [idx]) + a * neighbours) * inv_c;
                fast!(x, [idx] = value);
            }
        }
        set_bnd(dims, b, x);
    }
}

pub fn diffuse(dims: GridDims, b: Boundary, x: &mut [f64], x0: &[f64], rate: f64, dt: f64) {
    let a = dt * rate * (dims.w * dims.h) as f64;
    lin_solve(dims, b, x, x0, a, 1.0 + 4.0 * a);
}

/// Semi-Lagrangian transport of `d0` along `(u, v)` into `d`.
pub fn advect(dims: GridDims, b: Boundary, d: &mut [f64], d0: &[f64], u: &[f64], v: &[f64], dt: f64) {
    let dtx = dt * dims.w as f64;
    let dty = dt * dims.h as f64;
    let max_x = dims.w as f64 + 0.5;
    let max_y = dims.h as f64 + 0.5;

    for j in 1..=dims.h {
        for i in 1..=dims.w {
            let idx = dims.ix(i, j);
            let x = (i as f64 - dtx * *fast!(u, [idx])).clamp(0.5, max_x);
            let y = (j as f64 - dty * *fast!(v, [idx])).clamp(0.5, max_y);

            let i0 = x.floor() as usize;
            let j0 = y.floor() as usize;
            let s1 = x - i0 as f64;
            let t1 = y - j0 as f64;
            let (s0, t0) = (1.0 - s1, 1.0 - t1);

            let value = s0 * (t0 * *fast!(d0, [dims.ix(i0, j0)]) + t1 * *fast!(d0, [dims.ix(i0, j0 + 1)]))
                + s1 * (t0 * *fast!(d0, [dims.ix(i0 + 1, j0)]) + t1 * *fast!(d0, [dims.ix(i0 + 1, j0 + 1)]));
            fast!(d, [idx] = value);
        }
    }
    set_bnd(dims, b, d);
}

/// Removes the divergent part of `(u, v)`. `p` and `div` are scratch.
pub fn project(dims: GridDims, u: &mut [f64], v: &mut [f64], p: &mut [f64], div: &mut [f64]) {
    let stride = dims.w + 2;
    let hx = 1.0 / dims.w as f64;
    let hy = 1.0 / dims.h as f64;

    for j in 1..=dims.h {
        for i in 1..=dims.w {
            let idx = dims.ix(i, j);
            let value = -0.5
                * (hx * (*fast!(u, [idx + 1]) - *fast!(u, [idx - 1]))
                    + hy * (*fast!(v, [idx + stride]) - *fast!(v, [idx - stride])));
            fast!(div, [idx] = value);
            fast!(p, [idx] = 0.0);
        }
    }
    set_bnd(dims, Boundary::Scalar, div);
    set_bnd(dims, Boundary::Scalar, p);

    lin_solve(dims, Boundary::Scalar, p, div, 1.0, 4.0);

    for j in 1..=dims.h {
        for i in 1..=dims.w {
            let idx = dims.ix(i, j);
            let du = 0.5 * dims.w as f64 * (*fast!(p, [idx + 1]) - *fast!(p, [idx - 1]));
            let dv = 0.5 * dims.h as f64 * (*fast!(p, [idx + stride]) - *fast!(p, [idx - stride]));
            let (un, vn) = (*fast!(u, [idx]) - du, *fast!(v, [idx]) - dv);
            fast!(u, [idx] = un);
            fast!(v, [idx] = vn);
        }
    }
    set_bnd(dims, Boundary::VelocityX, u);
    set_bnd(dims, Boundary::VelocityY, v);
}

/// Sum over interior cells
pub fn interior_sum(dims: GridDims, x: &[f64]) -> f64 {
    let mut total = 0.0;
    for j in 1..=dims.h {
        for i in 1..=dims.w {
            total += x[dims.ix(i, j)];
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_source_and_bnd_conserve_interior_mass() {
        let dims = GridDims::new(8, 6);
        let mut d = vec![0.0; dims.size()];
        let mut s = vec![0.0; dims.size()];
        s[dims.ix(3, 2)] = 10.0;
        s[dims.ix(8, 6)] = 4.0;
        add_source(&mut d, &s, 0.1);
        set_bnd(dims, Boundary::Scalar, &mut d);
        let total = interior_sum(dims, &d);
        assert!((total - 1.4).abs() < 1e-12, "interior mass {total}");
        // halo mirrors the edge
        assert_eq!(d[dims.ix(9, 6)], d[dims.ix(8, 6)]);
    }

    #[test]
    fn wall_normal_velocity_is_negated() {
        let dims = GridDims::new(4, 4);
        let mut u = vec![0.0; dims.size()];
        u[dims.ix(1, 2)] = 3.0;
        set_bnd(dims, Boundary::VelocityX, &mut u);
        assert_eq!(u[dims.ix(0, 2)], -3.0);

        let mut v = vec![0.0; dims.size()];
        v[dims.ix(1, 2)] = 3.0;
        set_bnd(dims, Boundary::VelocityY, &mut v);
        assert_eq!(v[dims.ix(0, 2)], 3.0);
    }

    #[test]
    fn advect_with_zero_velocity_is_identity() {
        let dims = GridDims::new(5, 5);
        let mut d0 = vec![0.0; dims.size()];
        for (k, cell) in d0.iter_mut().enumerate() {
            *cell = k as f64;
        }
        set_bnd(dims, Boundary::Scalar, &mut d0);
        let zero = vec![0.0; dims.size()];
        let mut d = vec![0.0; dims.size()];
        advect(dims, Boundary::Scalar, &mut d, &d0, &zero, &zero, 0.1);
        for j in 1..=5 {
            for i in 1..=5 {
                assert_eq!(d[dims.ix(i, j)], d0[dims.ix(i, j)]);
            }
        }
    }

    #[test]
    fn advect_back_trace_scales_with_grid_width() {
        // u = 0.1 domain/s on a 10-wide grid is one cell per second
        let dims = GridDims::new(10, 10);
        let mut d0 = vec![0.0; dims.size()];
        d0[dims.ix(5, 5)] = 1.0;
        let u = vec![0.1; dims.size()];
        let v = vec![0.0; dims.size()];
        let mut d = vec![0.0; dims.size()];
        advect(dims, Boundary::Scalar, &mut d, &d0, &u, &v, 1.0);
        assert!((d[dims.ix(6, 5)] - 1.0).abs() < 1e-12);
        assert!(d[dims.ix(5, 5)].abs() < 1e-12);
        assert!((interior_sum(dims, &d) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn advect_clamps_huge_velocities_to_the_halo() {
        let dims = GridDims::new(8, 8);
        let mut d0 = vec![0.0; dims.size()];
        for j in 1..=8 {
            for i in 1..=8 {
                d0[dims.ix(i, j)] = (i + 10 * j) as f64;
            }
        }
        set_bnd(dims, Boundary::Scalar, &mut d0);
        let v = vec![0.0; dims.size()];
        let mut d = vec![0.0; dims.size()];

        // every back-trace lands at x = 0.5, halfway into the halo
        let u = vec![1.0e6; dims.size()];
        advect(dims, Boundary::Scalar, &mut d, &d0, &u, &v, 1.0);
        for j in 1..=8 {
            for i in 1..=8 {
                assert_eq!(d[dims.ix(i, j)], d0[dims.ix(1, j)]);
            }
        }

        // and at x = w + 0.5 the other way
        let u = vec![-1.0e6; dims.size()];
        advect(dims, Boundary::Scalar, &mut d, &d0, &u, &v, 1.0);
        for j in 1..=8 {
            for i in 1..=8 {
                assert_eq!(d[dims.ix(i, j)], d0[dims.ix(8, j)]);
            }
        }
    }

    #[test]
    fn projection_reduces_divergence() {
        let dims = GridDims::new(16, 16);
        let mut u = vec![0.0; dims.size()];
        let mut v = vec![0.0; dims.size()];
        // radial outflow around the center
        for j in 1..=16 {
            for i in 1..=16 {
                u[dims.ix(i, j)] = i as f64 - 8.5;
                v[dims.ix(i, j)] = j as f64 - 8.5;
            }
        }
        let divergence = |u: &[f64], v: &[f64]| {
            let mut total = 0.0;
            for j in 2..16 {
                for i in 2..16 {
                    let idx = dims.ix(i, j);
                    total += ((u[idx + 1] - u[idx - 1]) + (v[idx + 18] - v[idx - 18])).abs();
                }
            }
            total
        };
        let before = divergence(&u, &v);
        let mut p = vec![0.0; dims.size()];
        let mut div = vec![0.0; dims.size()];
        project(dims, &mut u, &mut v, &mut p, &mut div);
        let after = divergence(&u, &v);
        assert!(after < before, "divergence {before} -> {after}");
    }
}
