//! Fluid-solid momentum exchange.
//!
//! Runs after the density step. For each cell a solid covered during this
//! step, flow heading into the solid is reflected (and damped), the lost
//! momentum is handed to the solid as a force, and part of the cell's
//! density is pushed back out so dye does not pile up inside bodies.

use crate::core::Vec2;
use crate::systems::forces::Bodies;

use super::solver::{set_bnd, Boundary, GridDims};
use super::FluidGrid;

pub(super) fn couple(grid: &mut FluidGrid, bodies: &mut Bodies<'_>) {
    let dims = grid.dims;
    let bounds = bodies.env.bounds;
    let absorption = grid.config.absorption;
    let coupling_speed = grid.config.coupling_speed;
    let deadvection = grid.config.deadvection;

    // density moved this pass lands here first so the sweep order does not
    // matter
    grid.d0.fill(0.0);

    for j in 1..=dims.h {
        for i in 1..=dims.w {
            let idx = dims.ix(i, j);
            let Some(owner) = grid.occupancy[idx] else {
                continue;
            };

            let cell = grid.grid_to_world(&bounds, i, j);
            let center = owner.center(&*bodies.particles, &*bodies.rigids, bodies.quads);
            let n = (cell - center).normalize();
            if n.is_zero() {
                continue;
            }

            let flow = Vec2::new(grid.u[idx], grid.v[idx]);
            let vn = flow.dot(n);
            let mut out = flow;
            if vn < 0.0 {
                out = (flow - n * (2.0 * vn)) * absorption;
                grid.u[idx] = out.x;
                grid.v[idx] = out.y;
                let force = (flow - out) * (grid.d[idx] * coupling_speed);
                owner.add_force_at(bodies.particles, bodies.rigids, bodies.quads, force, cell);
            }

            let amount = grid.d[idx] * deadvection;
            if amount > 0.0 {
                let dir = out.normalize() + n;
                grid.d[idx] -= amount;
                splat(dims, &mut grid.d0, Vec2::new(i as f64 + dir.x, j as f64 + dir.y), amount);
            }
        }
    }

    for (d, moved) in grid.d.iter_mut().zip(&grid.d0) {
        *d += moved;
    }
    set_bnd(dims, Boundary::Scalar, &mut grid.d);
    set_bnd(dims, Boundary::VelocityX, &mut grid.u);
    set_bnd(dims, Boundary::VelocityY, &mut grid.v);
}

/// Bilinear split of `amount` over the four interior cells around `at`.
fn splat(dims: GridDims, target: &mut [f64], at: Vec2, amount: f64) {
    let x = at.x.clamp(1.0, dims.w as f64);
    let y = at.y.clamp(1.0, dims.h as f64);
    let i0 = x.floor() as usize;
    let j0 = y.floor() as usize;
    let i1 = (i0 + 1).min(dims.w);
    let j1 = (j0 + 1).min(dims.h);
    let s1 = x - i0 as f64;
    let t1 = y - j0 as f64;
    let (s0, t0) = (1.0 - s1, 1.0 - t1);

    target[dims.ix(i0, j0)] += amount * s0 * t0;
    target[dims.ix(i1, j0)] += amount * s1 * t0;
    target[dims.ix(i0, j1)] += amount * s0 * t1;
    target[dims.ix(i1, j1)] += amount * s1 * t1;
}
