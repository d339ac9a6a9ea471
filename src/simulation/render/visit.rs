use crate::systems::forces::Force;
use crate::systems::visit::EntityVisitor;

use super::{AbiLayoutData, Drawable, Simulation};

/// Fluid first so it sits behind everything else, then drawables in
/// registration order, then the pointer drag.
pub(super) fn visit(sim: &Simulation, visitor: &mut dyn EntityVisitor) {
    if let Some(grid) = sim.fluid.as_ref() {
        visitor.fluid(grid, grid.view());
    }

    let view = sim.scene.view();
    for drawable in &sim.drawables {
        match *drawable {
            Drawable::Particle(id) => visitor.particle(id, view.particles.x(id)),
            Drawable::Quad(id) => {
                let quad = &view.quads[id.index()];
                visitor.quad(id, quad.positions(view.particles), quad.texture.as_ref());
            }
            Drawable::Rigid(id) => {
                let rigids = view.rigids;
                let texture = sim.scene.rigid_texture(id);
                visitor.rigid_box(id, rigids.corners(id), rigids.o(id), rigids.w(id), texture);
            }
            Drawable::Force(slot) => {
                if let Some(force) = sim.scene.force(slot) {
                    force.draw(&view, visitor);
                }
            }
        }
    }

    if let Some(drag) = sim.scene.drag() {
        drag.draw(&view, visitor);
    }
}

pub(super) fn abi_layout_data(sim: &Simulation) -> AbiLayoutData {
    let particles = sim.scene.particles();
    let rigids = sim.scene.rigids();
    let (density, u, v) = match sim.fluid.as_ref() {
        Some(grid) => (grid.density(), grid.velocity_x(), grid.velocity_y()),
        None => (&[][..], &[][..], &[][..]),
    };
    AbiLayoutData {
        particle_x_ptr: particles.positions().as_ptr(),
        particle_v_ptr: particles.velocities().as_ptr(),
        particle_count: particles.len(),
        rigid_x_ptr: rigids.positions().as_ptr(),
        rigid_o_ptr: rigids.orientations().as_ptr(),
        rigid_count: rigids.len(),
        fluid_density_ptr: density.as_ptr(),
        fluid_u_ptr: u.as_ptr(),
        fluid_v_ptr: v.as_ptr(),
        fluid_len: density.len(),
        fluid_width: sim.fluid.as_ref().map_or(0, |g| g.width()),
        fluid_height: sim.fluid.as_ref().map_or(0, |g| g.height()),
    }
}
