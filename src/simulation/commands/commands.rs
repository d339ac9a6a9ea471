use crate::core::Vec2;
use crate::domain::SceneError;
use crate::state::{ParticleId, QuadId, RigidId};
use crate::systems::collision::Collisions;
use crate::systems::fluid::FluidGrid;
use crate::systems::forces::{
    AngularSpring, Borders, Drag, Force, Glue, Gravity, RigidCoupling, RigidFollow, RigidRedirect, Spring,
};
use crate::systems::shapes::{Quad, QuadTexture};

use super::scene::ForceSlot;
use super::{Drawable, Simulation};

fn rejected<T>(what: &str, result: Result<T, SceneError>) -> Result<T, SceneError> {
    if let Err(e) = &result {
        console_warn!("{what} rejected: {e}");
    }
    result
}

/// Registers a force and, when it draws itself, its drawable entry.
fn register(sim: &mut Simulation, force: Box<dyn Force>) -> ForceSlot {
    let drawable = force.is_drawable();
    let slot = sim.scene.add_force(force);
    if drawable {
        sim.drawables.push(Drawable::Force(slot));
    }
    slot
}

pub(super) fn add_particle(sim: &mut Simulation, x: Vec2, v: Vec2, m: f64) -> Result<ParticleId, SceneError> {
    let id = rejected("particle", sim.scene.add_particle(x, v, m))?;
    sim.drawables.push(Drawable::Particle(id));
    Ok(id)
}

pub(super) fn add_rigid_box(
    sim: &mut Simulation,
    x: Vec2,
    angle: f64,
    size: f64,
    m: f64,
) -> Result<RigidId, SceneError> {
    let id = rejected("rigid box", sim.scene.add_rigid_box(x, angle, size, m))?;
    sim.drawables.push(Drawable::Rigid(id));
    Ok(id)
}

pub(super) fn add_quad(
    sim: &mut Simulation,
    corners: [ParticleId; 4],
    texture: Option<QuadTexture>,
) -> Result<QuadId, SceneError> {
    let quad = Quad { corners, texture };
    let id = rejected("quad", sim.scene.add_quad(quad))?;
    sim.drawables.push(Drawable::Quad(id));
    Ok(id)
}

pub(super) fn set_quad_texture(
    sim: &mut Simulation,
    quad: QuadId,
    texture: Option<QuadTexture>,
) -> Result<(), SceneError> {
    rejected("quad texture", sim.scene.quad_mut(quad))?.texture = texture;
    Ok(())
}

pub(super) fn set_rigid_texture(
    sim: &mut Simulation,
    body: RigidId,
    texture: Option<QuadTexture>,
) -> Result<(), SceneError> {
    rejected("rigid texture", sim.scene.set_rigid_texture(body, texture))
}

pub(super) fn add_spring(
    sim: &mut Simulation,
    a: ParticleId,
    b: ParticleId,
    rest: Option<f64>,
    ks: f64,
    kd: f64,
) -> Result<ForceSlot, SceneError> {
    let particles = sim.scene.particles();
    rejected("spring", particles.check(a).and(particles.check(b)))?;
    let rest = rest.unwrap_or_else(|| particles.x(a).distance(particles.x(b)));
    Ok(register(sim, Box::new(Spring::new(a, b, rest, ks, kd))))
}

pub(super) fn add_angular_spring(
    sim: &mut Simulation,
    p1: ParticleId,
    p2: ParticleId,
    p3: ParticleId,
    rest: Option<f64>,
    ks: f64,
) -> Result<ForceSlot, SceneError> {
    let particles = sim.scene.particles();
    rejected(
        "angular spring",
        particles.check(p1).and(particles.check(p2)).and(particles.check(p3)),
    )?;
    let rest = rest.unwrap_or_else(|| {
        let hinge = particles.x(p2);
        let arm1 = particles.x(p1) - hinge;
        let arm3 = particles.x(p3) - hinge;
        if arm1.is_zero() || arm3.is_zero() {
            0.0
        } else {
            arm1.angle() - arm3.angle()
        }
    });
    Ok(register(sim, Box::new(AngularSpring::new(p1, p2, p3, rest, ks))))
}

pub(super) fn add_glue(sim: &mut Simulation, particle: ParticleId, target: Option<Vec2>) -> Result<ForceSlot, SceneError> {
    rejected("glue", sim.scene.particles().check(particle))?;
    let target = target.unwrap_or_else(|| sim.scene.particles().x(particle));
    Ok(register(sim, Box::new(Glue::new(particle, target))))
}

pub(super) fn add_gravity(sim: &mut Simulation) -> ForceSlot {
    let b = sim.config.bounds;
    let origin = Vec2::new(0.5 * (b.left + b.right), 0.5 * (b.top + b.bottom));
    register(sim, Box::new(Gravity::new(origin)))
}

pub(super) fn add_borders(sim: &mut Simulation) -> ForceSlot {
    let absorption = sim.config.borders.absorption;
    register(sim, Box::new(Borders::new(absorption)))
}

pub(super) fn add_collisions(sim: &mut Simulation) -> ForceSlot {
    let config = sim.config.collision.clone();
    register(sim, Box::new(Collisions::new(config)))
}

/// Registers the follow half as a kinematic force and the redirect half
/// as an actor.
pub(super) fn add_rigid_force(
    sim: &mut Simulation,
    body: RigidId,
    proxy: ParticleId,
    offset: Option<Vec2>,
) -> Result<ForceSlot, SceneError> {
    let particles = sim.scene.particles();
    let rigids = sim.scene.rigids();
    rejected("rigid force", rigids.check(body).and(particles.check(proxy)))?;
    let coupling = match offset {
        Some(offset) => RigidCoupling::new(body, proxy, offset),
        None => RigidCoupling::at_current(body, proxy, particles, rigids),
    };
    let slot = register(sim, Box::new(RigidFollow(coupling)));
    sim.actors.push(Box::new(RigidRedirect(coupling)));
    Ok(slot)
}

pub(super) fn add_fluid(sim: &mut Simulation) -> Result<(), SceneError> {
    if sim.fluid.is_some() {
        return rejected("fluid grid", Err(SceneError::FluidAlreadyPresent));
    }
    let grid = FluidGrid::new(&sim.config.fluid);
    console_log!("fluid grid created: {}x{}", grid.width(), grid.height());
    sim.fluid = Some(grid);
    Ok(())
}

pub(super) fn begin_drag(sim: &mut Simulation, particle: ParticleId) -> Result<(), SceneError> {
    rejected("drag", sim.scene.particles().check(particle))?;
    let config = &sim.config.drag;
    sim.scene.set_drag(Some(Drag::new(particle, config.ks, config.kd)));
    Ok(())
}

pub(super) fn end_drag(sim: &mut Simulation) {
    sim.scene.set_drag(None);
}

pub(super) fn clear(sim: &mut Simulation) {
    console_log!(
        "clearing scene: {} particles, {} rigid bodies, {} quads",
        sim.scene.particles().len(),
        sim.scene.rigids().len(),
        sim.scene.quads().len()
    );
    sim.scene.clear();
    sim.fluid = None;
    sim.actors.clear();
    sim.drawables.clear();
    sim.frame = 0;
    sim.time = 0.0;
    sim.perf_stats.reset();
}
