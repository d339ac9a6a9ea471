use crate::systems::forces::Actor;

use super::perf_timer::timed;
use super::{PerfTimer, Simulation};

pub(super) fn step(sim: &mut Simulation, dt: f64) {
    let perf_on = sim.perf_enabled;
    if perf_on {
        sim.perf_stats.reset();
        // Snapshot pre-step counts
        sim.perf_stats.particle_count = sim.scene.particles().len() as u32;
        sim.perf_stats.rigid_count = sim.scene.rigids().len() as u32;
        sim.perf_stats.quad_count = sim.scene.quads().len() as u32;
        sim.perf_stats.force_count = sim.scene.force_count() as u32;
        sim.perf_stats.actor_count = sim.actors.len() as u32 + sim.fluid.is_some() as u32;
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // === FORCES ===
    // Accumulators are zeroed inside; kinematic forces run first.
    let Simulation { scene, fluid, actors, integrator, perf_stats, .. } = sim;
    timed(perf_on, &mut perf_stats.forces_ms, || scene.calc_forces());

    // === ACTORS ===
    // Fluid before rigid redirection, so proxies forward coupling forces too.
    if let Some(fluid) = fluid.as_mut() {
        timed(perf_on, &mut perf_stats.fluid_ms, || fluid.act(&mut scene.bodies(), dt));
    }
    timed(perf_on, &mut perf_stats.actors_ms, || {
        for actor in actors.iter_mut() {
            actor.act(&mut scene.bodies(), dt);
        }
    });

    // === INTEGRATION ===
    timed(perf_on, &mut perf_stats.integrate_ms, || integrator.integrate(scene, dt));

    if perf_on {
        if let Some(grid) = fluid.as_ref() {
            perf_stats.fluid_cells = (grid.width() * grid.height()) as u32;
            perf_stats.fluid_mass = grid.total_density();
        }
    }
    if let Some(t0) = step_start {
        perf_stats.step_ms = t0.elapsed_ms();
    }

    sim.frame += 1;
    sim.time += dt;
}
