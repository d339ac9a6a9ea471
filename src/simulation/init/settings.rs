use crate::core::Vec2;
use crate::domain::IntegratorConfig;
use crate::systems::integrators;

use super::perf_stats::PerfStats;
use super::Simulation;

pub(super) fn enable_perf_metrics(sim: &mut Simulation, enabled: bool) {
    sim.perf_enabled = enabled;
    if !enabled {
        sim.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(sim: &Simulation) -> PerfStats {
    sim.perf_stats.clone()
}

pub(super) fn set_gravity(sim: &mut Simulation, gravity: Vec2) {
    sim.config.gravity = [gravity.x, gravity.y];
    sim.scene.set_gravity(gravity);
}

pub(super) fn set_integrator(sim: &mut Simulation, config: IntegratorConfig) {
    sim.integrator = integrators::build(&config);
    sim.config.integrator = config;
}
