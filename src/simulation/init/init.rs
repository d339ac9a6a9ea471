use crate::domain::{SceneError, SimConfig};
use crate::systems::integrators;

use super::perf_stats::PerfStats;
use super::scene::Scene;
use super::Simulation;

pub(super) fn create_simulation(config: SimConfig) -> Result<Simulation, SceneError> {
    config.validate()?;
    let scene = Scene::new(config.bounds, config.gravity());
    let integrator = integrators::build(&config.integrator);
    console_log!(
        "simulation created: bounds {}x{}, integrator {}",
        config.bounds.width(),
        config.bounds.height(),
        integrator.describe()
    );
    Ok(Simulation {
        config,
        scene,
        integrator,
        fluid: None,
        actors: Vec::new(),
        drawables: Vec::with_capacity(64),
        frame: 0,
        time: 0.0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}
