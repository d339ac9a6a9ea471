use fluxbox_engine::Sandbox;

#[test]
fn perf_smoke_step() {
    let mut sandbox = Sandbox::new().expect("default config");
    sandbox.add_gravity();
    sandbox.add_borders();
    sandbox.add_collisions();
    sandbox.add_fluid().expect("single fluid grid");
    sandbox.enable_perf_metrics(true);
    for k in 0..16 {
        let x = 0.1 + 0.05 * k as f64;
        sandbox.add_particle(x, 0.2, 0.0, 0.0, 1.0).expect("particle");
        sandbox.add_rigid_box(x, 0.5, 0.1 * k as f64, 0.04, 1.0).expect("rigid box");
    }
    sandbox.step(0.01);
    let stats = sandbox.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.fluid_ms() >= 0.0);
    assert_eq!(stats.particle_count(), 16);
    assert_eq!(stats.rigid_count(), 16);
    assert_eq!(stats.fluid_cells(), 64 * 64);
}

#[test]
fn perf_stats_stay_zero_when_disabled() {
    let mut sandbox = Sandbox::new().expect("default config");
    sandbox.add_particle(0.5, 0.5, 0.0, 0.0, 1.0).expect("particle");
    sandbox.step(0.01);
    let stats = sandbox.get_perf_stats();
    assert_eq!(stats.step_ms(), 0.0);
    assert_eq!(stats.particle_count(), 0);
}
