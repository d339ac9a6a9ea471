use super::*;
use crate::domain::{HandleKind, IntegratorMethod};
use crate::systems::fluid::FluidView;
use crate::systems::shapes::TextureHandle;
use crate::systems::visit::SegmentKind;

fn weightless() -> Simulation {
    let config = SimConfig { gravity: [0.0, 0.0], ..SimConfig::default() };
    Simulation::new(config).expect("default config is valid")
}

fn particle(sim: &mut Simulation, x: f64, y: f64) -> ParticleId {
    sim.add_particle(Vec2::new(x, y), Vec2::ZERO, 1.0).expect("valid particle")
}

#[derive(Default)]
struct Tally {
    particles: usize,
    quads: usize,
    textured: usize,
    rigids: usize,
    textured_rigids: Vec<u32>,
    springs: usize,
    gravity: usize,
    borders: usize,
    drags: usize,
    fluids: Vec<FluidView>,
}

impl EntityVisitor for Tally {
    fn particle(&mut self, _id: ParticleId, _x: Vec2) {
        self.particles += 1;
    }

    fn quad(&mut self, _id: QuadId, _corners: [Vec2; 4], texture: Option<&QuadTexture>) {
        self.quads += 1;
        self.textured += texture.is_some() as usize;
    }

    fn rigid_box(
        &mut self,
        _id: RigidId,
        _corners: [Vec2; 4],
        _o: Vec2,
        _w: Vec2,
        texture: Option<&QuadTexture>,
    ) {
        self.rigids += 1;
        self.textured_rigids.extend(texture.map(|t| t.handle.0));
    }

    fn segment(&mut self, kind: SegmentKind, _a: Vec2, _b: Vec2) {
        match kind {
            SegmentKind::Spring { .. } => self.springs += 1,
            SegmentKind::Gravity => self.gravity += 1,
            SegmentKind::Border => self.borders += 1,
            SegmentKind::Drag => self.drags += 1,
            SegmentKind::AngularSpring => {}
        }
    }

    fn fluid(&mut self, _grid: &FluidGrid, view: FluidView) {
        self.fluids.push(view);
    }
}

#[test]
fn invalid_config_is_rejected() {
    let config = SimConfig { dt: -1.0, ..SimConfig::default() };
    assert!(matches!(Simulation::new(config), Err(SceneError::InvalidConfiguration { .. })));
}

#[test]
fn non_positive_mass_is_rejected() {
    let mut sim = weightless();
    assert_eq!(
        sim.add_particle(Vec2::ZERO, Vec2::ZERO, 0.0),
        Err(SceneError::InvalidMass { mass: 0.0 })
    );
    assert!(sim.add_rigid_box(Vec2::ZERO, 0.0, 0.1, -2.0).is_err());
    assert!(sim.particles().is_empty());
    assert!(sim.rigids().is_empty());
}

#[test]
fn clear_invalidates_handles_and_resets_counters() {
    let mut sim = weightless();
    let a = particle(&mut sim, 0.2, 0.2);
    let b = particle(&mut sim, 0.4, 0.2);
    sim.add_fluid().expect("first fluid grid");
    sim.step(0.01);
    assert_eq!(sim.frame(), 1);

    sim.clear();
    assert_eq!(sim.frame(), 0);
    assert_eq!(sim.time(), 0.0);
    assert!(sim.fluid().is_none());
    assert!(matches!(
        sim.add_spring(a, b, None, 1.0, 0.0),
        Err(SceneError::StaleHandle { kind: HandleKind::Particle, .. })
    ));

    // fresh handles work again
    let c = particle(&mut sim, 0.2, 0.2);
    let d = particle(&mut sim, 0.4, 0.2);
    assert!(sim.add_spring(c, d, None, 1.0, 0.0).is_ok());
}

#[test]
fn second_fluid_grid_is_rejected() {
    let mut sim = weightless();
    sim.add_fluid().expect("first fluid grid");
    assert_eq!(sim.add_fluid(), Err(SceneError::FluidAlreadyPresent));
}

#[test]
fn quad_needs_live_corners() {
    let mut sim = weightless();
    let corners = [
        particle(&mut sim, 0.1, 0.1),
        particle(&mut sim, 0.2, 0.1),
        particle(&mut sim, 0.2, 0.2),
        particle(&mut sim, 0.1, 0.2),
    ];
    let quad = sim.add_quad(corners, None).expect("valid quad");
    assert_eq!(sim.scene().collidables().len(), 1);

    sim.set_quad_texture(quad, Some(QuadTexture::full(TextureHandle(7)))).expect("live quad");
    assert_eq!(sim.quads()[0].texture.map(|t| t.handle), Some(TextureHandle(7)));

    sim.clear();
    assert!(sim.add_quad(corners, None).is_err());
    assert!(sim.set_quad_texture(quad, None).is_err());
}

#[test]
fn rigid_box_texture_reaches_the_visitor() {
    let mut sim = weightless();
    let plain = sim.add_rigid_box(Vec2::new(0.3, 0.3), 0.0, 0.1, 1.0).expect("valid box");
    let crate_box = sim.add_rigid_box(Vec2::new(0.6, 0.6), 0.0, 0.1, 1.0).expect("valid box");
    sim.set_rigid_texture(crate_box, Some(QuadTexture::full(TextureHandle(9)))).expect("live box");
    assert!(sim.scene().rigid_texture(plain).is_none());

    let mut tally = Tally::default();
    sim.visit(&mut tally);
    assert_eq!(tally.rigids, 2);
    assert_eq!(tally.textured_rigids, vec![9]);

    sim.clear();
    assert!(sim.set_rigid_texture(crate_box, None).is_err());
}

#[test]
fn rigid_force_is_kinematic_regardless_of_order() {
    let mut sim = weightless();
    let gravity = sim.add_gravity();
    let body = sim.add_rigid_box(Vec2::new(0.5, 0.5), 0.0, 0.5, 1.0).expect("valid box");
    let proxy = particle(&mut sim, 0.75, 0.5);
    let slot = sim.add_rigid_force(body, proxy, None).expect("valid binding");
    assert_eq!(gravity, ForceSlot::Ordinary(0));
    assert_eq!(slot, ForceSlot::Kinematic(0));
    assert_eq!(sim.scene().force_count(), 2);
}

#[test]
fn proxy_forces_reach_the_body() {
    let mut sim = Simulation::new(SimConfig::default()).expect("default config");
    sim.add_gravity();
    let body = sim.add_rigid_box(Vec2::new(0.5, 0.5), 0.0, 0.5, 1.0).expect("valid box");
    let proxy = particle(&mut sim, 0.75, 0.5);
    sim.add_rigid_force(body, proxy, None).expect("valid binding");

    sim.step(0.1);

    // own weight plus the proxy's weight, Euler: v = dt * f / m
    let v = sim.rigids().v(body);
    assert!((v.y - 0.2).abs() < 1e-12, "v = {v:?}");
    // proxy weight 1 at lever 0.25: t = 0.25, I = 0.5^2 / 6
    let omega = sim.rigids().omega(body);
    assert!((omega - 0.1 * 0.25 / (0.25 / 6.0)).abs() < 1e-9, "omega = {omega}");
}

#[test]
fn visit_reports_every_drawable() {
    let mut sim = weightless();
    let corners = [
        particle(&mut sim, 0.1, 0.1),
        particle(&mut sim, 0.2, 0.1),
        particle(&mut sim, 0.2, 0.2),
        particle(&mut sim, 0.1, 0.2),
    ];
    sim.add_quad(corners, Some(QuadTexture::full(TextureHandle(1)))).expect("valid quad");
    sim.add_rigid_box(Vec2::new(0.6, 0.6), 0.3, 0.1, 1.0).expect("valid box");
    sim.add_spring(corners[0], corners[2], None, 10.0, 0.1).expect("valid spring");
    sim.add_gravity();
    sim.add_collisions();
    sim.add_fluid().expect("fluid");
    if let Some(grid) = sim.fluid_mut() {
        grid.toggle_view();
    }

    let mut tally = Tally::default();
    sim.visit(&mut tally);
    assert_eq!(tally.particles, 4);
    assert_eq!(tally.quads, 1);
    assert_eq!(tally.textured, 1);
    assert_eq!(tally.rigids, 1);
    assert_eq!(tally.springs, 1);
    assert_eq!(tally.gravity, 1);
    assert_eq!(tally.drags, 0);
    assert_eq!(tally.fluids, vec![FluidView::Velocity]);
}

#[test]
fn pick_prefers_particles_then_topmost_shape() {
    let mut sim = weightless();
    let p = particle(&mut sim, 0.1, 0.1);
    let lower = sim.add_rigid_box(Vec2::new(0.5, 0.5), 0.0, 0.2, 1.0).expect("valid box");
    let upper = sim.add_rigid_box(Vec2::new(0.55, 0.5), 0.0, 0.2, 1.0).expect("valid box");

    assert_eq!(sim.pick(Vec2::new(0.12, 0.1), 0.05), Some(Pick::Particle(p)));
    assert_eq!(sim.pick(Vec2::new(0.52, 0.5), 0.01), Some(Pick::Rigid(upper)));
    assert_eq!(sim.pick(Vec2::new(0.42, 0.5), 0.01), Some(Pick::Rigid(lower)));
    assert_eq!(sim.pick(Vec2::new(0.9, 0.9), 0.01), None);
}

#[test]
fn drag_pulls_toward_pointer() {
    let mut sim = weightless();
    let p = particle(&mut sim, 0.5, 0.5);
    sim.update_pointer(PointerState::new(Vec2::new(1.0, 0.5), PointerState::PRIMARY));
    sim.begin_drag(p).expect("live particle");
    assert_eq!(sim.dragged(), Some(p));

    let mut tally = Tally::default();
    sim.visit(&mut tally);
    assert_eq!(tally.drags, 1);

    sim.step(0.01);
    assert!(sim.particles().v(p).x > 0.0);
    assert_eq!(sim.particles().v(p).y, 0.0);

    sim.end_drag();
    assert_eq!(sim.dragged(), None);
}

#[test]
fn set_integrator_rebuilds_the_tree() {
    let mut sim = weightless();
    assert_eq!(sim.integrator().describe(), "euler");
    sim.set_integrator(IntegratorConfig::wrapping(
        IntegratorMethod::Midpoint,
        IntegratorConfig::new(IntegratorMethod::Verlet),
    ));
    assert_eq!(sim.integrator().describe(), "midpoint(verlet)");
    assert_eq!(sim.config().integrator.method, IntegratorMethod::Midpoint);
}

#[test]
fn perf_stats_count_entities_when_enabled() {
    let mut sim = weightless();
    particle(&mut sim, 0.5, 0.5);
    sim.add_rigid_box(Vec2::new(0.2, 0.2), 0.0, 0.1, 1.0).expect("valid box");
    sim.add_gravity();

    sim.step(0.01);
    assert_eq!(sim.get_perf_stats().particle_count(), 0);

    sim.enable_perf_metrics(true);
    sim.step(0.01);
    let stats = sim.get_perf_stats();
    assert_eq!(stats.particle_count(), 1);
    assert_eq!(stats.rigid_count(), 1);
    assert_eq!(stats.force_count(), 1);
    assert!(stats.step_ms() >= 0.0);
}

#[test]
fn set_gravity_reaches_forces() {
    let mut sim = weightless();
    let p = particle(&mut sim, 0.5, 0.5);
    sim.add_gravity();
    sim.set_gravity(Vec2::new(0.0, 10.0));
    sim.step(0.1);
    assert!((sim.particles().v(p).y - 1.0).abs() < 1e-12);
    assert_eq!(sim.config().gravity, [0.0, 10.0]);
}
