use wasm_bindgen::prelude::*;

use crate::core::Vec2;
use crate::domain::{IntegratorConfig, PointerState, SceneError, SimConfig};
use crate::state::{ParticleId, QuadId, RigidId};
use crate::systems::shapes::{QuadTexture, TextureHandle};

use super::perf_stats::PerfStats;
use super::pick::Pick;
use super::Simulation;

/// Raw buffer locations in wasm linear memory.
///
/// Vector buffers hold interleaved `(x, y)` f64 pairs; fluid buffers hold
/// `(width + 2) * (height + 2)` f64 cells, row-major with the halo.
/// Pointers move whenever a store grows, so re-read after adding entities.
#[wasm_bindgen]
pub struct AbiLayout {
    particle_x_ptr: u32,
    particle_v_ptr: u32,
    particle_count: u32,
    rigid_x_ptr: u32,
    rigid_o_ptr: u32,
    rigid_count: u32,
    fluid_density_ptr: u32,
    fluid_u_ptr: u32,
    fluid_v_ptr: u32,
    fluid_len_elements: u32,
    fluid_len_bytes: u32,
    fluid_width: u32,
    fluid_height: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn particle_x_ptr(&self) -> u32 { self.particle_x_ptr }
    #[wasm_bindgen(getter)]
    pub fn particle_v_ptr(&self) -> u32 { self.particle_v_ptr }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }

    #[wasm_bindgen(getter)]
    pub fn rigid_x_ptr(&self) -> u32 { self.rigid_x_ptr }
    #[wasm_bindgen(getter)]
    pub fn rigid_o_ptr(&self) -> u32 { self.rigid_o_ptr }
    #[wasm_bindgen(getter)]
    pub fn rigid_count(&self) -> u32 { self.rigid_count }

    #[wasm_bindgen(getter)]
    pub fn fluid_density_ptr(&self) -> u32 { self.fluid_density_ptr }
    #[wasm_bindgen(getter)]
    pub fn fluid_u_ptr(&self) -> u32 { self.fluid_u_ptr }
    #[wasm_bindgen(getter)]
    pub fn fluid_v_ptr(&self) -> u32 { self.fluid_v_ptr }
    #[wasm_bindgen(getter)]
    pub fn fluid_len_elements(&self) -> u32 { self.fluid_len_elements }
    #[wasm_bindgen(getter)]
    pub fn fluid_len_bytes(&self) -> u32 { self.fluid_len_bytes }
    #[wasm_bindgen(getter)]
    pub fn fluid_width(&self) -> u32 { self.fluid_width }
    #[wasm_bindgen(getter)]
    pub fn fluid_height(&self) -> u32 { self.fluid_height }
}

fn js_err(e: SceneError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// JS-facing wrapper. Entities are addressed by row index; rows are
/// resolved against the current scene, so indices from before `clear()`
/// are rejected.
#[wasm_bindgen]
pub struct Sandbox {
    core: Simulation,
}

impl Sandbox {
    fn particle(&self, row: u32) -> Result<ParticleId, JsValue> {
        let particles = self.core.particles();
        let id = particles.id_at(row as usize);
        particles.check(id).map_err(js_err)?;
        Ok(id)
    }

    fn rigid(&self, row: u32) -> Result<RigidId, JsValue> {
        let rigids = self.core.rigids();
        let id = rigids.id_at(row as usize);
        rigids.check(id).map_err(js_err)?;
        Ok(id)
    }

    fn quad(&self, row: u32) -> Result<QuadId, JsValue> {
        self.core.scene().quad_id_at(row as usize).map_err(js_err)
    }

    pub fn core(&self) -> &Simulation {
        &self.core
    }
}

#[wasm_bindgen]
impl Sandbox {
    /// Sandbox with default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Sandbox, JsValue> {
        let core = Simulation::new(SimConfig::default()).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: String) -> Result<Sandbox, JsValue> {
        let core = Simulation::from_json(&json).map_err(|e| {
            console_warn!("sandbox config rejected: {e}");
            js_err(e)
        })?;
        Ok(Self { core })
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 { self.core.time() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particles().len() as u32 }

    #[wasm_bindgen(getter)]
    pub fn rigid_count(&self) -> u32 { self.core.rigids().len() as u32 }

    #[wasm_bindgen(getter)]
    pub fn quad_count(&self) -> u32 { self.core.quads().len() as u32 }

    pub fn integrator_name(&self) -> String {
        self.core.integrator().describe()
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, x: f64, y: f64) {
        self.core.set_gravity(Vec2::new(x, y));
    }

    /// `json` is an integrator tree, e.g. `{"method":"rk4","inner":{"method":"verlet"}}`
    pub fn set_integrator(&mut self, json: String) -> Result<(), JsValue> {
        let config: IntegratorConfig =
            serde_json::from_str(&json).map_err(|e| js_err(SceneError::from(e)))?;
        self.core.set_integrator(config);
        Ok(())
    }

    // === SCENE BUILDING ===

    /// Returns the particle row
    pub fn add_particle(&mut self, x: f64, y: f64, vx: f64, vy: f64, m: f64) -> Result<u32, JsValue> {
        let id = self
            .core
            .add_particle(Vec2::new(x, y), Vec2::new(vx, vy), m)
            .map_err(js_err)?;
        Ok(id.index() as u32)
    }

    /// Returns the rigid body row
    pub fn add_rigid_box(&mut self, x: f64, y: f64, angle: f64, size: f64, m: f64) -> Result<u32, JsValue> {
        let id = self
            .core
            .add_rigid_box(Vec2::new(x, y), angle, size, m)
            .map_err(js_err)?;
        Ok(id.index() as u32)
    }

    /// Returns the quad row
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) -> Result<u32, JsValue> {
        let corners = [self.particle(a)?, self.particle(b)?, self.particle(c)?, self.particle(d)?];
        let id = self.core.add_quad(corners, None).map_err(js_err)?;
        Ok(id.index() as u32)
    }

    /// Maps the whole texture onto the quad's corners
    pub fn set_quad_texture(&mut self, quad: u32, texture: u32) -> Result<(), JsValue> {
        let id = self.quad(quad)?;
        let texture = QuadTexture::full(TextureHandle(texture));
        self.core.set_quad_texture(id, Some(texture)).map_err(js_err)
    }

    /// Maps the whole texture onto the box's corners
    pub fn set_rigid_texture(&mut self, body: u32, texture: u32) -> Result<(), JsValue> {
        let id = self.rigid(body)?;
        let texture = QuadTexture::full(TextureHandle(texture));
        self.core.set_rigid_texture(id, Some(texture)).map_err(js_err)
    }

    /// Spring at its current length with the configured stiffness
    pub fn add_spring(&mut self, a: u32, b: u32) -> Result<(), JsValue> {
        let (a, b) = (self.particle(a)?, self.particle(b)?);
        let spring = self.core.config().spring.clone();
        self.core.add_spring(a, b, None, spring.ks, spring.kd).map_err(js_err)?;
        Ok(())
    }

    /// Hinge spring resting at the current angle
    pub fn add_angular_spring(&mut self, p1: u32, p2: u32, p3: u32, ks: f64) -> Result<(), JsValue> {
        let (p1, p2, p3) = (self.particle(p1)?, self.particle(p2)?, self.particle(p3)?);
        self.core.add_angular_spring(p1, p2, p3, None, ks).map_err(js_err)?;
        Ok(())
    }

    pub fn add_glue(&mut self, particle: u32) -> Result<(), JsValue> {
        let id = self.particle(particle)?;
        self.core.add_glue(id, None).map_err(js_err)?;
        Ok(())
    }

    pub fn add_rigid_force(&mut self, body: u32, proxy: u32) -> Result<(), JsValue> {
        let (body, proxy) = (self.rigid(body)?, self.particle(proxy)?);
        self.core.add_rigid_force(body, proxy, None).map_err(js_err)?;
        Ok(())
    }

    pub fn add_gravity(&mut self) {
        self.core.add_gravity();
    }

    pub fn add_borders(&mut self) {
        self.core.add_borders();
    }

    pub fn add_collisions(&mut self) {
        self.core.add_collisions();
    }

    pub fn add_fluid(&mut self) -> Result<(), JsValue> {
        self.core.add_fluid().map_err(js_err)
    }

    /// Clear all entities
    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === INPUT ===

    /// `x`, `y` normalized to `[0,1]`; `buttons`: 1 primary, 2 middle, 4 secondary
    pub fn set_pointer(&mut self, x: f64, y: f64, buttons: u8) {
        self.core.update_pointer(PointerState::new(Vec2::new(x, y), buttons));
    }

    /// Nearest particle row within `radius` of a world point, or -1
    pub fn pick_particle(&self, x: f64, y: f64, radius: f64) -> i32 {
        match self.core.pick(Vec2::new(x, y), radius) {
            Some(Pick::Particle(id)) => id.index() as i32,
            _ => -1,
        }
    }

    pub fn begin_drag(&mut self, particle: u32) -> Result<(), JsValue> {
        let id = self.particle(particle)?;
        self.core.begin_drag(id).map_err(js_err)
    }

    pub fn end_drag(&mut self) {
        self.core.end_drag();
    }

    /// Queues a fluid source at a normalized position
    pub fn fluid_inject(&mut self, x: f64, y: f64, vx: f64, vy: f64, density: f64) {
        if let Some(grid) = self.core.fluid_mut() {
            grid.inject(Vec2::new(x, y), Vec2::new(vx, vy), density);
        }
    }

    pub fn toggle_fluid_view(&mut self) {
        if let Some(grid) = self.core.fluid_mut() {
            grid.toggle_view();
        }
    }

    // === FRAME ===

    pub fn step(&mut self, dt: f64) {
        self.core.step(dt);
    }

    /// Step by the configured `dt`
    pub fn step_default(&mut self) {
        self.core.step_default();
    }

    pub fn abi_layout(&self) -> AbiLayout {
        let data = self.core.abi_layout_data();
        AbiLayout {
            particle_x_ptr: data.particle_x_ptr as u32,
            particle_v_ptr: data.particle_v_ptr as u32,
            particle_count: data.particle_count as u32,
            rigid_x_ptr: data.rigid_x_ptr as u32,
            rigid_o_ptr: data.rigid_o_ptr as u32,
            rigid_count: data.rigid_count as u32,
            fluid_density_ptr: data.fluid_density_ptr as u32,
            fluid_u_ptr: data.fluid_u_ptr as u32,
            fluid_v_ptr: data.fluid_v_ptr as u32,
            fluid_len_elements: data.fluid_len as u32,
            fluid_len_bytes: (data.fluid_len * std::mem::size_of::<f64>()) as u32,
            fluid_width: data.fluid_width as u32,
            fluid_height: data.fluid_height as u32,
        }
    }
}
