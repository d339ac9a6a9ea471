//! Fluxbox Engine - 2D rigid body, soft body and fluid sandbox in WASM
//!
//! Architecture:
//! - core/        - Vec2 math, macros, logging
//! - domain/      - configuration, errors, pointer input
//! - state/       - SoA particle and rigid body stores, typed handles
//! - systems/     - forces, collisions, fluid grid, integrators
//! - simulation/  - orchestration and the JS facade

// Utils with safety and logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod state;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("Fluxbox engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::Vec2;
pub use domain::{PointerState, SceneError, SimConfig};
pub use simulation::{AbiLayout, PerfStats, Pick, Sandbox, Scene, Simulation};
pub use state::{ParticleId, QuadId, RigidId};
