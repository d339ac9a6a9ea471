#![cfg(target_arch = "wasm32")]

use fluxbox_engine::Sandbox;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn sandbox_steps_in_the_browser_runtime() {
    let mut sandbox = Sandbox::new().expect("default config");
    sandbox.add_gravity();
    sandbox.add_borders();
    let row = sandbox.add_particle(0.5, 0.5, 0.0, 0.0, 1.0).expect("particle");
    assert_eq!(row, 0);
    sandbox.step(0.01);
    assert_eq!(sandbox.frame(), 1);

    let layout = sandbox.abi_layout();
    assert_eq!(layout.particle_count(), 1);
    assert_eq!(layout.fluid_len_elements(), 0);
}

#[wasm_bindgen_test]
fn stale_rows_are_rejected_after_clear() {
    let mut sandbox = Sandbox::new().expect("default config");
    sandbox.add_particle(0.2, 0.2, 0.0, 0.0, 1.0).expect("particle");
    sandbox.clear();
    assert!(sandbox.add_glue(0).is_err());
    assert!(Sandbox::from_config("{".to_string()).is_err());
}
