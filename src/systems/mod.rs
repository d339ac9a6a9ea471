//! Systems - everything that reads or writes the stores
//!
//! - shapes/       - quads and the collidable variant
//! - forces/       - force generators and actors
//! - collision/    - SAT detection and contact response
//! - fluid/        - stable-fluids grid and solid coupling
//! - integrators/  - time stepping strategies
//! - visit.rs      - presentation hook

pub mod collision;
pub mod fluid;
pub mod forces;
pub mod integrators;
pub mod shapes;
pub mod visit;
