//! Shapes built on top of the stores
//!
//! - quad.rs        - four particles treated as one polygon
//! - collidable.rs  - tagged reference to anything SAT can test

mod collidable;
mod quad;

pub use collidable::Collidable;
pub use quad::{Quad, QuadTexture, TextureHandle};
