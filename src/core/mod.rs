//! Core building blocks shared by every system
//!
//! - `fast!` grid access macro (must be first for macro export)
//! - console logging macros
//! - `Vec2` math

#[macro_use]
#[path = "utils/safety.rs"]
mod safety;
#[macro_use]
mod log;
pub mod vec2;

pub use vec2::Vec2;
