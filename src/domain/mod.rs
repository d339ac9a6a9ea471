pub mod config;
pub mod error;
pub mod pointer;

pub use config::{
    BorderConfig, Bounds, CollisionConfig, DragConfig, FluidConfig, IntegratorConfig,
    IntegratorMethod, SimConfig, SpringConfig,
};
pub use error::{check_mass, HandleKind, SceneError};
pub use pointer::PointerState;
