//! Scene configuration
//!
//! Loaded from JSON the same way content bundles are: one serde root with
//! defaults for every field, so a host can send `{}` or override only the
//! knobs it cares about.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

use super::error::SceneError;

/// Rectangular world bounds. `top < bottom`: y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self { left: 0.0, right: 1.0, top: 0.0, bottom: 1.0 }
    }
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Maps a normalized `[0,1]²` pointer position into world space.
    pub fn denormalize(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.left + p.x * self.width(), self.top + p.y * self.height())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    pub absorption: f64,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self { absorption: 0.6 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub restitution: f64,
    /// Damping applied to the tangential part of the contact response
    pub absorption: f64,
    /// Fraction of the penetration depth removed per frame
    pub correction: f64,
    /// Corrections with `depth² < jitter_epsilon` are skipped
    pub jitter_epsilon: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            restitution: 0.2,
            absorption: 0.6,
            correction: 0.4,
            jitter_epsilon: 1e-5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub ks: f64,
    pub kd: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self { ks: 50.0, kd: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub ks: f64,
    pub kd: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { ks: 80.0, kd: 4.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    pub width: u32,
    pub height: u32,
    pub viscosity: f64,
    pub diffusion: f64,
    /// Buoyancy: velocity source per unit density
    pub gravity: [f64; 2],
    /// Velocity kept after reflecting off an occupied cell
    pub absorption: f64,
    /// Scales the force handed to solids
    pub coupling_speed: f64,
    /// Fraction of an occupied cell's density pushed back out each step
    pub deadvection: f64,
    pub pointer_density: f64,
    pub pointer_force: f64,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            viscosity: 0.0,
            diffusion: 0.0,
            gravity: [0.0, 0.0],
            absorption: 0.5,
            coupling_speed: 1.0,
            deadvection: 0.25,
            pointer_density: 100.0,
            pointer_force: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorMethod {
    Euler,
    Verlet,
    #[serde(alias = "mid_point")]
    Midpoint,
    #[serde(alias = "runge_kutta4")]
    Rk4,
}

/// Integrator tree. `inner` is only read by the multi-stage methods and
/// defaults to Euler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    pub method: IntegratorMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<IntegratorConfig>>,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self { method: IntegratorMethod::Euler, inner: None }
    }
}

impl IntegratorConfig {
    pub fn new(method: IntegratorMethod) -> Self {
        Self { method, inner: None }
    }

    pub fn wrapping(method: IntegratorMethod, inner: IntegratorConfig) -> Self {
        Self { method, inner: Some(Box::new(inner)) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt: f64,
    pub bounds: Bounds,
    pub gravity: [f64; 2],
    pub borders: BorderConfig,
    pub collision: CollisionConfig,
    pub spring: SpringConfig,
    pub drag: DragConfig,
    pub fluid: FluidConfig,
    pub integrator: IntegratorConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            bounds: Bounds::default(),
            gravity: [0.0, 1.0],
            borders: BorderConfig::default(),
            collision: CollisionConfig::default(),
            spring: SpringConfig::default(),
            drag: DragConfig::default(),
            fluid: FluidConfig::default(),
            integrator: IntegratorConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.dt.is_finite() && self.dt >= 0.0) {
            return Err(SceneError::InvalidConfiguration { reason: "dt must be finite and >= 0" });
        }
        if !(self.bounds.width() > 0.0 && self.bounds.height() > 0.0) {
            return Err(SceneError::InvalidConfiguration { reason: "bounds must have positive extent" });
        }
        if self.fluid.width == 0 || self.fluid.height == 0 {
            return Err(SceneError::InvalidConfiguration { reason: "fluid grid must be at least 1x1" });
        }
        if self.fluid.viscosity < 0.0 || self.fluid.diffusion < 0.0 {
            return Err(SceneError::InvalidConfiguration { reason: "fluid viscosity/diffusion must be >= 0" });
        }
        if !(0.0..=1.0).contains(&self.fluid.deadvection) {
            return Err(SceneError::InvalidConfiguration { reason: "deadvection must be within [0, 1]" });
        }
        if self.borders.absorption < 0.0
            || self.collision.absorption < 0.0
            || self.collision.restitution < 0.0
            || self.collision.correction < 0.0
        {
            return Err(SceneError::InvalidConfiguration { reason: "coefficients must be >= 0" });
        }
        Ok(())
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::from(self.gravity)
    }
}
