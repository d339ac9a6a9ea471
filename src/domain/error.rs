//! Scene construction errors
//!
//! The per-frame pipeline never fails: numeric edge cases are handled where
//! they occur. Everything that can go wrong happens while a scene is being
//! built (stale handles, bad masses, bad configuration) and is reported
//! here, before an invalid reference can reach the stores.

use std::fmt;

/// Which store a handle points into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleKind {
    Particle,
    Rigid,
    Quad,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleKind::Particle => write!(f, "particle"),
            HandleKind::Rigid => write!(f, "rigid body"),
            HandleKind::Quad => write!(f, "quad"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneError {
    /// Handle row is past the end of its store.
    InvalidHandle {
        kind: HandleKind,
        index: usize,
        count: usize,
    },
    /// Handle was issued before the last scene clear.
    StaleHandle {
        kind: HandleKind,
        epoch: u32,
        current: u32,
    },
    /// Masses must be finite and strictly positive.
    InvalidMass { mass: f64 },
    /// A scene owns at most one fluid grid.
    FluidAlreadyPresent,
    InvalidConfiguration { reason: &'static str },
    /// Configuration JSON failed to parse.
    Config(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHandle { kind, index, count } => {
                write!(f, "{kind} handle {index} out of range (count={count})")
            }
            Self::StaleHandle { kind, epoch, current } => {
                write!(f, "{kind} handle from scene {epoch} used in scene {current}")
            }
            Self::InvalidMass { mass } => write!(f, "invalid mass {mass}"),
            Self::FluidAlreadyPresent => write!(f, "scene already has a fluid grid"),
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            Self::Config(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::Config(e.to_string())
    }
}

/// Rejects zero, negative and non-finite masses.
pub fn check_mass(mass: f64) -> Result<f64, SceneError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(SceneError::InvalidMass { mass })
    }
}
