//! State stores
//!
//! Particles and rigid bodies live in two append-only SoA stores. Entities
//! never hold references into the arrays: they keep a typed handle and read
//! the row through the store each time.
//!
//! Appending may move the arrays. After every append the owner calls
//! `rebase()` so the snapshot buffers match the new row count; `Scene` does
//! this in the same call, so no read can observe a half-updated store.

pub mod handle;
pub mod particles;
pub mod rigids;

pub use handle::{ParticleId, QuadId, RigidId};
pub use particles::{ParticleRowsMut, ParticleStore};
pub use rigids::{box_inertia, RigidRowsMut, RigidStore};
