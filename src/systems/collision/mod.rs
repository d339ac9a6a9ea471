//! Collision system
//!
//! Every unordered pair of registered collidables is tested with SAT each
//! force pass; overlapping pairs are separated and given a restitution
//! impulse. Registered as an ordinary force so it sees positions after the
//! kinematic forces ran.

mod response;
mod sat;

pub use response::resolve;
pub use sat::{axis_overlap, sat, Contact};

use crate::domain::CollisionConfig;

use super::forces::{Bodies, Force};

#[derive(Clone, Debug, Default)]
pub struct Collisions {
    pub config: CollisionConfig,
    /// Contacts resolved in the last pass (diagnostics)
    contacts: usize,
}

impl Collisions {
    pub fn new(config: CollisionConfig) -> Self {
        Self { config, contacts: 0 }
    }

    pub fn last_contacts(&self) -> usize {
        self.contacts
    }
}

impl Force for Collisions {
    fn apply(&mut self, bodies: &mut Bodies<'_>) {
        self.contacts = 0;
        let shapes = bodies.collidables;
        for (i, &a) in shapes.iter().enumerate() {
            for &b in &shapes[i + 1..] {
                let pa = a.corners(&*bodies.particles, &*bodies.rigids, bodies.quads);
                let pb = b.corners(&*bodies.particles, &*bodies.rigids, bodies.quads);
                if let Some(contact) = sat(&pa, &pb) {
                    resolve(bodies, &self.config, a, b, contact);
                    self.contacts += 1;
                }
            }
        }
    }
}
