//! Typed row handles
//!
//! A handle is a row index plus the scene epoch it was issued in. Clearing a
//! store bumps the epoch, so a handle kept across a scene reset is detected
//! instead of silently reading another entity's row.

use crate::domain::{HandleKind, SceneError};

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name {
            index: u32,
            epoch: u32,
        }

        impl $name {
            pub(crate) fn new(index: usize, epoch: u32) -> Self {
                Self { index: index as u32, epoch }
            }

            #[inline]
            pub fn index(&self) -> usize {
                self.index as usize
            }

            pub fn epoch(&self) -> u32 {
                self.epoch
            }

            pub const KIND: HandleKind = $kind;

            /// Registration-time check against a store of `count` rows.
            pub(crate) fn check(&self, count: usize, current: u32) -> Result<usize, SceneError> {
                if self.epoch != current {
                    return Err(SceneError::StaleHandle {
                        kind: Self::KIND,
                        epoch: self.epoch,
                        current,
                    });
                }
                if self.index() >= count {
                    return Err(SceneError::InvalidHandle {
                        kind: Self::KIND,
                        index: self.index(),
                        count,
                    });
                }
                Ok(self.index())
            }
        }
    };
}

define_handle!(
    /// Row in the particle store
    ParticleId,
    HandleKind::Particle
);
define_handle!(
    /// Row in the rigid body store
    RigidId,
    HandleKind::Rigid
);
define_handle!(
    /// Index into the scene's quad list
    QuadId,
    HandleKind::Quad
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_rejects_other_epoch() {
        let id = ParticleId::new(0, 1);
        assert_eq!(
            id.check(4, 2),
            Err(SceneError::StaleHandle { kind: HandleKind::Particle, epoch: 1, current: 2 })
        );
    }

    #[test]
    fn check_rejects_out_of_range() {
        let id = RigidId::new(3, 0);
        assert!(matches!(id.check(3, 0), Err(SceneError::InvalidHandle { index: 3, count: 3, .. })));
        assert_eq!(id.check(4, 0), Ok(3));
    }
}
