//! Presentation hook: everything drawable is handed to an `EntityVisitor`.
//! Default methods do nothing so a renderer only implements what it shows.

use crate::core::Vec2;
use crate::state::{ParticleId, QuadId, RigidId};

use super::fluid::{FluidGrid, FluidView};
use super::shapes::QuadTexture;

/// What a line segment handed to the visitor represents
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentKind {
    /// `strain` = |length - rest|
    Spring { strain: f64 },
    AngularSpring,
    Gravity,
    Border,
    Drag,
}

pub trait EntityVisitor {
    fn particle(&mut self, _id: ParticleId, _x: Vec2) {}

    fn quad(&mut self, _id: QuadId, _corners: [Vec2; 4], _texture: Option<&QuadTexture>) {}

    /// `o` is the orientation and `w` the per-second rotation, both unit vectors.
    fn rigid_box(
        &mut self,
        _id: RigidId,
        _corners: [Vec2; 4],
        _o: Vec2,
        _w: Vec2,
        _texture: Option<&QuadTexture>,
    ) {
    }

    fn segment(&mut self, _kind: SegmentKind, _a: Vec2, _b: Vec2) {}

    fn fluid(&mut self, _grid: &FluidGrid, _view: FluidView) {}
}
