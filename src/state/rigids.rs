use crate::core::Vec2;
use crate::domain::SceneError;

use super::handle::RigidId;

/// Rigid body store - Structure of Arrays
///
/// Orientation `o` and angular velocity `w` are unit vectors used as complex
/// rotations: `o = (cos θ, sin θ)`, `w = (cos ω, sin ω)`. Torque `t` is a
/// plain scalar accumulator. The inertia factor is `i = size² / 6`, so the
/// moment of inertia of a square of edge `size` is `i · m`.
#[derive(Default)]
pub struct RigidStore {
    x: Vec<Vec2>,
    v: Vec<Vec2>,
    f: Vec<Vec2>,
    o: Vec<Vec2>,
    w: Vec<Vec2>,
    t: Vec<f64>,
    m: Vec<f64>,
    i: Vec<f64>,
    size: Vec<f64>,

    saved_x: Vec<Vec2>,
    saved_v: Vec<Vec2>,
    saved_o: Vec<Vec2>,
    saved_w: Vec<Vec2>,

    epoch: u32,
    pending_rebase: bool,
    reallocations: usize,
}

pub struct RigidRowsMut<'a> {
    pub size: &'a [f64],
    pub x: &'a mut [Vec2],
    pub v: &'a mut [Vec2],
    pub o: &'a mut [Vec2],
    pub w: &'a mut [Vec2],
    pub f: &'a mut [Vec2],
    pub t: &'a mut [f64],
    pub m: &'a [f64],
    pub i: &'a [f64],
}

/// Inertia factor of a square box of the given edge length.
#[inline]
pub fn box_inertia(size: f64) -> f64 {
    size * size / 6.0
}

impl RigidStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// Appends a square body at rest in orientation `angle`.
    /// Must be followed by [`RigidStore::rebase`].
    pub fn append(&mut self, x: Vec2, angle: f64, size: f64, m: f64) -> RigidId {
        let before = self.x.as_ptr();
        self.x.push(x);
        self.v.push(Vec2::ZERO);
        self.f.push(Vec2::ZERO);
        self.o.push(Vec2::from_angle(angle));
        self.w.push(Vec2::UNIT_X);
        self.t.push(0.0);
        self.m.push(m);
        self.i.push(box_inertia(size));
        self.size.push(size);
        if self.x.as_ptr() != before {
            self.reallocations += 1;
        }
        self.pending_rebase = true;
        RigidId::new(self.x.len() - 1, self.epoch)
    }

    pub fn rebase(&mut self) {
        let rows = self.x.len();
        self.saved_x.resize(rows, Vec2::ZERO);
        self.saved_v.resize(rows, Vec2::ZERO);
        self.saved_o.resize(rows, Vec2::UNIT_X);
        self.saved_w.resize(rows, Vec2::UNIT_X);
        self.pending_rebase = false;
    }

    pub fn needs_rebase(&self) -> bool {
        self.pending_rebase
    }

    pub fn check(&self, id: RigidId) -> Result<usize, SceneError> {
        id.check(self.len(), self.epoch)
    }

    #[inline]
    fn row(&self, id: RigidId) -> usize {
        debug_assert!(!self.pending_rebase, "rigid store read before rebase()");
        debug_assert_eq!(id.epoch(), self.epoch, "stale rigid handle");
        id.index()
    }

    #[inline]
    pub fn x(&self, id: RigidId) -> Vec2 {
        self.x[self.row(id)]
    }

    #[inline]
    pub fn v(&self, id: RigidId) -> Vec2 {
        self.v[self.row(id)]
    }

    #[inline]
    pub fn f(&self, id: RigidId) -> Vec2 {
        self.f[self.row(id)]
    }

    #[inline]
    pub fn o(&self, id: RigidId) -> Vec2 {
        self.o[self.row(id)]
    }

    #[inline]
    pub fn w(&self, id: RigidId) -> Vec2 {
        self.w[self.row(id)]
    }

    #[inline]
    pub fn t(&self, id: RigidId) -> f64 {
        self.t[self.row(id)]
    }

    #[inline]
    pub fn m(&self, id: RigidId) -> f64 {
        self.m[self.row(id)]
    }

    #[inline]
    pub fn i(&self, id: RigidId) -> f64 {
        self.i[self.row(id)]
    }

    #[inline]
    pub fn size(&self, id: RigidId) -> f64 {
        self.size[self.row(id)]
    }

    /// Angular velocity in radians per second
    #[inline]
    pub fn omega(&self, id: RigidId) -> f64 {
        self.w(id).angle()
    }

    #[inline]
    pub fn x_mut(&mut self, id: RigidId) -> &mut Vec2 {
        let row = self.row(id);
        &mut self.x[row]
    }

    #[inline]
    pub fn v_mut(&mut self, id: RigidId) -> &mut Vec2 {
        let row = self.row(id);
        &mut self.v[row]
    }

    #[inline]
    pub fn o_mut(&mut self, id: RigidId) -> &mut Vec2 {
        let row = self.row(id);
        &mut self.o[row]
    }

    #[inline]
    pub fn w_mut(&mut self, id: RigidId) -> &mut Vec2 {
        let row = self.row(id);
        &mut self.w[row]
    }

    #[inline]
    pub fn f_mut(&mut self, id: RigidId) -> &mut Vec2 {
        let row = self.row(id);
        &mut self.f[row]
    }

    #[inline]
    pub fn t_mut(&mut self, id: RigidId) -> &mut f64 {
        let row = self.row(id);
        &mut self.t[row]
    }

    #[inline]
    pub fn add_force(&mut self, id: RigidId, force: Vec2) {
        let row = self.row(id);
        self.f[row] += force;
    }

    #[inline]
    pub fn add_torque(&mut self, id: RigidId, torque: f64) {
        let row = self.row(id);
        self.t[row] += torque;
    }

    /// Force `force` acting at world point `at`: linear part plus `r × F`.
    pub fn add_force_at(&mut self, id: RigidId, force: Vec2, at: Vec2) {
        let r = at - self.x(id);
        self.add_force(id, force);
        self.add_torque(id, r.cross(force));
    }

    /// Instantaneous change of linear and angular velocity from an impulse
    /// applied at world point `at`.
    pub fn apply_impulse(&mut self, id: RigidId, impulse: Vec2, at: Vec2) {
        let m = self.m(id);
        let inertia = self.i(id) * m;
        let r = at - self.x(id);
        *self.v_mut(id) += impulse / m;
        let omega = self.omega(id) + r.cross(impulse) / inertia;
        *self.w_mut(id) = Vec2::from_angle(omega);
    }

    /// Velocity of the material point at world position `at`
    pub fn velocity_at(&self, id: RigidId, at: Vec2) -> Vec2 {
        let r = at - self.x(id);
        self.v(id) + Vec2::cross_scalar(self.omega(id), r)
    }

    /// Box corners in winding order, rotated by the current orientation.
    pub fn corners(&self, id: RigidId) -> [Vec2; 4] {
        let half = 0.5 * self.size(id);
        let o = self.o(id);
        let x = self.x(id);
        [
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ]
        .map(|corner| x + corner.rotate_by(o))
    }

    /// Handle for `row` in the current epoch
    #[inline]
    pub fn id_at(&self, row: usize) -> RigidId {
        RigidId::new(row, self.epoch)
    }

    pub fn ids(&self) -> impl Iterator<Item = RigidId> + '_ {
        (0..self.len()).map(move |i| RigidId::new(i, self.epoch))
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.x
    }

    pub fn orientations(&self) -> &[Vec2] {
        &self.o
    }

    pub fn forces(&self) -> &[Vec2] {
        &self.f
    }

    pub fn torques(&self) -> &[f64] {
        &self.t
    }

    pub fn forces_mut(&mut self) -> &mut [Vec2] {
        &mut self.f
    }

    pub fn torques_mut(&mut self) -> &mut [f64] {
        &mut self.t
    }

    pub fn rows_mut(&mut self) -> RigidRowsMut<'_> {
        RigidRowsMut {
            x: &mut self.x,
            v: &mut self.v,
            o: &mut self.o,
            w: &mut self.w,
            f: &mut self.f,
            t: &mut self.t,
            m: &self.m,
            i: &self.i,
            size: &self.size,
        }
    }

    pub fn clear_forces(&mut self) {
        self.f.fill(Vec2::ZERO);
        self.t.fill(0.0);
    }

    pub fn save_state(&mut self) {
        self.saved_x.clone_from(&self.x);
        self.saved_v.clone_from(&self.v);
        self.saved_o.clone_from(&self.o);
        self.saved_w.clone_from(&self.w);
    }

    pub fn restore_state(&mut self) {
        self.x.clone_from(&self.saved_x);
        self.v.clone_from(&self.saved_v);
        self.o.clone_from(&self.saved_o);
        self.w.clone_from(&self.saved_w);
    }

    pub fn clear(&mut self) {
        *self = Self {
            epoch: self.epoch.wrapping_add(1),
            ..Self::default()
        };
    }
}
