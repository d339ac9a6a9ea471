use crate::core::Vec2;
use crate::domain::SceneError;

use super::handle::ParticleId;

/// Particle store - Structure of Arrays
///
/// Instead of: Vec<Particle>     // one struct per particle
/// We have:    x[], v[], f[], m[] // one contiguous array per field
///
/// Rows are append-only for the lifetime of a scene. `clear()` drops every
/// row at once and starts a new epoch.
#[derive(Default)]
pub struct ParticleStore {
    x: Vec<Vec2>,
    v: Vec<Vec2>,
    f: Vec<Vec2>,
    m: Vec<f64>,

    // save_state()/restore_state() cache
    saved_x: Vec<Vec2>,
    saved_v: Vec<Vec2>,

    epoch: u32,
    pending_rebase: bool,
    reallocations: usize,
}

/// Disjoint mutable views over every column, for whole-store passes
pub struct ParticleRowsMut<'a> {
    pub x: &'a mut [Vec2],
    pub v: &'a mut [Vec2],
    pub f: &'a mut [Vec2],
    pub m: &'a [f64],
}

impl ParticleStore {
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

    /// Times the backing arrays moved while appending (diagnostics).
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// Appends a row. Must be followed by [`ParticleStore::rebase`] before
    /// any other access.
    pub fn append(&mut self, x: Vec2, v: Vec2, m: f64) -> ParticleId {
        let before = self.x.as_ptr();
        self.x.push(x);
        self.v.push(v);
        self.f.push(Vec2::ZERO);
        self.m.push(m);
        if self.x.as_ptr() != before {
            self.reallocations += 1;
        }
        self.pending_rebase = true;
        ParticleId::new(self.x.len() - 1, self.epoch)
    }

    /// Brings every derived buffer back in line with the row count.
    pub fn rebase(&mut self) {
        let rows = self.x.len();
        self.saved_x.resize(rows, Vec2::ZERO);
        self.saved_v.resize(rows, Vec2::ZERO);
        self.pending_rebase = false;
    }

    pub fn needs_rebase(&self) -> bool {
        self.pending_rebase
    }

    pub fn check(&self, id: ParticleId) -> Result<usize, SceneError> {
        id.check(self.len(), self.epoch)
    }

    #[inline]
    fn row(&self, id: ParticleId) -> usize {
        debug_assert!(!self.pending_rebase, "particle store read before rebase()");
        debug_assert_eq!(id.epoch(), self.epoch, "stale particle handle");
        id.index()
    }

    #[inline]
    pub fn x(&self, id: ParticleId) -> Vec2 {
        self.x[self.row(id)]
    }

    #[inline]
    pub fn v(&self, id: ParticleId) -> Vec2 {
        self.v[self.row(id)]
    }

    #[inline]
    pub fn f(&self, id: ParticleId) -> Vec2 {
        self.f[self.row(id)]
    }

    #[inline]
    pub fn m(&self, id: ParticleId) -> f64 {
        self.m[self.row(id)]
    }

    #[inline]
    pub fn x_mut(&mut self, id: ParticleId) -> &mut Vec2 {
        let row = self.row(id);
        &mut self.x[row]
    }

    #[inline]
    pub fn v_mut(&mut self, id: ParticleId) -> &mut Vec2 {
        let row = self.row(id);
        &mut self.v[row]
    }

    #[inline]
    pub fn f_mut(&mut self, id: ParticleId) -> &mut Vec2 {
        let row = self.row(id);
        &mut self.f[row]
    }

    #[inline]
    pub fn add_force(&mut self, id: ParticleId, force: Vec2) {
        *self.f_mut(id) += force;
    }

    /// Handle for `row` in the current epoch
    #[inline]
    pub fn id_at(&self, row: usize) -> ParticleId {
        ParticleId::new(row, self.epoch)
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        (0..self.len()).map(move |i| ParticleId::new(i, self.epoch))
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.x
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.v
    }

    pub fn forces(&self) -> &[Vec2] {
        &self.f
    }

    pub fn masses(&self) -> &[f64] {
        &self.m
    }

    pub fn positions_mut(&mut self) -> &mut [Vec2] {
        &mut self.x
    }

    pub fn velocities_mut(&mut self) -> &mut [Vec2] {
        &mut self.v
    }

    pub fn forces_mut(&mut self) -> &mut [Vec2] {
        &mut self.f
    }

    pub fn rows_mut(&mut self) -> ParticleRowsMut<'_> {
        ParticleRowsMut {
            x: &mut self.x,
            v: &mut self.v,
            f: &mut self.f,
            m: &self.m,
        }
    }

    pub fn clear_forces(&mut self) {
        self.f.fill(Vec2::ZERO);
    }

    pub fn save_state(&mut self) {
        self.saved_x.clone_from(&self.x);
        self.saved_v.clone_from(&self.v);
    }

    pub fn restore_state(&mut self) {
        self.x.clone_from(&self.saved_x);
        self.v.clone_from(&self.saved_v);
    }

    /// Drops every row; handles from before the clear become stale.
    pub fn clear(&mut self) {
        self.x = Vec::new();
        self.v = Vec::new();
        self.f = Vec::new();
        self.m = Vec::new();
        self.saved_x = Vec::new();
        self.saved_v = Vec::new();
        self.pending_rebase = false;
        self.reallocations = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_survive_reallocation() {
        let mut store = ParticleStore::new();
        let mut ids = Vec::new();
        for i in 0..100 {
            let k = i as f64;
            let id = store.append(Vec2::new(k, -k), Vec2::new(0.5 * k, 2.0), 1.0 + k);
            store.rebase();
            *store.f_mut(id) = Vec2::new(k, k);
            ids.push(id);
        }
        assert!(store.reallocations() >= 2);
        for (i, id) in ids.iter().enumerate() {
            let k = i as f64;
            assert_eq!(store.x(*id), Vec2::new(k, -k));
            assert_eq!(store.v(*id), Vec2::new(0.5 * k, 2.0));
            assert_eq!(store.f(*id), Vec2::new(k, k));
            assert_eq!(store.m(*id), 1.0 + k);
        }
    }

    #[test]
    fn restore_returns_saved_positions() {
        let mut store = ParticleStore::new();
        let id = store.append(Vec2::new(1.0, 2.0), Vec2::ZERO, 1.0);
        store.rebase();
        store.save_state();
        *store.x_mut(id) = Vec2::new(9.0, 9.0);
        *store.f_mut(id) = Vec2::new(3.0, 0.0);
        store.restore_state();
        assert_eq!(store.x(id), Vec2::new(1.0, 2.0));
        // forces are never part of the snapshot
        assert_eq!(store.f(id), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn clear_invalidates_old_handles() {
        let mut store = ParticleStore::new();
        let id = store.append(Vec2::ZERO, Vec2::ZERO, 1.0);
        store.rebase();
        store.clear();
        assert!(store.check(id).is_err());
        assert!(store.is_empty());
    }
}
