use crate::core::Vec2;
use crate::state::{ParticleId, ParticleStore};

/// Opaque texture id owned by the host renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Texture binding for a quad: one texture coordinate per corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadTexture {
    pub handle: TextureHandle,
    pub coords: [Vec2; 4],
}

impl QuadTexture {
    /// Full texture mapped onto the corners in winding order.
    pub fn full(handle: TextureHandle) -> Self {
        Self {
            handle,
            coords: [
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
        }
    }
}

/// Soft-body quad: four particles in winding order, held together by
/// whatever springs the scene adds between them.
#[derive(Clone, Debug, PartialEq)]
pub struct Quad {
    pub corners: [ParticleId; 4],
    pub texture: Option<QuadTexture>,
}

impl Quad {
    pub fn new(corners: [ParticleId; 4]) -> Self {
        Self { corners, texture: None }
    }

    pub fn positions(&self, particles: &ParticleStore) -> [Vec2; 4] {
        self.corners.map(|id| particles.x(id))
    }

    pub fn center(&self, particles: &ParticleStore) -> Vec2 {
        let p = self.positions(particles);
        (p[0] + p[1] + p[2] + p[3]) * 0.25
    }

    pub fn velocity(&self, particles: &ParticleStore) -> Vec2 {
        let v = self.corners.map(|id| particles.v(id));
        (v[0] + v[1] + v[2] + v[3]) * 0.25
    }

    pub fn mass(&self, particles: &ParticleStore) -> f64 {
        self.corners.iter().map(|id| particles.m(*id)).sum()
    }

    /// Shifts every corner by `delta`.
    pub fn translate(&self, particles: &mut ParticleStore, delta: Vec2) {
        for id in self.corners {
            *particles.x_mut(id) += delta;
        }
    }

    /// Same velocity change on all four corners.
    pub fn apply_impulse(&self, particles: &mut ParticleStore, impulse: Vec2) {
        let dv = impulse / self.mass(particles);
        for id in self.corners {
            *particles.v_mut(id) += dv;
        }
    }

    /// Splits `force` over the corners by inverse distance to `at`.
    pub fn add_force_at(&self, particles: &mut ParticleStore, force: Vec2, at: Vec2) {
        let weights = self
            .positions(particles)
            .map(|corner| 1.0 / corner.distance(at).max(1e-9));
        let total: f64 = weights.iter().sum();
        for (id, weight) in self.corners.iter().zip(weights) {
            particles.add_force(*id, force * (weight / total));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad(particles: &mut ParticleStore) -> Quad {
        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
        .map(|p| particles.append(p, Vec2::ZERO, 0.25));
        particles.rebase();
        Quad::new(corners)
    }

    #[test]
    fn center_and_mass() {
        let mut particles = ParticleStore::new();
        let quad = unit_quad(&mut particles);
        assert_eq!(quad.center(&particles), Vec2::new(0.5, 0.5));
        assert_eq!(quad.mass(&particles), 1.0);
    }

    #[test]
    fn force_at_corner_goes_mostly_to_that_corner() {
        let mut particles = ParticleStore::new();
        let quad = unit_quad(&mut particles);
        quad.add_force_at(&mut particles, Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0));
        let near = particles.f(quad.corners[0]).y;
        let total: f64 = particles.forces().iter().map(|f| f.y).sum();
        assert!(near > 0.99, "corner weight was {near}");
        assert!((total - 1.0).abs() < 1e-9, "force must be conserved, got {total}");
    }

    #[test]
    fn impulse_moves_all_corners_together() {
        let mut particles = ParticleStore::new();
        let quad = unit_quad(&mut particles);
        quad.apply_impulse(&mut particles, Vec2::new(2.0, 0.0));
        for id in quad.corners {
            assert_eq!(particles.v(id), Vec2::new(2.0, 0.0));
        }
    }
}
