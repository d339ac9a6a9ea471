//! Pointer picking

use crate::core::Vec2;
use crate::state::{ParticleId, QuadId, RigidId};
use crate::systems::shapes::Collidable;

use super::Simulation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    Particle(ParticleId),
    Quad(QuadId),
    Rigid(RigidId),
}

/// Convex polygon containment, either winding. Edges count as inside.
fn contains(polygon: &[Vec2; 4], p: Vec2) -> bool {
    let mut sign = 0.0f64;
    for k in 0..polygon.len() {
        let a = polygon[k];
        let b = polygon[(k + 1) % polygon.len()];
        let side = (b - a).cross(p - a);
        if side == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = side.signum();
        } else if side.signum() != sign {
            return false;
        }
    }
    true
}

pub(super) fn pick(sim: &Simulation, point: Vec2, radius: f64) -> Option<Pick> {
    let particles = sim.scene.particles();
    let nearest = particles
        .positions()
        .iter()
        .enumerate()
        .map(|(row, x)| (row, x.distance(point)))
        .filter(|&(_, d)| d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((row, _)) = nearest {
        return Some(Pick::Particle(particles.id_at(row)));
    }

    // Last registered shape is drawn on top
    let rigids = sim.scene.rigids();
    let quads = sim.scene.quads();
    sim.scene
        .collidables()
        .iter()
        .rev()
        .find(|c| contains(&c.corners(particles, rigids, quads), point))
        .map(|c| match *c {
            Collidable::Quad(id) => Pick::Quad(id),
            Collidable::Rigid(id) => Pick::Rigid(id),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_accepts_both_windings() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let mut reversed = square;
        reversed.reverse();
        for poly in [square, reversed] {
            assert!(contains(&poly, Vec2::new(0.5, 0.5)));
            assert!(contains(&poly, Vec2::new(1.0, 0.5)));
            assert!(!contains(&poly, Vec2::new(1.5, 0.5)));
        }
    }
}
