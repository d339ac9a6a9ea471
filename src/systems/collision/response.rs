//! Contact response between two collidables.

use crate::core::Vec2;
use crate::domain::CollisionConfig;
use crate::systems::forces::Bodies;
use crate::systems::shapes::Collidable;

use super::sat::Contact;

/// Positional correction plus restitution impulse for one contact.
///
/// `contact.normal` may point either way; it is flipped to run from A's
/// center towards B's.
pub fn resolve(bodies: &mut Bodies<'_>, config: &CollisionConfig, a: Collidable, b: Collidable, contact: Contact) {
    let Bodies { particles, rigids, quads, .. } = bodies;
    let (particles, rigids, quads) = (&mut **particles, &mut **rigids, *quads);

    let ca = a.center(particles, rigids, quads);
    let cb = b.center(particles, rigids, quads);
    let mut n = contact.normal;
    if n.dot(cb - ca) < 0.0 {
        n = -n;
    }

    let inv_a = a.inverse_mass(particles, rigids, quads);
    let inv_b = b.inverse_mass(particles, rigids, quads);
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return;
    }

    if contact.depth * contact.depth >= config.jitter_epsilon {
        let push = n * (contact.depth * config.correction / inv_sum);
        a.translate(particles, rigids, quads, -push * inv_a);
        b.translate(particles, rigids, quads, push * inv_b);
    }

    let at = (ca + cb) * 0.5;
    let relative = b.velocity_at(particles, rigids, quads, at) - a.velocity_at(particles, rigids, quads, at);
    let vn = relative.dot(n);
    if vn >= 0.0 {
        return;
    }

    let normal_impulse = n * (-(1.0 + config.restitution) * vn / inv_sum);
    let tangent = relative - n * vn;
    let tangent_impulse = tangent * (-config.absorption / inv_sum);
    let impulse: Vec2 = normal_impulse + tangent_impulse;

    a.apply_impulse(particles, rigids, quads, -impulse, at);
    b.apply_impulse(particles, rigids, quads, impulse, at);
}
