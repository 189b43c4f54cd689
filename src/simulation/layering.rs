use crate::constants::LAYERING_THRESHOLD;
use crate::physics::particle::{Particle, ParticleId};
use glam::Vec2;

/// Re-orders the nucleus draw order so nucleons nearer the center are drawn
/// on top of those further out.
///
/// Nucleons whose destination lies inside `inner_shell_radius` are moved to
/// the end of `draw_order`, farthest first. Equal distances keep their prior
/// relative order, so running this again on an unchanged nucleus is a no-op.
/// Small nuclei (at most [`LAYERING_THRESHOLD`] nucleons) are left in arrival
/// order. Returns whether anything was re-layered.
pub fn layer_nucleus(
    draw_order: &mut Vec<ParticleId>,
    nucleons: &[Particle],
    center: Vec2,
    inner_shell_radius: f32,
) -> bool {
    if nucleons.len() <= LAYERING_THRESHOLD {
        return false;
    }

    let distance_of = |id: ParticleId| {
        nucleons
            .iter()
            .find(|particle| particle.id() == id)
            .map(|particle| particle.destination.distance(center))
    };

    let (inside, outside): (Vec<_>, Vec<_>) =
        std::mem::take(draw_order).into_iter().partition(|&id| {
            distance_of(id).is_some_and(|distance| distance < inner_shell_radius)
        });

    let mut keyed: Vec<(ParticleId, f32)> = inside
        .into_iter()
        .map(|id| (id, distance_of(id).unwrap_or(0.0)))
        .collect();
    keyed.sort_by(|a, b| b.1.total_cmp(&a.1));

    draw_order.extend(outside);
    draw_order.extend(keyed.into_iter().map(|(id, _)| id));
    true
}
