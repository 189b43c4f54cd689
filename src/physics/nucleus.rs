use glam::Vec2;
use std::f32::consts::TAU;

// Rings overlap slightly so the nucleus reads as one clump.
const RING_SPACING_FACTOR: f32 = 0.9;

/// Destination offsets, relative to the atom center, for `count` nucleons of
/// the given radius. The first nucleon sits at the center and the rest fill
/// concentric rings outward, each ring holding as many as fit on its
/// circumference.
pub fn nucleon_offsets(count: usize, nucleon_radius: f32) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }

    let mut offsets = Vec::with_capacity(count);
    offsets.push(Vec2::ZERO);

    let diameter = nucleon_radius * 2.0;
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    let mut ring = 1usize;

    while offsets.len() < count {
        let radius = ring as f32 * diameter * RING_SPACING_FACTOR;
        let capacity = ring_capacity(radius, diameter);
        let on_ring = capacity.min(count - offsets.len());
        let start = golden_angle * ring as f32;

        for i in 0..on_ring {
            let theta = start + TAU * i as f32 / on_ring as f32;
            offsets.push(Vec2::new(theta.cos(), theta.sin()) * radius);
        }
        ring += 1;
    }

    offsets
}

fn ring_capacity(radius: f32, diameter: f32) -> usize {
    ((TAU * radius / diameter).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_nucleon_sits_at_center() {
        assert_eq!(nucleon_offsets(1, 10.0), vec![Vec2::ZERO]);
        assert!(nucleon_offsets(0, 10.0).is_empty());
    }

    #[test]
    fn offsets_are_distinct_and_compact() {
        let offsets = nucleon_offsets(23, 10.0);
        assert_eq!(offsets.len(), 23);
        for (i, a) in offsets.iter().enumerate() {
            for b in offsets.iter().skip(i + 1) {
                assert!(a.distance(*b) > 1.0);
            }
        }
        // A full nucleus stays inside the inner electron shell.
        let extent = offsets.iter().map(|o| o.length()).fold(0.0, f32::max) + 10.0;
        assert!(extent < 85.0);
    }
}
