use crate::constants::{INNER_SHELL_CAPACITY, OUTER_SHELL_CAPACITY};
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

/// The two schematic electron shells drawn around the nucleus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElectronShell {
    Inner,
    Outer,
}

impl ElectronShell {
    pub fn capacity(self) -> usize {
        match self {
            ElectronShell::Inner => INNER_SHELL_CAPACITY,
            ElectronShell::Outer => OUTER_SHELL_CAPACITY,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ShellRadii {
    pub inner: f32,
    pub outer: f32,
}

impl ShellRadii {
    pub fn radius(&self, shell: ElectronShell) -> f32 {
        match shell {
            ElectronShell::Inner => self.inner,
            ElectronShell::Outer => self.outer,
        }
    }
}

/// Destination offsets for `count` electrons: the inner shell fills first,
/// then the outer shell. Slots on a shell are spaced evenly by the shell's
/// capacity so positions stay put as more electrons arrive.
pub fn electron_offsets(count: usize, radii: ShellRadii) -> Vec<Vec2> {
    let inner_slots = ElectronShell::Inner.capacity();
    let inner = count.min(inner_slots);
    let outer = count - inner;
    let outer_slots = outer.max(ElectronShell::Outer.capacity());

    let mut offsets = Vec::with_capacity(count);
    offsets.extend(ring(
        inner,
        inner_slots,
        radii.radius(ElectronShell::Inner),
        FRAC_PI_2,
    ));
    offsets.extend(ring(
        outer,
        outer_slots,
        radii.radius(ElectronShell::Outer),
        FRAC_PI_2 + TAU / 16.0,
    ));
    offsets
}

fn ring(count: usize, slots: usize, radius: f32, start: f32) -> impl Iterator<Item = Vec2> {
    (0..count).map(move |i| {
        let theta = start + TAU * i as f32 / slots as f32;
        Vec2::new(theta.cos(), theta.sin()) * radius
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADII: ShellRadii = ShellRadii {
        inner: 85.0,
        outer: 130.0,
    };

    #[test]
    fn inner_shell_fills_first() {
        let offsets = electron_offsets(3, RADII);
        assert!((offsets[0].length() - 85.0).abs() < 1e-3);
        assert!((offsets[1].length() - 85.0).abs() < 1e-3);
        assert!((offsets[2].length() - 130.0).abs() < 1e-3);
    }

    #[test]
    fn extra_electrons_share_outer_shell() {
        let offsets = electron_offsets(12, RADII);
        assert_eq!(offsets.len(), 12);
        assert!(offsets[2..].iter().all(|o| (o.length() - 130.0).abs() < 1e-3));
    }
}
