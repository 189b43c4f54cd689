use crate::physics::particle::{Particle, ParticleId, ParticleKind};
use glam::Vec2;
use log::{debug, warn};

/// Where a particle ended up after being added to a bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Index into the bucket's lattice, in scan order.
    Slot(usize),
    /// The lattice was full; the particle was stacked above the bucket.
    Overflow(usize),
}

#[derive(Debug)]
struct Entry {
    particle: Particle,
    placement: Placement,
}

/// Holding area that packs particles into a fixed hexagonal lattice of slots.
///
/// Slots are scanned bottom row first, left to right, then upward. Each row
/// is offset by one particle radius and holds one fewer slot than the row
/// below it.
#[derive(Debug)]
pub struct SphereBucket {
    kind: ParticleKind,
    position: Vec2,
    size: Vec2,
    particle_radius: f32,
    slots: Vec<Vec2>,
    entries: Vec<Entry>,
}

impl SphereBucket {
    /// `position` is the bucket center and `size` its width and height.
    pub fn new(kind: ParticleKind, position: Vec2, size: Vec2, particle_radius: f32) -> Self {
        let slots = lattice(position, size, particle_radius);
        Self {
            kind,
            position,
            size,
            particle_radius,
            slots,
            entries: Vec::new(),
        }
    }

    /// The particle kind this bucket is the home of.
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn particle_radius(&self) -> f32 {
        self.particle_radius
    }

    pub fn slots(&self) -> &[Vec2] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn open_slot_count(&self) -> usize {
        self.slots.len() - self.occupied_slot_count()
    }

    pub fn contents(&self) -> impl Iterator<Item = &Particle> {
        self.entries.iter().map(|entry| &entry.particle)
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.index_of(id).map(|index| &self.entries[index].particle)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        let index = self.index_of(id)?;
        Some(&mut self.entries[index].particle)
    }

    pub fn placement_of(&self, id: ParticleId) -> Option<Placement> {
        self.index_of(id).map(|index| self.entries[index].placement)
    }

    pub fn add_first_open(&mut self, particle: Particle) -> Placement {
        let slot = (0..self.slots.len()).find(|&slot| !self.is_slot_occupied(slot));
        self.insert(particle, slot)
    }

    /// Places the particle in the open slot closest to `from`. Equal
    /// distances resolve to the slot that comes first in scan order.
    pub fn add_nearest_open(&mut self, particle: Particle, from: Vec2) -> Placement {
        let mut nearest: Option<(usize, f32)> = None;
        for (slot, position) in self.slots.iter().enumerate() {
            if self.is_slot_occupied(slot) {
                continue;
            }
            let distance = position.distance_squared(from);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((slot, distance));
            }
        }
        self.insert(particle, nearest.map(|(slot, _)| slot))
    }

    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        let Some(index) = self.index_of(id) else {
            debug!("{} bucket: particle {id} not found for removal", self.kind);
            return None;
        };
        Some(self.entries.remove(index).particle)
    }

    /// Removes every particle, in insertion order.
    pub fn drain(&mut self) -> Vec<Particle> {
        self.entries.drain(..).map(|entry| entry.particle).collect()
    }

    pub fn step(&mut self, dt: f32, speed: f32) {
        for entry in &mut self.entries {
            entry.particle.step(dt, speed);
        }
    }

    fn insert(&mut self, mut particle: Particle, slot: Option<usize>) -> Placement {
        let placement = match slot {
            Some(slot) => Placement::Slot(slot),
            None => {
                let level = self.first_free_overflow_level();
                warn!(
                    "{} bucket overflow: all {} slots taken, stacking particle {} at overflow level {}",
                    self.kind,
                    self.slots.len(),
                    particle.id(),
                    level
                );
                Placement::Overflow(level)
            }
        };

        particle.destination = self.position_of(placement);
        debug!(
            "{} bucket: particle {} placed at {:?}",
            self.kind,
            particle.id(),
            placement
        );
        self.entries.push(Entry {
            particle,
            placement,
        });
        placement
    }

    fn position_of(&self, placement: Placement) -> Vec2 {
        match placement {
            Placement::Slot(slot) => self.slots[slot],
            Placement::Overflow(level) => {
                let top = self.position.y + self.size.y / 2.0;
                let diameter = self.particle_radius * 2.0;
                Vec2::new(
                    self.position.x,
                    top + self.particle_radius + level as f32 * diameter,
                )
            }
        }
    }

    fn index_of(&self, id: ParticleId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.particle.id() == id)
    }

    fn is_slot_occupied(&self, slot: usize) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.placement == Placement::Slot(slot))
    }

    fn occupied_slot_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.placement, Placement::Slot(_)))
            .count()
    }

    fn first_free_overflow_level(&self) -> usize {
        (0..)
            .find(|&level| {
                !self
                    .entries
                    .iter()
                    .any(|entry| entry.placement == Placement::Overflow(level))
            })
            .unwrap_or(0)
    }
}

fn lattice(position: Vec2, size: Vec2, radius: f32) -> Vec<Vec2> {
    let diameter = radius * 2.0;
    if diameter <= 0.0 {
        return Vec::new();
    }

    let row_spacing = diameter * 3.0_f32.sqrt() / 2.0;
    let bottom = position.y - size.y / 2.0;
    let top = position.y + size.y / 2.0;
    let first_row = (size.x / diameter).floor() as usize;

    let mut slots = Vec::new();
    for row in 0..first_row {
        let count = first_row - row;
        let y = bottom + radius + row as f32 * row_spacing;
        if y + radius > top {
            break;
        }
        let start_x = position.x - (count - 1) as f32 * radius;
        slots.extend((0..count).map(|i| Vec2::new(start_x + i as f32 * diameter, y)));
    }
    slots
}
