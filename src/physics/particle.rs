use crate::constants::{ELECTRON_RADIUS, NUCLEON_RADIUS};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three subatomic particle types a user can drag around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Proton,
    Neutron,
    Electron,
}

impl ParticleKind {
    pub fn is_nucleon(self) -> bool {
        matches!(self, ParticleKind::Proton | ParticleKind::Neutron)
    }

    /// Charge in units of the elementary charge.
    pub fn charge(self) -> i32 {
        match self {
            ParticleKind::Proton => 1,
            ParticleKind::Neutron => 0,
            ParticleKind::Electron => -1,
        }
    }

    pub fn radius(self) -> f32 {
        if self.is_nucleon() {
            NUCLEON_RADIUS
        } else {
            ELECTRON_RADIUS
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParticleKind::Proton => "proton",
            ParticleKind::Neutron => "neutron",
            ParticleKind::Electron => "electron",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single draggable particle. Its value lives in exactly one container at a
/// time and is moved, never copied, between containers.
#[derive(Debug)]
pub struct Particle {
    id: ParticleId,
    kind: ParticleKind,
    radius: f32,
    pub position: Vec2,
    pub destination: Vec2,
    user_controlled: bool,
}

impl Particle {
    pub fn new(id: ParticleId, kind: ParticleKind) -> Self {
        Self {
            id,
            kind,
            radius: kind.radius(),
            position: Vec2::ZERO,
            destination: Vec2::ZERO,
            user_controlled: false,
        }
    }

    pub fn proton(id: ParticleId) -> Self {
        Self::new(id, ParticleKind::Proton)
    }

    pub fn neutron(id: ParticleId) -> Self {
        Self::new(id, ParticleKind::Neutron)
    }

    pub fn electron(id: ParticleId) -> Self {
        Self::new(id, ParticleKind::Electron)
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_user_controlled(&self) -> bool {
        self.user_controlled
    }

    /// Sets the held flag and returns the previous value.
    pub(crate) fn set_user_controlled(&mut self, held: bool) -> bool {
        std::mem::replace(&mut self.user_controlled, held)
    }

    /// Jumps straight to the destination, skipping animation.
    pub fn move_to_destination(&mut self) {
        self.position = self.destination;
    }

    pub fn at_destination(&self) -> bool {
        self.position == self.destination
    }

    /// Moves toward the destination by at most `speed * dt`. Held particles
    /// follow the pointer instead and are left alone.
    pub fn step(&mut self, dt: f32, speed: f32) {
        if self.user_controlled || self.at_destination() {
            return;
        }

        let delta = self.destination - self.position;
        let distance = delta.length();
        let max_travel = speed * dt;
        if distance <= max_travel {
            self.position = self.destination;
        } else {
            self.position += delta / distance * max_travel;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_carry_charge_and_radius() {
        assert_eq!(ParticleKind::Proton.charge(), 1);
        assert_eq!(ParticleKind::Electron.charge(), -1);
        assert!(ParticleKind::Neutron.is_nucleon());
        assert!(!ParticleKind::Electron.is_nucleon());
        assert_eq!(Particle::electron(ParticleId(0)).radius(), ELECTRON_RADIUS);
    }

    #[test]
    fn step_approaches_destination_without_overshoot() {
        let mut particle = Particle::proton(ParticleId(1));
        particle.destination = Vec2::new(100.0, 0.0);

        particle.step(0.1, 400.0);
        assert!((particle.position.x - 40.0).abs() < 1e-4);

        particle.step(1.0, 400.0);
        assert_eq!(particle.position, particle.destination);
    }

    #[test]
    fn held_particle_does_not_animate() {
        let mut particle = Particle::neutron(ParticleId(2));
        particle.destination = Vec2::new(10.0, 10.0);
        particle.set_user_controlled(true);
        particle.step(1.0, 400.0);
        assert_eq!(particle.position, Vec2::ZERO);
    }
}
