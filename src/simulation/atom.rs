use crate::atom::NumberAtom;
use crate::constants::{INNER_ELECTRON_SHELL_RADIUS, OUTER_ELECTRON_SHELL_RADIUS};
use crate::physics::electron::{ShellRadii, electron_offsets};
use crate::physics::elements::Element;
use crate::physics::nucleus::nucleon_offsets;
use crate::physics::particle::{Particle, ParticleId, ParticleKind};
use crate::simulation::layering::layer_nucleus;
use crate::simulation::signal::{ListenerId, Signal};
use glam::Vec2;
use log::{debug, warn};

/// An atom assembled from individual particles.
///
/// Nucleons and electrons are stored in arrival order, which drives their
/// layout. Nucleons additionally have a draw order that nucleus layering
/// rearranges. Mass number and charge are always computed from membership.
#[derive(Debug)]
pub struct ParticleAtom {
    center: Vec2,
    shell_radii: ShellRadii,
    nucleons: Vec<Particle>,
    electrons: Vec<Particle>,
    draw_order: Vec<ParticleId>,
    reconfigured: Signal<NumberAtom>,
}

impl ParticleAtom {
    pub fn new(center: Vec2) -> Self {
        Self::with_shell_radii(
            center,
            ShellRadii {
                inner: INNER_ELECTRON_SHELL_RADIUS,
                outer: OUTER_ELECTRON_SHELL_RADIUS,
            },
        )
    }

    pub fn with_shell_radii(center: Vec2, shell_radii: ShellRadii) -> Self {
        Self {
            center,
            shell_radii,
            nucleons: Vec::new(),
            electrons: Vec::new(),
            draw_order: Vec::new(),
            reconfigured: Signal::new(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn inner_electron_shell_radius(&self) -> f32 {
        self.shell_radii.inner
    }

    pub fn outer_electron_shell_radius(&self) -> f32 {
        self.shell_radii.outer
    }

    /// Registers a listener for membership changes. Listeners run in
    /// subscription order, after layout and layering are done.
    pub fn on_reconfigured<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&NumberAtom) + 'static,
    {
        self.reconfigured.subscribe(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.reconfigured.unsubscribe(id)
    }

    pub fn proton_count(&self) -> u32 {
        self.count_nucleons(ParticleKind::Proton)
    }

    pub fn neutron_count(&self) -> u32 {
        self.count_nucleons(ParticleKind::Neutron)
    }

    pub fn electron_count(&self) -> u32 {
        self.electrons.len() as u32
    }

    pub fn mass_number(&self) -> u32 {
        self.nucleons.len() as u32
    }

    pub fn charge(&self) -> i32 {
        self.nucleons
            .iter()
            .chain(&self.electrons)
            .map(|particle| particle.kind().charge())
            .sum()
    }

    pub fn is_neutral(&self) -> bool {
        self.charge() == 0
    }

    pub fn is_empty(&self) -> bool {
        self.nucleons.is_empty() && self.electrons.is_empty()
    }

    pub fn element(&self) -> Option<&'static Element> {
        Element::by_atomic_number(self.proton_count())
    }

    pub fn to_number_atom(&self) -> NumberAtom {
        NumberAtom::new(
            self.proton_count(),
            self.neutron_count(),
            self.electron_count(),
        )
    }

    pub fn nucleons(&self) -> &[Particle] {
        &self.nucleons
    }

    pub fn electrons(&self) -> &[Particle] {
        &self.electrons
    }

    pub fn draw_order(&self) -> &[ParticleId] {
        &self.draw_order
    }

    /// Nucleons bottom-most first, as the renderer should paint them.
    pub fn nucleons_in_draw_order(&self) -> impl Iterator<Item = &Particle> {
        self.draw_order.iter().filter_map(|id| {
            self.nucleons.iter().find(|particle| particle.id() == *id)
        })
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.particle(id).is_some()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.nucleons
            .iter()
            .chain(self.electrons.iter())
            .find(|particle| particle.id() == id)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.nucleons
            .iter_mut()
            .chain(self.electrons.iter_mut())
            .find(|particle| particle.id() == id)
    }

    /// Takes ownership of a particle that its previous container has already
    /// given up, then reconfigures.
    pub(crate) fn add_particle(&mut self, particle: Particle) {
        debug!("atom: adding {} {}", particle.kind(), particle.id());
        if particle.kind().is_nucleon() {
            self.draw_order.push(particle.id());
            self.nucleons.push(particle);
        } else {
            self.electrons.push(particle);
        }
        self.reconfigure();
    }

    pub(crate) fn remove_particle(&mut self, id: ParticleId) -> Option<Particle> {
        let removed = if let Some(index) = self.nucleons.iter().position(|p| p.id() == id) {
            self.draw_order.retain(|drawn| *drawn != id);
            self.nucleons.remove(index)
        } else if let Some(index) = self.electrons.iter().position(|p| p.id() == id) {
            self.electrons.remove(index)
        } else {
            debug!("atom: particle {id} not found for removal");
            return None;
        };

        debug!("atom: removed {} {}", removed.kind(), removed.id());
        self.reconfigure();
        Some(removed)
    }

    /// Empties the atom, reconfiguring once if anything was removed.
    pub(crate) fn clear(&mut self) -> Vec<Particle> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut removed = std::mem::take(&mut self.nucleons);
        removed.append(&mut self.electrons);
        self.draw_order.clear();
        self.reconfigure();
        removed
    }

    pub fn move_all_to_destination(&mut self) {
        for particle in self.nucleons.iter_mut().chain(self.electrons.iter_mut()) {
            particle.move_to_destination();
        }
    }

    pub fn step(&mut self, dt: f32, speed: f32) {
        for particle in self.nucleons.iter_mut().chain(self.electrons.iter_mut()) {
            particle.step(dt, speed);
        }
    }

    fn count_nucleons(&self, kind: ParticleKind) -> u32 {
        self.nucleons.iter().filter(|p| p.kind() == kind).count() as u32
    }

    fn reconfigure(&mut self) {
        self.layout_nucleus();
        self.layout_electrons();
        let layered = layer_nucleus(
            &mut self.draw_order,
            &self.nucleons,
            self.center,
            self.shell_radii.inner,
        );
        if layered {
            debug!("atom: nucleus draw order {:?}", self.draw_order);
        }

        let snapshot = self.to_number_atom();
        if let Err(err) = self.reconfigured.emit(&snapshot) {
            warn!("atom: reconfiguration to {snapshot} not delivered: {err}");
        }
    }

    fn layout_nucleus(&mut self) {
        let Some(radius) = self.nucleons.first().map(Particle::radius) else {
            return;
        };
        let offsets = nucleon_offsets(self.nucleons.len(), radius);
        for (particle, offset) in self.nucleons.iter_mut().zip(offsets) {
            particle.destination = self.center + offset;
        }
    }

    fn layout_electrons(&mut self) {
        let offsets = electron_offsets(self.electrons.len(), self.shell_radii);
        for (particle, offset) in self.electrons.iter_mut().zip(offsets) {
            particle.destination = self.center + offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn assert_derived_consistent(atom: &ParticleAtom) {
        assert_eq!(atom.mass_number() as usize, atom.nucleons().len());
        assert_eq!(
            atom.charge(),
            atom.proton_count() as i32 - atom.electron_count() as i32
        );
        assert_eq!(atom.draw_order().len(), atom.nucleons().len());
    }

    #[test]
    fn derived_values_follow_membership() {
        let mut atom = ParticleAtom::new(Vec2::ZERO);
        atom.add_particle(Particle::proton(ParticleId(0)));
        assert_derived_consistent(&atom);
        atom.add_particle(Particle::neutron(ParticleId(1)));
        assert_derived_consistent(&atom);
        atom.add_particle(Particle::electron(ParticleId(2)));
        atom.add_particle(Particle::electron(ParticleId(3)));
        assert_derived_consistent(&atom);

        assert_eq!(atom.to_number_atom(), NumberAtom::new(1, 1, 2));
        assert_eq!(atom.charge(), -1);
        assert_eq!(atom.element().map(Element::symbol), Some("H"));

        let removed = atom.remove_particle(ParticleId(3)).unwrap();
        assert_eq!(removed.kind(), ParticleKind::Electron);
        assert_derived_consistent(&atom);
        assert!(atom.is_neutral());
        assert!(atom.remove_particle(ParticleId(3)).is_none());
    }

    #[test]
    fn reconfigured_fires_once_per_change_with_fresh_values() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut atom = ParticleAtom::new(Vec2::ZERO);
        let sink = Rc::clone(&seen);
        atom.on_reconfigured(move |snapshot| sink.borrow_mut().push(*snapshot));

        atom.add_particle(Particle::proton(ParticleId(0)));
        atom.add_particle(Particle::electron(ParticleId(1)));
        atom.remove_particle(ParticleId(0));
        atom.remove_particle(ParticleId(42));

        assert_eq!(
            *seen.borrow(),
            vec![
                NumberAtom::new(1, 0, 0),
                NumberAtom::new(1, 0, 1),
                NumberAtom::new(0, 0, 1),
            ]
        );
    }

    #[test]
    fn destinations_are_laid_out_around_center() {
        let center = Vec2::new(5.0, -5.0);
        let mut atom = ParticleAtom::new(center);
        atom.add_particle(Particle::proton(ParticleId(0)));
        assert_eq!(atom.nucleons()[0].destination, center);

        for id in 1..4 {
            atom.add_particle(Particle::electron(ParticleId(id)));
        }
        let radii: Vec<f32> = atom
            .electrons()
            .iter()
            .map(|e| e.destination.distance(center))
            .collect();
        assert!((radii[0] - atom.inner_electron_shell_radius()).abs() < 1e-3);
        assert!((radii[2] - atom.outer_electron_shell_radius()).abs() < 1e-3);
    }

    #[test]
    fn large_nucleus_draws_central_nucleon_last() {
        let mut atom = ParticleAtom::new(Vec2::ZERO);
        for id in 0..8 {
            atom.add_particle(Particle::neutron(ParticleId(id)));
        }
        let drawn: Vec<&Particle> = atom.nucleons_in_draw_order().collect();
        assert_eq!(drawn.len(), 8);
        let last = drawn.last().unwrap();
        assert_eq!(last.destination, Vec2::ZERO);
        // Outer ring nucleons come before the center one.
        assert!(drawn[0].destination.length() > 0.0);
        assert_eq!(atom.mass_number(), 8);
    }

    #[test]
    fn clear_returns_everything() {
        let mut atom = ParticleAtom::new(Vec2::ZERO);
        atom.add_particle(Particle::proton(ParticleId(0)));
        atom.add_particle(Particle::electron(ParticleId(1)));
        let removed = atom.clear();
        assert_eq!(removed.len(), 2);
        assert!(atom.is_empty());
        assert_derived_consistent(&atom);
        assert!(atom.clear().is_empty());
    }
}
