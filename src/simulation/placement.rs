use crate::atom::NumberAtom;
use crate::constants::{
    BUCKET_HEIGHT, BUCKET_WIDTH, BUCKET_Y_OFFSET, ELECTRON_CAPTURE_RADIUS,
    NUCLEON_CAPTURE_RADIUS, NUM_ELECTRONS, NUM_NEUTRONS, NUM_PROTONS, PARTICLE_SPEED,
};
use crate::error::PlacementError;
use crate::physics::particle::{Particle, ParticleId, ParticleKind};
use crate::simulation::atom::ParticleAtom;
use crate::simulation::bucket::{Placement, SphereBucket};
use crate::simulation::signal::ListenerId;
use glam::Vec2;
use log::debug;
use std::collections::VecDeque;

/// Which container currently holds a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Atom,
    Bucket(ParticleKind),
}

/// What a release did to the released particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    JoinedAtom,
    ReturnedToBucket(Placement),
    /// Already where the rules put it; it drifts back to its destination.
    Unchanged,
    /// The particle was not being held.
    NotHeld,
}

#[derive(Clone, Copy, Debug)]
pub struct CaptureRadii {
    pub nucleon: f32,
    pub electron: f32,
}

impl CaptureRadii {
    pub fn for_kind(&self, kind: ParticleKind) -> f32 {
        if kind.is_nucleon() {
            self.nucleon
        } else {
            self.electron
        }
    }
}

impl Default for CaptureRadii {
    fn default() -> Self {
        Self {
            nucleon: NUCLEON_CAPTURE_RADIUS,
            electron: ELECTRON_CAPTURE_RADIUS,
        }
    }
}

/// The build-an-atom play area: three home buckets, one atom, and the rules
/// that decide where a released particle goes.
///
/// Every particle value is stored in exactly one container, so it can never
/// be in both or in neither. Held particles stay with their owner while
/// being dragged; ownership only changes on release.
#[derive(Debug)]
pub struct BuildAnAtomModel {
    atom: ParticleAtom,
    proton_bucket: SphereBucket,
    neutron_bucket: SphereBucket,
    electron_bucket: SphereBucket,
    capture: CaptureRadii,
    pending_releases: VecDeque<ParticleId>,
    next_id: u32,
}

impl BuildAnAtomModel {
    /// A model with the standard supply of particles waiting in buckets.
    pub fn new() -> Self {
        let mut model = Self::empty(CaptureRadii::default());
        model.populate(ParticleKind::Proton, NUM_PROTONS);
        model.populate(ParticleKind::Neutron, NUM_NEUTRONS);
        model.populate(ParticleKind::Electron, NUM_ELECTRONS);
        model
    }

    /// A model with empty buckets, an empty atom at the origin and the given
    /// capture radii.
    pub fn empty(capture: CaptureRadii) -> Self {
        let size = Vec2::new(BUCKET_WIDTH, BUCKET_HEIGHT);
        let bucket = |kind: ParticleKind, x: f32| {
            SphereBucket::new(kind, Vec2::new(x, BUCKET_Y_OFFSET), size, kind.radius())
        };

        Self {
            atom: ParticleAtom::new(Vec2::ZERO),
            proton_bucket: bucket(ParticleKind::Proton, -BUCKET_WIDTH * 1.5),
            neutron_bucket: bucket(ParticleKind::Neutron, 0.0),
            electron_bucket: bucket(ParticleKind::Electron, BUCKET_WIDTH * 1.5),
            capture,
            pending_releases: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Creates `count` new particles in their home bucket and returns their ids.
    pub fn populate(&mut self, kind: ParticleKind, count: usize) -> Vec<ParticleId> {
        (0..count)
            .map(|_| {
                let id = ParticleId(self.next_id);
                self.next_id += 1;
                let bucket = self.bucket_mut(kind);
                bucket.add_first_open(Particle::new(id, kind));
                // New particles start at rest in their slot.
                if let Some(particle) = bucket.particle_mut(id) {
                    particle.move_to_destination();
                }
                id
            })
            .collect()
    }

    pub fn atom(&self) -> &ParticleAtom {
        &self.atom
    }

    /// Subscribes to the atom's `reconfigured` signal. The atom itself is only
    /// reachable read-only; membership changes go through grab, drag, release
    /// and reset.
    ///
    /// ```compile_fail
    /// use build_an_atom::physics::particle::ParticleId;
    /// use build_an_atom::simulation::placement::BuildAnAtomModel;
    ///
    /// let mut model = BuildAnAtomModel::new();
    /// model.atom_mut().remove_particle(ParticleId(0));
    /// ```
    pub fn on_reconfigured<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&NumberAtom) + 'static,
    {
        self.atom.on_reconfigured(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.atom.remove_listener(id)
    }

    pub fn capture_radii(&self) -> CaptureRadii {
        self.capture
    }

    pub fn bucket(&self, kind: ParticleKind) -> &SphereBucket {
        match kind {
            ParticleKind::Proton => &self.proton_bucket,
            ParticleKind::Neutron => &self.neutron_bucket,
            ParticleKind::Electron => &self.electron_bucket,
        }
    }

    fn bucket_mut(&mut self, kind: ParticleKind) -> &mut SphereBucket {
        match kind {
            ParticleKind::Proton => &mut self.proton_bucket,
            ParticleKind::Neutron => &mut self.neutron_bucket,
            ParticleKind::Electron => &mut self.electron_bucket,
        }
    }

    pub fn buckets(&self) -> [&SphereBucket; 3] {
        [&self.proton_bucket, &self.neutron_bucket, &self.electron_bucket]
    }

    pub fn particle_count(&self) -> usize {
        self.buckets().iter().map(|bucket| bucket.len()).sum::<usize>()
            + self.atom.nucleons().len()
            + self.atom.electrons().len()
    }

    pub fn owner_of(&self, id: ParticleId) -> Option<Owner> {
        if self.atom.contains(id) {
            return Some(Owner::Atom);
        }
        self.buckets()
            .into_iter()
            .find(|bucket| bucket.contains(id))
            .map(|bucket| Owner::Bucket(bucket.kind()))
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.atom
            .particle(id)
            .or_else(|| self.buckets().into_iter().find_map(|b| b.particle(id)))
    }

    fn particle_mut(&mut self, id: ParticleId) -> Result<&mut Particle, PlacementError> {
        let particle = match self.owner_of(id) {
            Some(Owner::Atom) => self.atom.particle_mut(id),
            Some(Owner::Bucket(kind)) => self.bucket_mut(kind).particle_mut(id),
            None => None,
        };
        particle.ok_or(PlacementError::UnknownParticle(id))
    }

    /// The user picked a particle up.
    pub fn grab(&mut self, id: ParticleId) -> Result<(), PlacementError> {
        self.particle_mut(id)?.set_user_controlled(true);
        Ok(())
    }

    /// The user dragged a held particle. Dragging an unheld particle is ignored.
    pub fn drag_to(&mut self, id: ParticleId, position: Vec2) -> Result<(), PlacementError> {
        let particle = self.particle_mut(id)?;
        if particle.is_user_controlled() {
            particle.position = position;
        }
        Ok(())
    }

    /// The user let go of a particle; decides where it belongs.
    pub fn release(&mut self, id: ParticleId) -> Result<ReleaseOutcome, PlacementError> {
        let outcomes = self.release_batch(&[id])?;
        Ok(outcomes[0])
    }

    /// Releases several particles that were let go together. They are
    /// resolved first-in, first-out in the order given, each one seeing the
    /// placements made for those before it.
    pub fn release_batch(
        &mut self,
        ids: &[ParticleId],
    ) -> Result<Vec<ReleaseOutcome>, PlacementError> {
        if let Some(&unknown) = ids.iter().find(|&&id| self.owner_of(id).is_none()) {
            return Err(PlacementError::UnknownParticle(unknown));
        }
        self.pending_releases.extend(ids.iter().copied());

        let mut outcomes = Vec::with_capacity(ids.len());
        while let Some(id) = self.pending_releases.pop_front() {
            match self.handle_release(id) {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    self.pending_releases.clear();
                    return Err(err);
                }
            }
        }
        Ok(outcomes)
    }

    fn handle_release(&mut self, id: ParticleId) -> Result<ReleaseOutcome, PlacementError> {
        let particle = self.particle_mut(id)?;
        if !particle.set_user_controlled(false) {
            return Ok(ReleaseOutcome::NotHeld);
        }

        let kind = particle.kind();
        let position = particle.position;
        let distance = position.distance(self.atom.center());
        let capture_radius = self.capture.for_kind(kind);
        let owner = self.owner_of(id);

        let outcome = if distance < capture_radius {
            if owner == Some(Owner::Atom) {
                ReleaseOutcome::Unchanged
            } else {
                let particle = self.take(id)?;
                self.atom.add_particle(particle);
                ReleaseOutcome::JoinedAtom
            }
        } else if owner == Some(Owner::Bucket(kind)) {
            ReleaseOutcome::Unchanged
        } else {
            let particle = self.take(id)?;
            let placement = self.bucket_mut(kind).add_nearest_open(particle, position);
            ReleaseOutcome::ReturnedToBucket(placement)
        };

        debug!(
            "released {kind} {id} at distance {distance:.1} (capture {capture_radius:.1}): {outcome:?}"
        );
        Ok(outcome)
    }

    fn take(&mut self, id: ParticleId) -> Result<Particle, PlacementError> {
        let particle = match self.owner_of(id) {
            Some(Owner::Atom) => self.atom.remove_particle(id),
            Some(Owner::Bucket(kind)) => self.bucket_mut(kind).remove(id),
            None => None,
        };
        particle.ok_or(PlacementError::UnknownParticle(id))
    }

    /// Sends every particle in the atom back to its home bucket.
    pub fn reset(&mut self) {
        for mut particle in self.atom.clear() {
            particle.set_user_controlled(false);
            let kind = particle.kind();
            self.bucket_mut(kind).add_first_open(particle);
        }
        for kind in [ParticleKind::Proton, ParticleKind::Neutron, ParticleKind::Electron] {
            let bucket = self.bucket_mut(kind);
            for mut particle in bucket.drain() {
                particle.set_user_controlled(false);
                bucket.add_first_open(particle);
            }
        }
        self.pending_releases.clear();
    }

    /// Advances particle animation toward each destination.
    pub fn step(&mut self, dt: f32) {
        self.atom.step(dt, PARTICLE_SPEED);
        self.proton_bucket.step(dt, PARTICLE_SPEED);
        self.neutron_bucket.step(dt, PARTICLE_SPEED);
        self.electron_bucket.step(dt, PARTICLE_SPEED);
    }
}

impl Default for BuildAnAtomModel {
    fn default() -> Self {
        Self::new()
    }
}
