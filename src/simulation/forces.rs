//! Force contributors for the ring simulation
//!
//! Every term writes a force per particle into a shared buffer; the buffer is
//! then applied through `Particle::apply_force`, so each force is divided by
//! the mass of the particle it acts on.

use crate::simulation::states::{NVec2, ParticleCollection};

/// Collection of force terms (gravity, springs, ...)
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per particle
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total forces for all particles in `particles`
    /// - `out[i]` is overwritten with the sum of contributions from all terms
    pub fn accumulate_forces(&self, particles: &ParticleCollection, out: &mut [NVec2]) {
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(particles, out);
        }
    }

    /// Accumulate, then hand each particle its total through `apply_force`.
    /// Positions are untouched; only velocities change.
    pub fn apply(&self, particles: &mut ParticleCollection) {
        self.apply_with(particles, &mut Vec::new());
    }

    /// Same as [`ForceSet::apply`], using `buf` as the per-particle scratch.
    /// `buf` is resized to the ring length; its previous contents are ignored.
    pub fn apply_with(&self, particles: &mut ParticleCollection, buf: &mut Vec<NVec2>) {
        buf.resize(particles.len(), NVec2::zeros());
        self.accumulate_forces(particles, buf);
        for (p, f) in particles.particles_mut().iter_mut().zip(buf.iter()) {
            p.apply_force(*f);
        }
    }
}

/// A source of forces on the ring.
/// Implementations add their contribution into `out[i]` for each particle
pub trait Force {
    fn force(&self, particles: &ParticleCollection, out: &mut [NVec2]);
}

/// Constant force `(0, g)` on every particle.
///
/// This is a force, not an acceleration: `apply_force` divides it by mass, so
/// a particle of mass `m` speeds up by `g / m` per step and heavier particles
/// fall slower. Real gravity would be mass independent. The default ring uses
/// one shared mass, which hides the difference; mixing masses exposes it.
pub struct UniformGravity {
    pub g: f64,
}

impl Force for UniformGravity {
    fn force(&self, particles: &ParticleCollection, out: &mut [NVec2]) {
        let pull = NVec2::new(0.0, self.g);
        for f in out.iter_mut().take(particles.len()) {
            *f += pull;
        }
    }
}
