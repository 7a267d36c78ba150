//! Ground collision
//!
//! Only a floor: no walls, no ceiling, no friction. Particles may leave the
//! screen sideways.

use crate::simulation::states::{Particle, ParticleCollection};

#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub y: f64, // ground line, larger y is below it
    pub bounce_factor: f64, // applied to vy on contact, in (-1, 0]
}

impl Floor {
    /// Push a particle that sank below the floor back onto it and reflect
    /// its vertical velocity. Returns whether it bounced.
    pub fn resolve(&self, p: &mut Particle) -> bool {
        if p.bottom() <= self.y {
            return false;
        }
        p.x.y = self.y - p.radius();
        p.v.y *= self.bounce_factor;
        true
    }

    /// Resolve every particle, returning how many bounced
    pub fn resolve_all(&self, particles: &mut ParticleCollection) -> usize {
        particles
            .particles_mut()
            .iter_mut()
            .map(|p| self.resolve(p))
            .filter(|&bounced| bounced)
            .count()
    }
}
