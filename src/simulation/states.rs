//! Core state types for the ring simulation.
//!
//! - `Particle`: one point mass with position, velocity, radius and mass
//! - `ParticleCollection`: the ordered ring plus the number of completed steps
//!
//! Positions are in screen-style units: x grows to the right, y grows
//! downward, so gravity is a positive y force and the floor is a maximum y.

use std::f64::consts::TAU;

use nalgebra::Vector2;

use crate::simulation::error::{ensure_finite, SimError};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    mass: f64,
    radius: f64,
}

impl Particle {
    /// Create a particle at rest. Mass must be > 0 with a finite inverse, and radius >= 0.
    pub fn new(x: NVec2, radius: f64, mass: f64) -> Result<Self, SimError> {
        ensure_finite("position.x", x.x)?;
        ensure_finite("position.y", x.y)?;
        ensure_finite("radius", radius)?;
        ensure_finite("mass", mass)?;
        if mass <= 0.0 {
            return Err(SimError::NonPositiveMass(mass));
        }
        // apply_force divides by mass; subnormals overflow 1 / mass
        if !(1.0 / mass).is_finite() {
            return Err(SimError::InvalidParameter { name: "mass", value: mass });
        }
        if radius < 0.0 {
            return Err(SimError::NegativeRadius(radius));
        }
        Ok(Self {
            x,
            v: NVec2::zeros(),
            mass,
            radius,
        })
    }

    /// Same as [`Particle::new`] with an initial velocity
    pub fn with_velocity(mut self, v: NVec2) -> Self {
        self.v = v;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Bottom edge of the particle (largest y it covers)
    pub fn bottom(&self) -> f64 {
        self.x.y + self.radius
    }

    /// `v += f / m`. Only the velocity changes.
    pub fn apply_force(&mut self, f: NVec2) {
        self.v += f / self.mass;
    }

    /// Explicit Euler with an implicit unit time step: `x += v`
    pub fn integrate(&mut self) {
        self.x += self.v;
    }
}

/// Ordered ring of particles.
/// Order only matters for drawing: particle `i` links to `(i + 1) % n`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleCollection {
    particles: Vec<Particle>,
    pub(crate) frame: u64, // completed steps
}

impl ParticleCollection {
    /// Wrap an existing set of particles. Fails on an empty set.
    pub fn from_particles(particles: Vec<Particle>) -> Result<Self, SimError> {
        if particles.is_empty() {
            return Err(SimError::EmptyRing);
        }
        Ok(Self {
            particles,
            frame: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to each particle; the count itself can't change
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn get(&self, i: usize) -> Option<&Particle> {
        self.particles.get(i)
    }

    /// Current positions, in ring order
    pub fn positions(&self) -> impl Iterator<Item = NVec2> + '_ {
        self.particles.iter().map(|p| p.x)
    }

    /// Ring edges `(i, (i + 1) % n)` as position pairs, for line drawing
    pub fn segments(&self) -> impl Iterator<Item = (NVec2, NVec2)> + '_ {
        let n = self.particles.len();
        (0..n).map(move |i| (self.particles[i].x, self.particles[(i + 1) % n].x))
    }
}

/// Build `count` particles evenly spaced on a circle around `center`.
/// Particle `i` sits at angle `i * 2π / count`, at rest.
pub fn initialize(
    count: usize,
    center: NVec2,
    ring_radius: f64,
    particle_radius: f64,
    mass: f64,
) -> Result<ParticleCollection, SimError> {
    if count == 0 {
        return Err(SimError::EmptyRing);
    }
    ensure_finite("ring radius", ring_radius)?;

    let step = TAU / count as f64;
    let particles = (0..count)
        .map(|i| {
            let angle = i as f64 * step;
            let x = center + ring_radius * NVec2::new(angle.cos(), angle.sin());
            Particle::new(x, particle_radius, mass)
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "initialized ring: {count} particles, ring radius {ring_radius}, particle radius {particle_radius}, mass {mass}"
    );
    ParticleCollection::from_particles(particles)
}
