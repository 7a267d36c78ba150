//! Fixed-step update for the particle ring
//!
//! One call advances the ring by one frame with an implicit unit time step.
//! The order is fixed:
//! 1. external forces (gravity) into velocity
//! 2. explicit Euler: position += velocity
//! 3. floor collision
//! 4. pairwise spring pass into velocity
//!
//! Spring forces found in step 4 see positions after the floor fix and only
//! move particles on the next call, when step 2 runs again.

use super::boundary::Floor;
use super::constraints::MinDistanceSpring;
use super::forces::{ForceSet, UniformGravity};
use super::params::Parameters;
use super::states::{NVec2, ParticleCollection};

/// What happened during one step, for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub frame: u64, // frame number after the step
    pub bounces: usize, // particles that hit the floor this step
}

/// Advance the ring by one frame using prebuilt force sets.
/// `forces` act before integration, `constraints` after the floor fix.
pub fn euler_step(
    particles: &mut ParticleCollection,
    forces: &ForceSet,
    constraints: &ForceSet,
    floor: &Floor,
) -> StepReport {
    euler_step_with(particles, forces, constraints, floor, &mut Vec::new())
}

/// [`euler_step`] with a caller-owned force buffer, reused across frames
pub fn euler_step_with(
    particles: &mut ParticleCollection,
    forces: &ForceSet,
    constraints: &ForceSet,
    floor: &Floor,
    scratch: &mut Vec<NVec2>,
) -> StepReport {
    forces.apply_with(particles, scratch);

    for p in particles.particles_mut() {
        p.integrate();
    }

    let bounces = floor.resolve_all(particles);

    constraints.apply_with(particles, scratch);

    particles.frame += 1;
    if bounces > 0 {
        log::debug!("frame {}: {} particle(s) bounced", particles.frame, bounces);
    }

    StepReport {
        frame: particles.frame,
        bounces,
    }
}

/// Advance the ring by one frame: gravity, integrate, floor, springs.
/// `params` is assumed valid (see [`Parameters::validate`]).
pub fn step(particles: &mut ParticleCollection, params: &Parameters) -> StepReport {
    let forces = gravity_set(params);
    let constraints = constraint_set(params);
    let floor = floor_of(params);
    euler_step(particles, &forces, &constraints, &floor)
}

/// Force terms applied before integration
pub fn gravity_set(params: &Parameters) -> ForceSet {
    ForceSet::new().with(UniformGravity { g: params.gravity })
}

/// Force terms applied after the floor fix
pub fn constraint_set(params: &Parameters) -> ForceSet {
    ForceSet::new().with(MinDistanceSpring {
        min_distance: params.min_distance,
        spring_constant: params.spring_constant,
    })
}

pub fn floor_of(params: &Parameters) -> Floor {
    Floor {
        y: params.floor_y,
        bounce_factor: params.bounce_factor,
    }
}
