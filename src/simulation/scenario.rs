//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - driver and window settings (`Engine`, `WindowSettings`)
//! - validated physical constants (`Parameters`)
//! - the particle ring at frame 0 (`ParticleCollection`)
//! - the force terms applied before integration and after the floor fix
//!
//! With the `viewer` feature the scenario is a Bevy `Resource` that the
//! fixed-step system mutates once per tick.

use crate::configuration::config::ScenarioConfig;
use crate::simulation::boundary::Floor;
use crate::simulation::engine::{Engine, WindowSettings};
use crate::simulation::error::SimError;
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::{constraint_set, euler_step_with, floor_of, gravity_set, StepReport};
use crate::simulation::params::Parameters;
use crate::simulation::states::{initialize, NVec2, ParticleCollection};

#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
pub struct Scenario {
    engine: Engine,
    pub window: WindowSettings,
    parameters: Parameters,
    pub particles: ParticleCollection,
    // derived from `parameters` in `from_parts`
    forces: ForceSet,
    constraints: ForceSet,
    floor: Floor,
    scratch: Vec<NVec2>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        // Engine (runtime) from EngineConfig
        let engine = Engine {
            tick_hz: cfg.engine.tick_hz,
            frames: cfg.engine.frames,
        };
        engine.validate()?;

        let window = WindowSettings {
            width: cfg.window.width,
            height: cfg.window.height,
            title: cfg.window.title,
        };
        window.validate()?;

        // The floor sits on the bottom edge of the window unless placed explicitly
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            gravity: p_cfg.gravity,
            min_distance: p_cfg.min_distance,
            spring_constant: p_cfg.spring_constant,
            bounce_factor: p_cfg.bounce_factor,
            floor_y: p_cfg.floor_y.unwrap_or(window.height),
        };
        parameters.validate()?;

        let ring = cfg.ring;
        let particles = initialize(
            ring.count,
            NVec2::new(ring.center[0], ring.center[1]),
            ring.radius,
            ring.particle_radius,
            ring.mass,
        )?;

        log::info!(
            "scenario: {} particles, gravity {}, min distance {}, spring {}, bounce {}, floor at {}",
            particles.len(),
            parameters.gravity,
            parameters.min_distance,
            parameters.spring_constant,
            parameters.bounce_factor,
            parameters.floor_y
        );

        Self::from_parts(engine, window, parameters, particles)
    }

    /// Assemble a scenario around an existing ring.
    /// Engine, window and parameters are validated here.
    pub fn from_parts(
        engine: Engine,
        window: WindowSettings,
        parameters: Parameters,
        particles: ParticleCollection,
    ) -> Result<Self, SimError> {
        engine.validate()?;
        window.validate()?;
        parameters.validate()?;

        Ok(Self {
            forces: gravity_set(&parameters),
            constraints: constraint_set(&parameters),
            floor: floor_of(&parameters),
            scratch: Vec::with_capacity(particles.len()),
            engine,
            window,
            parameters,
            particles,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The floor the step resolves against
    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    /// One fixed step of the simulation
    pub fn tick(&mut self) -> StepReport {
        euler_step_with(
            &mut self.particles,
            &self.forces,
            &self.constraints,
            &self.floor,
            &mut self.scratch,
        )
    }

    /// Whether the configured frame budget is used up
    pub fn finished(&self) -> bool {
        self.engine
            .frames
            .is_some_and(|limit| self.particles.frame() >= limit)
    }
}
