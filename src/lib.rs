pub mod simulation;
pub mod configuration;
#[cfg(feature = "viewer")]
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{initialize, NVec2, Particle, ParticleCollection};
pub use simulation::forces::{Force, ForceSet, UniformGravity};
pub use simulation::constraints::{MinDistanceSpring, COINCIDENT_DIRECTION};
pub use simulation::boundary::Floor;
pub use simulation::params::Parameters;
pub use simulation::error::SimError;
pub use simulation::integrator::{euler_step, euler_step_with, step, StepReport};
pub use simulation::engine::{Engine, WindowSettings};
pub use simulation::scenario::Scenario;
pub use simulation::driver::{run_headless, Termination};

pub use configuration::config::{EngineConfig, WindowConfig, ParametersConfig, RingConfig, ScenarioConfig};

#[cfg(feature = "viewer")]
pub use visualization::balloon_vis2d::run_2d;

pub use benchmark::benchmark::bench_step;
